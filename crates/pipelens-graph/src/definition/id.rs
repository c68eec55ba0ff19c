//! Typed backend identifiers.
//!
//! The backend keys every entity on an integer primary key. Each id space
//! gets its own newtype so a task id can never be confused with the
//! pipeline-element id that positions a node in the graph.

use std::num::ParseIntError;
use std::str::FromStr;

use derive_more::{Debug, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identifier of a pipeline element (`peN` on the wire).
///
/// This is the key the graph layer uses for node lookup and edge wiring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct ElementId(i64);

impl ElementId {
    /// Creates an element id from a raw backend id.
    #[inline]
    pub const fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw backend id.
    #[inline]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for ElementId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(i64::from_str(s)?))
    }
}

/// Identifier of an annotation-task instance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a task id from a raw backend id.
    #[inline]
    pub const fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw backend id.
    #[inline]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Identifier of a data-export job.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct ExportId(i64);

impl ExportId {
    /// Creates an export id from a raw backend id.
    #[inline]
    pub const fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw backend id.
    #[inline]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}
