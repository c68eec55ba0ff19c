//! Lifecycle state reported by the backend for a running stage.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle phase of a pipeline stage.
///
/// The backend owns the state vocabulary; values this crate does not know
/// are stored opaquely in [`NodeState::Other`] instead of being rejected.
/// Deciding what an unknown state *means* is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// Stage has been scheduled but has not started.
    Pending,
    /// Stage is currently executing.
    Running,
    /// Stage completed successfully.
    Finished,
    /// Stage failed.
    Error,
    /// Any state value this crate does not know about.
    #[strum(default)]
    #[serde(untagged)]
    Other(String),
}

impl NodeState {
    /// Returns whether the stage is currently executing.
    pub fn is_running(&self) -> bool {
        matches!(self, NodeState::Running)
    }

    /// Returns whether the stage completed successfully.
    pub fn is_finished(&self) -> bool {
        matches!(self, NodeState::Finished)
    }

    /// Returns whether the stage failed.
    pub fn is_error(&self) -> bool {
        matches!(self, NodeState::Error)
    }

    /// Returns whether the stage will make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeState::Finished | NodeState::Error)
    }
}
