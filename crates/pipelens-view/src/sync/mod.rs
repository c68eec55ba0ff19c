//! Backend synchronization for the pipeline view.
//!
//! Backend updates reach the view through one explicit path: events are
//! pushed into a bounded queue via [`SyncHandle`] and drained by a
//! [`SyncDispatcher`] that owns the view and applies every mutation from a
//! single logical thread of control. Hosts that receive updates from
//! several concurrent sources serialize them into this queue; the view
//! itself never needs a lock.

mod config;
mod dispatcher;
mod event;
mod source;

pub use config::SyncConfig;
pub use dispatcher::{SyncDispatcher, SyncHandle};
pub use event::UpdateEvent;
pub use source::SnapshotSource;
