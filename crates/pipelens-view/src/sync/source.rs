//! Seam for the backend snapshot collaborator.

use super::event::UpdateEvent;
use crate::error::ViewResult;

/// A backend collaborator that produces update events.
///
/// How snapshots are obtained (polling an HTTP endpoint, a websocket
/// subscription, a test fixture) is the implementor's business; the sync
/// layer only asks for whatever has accumulated since the last poll.
/// Implementors that aggregate several concurrent sources are responsible
/// for serializing them into the returned order.
#[async_trait::async_trait]
pub trait SnapshotSource {
    /// Returns the update events accumulated since the previous poll.
    ///
    /// An empty vector means no change; failures should be mapped onto
    /// [`ViewError::Source`](crate::ViewError::Source).
    async fn poll(&mut self) -> ViewResult<Vec<UpdateEvent>>;
}
