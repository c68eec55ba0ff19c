//! Single-consumer dispatch loop applying backend updates to the view.

use std::ops::ControlFlow;

use tokio::sync::mpsc;

use super::config::SyncConfig;
use super::event::UpdateEvent;
use super::source::SnapshotSource;
use crate::error::{ViewError, ViewResult};
use crate::view::PipelineView;

/// Tracing target for sync operations.
const TRACING_TARGET: &str = "pipelens_view::sync";

/// Producer side of the update queue.
///
/// Clonable; every backend collaborator pushes through a handle. The queue
/// is the only mutation entry point for a dispatched view; renderers hold
/// subscriptions, never a handle.
#[derive(Debug, Clone)]
pub struct SyncHandle {
    tx: mpsc::Sender<UpdateEvent>,
}

impl SyncHandle {
    /// Enqueues an event, waiting for queue space.
    pub async fn push(&self, event: UpdateEvent) -> ViewResult<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| ViewError::ChannelClosed)
    }

    /// Enqueues an event without waiting.
    pub fn try_push(&self, event: UpdateEvent) -> ViewResult<()> {
        self.tx.try_send(event).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => ViewError::ChannelFull,
            mpsc::error::TrySendError::Closed(_) => ViewError::ChannelClosed,
        })
    }

    /// Polls a snapshot source once and enqueues everything it returned.
    ///
    /// Returns the number of events forwarded. Scheduling repeated polls
    /// (intervals, backoff, cancellation) is the caller's business.
    pub async fn pump<S: SnapshotSource + ?Sized>(&self, source: &mut S) -> ViewResult<usize> {
        let events = source.poll().await?;
        let count = events.len();
        for event in events {
            self.push(event).await?;
        }
        Ok(count)
    }
}

/// Consumer side of the update queue; owns the view while dispatching.
///
/// All observable mutation happens inside [`apply`](Self::apply), called
/// from whatever single logical thread drives [`run`](Self::run). No other
/// code can reach the view in the meantime, which is the whole locking
/// story of this crate.
#[derive(Debug)]
pub struct SyncDispatcher {
    view: PipelineView,
    rx: mpsc::Receiver<UpdateEvent>,
}

impl SyncDispatcher {
    /// Creates an update queue around a view.
    ///
    /// Returns the producer handle and the dispatcher holding the consumer
    /// end.
    pub fn channel(view: PipelineView, config: &SyncConfig) -> (SyncHandle, Self) {
        let (tx, rx) = mpsc::channel(config.channel_capacity());
        (SyncHandle { tx }, Self { view, rx })
    }

    /// Returns the dispatched view.
    pub fn view(&self) -> &PipelineView {
        &self.view
    }

    /// Applies one update event.
    ///
    /// Returns `Break` when the event asks the dispatcher to stop. Errors
    /// propagate to the caller: a snapshot that cannot become or match a
    /// node is never silently dropped.
    pub fn apply(&mut self, event: UpdateEvent) -> ViewResult<ControlFlow<()>> {
        match event {
            UpdateEvent::Stage(snapshot) => {
                tracing::trace!(
                    target: TRACING_TARGET,
                    id = snapshot.id,
                    state = %snapshot.state,
                    "Applying stage update"
                );
                self.view.apply(&snapshot)?;
            }
            UpdateEvent::Pipeline(snapshot) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    stage_count = snapshot.stage_count(),
                    "Applying full pipeline refresh"
                );
                self.view.apply_pipeline(&snapshot)?;
            }
            UpdateEvent::Remove(element) => {
                self.view.remove(element);
            }
            UpdateEvent::Shutdown => {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Drains the queue until shutdown, then hands the view back.
    ///
    /// Stops when a [`UpdateEvent::Shutdown`] arrives or every handle has
    /// been dropped. The first failing event aborts the loop with its
    /// error.
    pub async fn run(mut self) -> ViewResult<PipelineView> {
        tracing::debug!(target: TRACING_TARGET, "Sync dispatcher started");

        while let Some(event) = self.rx.recv().await {
            if self.apply(event)?.is_break() {
                break;
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            node_count = self.view.len(),
            "Sync dispatcher stopped"
        );
        Ok(self.view)
    }
}

#[cfg(test)]
mod tests {
    use pipelens_graph::definition::{
        AnnoTaskAttributes, DataExportAttributes, ElementId, PipelineSnapshot, StageSnapshot,
    };
    use pipelens_graph::state::NodeState;

    use super::*;

    fn seed_view() -> PipelineView {
        let mut snapshot = PipelineSnapshot::new();
        snapshot.add_stage(
            StageSnapshot::annotation_task(
                11,
                ElementId::from_raw(1),
                NodeState::Pending,
                AnnoTaskAttributes::new(),
            )
            .with_outputs([ElementId::from_raw(2)]),
        );
        snapshot.add_stage(StageSnapshot::data_export(
            21,
            ElementId::from_raw(2),
            NodeState::Pending,
            DataExportAttributes::new(),
        ));
        PipelineView::from_snapshot(&snapshot).unwrap()
    }

    fn running_task(progress: f32) -> UpdateEvent {
        UpdateEvent::Stage(StageSnapshot::annotation_task(
            11,
            ElementId::from_raw(1),
            NodeState::Running,
            AnnoTaskAttributes::new().with_progress(progress),
        ))
    }

    #[tokio::test]
    async fn test_events_applied_in_push_order() {
        let config = SyncConfig::new().with_channel_capacity(8);
        let (handle, dispatcher) = SyncDispatcher::channel(seed_view(), &config);

        handle.push(running_task(30.0)).await.unwrap();
        handle.push(running_task(60.0)).await.unwrap();
        handle
            .push(UpdateEvent::Remove(ElementId::from_raw(2)))
            .await
            .unwrap();
        handle.push(UpdateEvent::Shutdown).await.unwrap();

        let view = dispatcher.run().await.unwrap();
        assert_eq!(view.len(), 1);
        let node = view.get(ElementId::from_raw(1)).unwrap();
        assert_eq!(*node.state().get(), NodeState::Running);
        assert_eq!(*node.progress().unwrap().get(), 60.0);
    }

    #[tokio::test]
    async fn test_run_ends_when_all_handles_drop() {
        let (handle, dispatcher) = SyncDispatcher::channel(seed_view(), &SyncConfig::new());

        handle.push(running_task(10.0)).await.unwrap();
        drop(handle);

        let view = dispatcher.run().await.unwrap();
        assert_eq!(
            *view
                .get(ElementId::from_raw(1))
                .unwrap()
                .progress()
                .unwrap()
                .get(),
            10.0
        );
    }

    #[tokio::test]
    async fn test_invalid_event_aborts_with_error() {
        let (handle, dispatcher) = SyncDispatcher::channel(seed_view(), &SyncConfig::new());

        let mut bad = StageSnapshot::annotation_task(
            99,
            ElementId::from_raw(9),
            NodeState::Running,
            AnnoTaskAttributes::new(),
        );
        bad.element = None;
        handle.push(UpdateEvent::Stage(bad)).await.unwrap();
        drop(handle);

        assert!(dispatcher.run().await.is_err());
    }

    #[tokio::test]
    async fn test_pump_forwards_source_events() {
        struct ScriptedSource(Vec<UpdateEvent>);

        #[async_trait::async_trait]
        impl SnapshotSource for ScriptedSource {
            async fn poll(&mut self) -> ViewResult<Vec<UpdateEvent>> {
                Ok(std::mem::take(&mut self.0))
            }
        }

        let (handle, mut dispatcher) = SyncDispatcher::channel(seed_view(), &SyncConfig::new());
        let mut source = ScriptedSource(vec![running_task(80.0), UpdateEvent::Shutdown]);

        let forwarded = handle.pump(&mut source).await.unwrap();
        assert_eq!(forwarded, 2);
        assert_eq!(handle.pump(&mut source).await.unwrap(), 0);

        drop(handle);
        let mut stopped = false;
        while let Ok(event) = dispatcher.rx.try_recv() {
            if dispatcher.apply(event).unwrap().is_break() {
                stopped = true;
                break;
            }
        }
        assert!(stopped);
        assert_eq!(
            *dispatcher
                .view()
                .get(ElementId::from_raw(1))
                .unwrap()
                .progress()
                .unwrap()
                .get(),
            80.0
        );
    }

    #[test]
    fn test_try_push_reports_full_queue() {
        let (handle, _dispatcher) =
            SyncDispatcher::channel(PipelineView::new(), &SyncConfig::new().with_channel_capacity(1));

        handle.try_push(UpdateEvent::Shutdown).unwrap();
        assert!(matches!(
            handle.try_push(UpdateEvent::Shutdown),
            Err(ViewError::ChannelFull)
        ));
    }
}
