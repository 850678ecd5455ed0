use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use arena_core::{update, AppState, DispatchTicket, Effect, Msg, ParseResponse, TaskStatus};
use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::{ArenaEvent, EngineClient, InvokeError, RunReport};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ArenaEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ArenaEvent) {}
}

/// Delivers UI messages to an orchestrator, including while a run is in flight.
#[derive(Debug, Clone)]
pub struct OrchestratorHandle {
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl OrchestratorHandle {
    pub fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }
}

struct Settlement {
    ticket: DispatchTicket,
    result: Result<ParseResponse, InvokeError>,
    elapsed: Duration,
}

/// Owns the arena state and fans dispatches out to an [`EngineClient`].
///
/// All dispatches of a run are polled from the task calling [`Orchestrator::run`];
/// each settlement is folded into the state through [`arena_core::update`] as soon as
/// it arrives, and messages from [`OrchestratorHandle`]s are applied in between.
pub struct Orchestrator {
    client: Arc<dyn EngineClient>,
    sink: Arc<dyn EventSink>,
    state: AppState,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn EngineClient>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            client,
            sink: Arc::new(NullSink),
            state: AppState::new(),
            msg_tx,
            msg_rx,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn handle(&self) -> OrchestratorHandle {
        OrchestratorHandle {
            msg_tx: self.msg_tx.clone(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies one message and returns the effects it produced without running them.
    pub fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    /// Runs every selected engine against the active document and returns once
    /// all of them have settled. A run without document or selection, or while
    /// another run is in progress, is a no-op recorded in the global error.
    pub async fn run(&mut self) -> RunReport {
        // A run may already have been requested through a handle.
        let mut effects = self.drain_inbox();
        if !self.state.in_progress() {
            effects.extend(self.apply(Msg::ProcessClicked));
        }
        if effects.is_empty() {
            engine_warn!(
                "Run rejected: {}",
                self.state.global_error().unwrap_or("nothing to dispatch")
            );
            return RunReport::default();
        }

        let started = Instant::now();
        let mut report = RunReport::default();
        let mut in_flight = FuturesUnordered::new();
        for effect in effects {
            in_flight.push(self.dispatch(effect));
            report.dispatched += 1;
        }
        engine_info!(
            "Dispatched {} engine(s) for generation {}",
            report.dispatched,
            self.state.generation()
        );

        loop {
            tokio::select! {
                biased;
                Some(msg) = self.msg_rx.recv() => {
                    for effect in self.apply(msg) {
                        in_flight.push(self.dispatch(effect));
                        report.dispatched += 1;
                    }
                }
                settled = in_flight.next() => match settled {
                    Some(settlement) => self.settle(settlement, &mut report),
                    None => break,
                },
            }
        }

        // Messages queued while the last dispatch settled still belong to this run;
        // the run is still in progress, so none of them can start dispatches.
        let late = self.drain_inbox();
        debug_assert!(late.is_empty());
        self.apply(Msg::RunFinished);
        report.elapsed = started.elapsed();
        engine_info!(
            "Run finished in {:?}: {} succeeded, {} failed, {} discarded",
            report.elapsed,
            report.succeeded,
            report.failed,
            report.discarded
        );
        self.sink.emit(ArenaEvent::RunFinished(report));
        report
    }

    fn drain_inbox(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            effects.extend(self.apply(msg));
        }
        effects
    }

    fn dispatch(&self, effect: Effect) -> impl Future<Output = Settlement> + Send + 'static {
        let Effect::Dispatch { ticket, document } = effect;
        let client = Arc::clone(&self.client);
        let started = Instant::now();
        engine_debug!(
            "Dispatch engine={} generation={} file={}",
            ticket.engine,
            ticket.generation,
            document.name()
        );
        self.sink.emit(ArenaEvent::Dispatched { ticket });

        async move {
            let result = client.invoke(&document, ticket.engine).await;
            Settlement {
                ticket,
                result,
                elapsed: started.elapsed(),
            }
        }
    }

    fn settle(&mut self, settlement: Settlement, report: &mut RunReport) {
        let Settlement {
            ticket,
            result,
            elapsed,
        } = settlement;

        if !self.state.accepts(ticket) {
            engine_debug!(
                "Discarding stale settlement engine={} generation={} (current {})",
                ticket.engine,
                ticket.generation,
                self.state.generation()
            );
            report.discarded += 1;
            self.sink.emit(ArenaEvent::Discarded { ticket });
            return;
        }

        let status = match &result {
            Ok(response) => {
                engine_info!(
                    "Engine {} succeeded in {:?} ({} page(s))",
                    ticket.engine,
                    elapsed,
                    response.metadata.pages_processed
                );
                report.succeeded += 1;
                TaskStatus::Success
            }
            Err(err) => {
                engine_warn!(
                    "Engine {} failed in {:?} [{}]: {}",
                    ticket.engine,
                    elapsed,
                    err.kind,
                    err.message
                );
                report.failed += 1;
                TaskStatus::Error
            }
        };

        self.apply(Msg::EngineSettled {
            ticket,
            result: result.map_err(|err| err.message),
            elapsed,
        });
        self.sink.emit(ArenaEvent::Settled {
            ticket,
            status,
            elapsed,
        });
    }
}
