use crate::{AppState, Effect, Msg, TaskResult};

pub const NO_DOCUMENT_ERROR: &str = "No document selected";
pub const NO_SELECTION_ERROR: &str = "No engines selected";
pub const ALREADY_RUNNING_ERROR: &str = "Processing is already in progress";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DocumentLoaded(document) => {
            state.replace_document(Some(document));
            Vec::new()
        }
        Msg::DocumentRemoved => {
            if state.document().is_some() {
                state.replace_document(None);
            }
            Vec::new()
        }
        Msg::EngineToggled(engine) => {
            // The selector is frozen while a run is in flight.
            if !state.in_progress() {
                state.toggle_engine(engine);
            }
            Vec::new()
        }
        Msg::ProcessClicked => {
            let Some(document) = state.document().cloned() else {
                state.set_global_error(NO_DOCUMENT_ERROR);
                return (state, Vec::new());
            };
            if state.selection().is_empty() {
                state.set_global_error(NO_SELECTION_ERROR);
                return (state, Vec::new());
            }
            if state.in_progress() {
                state.set_global_error(ALREADY_RUNNING_ERROR);
                return (state, Vec::new());
            }

            state
                .begin_run()
                .into_iter()
                .map(|ticket| Effect::Dispatch {
                    ticket,
                    document: document.clone(),
                })
                .collect()
        }
        Msg::EngineSettled {
            ticket,
            result,
            elapsed,
        } => {
            // Settlements for a replaced document, or for a key that is no
            // longer pending, never reach the store.
            if state.accepts(ticket) {
                let result = match result {
                    Ok(response) => TaskResult::Success { response, elapsed },
                    Err(message) => TaskResult::Error {
                        message,
                        elapsed: Some(elapsed),
                    },
                };
                state.settle(ticket.engine, result);
            }
            Vec::new()
        }
        Msg::RunFinished => {
            if state.in_progress() {
                state.finish_run();
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
