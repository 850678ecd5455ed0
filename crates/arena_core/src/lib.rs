//! Parser arena core: pure state machine and view-model helpers.
mod effect;
mod engine;
mod msg;
mod payload;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use engine::{EngineId, UnknownEngine};
pub use msg::Msg;
pub use payload::{ParseMetadata, ParseResponse};
pub use state::{
    AppState, DispatchTicket, Document, Generation, ResultStore, TaskResult, TaskStatus,
};
pub use update::{update, ALREADY_RUNNING_ERROR, NO_DOCUMENT_ERROR, NO_SELECTION_ERROR};
pub use view_model::{format_size, AppViewModel, DocumentView, ResultCardView};
