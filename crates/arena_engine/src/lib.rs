//! Parser arena engine: engine clients, dispatch orchestration and export.
mod client;
mod export;
mod filename;
mod orchestrator;
mod types;

pub use client::{ClientSettings, EngineClient, ReqwestEngineClient};
pub use export::{serialize, write_artifact, ExportArtifact, ExportError, ExportFormat};
pub use filename::export_filename;
pub use orchestrator::{EventSink, NullSink, Orchestrator, OrchestratorHandle};
pub use types::{ArenaEvent, FailureKind, InvokeError, RunReport};
