use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a new input file; replaces any active document.
    DocumentLoaded(crate::Document),
    /// User removed the active document. The selection is kept.
    DocumentRemoved,
    /// User toggled an engine in the selector.
    EngineToggled(crate::EngineId),
    /// User asked to run the selected engines against the active document.
    ProcessClicked,
    /// One dispatch reached a terminal outcome.
    EngineSettled {
        ticket: crate::DispatchTicket,
        result: Result<crate::ParseResponse, String>,
        elapsed: Duration,
    },
    /// Every dispatch of the current run has settled.
    RunFinished,
    /// User cleared document, selection and results.
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
