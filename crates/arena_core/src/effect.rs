use crate::{DispatchTicket, Document};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Invoke one engine on the document. One effect per selected engine.
    Dispatch {
        ticket: DispatchTicket,
        document: Document,
    },
}
