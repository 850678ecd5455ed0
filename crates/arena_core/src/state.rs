use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;

use crate::view_model::{format_size, AppViewModel, DocumentView, ResultCardView};
use crate::{EngineId, ParseResponse};

/// Document version counter. Bumped whenever the active document changes.
pub type Generation = u64;

/// The single active input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    content: Bytes,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// Lifecycle of one engine's dispatch. Each terminal variant carries only its
/// own fields, so replacing an entry never leaves residue from the previous one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TaskResult {
    #[default]
    Idle,
    Pending,
    Success {
        response: ParseResponse,
        elapsed: Duration,
    },
    Error {
        message: String,
        elapsed: Option<Duration>,
    },
}

impl TaskResult {
    pub fn status(&self) -> TaskStatus {
        match self {
            TaskResult::Idle => TaskStatus::Idle,
            TaskResult::Pending => TaskStatus::Pending,
            TaskResult::Success { .. } => TaskStatus::Success,
            TaskResult::Error { .. } => TaskStatus::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskResult::Success { .. } | TaskResult::Error { .. })
    }

    /// The payload of a successful dispatch; the only thing export accepts.
    pub fn success_payload(&self) -> Option<&ParseResponse> {
        match self {
            TaskResult::Success { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            TaskResult::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            TaskResult::Success { elapsed, .. } => Some(*elapsed),
            TaskResult::Error { elapsed, .. } => *elapsed,
            TaskResult::Idle | TaskResult::Pending => None,
        }
    }
}

/// Per-engine results. Every write replaces the whole entry for one key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultStore {
    entries: BTreeMap<EngineId, TaskResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, engine: EngineId, result: TaskResult) {
        self.entries.insert(engine, result);
    }

    pub fn get(&self, engine: EngineId) -> Option<&TaskResult> {
        self.entries.get(&engine)
    }

    /// Point-in-time copy of every entry.
    pub fn snapshot(&self) -> BTreeMap<EngineId, TaskResult> {
        self.entries.clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EngineId, &TaskResult)> {
        self.entries.iter().map(|(engine, result)| (*engine, result))
    }
}

/// Identifies one dispatch: the engine and the document generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchTicket {
    pub engine: EngineId,
    pub generation: Generation,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    document: Option<Document>,
    selection: Vec<EngineId>,
    results: ResultStore,
    in_progress: bool,
    global_error: Option<String>,
    generation: Generation,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn selection(&self) -> &[EngineId] {
        &self.selection
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn result(&self, engine: EngineId) -> Option<&TaskResult> {
        self.results.get(engine)
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn global_error(&self) -> Option<&str> {
        self.global_error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// True when a settlement for `ticket` may still be written to the store.
    pub fn accepts(&self, ticket: DispatchTicket) -> bool {
        ticket.generation == self.generation
            && matches!(self.results.get(ticket.engine), Some(TaskResult::Pending))
    }

    pub fn view(&self) -> AppViewModel {
        let document = self.document.as_ref().map(|doc| DocumentView {
            name: doc.name().to_string(),
            size_label: format_size(doc.size()),
        });
        let cards = self
            .selection
            .iter()
            .map(|engine| ResultCardView::new(*engine, self.results.get(*engine)))
            .collect();
        AppViewModel {
            document,
            cards,
            in_progress: self.in_progress,
            can_process: self.document.is_some()
                && !self.selection.is_empty()
                && !self.in_progress,
            global_error: self.global_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_document(&mut self, document: Option<Document>) {
        self.document = document;
        self.results.clear();
        self.global_error = None;
        self.generation += 1;
        self.mark_dirty();
    }

    pub(crate) fn toggle_engine(&mut self, engine: EngineId) {
        if let Some(pos) = self.selection.iter().position(|e| *e == engine) {
            self.selection.remove(pos);
        } else {
            self.selection.push(engine);
        }
        self.mark_dirty();
    }

    /// Marks every selected engine pending and returns the tickets to dispatch.
    pub(crate) fn begin_run(&mut self) -> Vec<DispatchTicket> {
        self.in_progress = true;
        self.global_error = None;
        let generation = self.generation;
        let tickets: Vec<_> = self
            .selection
            .iter()
            .map(|engine| DispatchTicket {
                engine: *engine,
                generation,
            })
            .collect();
        for ticket in &tickets {
            self.results.set(ticket.engine, TaskResult::Pending);
        }
        self.mark_dirty();
        tickets
    }

    pub(crate) fn settle(&mut self, engine: EngineId, result: TaskResult) {
        debug_assert!(result.is_terminal());
        self.results.set(engine, result);
        self.mark_dirty();
    }

    pub(crate) fn finish_run(&mut self) {
        self.in_progress = false;
        self.mark_dirty();
    }

    pub(crate) fn set_global_error(&mut self, message: impl Into<String>) {
        self.global_error = Some(message.into());
        self.mark_dirty();
    }

    /// Clears everything but the in-progress flag, which only `finish_run` lowers.
    pub(crate) fn reset(&mut self) {
        self.selection.clear();
        self.replace_document(None);
    }
}
