use std::time::Duration;

use crate::{EngineId, TaskResult, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub document: Option<DocumentView>,
    /// One card per selected engine, in selection order.
    pub cards: Vec<ResultCardView>,
    pub in_progress: bool,
    pub can_process: bool,
    pub global_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCardView {
    pub engine: EngineId,
    pub label: &'static str,
    pub status: TaskStatus,
    pub elapsed: Option<Duration>,
    /// Extracted content on success, the error message on failure.
    pub body: Option<String>,
    pub exportable: bool,
}

impl ResultCardView {
    pub(crate) fn new(engine: EngineId, result: Option<&TaskResult>) -> Self {
        let result = result.cloned().unwrap_or_default();
        let body = match &result {
            TaskResult::Success { response, .. } => Some(response.content.clone()),
            TaskResult::Error { message, .. } => Some(message.clone()),
            TaskResult::Idle | TaskResult::Pending => None,
        };
        Self {
            engine,
            label: engine.label(),
            status: result.status(),
            elapsed: result.elapsed(),
            body,
            exportable: result.success_payload().is_some(),
        }
    }
}

/// Human-readable byte count: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2.25 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn sizes_drop_trailing_zeros() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(500), "500 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }
}
