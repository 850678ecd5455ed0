use std::fmt::Write;
use std::time::Duration;

use arena_core::{AppViewModel, ResultCardView, TaskStatus};
use arena_engine::{ArenaEvent, EventSink};

pub const PREVIEW_LINES: usize = 12;

/// Renders the result grid as text: one block per selected engine, in selection order.
pub fn render(view: &AppViewModel, preview_lines: Option<usize>) -> String {
    let mut out = String::new();
    if let Some(document) = &view.document {
        let _ = writeln!(out, "Document: {} ({})", document.name, document.size_label);
    }
    if let Some(error) = &view.global_error {
        let _ = writeln!(out, "Error: {error}");
    }
    for card in &view.cards {
        out.push('\n');
        render_card(&mut out, card, preview_lines);
    }
    out
}

fn render_card(out: &mut String, card: &ResultCardView, preview_lines: Option<usize>) {
    let _ = write!(out, "== {} [{}]", card.label, status_label(card.status));
    if let Some(elapsed) = card.elapsed {
        let _ = write!(out, " {}", format_elapsed(elapsed));
    }
    out.push_str(" ==\n");

    match (card.status, card.body.as_deref()) {
        (TaskStatus::Idle, _) => out.push_str("Waiting to start...\n"),
        (TaskStatus::Pending, _) => out.push_str("Processing...\n"),
        (TaskStatus::Error, message) => {
            let _ = writeln!(out, "{}", message.unwrap_or("An error occurred"));
        }
        (TaskStatus::Success, content) => {
            let content = content.unwrap_or_default();
            let total = content.lines().count();
            let limit = preview_lines.unwrap_or(total);
            for line in content.lines().take(limit) {
                let _ = writeln!(out, "{line}");
            }
            if total > limit {
                let _ = writeln!(out, "... ({} more lines)", total - limit);
            }
        }
    }
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Idle => "idle",
        TaskStatus::Pending => "pending",
        TaskStatus::Success => "success",
        TaskStatus::Error => "error",
    }
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

/// Prints one line per dispatch and settlement while a run is in flight.
pub struct TerminalSink;

impl EventSink for TerminalSink {
    fn emit(&self, event: ArenaEvent) {
        match event {
            ArenaEvent::Dispatched { ticket } => {
                eprintln!("{}: processing...", ticket.engine.label());
            }
            ArenaEvent::Settled {
                ticket,
                status,
                elapsed,
            } => {
                eprintln!(
                    "{}: {} in {}",
                    ticket.engine.label(),
                    status_label(status),
                    format_elapsed(elapsed)
                );
            }
            ArenaEvent::Discarded { ticket } => {
                eprintln!("{}: result dropped (document changed)", ticket.engine.label());
            }
            ArenaEvent::RunFinished(report) => {
                eprintln!(
                    "Finished in {}: {} succeeded, {} failed",
                    format_elapsed(report.elapsed),
                    report.succeeded,
                    report.failed
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use arena_core::{
        update, AppState, DispatchTicket, Document, EngineId, Msg, ParseMetadata, ParseResponse,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn settled_view() -> AppViewModel {
        let mut state = AppState::new();
        for msg in [
            Msg::DocumentLoaded(Document::new("paper.pdf", vec![0u8; 1536])),
            Msg::EngineToggled(EngineId::Pypdf2),
            Msg::EngineToggled(EngineId::Docling),
            Msg::EngineToggled(EngineId::Pymupdf),
            Msg::ProcessClicked,
        ] {
            state = update(state, msg).0;
        }
        let generation = state.generation();
        let ok = ParseResponse {
            status: "success".to_string(),
            metadata: ParseMetadata {
                parser: "pypdf2".to_string(),
                pages_processed: 1,
                filename: "paper.pdf".to_string(),
                duration_ms: 5.0,
            },
            content: "line 1\nline 2\nline 3".to_string(),
        };
        let (state, _) = update(
            state,
            Msg::EngineSettled {
                ticket: DispatchTicket {
                    engine: EngineId::Pypdf2,
                    generation,
                },
                result: Ok(ok),
                elapsed: Duration::from_millis(1250),
            },
        );
        let (state, _) = update(
            state,
            Msg::EngineSettled {
                ticket: DispatchTicket {
                    engine: EngineId::Docling,
                    generation,
                },
                result: Err("engine unavailable".to_string()),
                elapsed: Duration::from_millis(40),
            },
        );
        state.view()
    }

    #[test]
    fn renders_cards_in_selection_order() {
        let text = render(&settled_view(), Some(2));

        assert_eq!(
            text,
            "Document: paper.pdf (1.5 KB)\n\
             \n== PyPDF2 [success] 1.25s ==\nline 1\nline 2\n... (1 more lines)\n\
             \n== Docling [error] 0.04s ==\nengine unavailable\n\
             \n== PyMuPDF [pending] ==\nProcessing...\n"
        );
    }

    #[test]
    fn full_output_prints_every_line() {
        let text = render(&settled_view(), None);
        assert!(text.contains("line 3\n"));
        assert!(!text.contains("more lines"));
    }
}
