use std::time::Duration;

use arena_core::{
    update, AppState, DispatchTicket, Document, Effect, EngineId, Msg, ParseMetadata,
    ParseResponse, TaskResult, TaskStatus, ALREADY_RUNNING_ERROR,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn ready_state(engines: &[EngineId]) -> AppState {
    let (mut state, _) = update(
        AppState::new(),
        Msg::DocumentLoaded(Document::new("paper.pdf", &b"%PDF-1.4"[..])),
    );
    for engine in engines {
        state = update(state, Msg::EngineToggled(*engine)).0;
    }
    state
}

fn tickets(effects: &[Effect]) -> Vec<DispatchTicket> {
    effects
        .iter()
        .map(|effect| match effect {
            Effect::Dispatch { ticket, .. } => *ticket,
        })
        .collect()
}

fn response(engine: EngineId, content: &str) -> ParseResponse {
    ParseResponse {
        status: "success".to_string(),
        metadata: ParseMetadata {
            parser: engine.as_str().to_string(),
            pages_processed: 1,
            filename: "paper.pdf".to_string(),
            duration_ms: 12.5,
        },
        content: content.to_string(),
    }
}

fn settled(ticket: DispatchTicket, result: Result<ParseResponse, String>, ms: u64) -> Msg {
    Msg::EngineSettled {
        ticket,
        result,
        elapsed: Duration::from_millis(ms),
    }
}

#[test]
fn process_marks_every_selected_engine_pending() {
    init_logging();
    let state = ready_state(&[EngineId::Docling, EngineId::Pypdf2]);

    let (state, effects) = update(state, Msg::ProcessClicked);

    assert!(state.in_progress());
    assert_eq!(
        tickets(&effects),
        vec![
            DispatchTicket {
                engine: EngineId::Docling,
                generation: state.generation(),
            },
            DispatchTicket {
                engine: EngineId::Pypdf2,
                generation: state.generation(),
            },
        ]
    );
    for effect in &effects {
        let Effect::Dispatch { document, .. } = effect;
        assert_eq!(document.name(), "paper.pdf");
    }
    assert_eq!(state.results().len(), 2);
    assert_eq!(state.result(EngineId::Docling), Some(&TaskResult::Pending));
    assert_eq!(state.result(EngineId::Pypdf2), Some(&TaskResult::Pending));
}

#[test]
fn success_and_error_settle_independently() {
    init_logging();
    let state = ready_state(&[EngineId::Docling, EngineId::Pdfminer]);
    let (state, effects) = update(state, Msg::ProcessClicked);
    let ids = tickets(&effects);

    let (state, _) = update(
        state,
        settled(ids[1], Err("engine unavailable".to_string()), 40),
    );
    assert_eq!(state.result(EngineId::Docling), Some(&TaskResult::Pending));
    assert_eq!(
        state.result(EngineId::Pdfminer),
        Some(&TaskResult::Error {
            message: "engine unavailable".to_string(),
            elapsed: Some(Duration::from_millis(40)),
        })
    );

    let (state, _) = update(state, settled(ids[0], Ok(response(EngineId::Docling, "X")), 200));
    let (state, _) = update(state, Msg::RunFinished);

    assert!(!state.in_progress());
    let docling = state.result(EngineId::Docling).expect("docling result");
    assert_eq!(docling.status(), TaskStatus::Success);
    assert_eq!(docling.elapsed(), Some(Duration::from_millis(200)));
    assert_eq!(
        docling.success_payload().map(|r| r.content.as_str()),
        Some("X")
    );
}

#[test]
fn second_process_is_rejected_while_running() {
    init_logging();
    let state = ready_state(&[EngineId::Docling]);
    let (state, _) = update(state, Msg::ProcessClicked);

    let (state, effects) = update(state, Msg::ProcessClicked);

    assert!(effects.is_empty());
    assert_eq!(state.global_error(), Some(ALREADY_RUNNING_ERROR));
    assert_eq!(state.result(EngineId::Docling), Some(&TaskResult::Pending));
}

#[test]
fn toggles_are_ignored_while_running() {
    init_logging();
    let state = ready_state(&[EngineId::Docling]);
    let (state, _) = update(state, Msg::ProcessClicked);

    let (state, _) = update(state, Msg::EngineToggled(EngineId::Pymupdf));
    let (state, _) = update(state, Msg::EngineToggled(EngineId::Docling));

    assert_eq!(state.selection(), &[EngineId::Docling]);
}

#[test]
fn redispatch_replaces_previous_result_entirely() {
    init_logging();
    let state = ready_state(&[EngineId::Pymupdf]);
    let (state, effects) = update(state, Msg::ProcessClicked);
    let first = tickets(&effects)[0];
    let (state, _) = update(state, settled(first, Ok(response(EngineId::Pymupdf, "first")), 10));
    let (state, _) = update(state, Msg::RunFinished);

    let (state, effects) = update(state, Msg::ProcessClicked);
    let second = tickets(&effects)[0];
    assert_eq!(state.result(EngineId::Pymupdf), Some(&TaskResult::Pending));

    let (state, _) = update(state, settled(second, Err("boom".to_string()), 5));
    assert_eq!(
        state.result(EngineId::Pymupdf),
        Some(&TaskResult::Error {
            message: "boom".to_string(),
            elapsed: Some(Duration::from_millis(5)),
        })
    );
}

#[test]
fn stale_settlement_after_document_replacement_is_discarded() {
    init_logging();
    let state = ready_state(&[EngineId::Docling, EngineId::Pdfminer]);
    let (state, effects) = update(state, Msg::ProcessClicked);
    let ids = tickets(&effects);
    let old_generation = state.generation();

    let (state, _) = update(
        state,
        Msg::DocumentLoaded(Document::new("other.pdf", &b"%PDF-2.0"[..])),
    );
    assert!(state.results().is_empty());
    assert!(state.generation() > old_generation);
    assert!(!state.accepts(ids[0]));

    let (state, _) = update(state, settled(ids[0], Ok(response(EngineId::Docling, "old")), 10));
    let (state, _) = update(state, settled(ids[1], Err("late".to_string()), 10));

    assert!(state.results().is_empty());
    assert!(state.in_progress());

    let (state, _) = update(state, Msg::RunFinished);
    assert!(!state.in_progress());
    assert!(state.view().can_process);
}

#[test]
fn duplicate_settlement_does_not_overwrite_terminal_result() {
    init_logging();
    let state = ready_state(&[EngineId::Docling]);
    let (state, effects) = update(state, Msg::ProcessClicked);
    let id = tickets(&effects)[0];

    let (state, _) = update(state, settled(id, Ok(response(EngineId::Docling, "kept")), 30));
    let (state, _) = update(state, settled(id, Err("late duplicate".to_string()), 90));

    let result = state.result(EngineId::Docling).expect("docling result");
    assert_eq!(result.status(), TaskStatus::Success);
    assert_eq!(result.elapsed(), Some(Duration::from_millis(30)));
}

#[test]
fn cards_reflect_settled_results() {
    init_logging();
    let state = ready_state(&[EngineId::Pypdf2, EngineId::Docling]);
    let (state, effects) = update(state, Msg::ProcessClicked);
    let ids = tickets(&effects);
    let (state, _) = update(state, settled(ids[0], Ok(response(EngineId::Pypdf2, "text")), 15));
    let (state, _) = update(state, settled(ids[1], Err("crashed".to_string()), 20));
    let (state, _) = update(state, Msg::RunFinished);

    let view = state.view();
    assert_eq!(view.cards[0].status, TaskStatus::Success);
    assert_eq!(view.cards[0].body.as_deref(), Some("text"));
    assert!(view.cards[0].exportable);
    assert_eq!(view.cards[1].status, TaskStatus::Error);
    assert_eq!(view.cards[1].body.as_deref(), Some("crashed"));
    assert!(!view.cards[1].exportable);
    assert!(!view.in_progress);
}
