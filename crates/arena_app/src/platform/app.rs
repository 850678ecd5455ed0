use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use arena_core::{AppState, Document, Msg};
use arena_engine::{
    serialize, write_artifact, ExportFormat, Orchestrator, ReqwestEngineClient,
};
use engine_logging::{engine_error, engine_info};

use super::cli::{Cli, ExportChoice};
use super::config::ArenaConfig;
use super::logging::{self, LogDestination};
use super::render::{self, TerminalSink, PREVIEW_LINES};

/// Exit status when at least one engine failed.
const PARTIAL_FAILURE: u8 = 2;

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (mut config, _source) = ArenaConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);

    let document = load_document(&cli.file)?;
    let client = ReqwestEngineClient::new(config.client_settings())
        .context("failed to build HTTP client")?;
    engine_info!(
        "Using parsing service at {}",
        client.settings().base_url
    );

    let mut orchestrator = Orchestrator::new(Arc::new(client)).with_sink(Arc::new(TerminalSink));
    orchestrator.apply(Msg::DocumentLoaded(document));
    for engine in config.selection() {
        orchestrator.apply(Msg::EngineToggled(engine));
    }

    let report = orchestrator.run().await;
    if report.is_noop() {
        bail!(
            "{}",
            orchestrator
                .state()
                .global_error()
                .unwrap_or("nothing to process")
        );
    }

    let preview = if cli.full { None } else { Some(PREVIEW_LINES) };
    print!("{}", render::render(&orchestrator.state().view(), preview));

    let export = match (cli.format, cli.export_dir.is_some()) {
        (Some(choice), _) => Some(choice),
        (None, true) => Some(ExportChoice::Both),
        (None, false) => None,
    };
    if let Some(choice) = export {
        export_results(orchestrator.state(), &config.output_dir, choice)?;
    }

    Ok(if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(PARTIAL_FAILURE)
    })
}

fn load_document(path: &Path) -> anyhow::Result<Document> {
    let content =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    if content.is_empty() {
        bail!("{} is empty", path.display());
    }
    Ok(Document::new(name, content))
}

fn formats(choice: ExportChoice) -> &'static [ExportFormat] {
    match choice {
        ExportChoice::Md => &[ExportFormat::Markdown],
        ExportChoice::Json => &[ExportFormat::Json],
        ExportChoice::Both => &[ExportFormat::Markdown, ExportFormat::Json],
    }
}

/// Writes every successful result; failed engines are skipped.
fn export_results(state: &AppState, dir: &Path, choice: ExportChoice) -> anyhow::Result<()> {
    for engine in state.selection() {
        let Some(response) = state.result(*engine).and_then(|r| r.success_payload()) else {
            continue;
        };
        for format in formats(choice) {
            let artifact = serialize(*engine, response, *format)?;
            match write_artifact(dir, &artifact) {
                Ok(path) => {
                    engine_info!("Exported {} as {}", engine, artifact.content_type);
                    println!("Saved {}", path.display());
                }
                Err(err) => {
                    engine_error!("Export of {} failed: {}", engine, err);
                    return Err(err).with_context(|| {
                        format!("failed to export {} to {}", artifact.filename, dir.display())
                    });
                }
            }
        }
    }
    Ok(())
}
