use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use domain::{note_text, AnalysisType, TextAnalysisService};
use log::*;
use service::config::{self, Config};
use service::logging::Logger;
use tokio_util::sync::CancellationToken;

mod render;

#[derive(Parser)]
#[command(name = "notes_assistant", author, version, long_about = None)]
#[command(about = "Summarize, tag and proofread a note")]
struct Cli {
    /// Note to analyze. Reads standard input when omitted.
    file: Option<PathBuf>,

    /// Kind of analysis to request: general, summary, keywords or sentiment
    #[arg(short = 't', long = "type", default_value_t = AnalysisType::General)]
    analysis_type: AnalysisType,

    /// Treat the note as rich-text editor HTML and analyze only its text
    #[arg(long)]
    html: bool,

    /// Print the result as JSON instead of a text report
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_env();
    let cli = Cli::parse();
    Logger::init_logger(&cli.config);

    let raw = read_note(cli.file.as_deref())?;
    let text = if cli.html {
        note_text::plain_text(&raw)
    } else {
        raw
    };
    if text.trim().is_empty() {
        bail!("Nothing to analyze: the note is empty");
    }

    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, skipping further retries");
            ctrl_c_token.cancel();
        }
    });

    let service = TextAnalysisService::from_config_with_cancellation(&cli.config, token)
        .context("Failed to set up text analysis")?;
    let result = service.analyze_text(&text, cli.analysis_type).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::report(&result));
    }

    Ok(())
}

fn read_note(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read note from {}", path.display())),
        None => {
            let mut note = String::new();
            std::io::stdin()
                .read_to_string(&mut note)
                .context("Failed to read note from standard input")?;
            Ok(note)
        }
    }
}
