//! Notes command - the default pipeline invocation.

use crate::cli::preflight;
use crate::cli::{NotesArgs, Output};
use crate::config::Settings;
use crate::error::NotatError;
use crate::notes::SynthesisMode;
use crate::orchestrator::{NotesOptions, Orchestrator};
use anyhow::Result;

/// Run the notes pipeline.
pub async fn run_notes(args: &NotesArgs, settings: Settings) -> Result<()> {
    let url = args.url.as_deref().ok_or_else(|| {
        NotatError::InvalidInput(
            "missing video URL (usage: notat <URL> [--output notes.md])".to_string(),
        )
    })?;

    // Fail before any network activity
    if let Err(e) = preflight::check() {
        Output::error(&format!("{}", e));
        Output::info("Run 'notat doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    Output::info(&format!("Processing: {}", url));

    let options = NotesOptions {
        output: args.output.clone(),
        model: args.model.clone(),
        language: args.language.clone(),
        max_chars: args.max_chars,
        keep_audio: args.keep_audio,
        synthesis: args.stitch.then_some(SynthesisMode::Stitch),
    };

    let orchestrator = Orchestrator::new(settings)?;

    match orchestrator.generate_notes(url, &options).await {
        Ok(result) => {
            Output::success(&format!(
                "Wrote notes for '{}' ({} chunk(s)) to {}",
                result.title,
                result.chunks,
                result.output_path.display()
            ));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e.into())
        }
    }
}
