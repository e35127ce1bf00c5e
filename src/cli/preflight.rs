//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available before
//! starting a run that would otherwise fail midway. The API key check runs
//! before any network activity.

use crate::error::{NotatError, Result};
use std::process::Command;

/// Run all pre-flight checks for the notes pipeline.
pub fn check() -> Result<()> {
    check_api_key()?;
    check_tool("yt-dlp")?;
    check_tool("ffmpeg")?;
    check_tool("ffprobe")?;
    Ok(())
}

/// Check that the OpenAI API key is configured.
pub fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(NotatError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(NotatError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

/// Check that an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    // ffmpeg/ffprobe use -version (single dash), others use --version
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };

    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(NotatError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(NotatError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(NotatError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_check_reflects_environment() {
        // Exercise both branches within one test to avoid races with
        // parallel tests reading the same variable
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        assert!(check_api_key().is_ok());

        std::env::set_var("OPENAI_API_KEY", "");
        let err = check_api_key().unwrap_err();
        assert!(matches!(err, NotatError::Config(_)));

        std::env::remove_var("OPENAI_API_KEY");
        let err = check_api_key().unwrap_err();
        assert!(matches!(err, NotatError::Config(_)));
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let err = check_tool("notat-no-such-tool").unwrap_err();
        assert!(matches!(err, NotatError::ToolNotFound(_)));
    }
}
