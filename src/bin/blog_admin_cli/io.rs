#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use blog_admin::application::confirm::Confirm;

use crate::client::CliError;

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    read_opt_value(val, file)?
        .ok_or_else(|| CliError::InvalidInput("--body or --body-file is required".into()))
}

/// First line of stdin, without the line ending.
pub fn read_line(prompt: &str) -> Result<String, CliError> {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "{prompt}");
    let _ = stderr.flush();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::InvalidInput(format!("failed to read stdin: {e}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Asks on stderr and reads `y`/`yes` from stdin; anything else declines.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        read_line(&format!("{prompt} [y/N] "))
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}
