//! Host-side collaborators for the CLI.

use std::path::PathBuf;

use tint_switcher::{ApplyError, StatusIndicator, ThemeApplier};

/// Applies themes by recording them: into the state file when one was
/// given, and onto stdout either way.
pub struct CliApplier {
	state_file: Option<PathBuf>,
}

impl CliApplier {
	pub fn new(state_file: Option<PathBuf>) -> Self {
		Self { state_file }
	}
}

impl ThemeApplier for CliApplier {
	fn apply(&mut self, theme: &str) -> Result<(), ApplyError> {
		if let Some(path) = &self.state_file {
			std::fs::write(path, theme).map_err(|e| ApplyError::Host(e.to_string()))?;
		}
		println!("theme applied: {theme}");
		Ok(())
	}
}

/// Mirrors the switcher's status text onto stderr.
pub struct StderrStatus;

impl StatusIndicator for StderrStatus {
	fn set_text(&mut self, text: &str) {
		eprintln!("[{text}]");
	}
}
