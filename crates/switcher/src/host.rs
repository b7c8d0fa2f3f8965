//! Collaborator seams toward the hosting editor.

use thiserror::Error;

/// Errors surfaced by a [`ThemeApplier`].
#[derive(Debug, Error)]
pub enum ApplyError {
	/// The requested theme name has no known definition in the host.
	#[error("unknown theme: {0}")]
	UnknownTheme(String),

	/// The host failed to persist or activate the theme.
	#[error("host failed to apply theme: {0}")]
	Host(String),
}

/// Applies a resolved theme in the hosting environment.
///
/// Implementations write a setting, copy a theme definition into the active
/// slot, or whatever else activation means to the host. The switcher calls
/// this at most once per fired activation and never retries a failure; the
/// next qualifying event re-triggers resolution instead.
pub trait ThemeApplier {
	fn apply(&mut self, theme: &str) -> Result<(), ApplyError>;
}

impl<T: ThemeApplier + ?Sized> ThemeApplier for Box<T> {
	fn apply(&mut self, theme: &str) -> Result<(), ApplyError> {
		(**self).apply(theme)
	}
}

/// Reflects the current theme for user visibility.
pub trait StatusIndicator {
	fn set_text(&mut self, text: &str);
}
