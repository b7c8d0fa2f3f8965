//! Workspace theme switching service.
//!
//! Ties together configuration, resolution, and debounced activation: focus
//! and config events feed a [`Switcher`], which recomputes the matching
//! theme and arbitrates when to apply it. All host interaction goes through
//! the [`ThemeApplier`] and [`StatusIndicator`] seams, so the service itself
//! is pure in-memory state driven from a single logical thread of control.
//!
//! Timing is tick-based: event entry points and [`Switcher::poll`] take an
//! explicit [`Instant`], and the host loop decides how often to poll. A
//! pending activation fires on the first poll at or past its deadline, and
//! is silently superseded by any newer request that lands before then.

pub mod host;
pub mod scheduling;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tint_config::{Config, ConfigError, ConfigWarning};

pub use host::{ApplyError, StatusIndicator, ThemeApplier};
pub use scheduling::ActivationSched;

/// Status text shown before any theme has been applied.
const STATUS_NONE: &str = "theme:-";

/// The workspace theme switching service.
///
/// One instance per open workspace session. All state lives on the
/// instance; construction and drop are the whole lifecycle, so tests and
/// multi-workspace hosts can run any number of independent switchers.
pub struct Switcher<A: ThemeApplier> {
	root: PathBuf,
	config: Config,
	active_file: Option<PathBuf>,
	current_theme: Option<String>,
	sched: ActivationSched,
	applier: A,
	indicator: Option<Box<dyn StatusIndicator>>,
}

impl<A: ThemeApplier> Switcher<A> {
	/// Creates a switcher for the workspace rooted at `root`.
	pub fn new(root: impl Into<PathBuf>, config: Config, applier: A) -> Self {
		if config.rules.is_empty() {
			tracing::warn!("no workspaces configured");
		}
		Self {
			root: root.into(),
			config,
			active_file: None,
			current_theme: None,
			sched: ActivationSched::new(),
			applier,
			indicator: None,
		}
	}

	/// Attaches a status indicator that mirrors the current theme.
	pub fn with_indicator(mut self, mut indicator: Box<dyn StatusIndicator>) -> Self {
		indicator.set_text(&self.status_text());
		self.indicator = Some(indicator);
		self
	}

	/// The theme most recently applied through the host seam, if any.
	pub fn current_theme(&self) -> Option<&str> {
		self.current_theme.as_deref()
	}

	/// The configuration currently in effect.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// The file the host last reported as focused.
	pub fn active_file(&self) -> Option<&Path> {
		self.active_file.as_deref()
	}

	/// The applier collaborator.
	pub fn applier(&self) -> &A {
		&self.applier
	}

	/// Returns true if an activation is waiting to fire.
	pub fn has_pending(&self) -> bool {
		self.sched.is_pending()
	}

	/// Records a focus change and re-resolves the theme.
	///
	/// `None` clears the active file. With nothing to resolve this is a
	/// legitimate idle state, not an error: resolution is skipped and any
	/// pending activation is left to run its course.
	pub fn focus_changed(&mut self, file: Option<&Path>, now: Instant) {
		self.active_file = file.map(Path::to_path_buf);
		self.reschedule(now);
	}

	/// Swaps in a new validated configuration and re-resolves.
	///
	/// The rule batch is replaced atomically; warnings carried by the new
	/// config are the caller's to display.
	pub fn update_config(&mut self, config: Config, now: Instant) {
		if config.rules.is_empty() {
			tracing::warn!("no workspaces configured");
		}
		self.config = config;
		self.reschedule(now);
	}

	/// Parses `input` and applies it as the new configuration.
	///
	/// On parse failure the previous configuration stays in effect, so a
	/// malformed edit never erases working rules.
	pub fn reload_config(&mut self, input: &str, now: Instant) -> Result<&[ConfigWarning], ConfigError> {
		let config = Config::parse(input)?;
		self.update_config(config, now);
		Ok(&self.config.warnings)
	}

	/// Fires a due activation, if any, returning the applied theme.
	///
	/// This is the terminal effect of a non-cancelled activation: the theme
	/// goes through the host seam exactly once and, on success, advances
	/// `current_theme` and refreshes the indicator. A failed apply is
	/// logged, not retried; the next qualifying event re-triggers
	/// resolution.
	pub fn poll(&mut self, now: Instant) -> Option<&str> {
		let theme = self.sched.poll(now)?;
		match self.applier.apply(&theme) {
			Ok(()) => {
				tracing::info!(%theme, "theme applied");
				self.current_theme = Some(theme);
				let text = self.status_text();
				if let Some(indicator) = self.indicator.as_mut() {
					indicator.set_text(&text);
				}
				self.current_theme.as_deref()
			}
			Err(error) => {
				tracing::warn!(%theme, %error, "failed to apply theme");
				None
			}
		}
	}

	/// Status text reflecting the applied theme, e.g. `theme:gruvbox`.
	pub fn status_text(&self) -> String {
		match self.current_theme.as_deref() {
			Some(theme) => format!("theme:{theme}"),
			None => STATUS_NONE.to_string(),
		}
	}

	/// Recomputes the resolved theme and feeds the debounce scheduler.
	fn reschedule(&mut self, now: Instant) {
		let Some(file) = self.active_file.as_deref() else {
			tracing::debug!("no active file, nothing to resolve");
			return;
		};
		let resolved = self
			.config
			.rules
			.resolve(file, &self.root, self.config.default_theme.as_deref());
		let Some(theme) = resolved else {
			tracing::debug!(file = %file.display(), "no theme resolved for file");
			return;
		};
		self.sched
			.request(theme, self.current_theme.as_deref(), self.config.activation_delay, now);
	}
}
