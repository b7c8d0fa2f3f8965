//! Configuration for the tint theme switcher.
//!
//! Configuration is written in KDL (v2) format. A config file lists
//! workspace rules alongside an options block:
//!
//! ```kdl
//! options {
//!     default-theme "gruvbox"
//!     activation-delay-ms 300
//! }
//!
//! workspace "frontend" theme="solarized-light"
//! workspace "backend/api" theme="gruvbox"
//! workspace "" theme="fallback-zone"
//! ```
//!
//! Every field is optional; missing fields fall back to built-in defaults
//! (no rules, no default theme, zero delay). Parsing is atomic: a payload
//! with any malformed rule or option is rejected as a whole, since a mixed
//! valid/invalid batch would produce undefined matching behavior. Non-fatal
//! findings (unknown nodes, duplicate workspace paths) are collected as
//! [`ConfigWarning`]s for the host to display.

pub mod error;
#[cfg(feature = "watch")]
pub mod watch;

use std::path::{Component, Path};
use std::time::Duration;

use kdl::{KdlDocument, KdlNode};
use tint_resolver::{Rule, RuleSet};

pub use error::{ConfigError, Result};
#[cfg(feature = "watch")]
pub use watch::{ConfigChange, ConfigWatcher};

/// Parsed switcher configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
	/// Workspace rules, sorted deepest-prefix-first.
	pub rules: RuleSet,
	/// Theme applied when no workspace rule matches.
	pub default_theme: Option<String>,
	/// Debounce window between a focus change and theme activation.
	pub activation_delay: Duration,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

/// A non-fatal finding from configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A top-level node with an unrecognized name.
	UnknownNode(String),
	/// An entry in the options block with an unrecognized name.
	UnknownOption(String),
	/// Two workspace rules share a path; the first one listed wins.
	DuplicateWorkspacePath(String),
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownNode(name) => write!(f, "unknown node '{name}' will be ignored"),
			Self::UnknownOption(name) => write!(f, "unknown option '{name}' will be ignored"),
			Self::DuplicateWorkspacePath(path) => {
				write!(f, "duplicate workspace path {path:?}; the first rule wins")
			}
		}
	}
}

impl Config {
	/// Parse a KDL string into a [`Config`].
	///
	/// Non-fatal findings are collected in [`Config::warnings`] rather than
	/// causing parse failure. Callers should check and display these.
	pub fn parse(input: &str) -> Result<Self> {
		let doc: KdlDocument = input.parse()?;
		let mut warnings = Vec::new();
		let mut rules = Vec::new();
		let mut default_theme = None;
		let mut activation_delay = Duration::ZERO;

		for node in doc.nodes() {
			match node.name().value() {
				"workspace" => rules.push(parse_workspace_node(node)?),
				"options" => {
					let opts = parse_options_node(node, &mut warnings)?;
					default_theme = opts.default_theme;
					activation_delay = opts.activation_delay;
				}
				other => warnings.push(ConfigWarning::UnknownNode(other.to_string())),
			}
		}

		for (i, rule) in rules.iter().enumerate() {
			if rules[..i].iter().any(|prior| prior.path == rule.path) {
				warnings.push(ConfigWarning::DuplicateWorkspacePath(rule.path.clone()));
			}
		}

		Ok(Config {
			rules: RuleSet::new(rules),
			default_theme,
			activation_delay,
			warnings,
		})
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %path.display(), rules = config.rules.len(), "configuration loaded");
		Ok(config)
	}
}

fn parse_workspace_node(node: &KdlNode) -> Result<Rule> {
	let path = node
		.get(0)
		.and_then(|v| v.as_string())
		.ok_or_else(|| ConfigError::MissingField("workspace path".into()))?;
	validate_workspace_path(path)?;

	let theme = node
		.get("theme")
		.and_then(|v| v.as_string())
		.ok_or_else(|| ConfigError::MissingField("workspace theme".into()))?;
	if theme.is_empty() {
		return Err(ConfigError::InvalidField {
			field: "theme".into(),
			reason: "theme name must be non-empty".into(),
		});
	}

	Ok(Rule {
		path: path.to_string(),
		theme: theme.to_string(),
	})
}

/// Workspace paths are prefixes under the workspace root: relative, no
/// parent traversal, no NUL bytes. Empty is allowed and acts as a catch-all
/// for the whole workspace.
fn validate_workspace_path(raw: &str) -> Result<()> {
	let reject = |reason: &str| {
		Err(ConfigError::InvalidWorkspacePath {
			path: raw.to_string(),
			reason: reason.to_string(),
		})
	};

	if raw.contains('\0') {
		return reject("contains a NUL byte");
	}
	let path = Path::new(raw);
	if path.is_absolute() {
		return reject("absolute paths are not allowed");
	}
	for comp in path.components() {
		match comp {
			Component::ParentDir => return reject("cannot traverse parent directories"),
			Component::Prefix(_) | Component::RootDir => {
				return reject("has an unsupported root or prefix");
			}
			Component::CurDir | Component::Normal(_) => {}
		}
	}
	Ok(())
}

struct Options {
	default_theme: Option<String>,
	activation_delay: Duration,
}

fn parse_options_node(node: &KdlNode, warnings: &mut Vec<ConfigWarning>) -> Result<Options> {
	let mut opts = Options {
		default_theme: None,
		activation_delay: Duration::ZERO,
	};
	let Some(children) = node.children() else {
		return Ok(opts);
	};

	for opt in children.nodes() {
		match opt.name().value() {
			"default-theme" => {
				let theme = opt.get(0).and_then(|v| v.as_string()).ok_or_else(|| {
					ConfigError::InvalidField {
						field: "default-theme".into(),
						reason: "expected a string theme name".into(),
					}
				})?;
				if theme.is_empty() {
					return Err(ConfigError::InvalidField {
						field: "default-theme".into(),
						reason: "theme name must be non-empty".into(),
					});
				}
				opts.default_theme = Some(theme.to_string());
			}
			"activation-delay-ms" => {
				let raw = opt.get(0).and_then(|v| v.as_integer()).ok_or_else(|| {
					ConfigError::InvalidField {
						field: "activation-delay-ms".into(),
						reason: "expected a number of milliseconds".into(),
					}
				})?;
				let ms = u64::try_from(raw).map_err(|_| ConfigError::InvalidField {
					field: "activation-delay-ms".into(),
					reason: "must be a non-negative integer".into(),
				})?;
				opts.activation_delay = Duration::from_millis(ms);
			}
			other => warnings.push(ConfigWarning::UnknownOption(other.to_string())),
		}
	}
	Ok(opts)
}
