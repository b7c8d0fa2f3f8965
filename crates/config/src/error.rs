//! Error types for configuration parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or loading configuration.
///
/// Parsing is atomic: the first malformed field rejects the whole payload,
/// so a caller never observes a partially applied rule batch.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing KDL syntax.
	#[error("KDL parse error: {0}")]
	Kdl(#[from] kdl::KdlError),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A required field is missing from the configuration.
	#[error("missing required field: {0}")]
	MissingField(String),

	/// A field is present but has the wrong shape.
	#[error("invalid value for {field}: {reason}")]
	InvalidField {
		/// Name of the offending field.
		field: String,
		/// What was wrong with it.
		reason: String,
	},

	/// A workspace rule path cannot act as a prefix under the root.
	#[error("invalid workspace path {path:?}: {reason}")]
	InvalidWorkspacePath {
		/// The rejected path as written.
		path: String,
		/// Why it was rejected.
		reason: String,
	},

	/// Failed to set up file watching.
	#[error("failed to watch config file: {0}")]
	Watch(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
