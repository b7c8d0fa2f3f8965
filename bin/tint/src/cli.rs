use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "tint")]
#[command(about = "Workspace-scoped color theme switching")]
#[command(version)]
pub struct Cli {
	/// Path to the switcher configuration file
	#[arg(long, short = 'c')]
	pub config: PathBuf,

	/// Workspace root directory (defaults to the current directory)
	#[arg(long)]
	pub root: Option<PathBuf>,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Resolve the theme for one or more files and exit
	Resolve {
		/// Files to resolve
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// React to focus events read from stdin until end of input
	Run {
		/// Write the applied theme name to this file
		#[arg(long)]
		state_file: Option<PathBuf>,

		/// Polling interval for pending activations, in milliseconds
		#[arg(long, default_value_t = 50)]
		tick_ms: u64,
	},
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::Cli;

	#[test]
	fn cli_definition_is_consistent() {
		Cli::command().debug_assert();
	}
}
