mod cli;
mod host;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tint_config::{Config, ConfigWatcher};
use tint_switcher::Switcher;

use crate::cli::{Cli, Command};
use crate::host::{CliApplier, StderrStatus};

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();
	let root = match &cli.root {
		Some(root) => root.clone(),
		None => std::env::current_dir().context("could not determine workspace root")?,
	};
	let root = std::path::absolute(&root)
		.with_context(|| format!("could not resolve workspace root {}", root.display()))?;

	match cli.command {
		Command::Resolve { files } => resolve(&cli.config, &root, &files),
		Command::Run { state_file, tick_ms } => run(&cli.config, &root, state_file, tick_ms),
	}
}

/// One-shot resolution: print the theme each file would get.
fn resolve(config_path: &Path, root: &Path, files: &[PathBuf]) -> anyhow::Result<()> {
	let config = Config::load(config_path)
		.with_context(|| format!("failed to load {}", config_path.display()))?;
	report_warnings(&config.warnings);

	for file in files {
		let file = std::path::absolute(file)
			.with_context(|| format!("could not resolve {}", file.display()))?;
		let theme = config.rules.resolve(&file, root, config.default_theme.as_deref());
		println!("{} -> {}", file.display(), theme.unwrap_or("(none)"));
	}
	Ok(())
}

/// An event delivered to the host loop.
enum HostEvent {
	/// A newline-terminated focus report from stdin; empty clears focus.
	Focus(String),
	/// Stdin closed.
	Eof,
}

/// Event loop: stdin lines are focus changes, the config file is watched
/// for reloads, and pending activations fire on a short tick.
fn run(config_path: &Path, root: &Path, state_file: Option<PathBuf>, tick_ms: u64) -> anyhow::Result<()> {
	let config = Config::load(config_path)
		.with_context(|| format!("failed to load {}", config_path.display()))?;
	report_warnings(&config.warnings);

	let mut switcher = Switcher::new(root, config, CliApplier::new(state_file))
		.with_indicator(Box::new(StderrStatus));

	let watcher = match ConfigWatcher::new(config_path) {
		Ok(watcher) => Some(watcher),
		Err(error) => {
			tracing::warn!(%error, "config watching disabled");
			None
		}
	};

	let (tx, rx) = mpsc::channel();
	thread::spawn(move || {
		let stdin = std::io::stdin();
		for line in stdin.lock().lines() {
			let Ok(line) = line else { break };
			if tx.send(HostEvent::Focus(line)).is_err() {
				return;
			}
		}
		let _ = tx.send(HostEvent::Eof);
	});

	let tick = Duration::from_millis(tick_ms.max(10));
	loop {
		match rx.recv_timeout(tick) {
			Ok(HostEvent::Focus(line)) => {
				let now = Instant::now();
				let line = line.trim();
				if line.is_empty() {
					switcher.focus_changed(None, now);
				} else {
					match std::path::absolute(Path::new(line)) {
						Ok(file) => switcher.focus_changed(Some(&file), now),
						Err(error) => tracing::warn!(path = line, %error, "ignoring focus report"),
					}
				}
			}
			Ok(HostEvent::Eof) => break,
			Err(mpsc::RecvTimeoutError::Timeout) => {}
			Err(mpsc::RecvTimeoutError::Disconnected) => break,
		}

		if let Some(watcher) = &watcher
			&& watcher.try_change().is_some()
		{
			reload(&mut switcher, config_path);
		}

		switcher.poll(Instant::now());
	}

	// Let a still-pending activation run its course before exiting.
	while switcher.has_pending() {
		thread::sleep(tick);
		switcher.poll(Instant::now());
	}
	Ok(())
}

/// Re-reads the config file into the switcher, keeping the last known good
/// configuration when the new payload is malformed.
fn reload(switcher: &mut Switcher<CliApplier>, config_path: &Path) {
	let content = match std::fs::read_to_string(config_path) {
		Ok(content) => content,
		Err(error) => {
			tracing::error!(%error, "could not re-read config, keeping last known good");
			return;
		}
	};
	match switcher.reload_config(&content, Instant::now()) {
		Ok(warnings) => {
			for warning in warnings {
				tracing::warn!(%warning, "config warning");
			}
			tracing::info!("configuration reloaded");
		}
		Err(error) => {
			tracing::error!(%error, "config reload failed, keeping last known good");
		}
	}
}

fn report_warnings(warnings: &[tint_config::ConfigWarning]) {
	for warning in warnings {
		tracing::warn!(%warning, "config warning");
	}
}
