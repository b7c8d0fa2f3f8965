//! Configuration file watching.
//!
//! Watches the directory containing the config file and forwards relevant
//! change notifications over a channel. The watch is on the parent
//! directory rather than the file itself: editors that save by rename
//! replace the file's inode, which a file-level watch stays pinned to.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{ConfigError, Result};

/// A change notification for the watched config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigChange;

/// Watches a config file for modification.
///
/// Dropping the watcher stops the underlying OS watch.
pub struct ConfigWatcher {
	/// Kept alive for the duration of the watch.
	_watcher: RecommendedWatcher,
	rx: Receiver<ConfigChange>,
}

impl ConfigWatcher {
	/// Starts watching `config_path` for changes.
	pub fn new(config_path: &Path) -> Result<Self> {
		let dir = config_path
			.parent()
			.filter(|p| !p.as_os_str().is_empty())
			.map(Path::to_path_buf)
			.unwrap_or_else(|| PathBuf::from("."));

		let (tx, rx) = mpsc::channel();
		let target = config_path.to_path_buf();
		let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
			let Ok(event) = res else { return };
			if is_relevant(&event, &target) {
				let _ = tx.send(ConfigChange);
			}
		})
		.map_err(|e| ConfigError::Watch(e.to_string()))?;

		watcher
			.watch(&dir, RecursiveMode::NonRecursive)
			.map_err(|e| ConfigError::Watch(e.to_string()))?;
		tracing::debug!(dir = %dir.display(), "watching config directory");

		Ok(Self { _watcher: watcher, rx })
	}

	/// Returns a pending change notification, if any, without blocking.
	///
	/// A burst of events from a single save coalesces into one change.
	pub fn try_change(&self) -> Option<ConfigChange> {
		let mut seen = None;
		while let Ok(change) = self.rx.try_recv() {
			seen = Some(change);
		}
		seen
	}
}

/// True when the event concerns the watched file and mutates it.
fn is_relevant(event: &Event, target: &Path) -> bool {
	let mutates = matches!(
		event.kind,
		EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
	);
	mutates
		&& event
			.paths
			.iter()
			.any(|p| p.file_name() == target.file_name())
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, Instant};

	use super::*;
	use crate::Config;

	/// Polls the watcher until a change arrives or the deadline passes.
	fn wait_for_change(watcher: &ConfigWatcher, timeout: Duration) -> Option<ConfigChange> {
		let deadline = Instant::now() + timeout;
		while Instant::now() < deadline {
			if let Some(change) = watcher.try_change() {
				return Some(change);
			}
			std::thread::sleep(Duration::from_millis(25));
		}
		None
	}

	#[test]
	fn reports_rewrites_of_the_watched_file() {
		let dir = tempfile::tempdir().unwrap();
		let config_path = dir.path().join("tint.kdl");
		std::fs::write(&config_path, "workspace \"a\" theme=\"light\"\n").unwrap();

		let watcher = ConfigWatcher::new(&config_path).unwrap();
		std::fs::write(&config_path, "workspace \"a\" theme=\"dark\"\n").unwrap();

		assert!(
			wait_for_change(&watcher, Duration::from_secs(5)).is_some(),
			"rewrite of the config file should be reported"
		);
		assert_eq!(
			Config::load(&config_path).unwrap().rules.rules()[0].theme,
			"dark"
		);
	}

	#[test]
	fn sibling_files_do_not_notify() {
		let dir = tempfile::tempdir().unwrap();
		let config_path = dir.path().join("tint.kdl");
		std::fs::write(&config_path, "").unwrap();

		let watcher = ConfigWatcher::new(&config_path).unwrap();
		std::fs::write(dir.path().join("other.txt"), "noise").unwrap();

		assert!(
			wait_for_change(&watcher, Duration::from_millis(500)).is_none(),
			"changes to sibling files should not be reported"
		);
	}
}
