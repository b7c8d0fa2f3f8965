//! Debounced theme activation scheduling.

use std::time::{Duration, Instant};

/// A scheduled-but-not-yet-fired theme activation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingActivation {
	theme: String,
	due: Instant,
}

/// Single-slot debounce scheduler for theme activation.
///
/// At most one activation is pending at a time; arming a new one replaces
/// (and thereby cancels) the prior one, so rapid focus changes inside the
/// delay window collapse into the last request. A zero delay still parks
/// the activation in the slot until the next [`poll`](Self::poll), keeping
/// cancellation semantics uniform with delayed activations.
#[derive(Debug, Default)]
pub struct ActivationSched {
	pending: Option<PendingActivation>,
}

impl ActivationSched {
	pub fn new() -> Self {
		Self { pending: None }
	}

	/// Requests activation of `theme` after `delay`, measured from `now`.
	///
	/// No-op when `theme` is already current. Returns true when an
	/// activation was armed.
	pub fn request(&mut self, theme: &str, current: Option<&str>, delay: Duration, now: Instant) -> bool {
		if current == Some(theme) {
			tracing::trace!(theme, "theme already active, nothing to schedule");
			return false;
		}
		if let Some(prev) = self.pending.take() {
			tracing::debug!(superseded = %prev.theme, theme, "replacing pending activation");
		}
		self.pending = Some(PendingActivation {
			theme: theme.to_string(),
			due: now + delay,
		});
		true
	}

	/// Cancels any pending activation. A cancelled activation never fires.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	/// Returns true if an activation is waiting to fire.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Takes the pending theme if its deadline has elapsed.
	///
	/// Fires at most once per armed activation: the slot is cleared on
	/// return, so a subsequent poll returns `None` until a new request.
	pub fn poll(&mut self, now: Instant) -> Option<String> {
		if self.pending.as_ref().is_some_and(|p| now >= p.due) {
			return self.pending.take().map(|p| p.theme);
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DELAY: Duration = Duration::from_millis(300);

	#[test]
	fn fires_once_after_the_delay() {
		let now = Instant::now();
		let mut sched = ActivationSched::new();

		assert!(sched.request("gruvbox", None, DELAY, now));
		assert_eq!(sched.poll(now), None, "must not fire before the deadline");
		assert_eq!(sched.poll(now + DELAY), Some("gruvbox".to_string()));
		assert_eq!(sched.poll(now + DELAY), None, "an activation fires at most once");
	}

	#[test]
	fn rapid_requests_collapse_to_the_last() {
		let now = Instant::now();
		let mut sched = ActivationSched::new();

		sched.request("X", None, DELAY, now);
		sched.request("Y", None, DELAY, now + Duration::from_millis(50));

		let long_after = now + Duration::from_secs(10);
		assert_eq!(sched.poll(long_after), Some("Y".to_string()));
		assert_eq!(sched.poll(long_after), None, "the superseded activation must never fire");
	}

	#[test]
	fn unchanged_theme_is_a_no_op() {
		let now = Instant::now();
		let mut sched = ActivationSched::new();

		assert!(!sched.request("X", Some("X"), DELAY, now));
		assert!(!sched.is_pending());
	}

	#[test]
	fn zero_delay_still_defers_to_poll() {
		let now = Instant::now();
		let mut sched = ActivationSched::new();

		sched.request("X", None, Duration::ZERO, now);
		assert!(sched.is_pending(), "zero delay still goes through the pending slot");
		assert_eq!(sched.poll(now), Some("X".to_string()));
	}

	#[test]
	fn cancel_prevents_firing() {
		let now = Instant::now();
		let mut sched = ActivationSched::new();

		sched.request("X", None, DELAY, now);
		sched.cancel();
		assert_eq!(sched.poll(now + DELAY), None);
	}
}
