//! Workspace rules and longest-prefix matching.

use std::path::Path;

use crate::path::normalize;

/// A single workspace-to-theme mapping.
///
/// `path` is relative to the workspace root and may be empty, which makes
/// the rule a catch-all for the whole workspace. `theme` is a non-empty
/// theme identifier; shape validation happens at configuration parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	/// Workspace-root-relative path prefix this rule claims.
	pub path: String,
	/// Theme to activate for files under that prefix.
	pub theme: String,
}

/// An ordered batch of workspace rules.
///
/// Construction sorts the batch by descending path length so overlapping
/// prefixes are probed deepest-first: a rule for `a/b` is tested before a
/// rule for `a`, and the empty catch-all always sorts last. The sort is
/// stable, so rules sharing a path keep their configured order and the
/// first-listed one wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	/// Builds a rule set, sorting `rules` deepest-prefix-first.
	pub fn new(mut rules: Vec<Rule>) -> Self {
		rules.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
		Self { rules }
	}

	/// Rules in probe order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Number of rules in the set.
	pub fn len(&self) -> usize {
		self.rules.len()
	}

	/// Returns true if no rules are configured.
	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Resolves the theme for `file` under the workspace rooted at `root`.
	///
	/// Each rule's path is joined onto `root` and both sides are lexically
	/// normalized before comparison. Matching is component-wise via
	/// [`Path::starts_with`], so a rule for `foo` never claims a file under
	/// a sibling `foobar` directory. The first match in probe order wins;
	/// with no match the `default` theme applies, and `None` means nothing
	/// resolved at all.
	pub fn resolve<'a>(&'a self, file: &Path, root: &Path, default: Option<&'a str>) -> Option<&'a str> {
		let file = normalize(file);
		for rule in &self.rules {
			let candidate = normalize(&root.join(&rule.path));
			if file.starts_with(&candidate) {
				tracing::debug!(rule = %rule.path, theme = %rule.theme, "workspace rule matched");
				return Some(&rule.theme);
			}
		}
		tracing::debug!(file = %file.display(), "no workspace rule matched");
		default
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use pretty_assertions::assert_eq;

	use super::*;

	fn rule(path: &str, theme: &str) -> Rule {
		Rule {
			path: path.to_string(),
			theme: theme.to_string(),
		}
	}

	#[test]
	fn sorts_longest_path_first() {
		let set = RuleSet::new(vec![rule("", "c"), rule("a", "b"), rule("a/b", "a")]);
		let order: Vec<&str> = set.rules().iter().map(|r| r.path.as_str()).collect();
		assert_eq!(order, vec!["a/b", "a", ""]);
	}

	#[test]
	fn sort_is_stable_for_equal_lengths() {
		let set = RuleSet::new(vec![rule("aa", "first"), rule("bb", "second"), rule("aa", "third")]);
		let themes: Vec<&str> = set.rules().iter().map(|r| r.theme.as_str()).collect();
		assert_eq!(themes, vec!["first", "second", "third"]);
	}

	#[test]
	fn deepest_prefix_wins() {
		let set = RuleSet::new(vec![rule("a", "X"), rule("a/b", "Y")]);
		let root = PathBuf::from("/root");

		let deep = set.resolve(Path::new("/root/a/b/file.txt"), &root, None);
		assert_eq!(deep, Some("Y"));

		let shallow = set.resolve(Path::new("/root/a/c/file.txt"), &root, None);
		assert_eq!(shallow, Some("X"));
	}

	#[test]
	fn resolution_is_deterministic() {
		let set = RuleSet::new(vec![rule("a", "X"), rule("a/b", "Y")]);
		let root = PathBuf::from("/root");
		let file = Path::new("/root/a/b/file.txt");
		assert_eq!(set.resolve(file, &root, None), set.resolve(file, &root, None));
	}

	#[test]
	fn unmatched_file_falls_back_to_default() {
		let set = RuleSet::new(vec![rule("a", "X")]);
		let root = PathBuf::from("/root");

		let themed = set.resolve(Path::new("/root/b/file.txt"), &root, Some("Z"));
		assert_eq!(themed, Some("Z"));

		let bare = set.resolve(Path::new("/root/b/file.txt"), &root, None);
		assert_eq!(bare, None);
	}

	#[test]
	fn empty_path_is_a_catch_all_behind_every_rule() {
		let set = RuleSet::new(vec![rule("", "everything"), rule("a", "X")]);
		let root = PathBuf::from("/root");

		assert_eq!(set.resolve(Path::new("/root/a/f"), &root, None), Some("X"));
		assert_eq!(set.resolve(Path::new("/root/b/f"), &root, None), Some("everything"));
	}

	#[test]
	fn matching_respects_segment_boundaries() {
		let set = RuleSet::new(vec![rule("foo", "X")]);
		let root = PathBuf::from("/root");

		assert_eq!(set.resolve(Path::new("/root/foo/f"), &root, None), Some("X"));
		assert_eq!(set.resolve(Path::new("/root/foobar/f"), &root, None), None);
	}

	#[test]
	fn redundant_segments_still_match() {
		let set = RuleSet::new(vec![rule("a/b", "Y")]);
		let root = PathBuf::from("/root");

		let resolved = set.resolve(Path::new("/root/a/../a/./b/file.txt"), &root, None);
		assert_eq!(resolved, Some("Y"));
	}
}
