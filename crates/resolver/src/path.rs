//! Lexical path normalization.

use std::path::{Component, Path, PathBuf};

/// Resolves `.` and `..` segments without touching the filesystem.
///
/// Hosts report focus paths with redundant segments; those still have to
/// prefix-match against joined rule paths, so both sides are folded to the
/// same lexical form before comparison. A `..` that would climb past the
/// root of an absolute path is dropped; on a relative path it is kept, since
/// there is no anchor to resolve it against.
pub fn normalize(path: &Path) -> PathBuf {
	let mut out = PathBuf::new();
	for comp in path.components() {
		match comp {
			Component::Prefix(prefix) => out.push(prefix.as_os_str()),
			Component::RootDir => out.push(Component::RootDir.as_os_str()),
			Component::CurDir => {}
			Component::ParentDir => {
				let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
					&& out.pop();
				if !popped && !out.has_root() {
					out.push(Component::ParentDir.as_os_str());
				}
			}
			Component::Normal(seg) => out.push(seg),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drops_cur_dir_segments() {
		assert_eq!(normalize(Path::new("/a/./b/.")), PathBuf::from("/a/b"));
	}

	#[test]
	fn resolves_parent_segments() {
		assert_eq!(normalize(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
		assert_eq!(normalize(Path::new("a/b/../../c")), PathBuf::from("c"));
	}

	#[test]
	fn parent_of_root_stays_at_root() {
		assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
	}

	#[test]
	fn keeps_leading_parents_on_relative_paths() {
		assert_eq!(normalize(Path::new("../../a")), PathBuf::from("../../a"));
	}

	#[test]
	fn trailing_separator_is_irrelevant() {
		assert_eq!(normalize(Path::new("/a/b/")), PathBuf::from("/a/b"));
	}
}
