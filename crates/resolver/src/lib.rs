//! Workspace-to-theme resolution.
//!
//! Maps the path of the focused file to a color theme through an ordered
//! list of workspace rules. Each rule names a path prefix relative to the
//! workspace root; the deepest matching prefix wins, and an empty prefix
//! acts as a catch-all that sorts behind every non-empty rule.
//!
//! Resolution is pure: the same inputs always produce the same theme, and
//! nothing here touches the filesystem. Paths are compared after lexical
//! normalization, so redundant `.`/`..` segments reported by the host still
//! prefix-match cleanly.

pub mod path;

mod rules;

pub use rules::{Rule, RuleSet};
