//! Recursion and nesting limits.
//!
//! Every nested construct recurses on the call stack, so these bounds keep
//! pathological inputs (hundreds of `>` markers, runs of `[[[[`) from
//! exhausting it. Past a limit the construct degrades to plain text.

/// Maximum depth of scoped sub-parses (quotations, list items, footnotes).
pub const MAX_BLOCK_NESTING: usize = 32;

/// Maximum open inline containers plus recursive link-description parses.
pub const MAX_INLINE_NESTING: usize = 32;

/// Maximum element nesting accepted inside one raw markup fragment.
pub const MAX_MARKUP_DEPTH: usize = 64;

/// Longest marker run that still selects an emphasis style.
pub const MAX_EMPHASIS_RUN: usize = 3;
