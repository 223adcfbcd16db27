/*! Quality filtering.

The drop-line heuristic decides, per corpus line, whether a line is too
noisy to keep for training. Filters implement [filter::Filter], a pure
line-level predicate; the full decision (with its known-token fraction) is
available through [drop::DropCriteria::decide].
! */
mod drop;
mod filter;

pub use drop::{
    anchored, drop_lines, get_drop_lines, known_token_fraction, remove_non_words, DropCriteria,
    DropDecision,
};
pub use filter::Filter;
