//! Reserved-character placeholder codec.
//!
//! The decoder treats `|`, `<`, `>`, `[` and `]` as markup, so sentences
//! are rewritten to carry opaque marker tokens instead. Escaping has to
//! happen before tokenization and unescaping after detokenization; a
//! tokenizer that sees a marker splits it on its underscores, which is what
//! [fix_split] repairs.
use lazy_static::lazy_static;

use super::{apply, Rule, BRACKET_CLOSE, BRACKET_OPEN, FIX_PLACEHOLDERS, GT, LT, PIPE};

lazy_static! {
    static ref ESCAPE: Vec<Rule> = vec![
        PIPE.clone(),
        LT.clone(),
        GT.clone(),
        BRACKET_OPEN.clone(),
        BRACKET_CLOSE.clone(),
    ];
    static ref UNESCAPE: Vec<Rule> = vec![
        Rule::new("_pipe_", "|").expect("static rule table"),
        Rule::new("_lt_", "<").expect("static rule table"),
        Rule::new("_gt_", ">").expect("static rule table"),
        Rule::new("_bo_", "[").expect("static rule table"),
        Rule::new("_bc_", "]").expect("static rule table"),
    ];
}

/// Replaces each reserved character with its marker token.
pub fn escape(sent: &str) -> String {
    apply(sent, &ESCAPE)
}

/// Structural inverse of [escape]. For any sentence that does not already
/// contain marker literals, `unescape(escape(s)) == s`.
pub fn unescape(sent: &str) -> String {
    apply(sent, &UNESCAPE)
}

/// Collapses markers a tokenizer split apart (`_ uri _` back to `_uri_`).
/// Runs once, immediately after tokenization and before truecasing.
pub fn fix_split(sent: &str) -> String {
    apply(sent, &[FIX_PLACEHOLDERS.clone()])
}
