//! Mapping field index specifications onto available tokens.

use serde_json::Value;

use crate::types::FieldIndex;

/// Applies the running skip counter to an index specification.
///
/// Only single-position indices realign after an earlier field recovered
/// from a parser failure. Spans keep their declared bounds; existing
/// schemas depend on that asymmetry.
pub(crate) fn realign(index: FieldIndex, skip: usize) -> FieldIndex {
    match index {
        FieldIndex::At(position) => FieldIndex::At(position.saturating_sub(skip)),
        span @ FieldIndex::Span { .. } => span,
    }
}

/// Resolves an index specification against the token sequence.
///
/// Returns `None` when the tokens cannot satisfy the specification: a
/// single position past the last token, a bounded span whose stop exceeds
/// the token count, or an open span starting past the last token.
pub(crate) fn resolve(index: FieldIndex, tokens: &[String]) -> Option<Value> {
    match index {
        FieldIndex::At(position) => tokens.get(position).map(|t| Value::String(t.clone())),
        FieldIndex::Span {
            start,
            stop: Some(stop),
        } => {
            if stop > tokens.len() {
                return None;
            }
            Some(slice_value(&tokens[start.min(stop)..stop]))
        }
        FieldIndex::Span { start, stop: None } => {
            if start >= tokens.len() {
                return None;
            }
            Some(slice_value(&tokens[start..]))
        }
    }
}

/// Text from the field's first consumed position to the end, handed to
/// `whole_text` bindings.
pub(crate) fn remaining_text(index: FieldIndex, tokens: &[String], separator: &str) -> Value {
    let start = match index {
        FieldIndex::At(position) => position,
        FieldIndex::Span { start, .. } => start,
    };
    Value::String(tokens[start.min(tokens.len())..].join(separator))
}

fn slice_value(tokens: &[String]) -> Value {
    Value::Array(tokens.iter().map(|t| Value::String(t.clone())).collect())
}
