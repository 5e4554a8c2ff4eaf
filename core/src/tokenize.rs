//! Token production: default separator splitting and the pluggable root
//! strategy.

use async_trait::async_trait;

use crate::error::BindingError;
use crate::message::IncomingMessage;
use crate::types::FieldDescriptor;

/// Pluggable tokenization strategy for a whole schema.
///
/// A root tokenizer replaces separator splitting entirely, letting a
/// schema reinterpret "tokens" as arbitrary semantic units rather than
/// whitespace-split words. It receives the message, the text with the
/// command prefix already stripped, and the declared fields, and returns
/// the sequence later stages slice and index into.
///
/// An error from a root tokenizer aborts the parse the same way an
/// unrecoverable field parser failure does: the invocation is dropped
/// silently.
#[async_trait]
pub trait RootTokenizer: Send + Sync {
    async fn tokenize(
        &self,
        message: &dyn IncomingMessage,
        text: Option<&str>,
        fields: &[FieldDescriptor],
    ) -> Result<Vec<String>, BindingError>;
}

/// Splits `text` on `separator`. Splitting an empty string still yields
/// one empty token.
pub(crate) fn split_tokens(text: &str, separator: &str) -> Vec<String> {
    text.split(separator).map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_default_separator() {
        assert_eq!(split_tokens("a b c", " "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_empty_text_yields_one_empty_token() {
        assert_eq!(split_tokens("", " "), vec![""]);
    }

    #[test]
    fn test_split_on_custom_separator() {
        assert_eq!(split_tokens("a|b c|d", "|"), vec!["a", "b c", "d"]);
    }

    #[test]
    fn test_adjacent_separators_keep_empty_tokens() {
        assert_eq!(split_tokens("a  b", " "), vec!["a", "", "b"]);
    }
}
