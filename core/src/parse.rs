//! Per-message parse flow: command stripping, tokenization, field
//! resolution, and the parser invocation chain.

use serde_json::Value;
use tracing::debug;

use crate::binding::ParserInput;
use crate::error::ParseError;
use crate::message::IncomingMessage;
use crate::resolve;
use crate::tokenize::split_tokens;
use crate::types::{ParsedArguments, SchemaDefinition};

/// Per-call switches for [`parse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Proceed with zero tokens when the message carries no argument text,
    /// instead of failing with [`ParseError::NoArgsGiven`]. Every field
    /// must then resolve through its fallback.
    pub allow_missing: bool,
    /// Use the text as-is instead of stripping a leading `/command` token.
    /// For non-command use cases.
    pub skip_command: bool,
}

/// Parses `message` against `schema` into a [`ParsedArguments`] record.
///
/// Fields are processed in schema declaration order. Each one resolves its
/// token slice, runs its parser binding if it has one, and lands in the
/// record; the record is returned only when every field succeeded, so a
/// failed or cancelled parse never exposes partial results.
///
/// All per-call state (the skip counter, the accumulated record, the
/// communication payload) lives on this call's stack; concurrent parses
/// against the same shared definition do not interact.
///
/// # Examples
///
/// ```
/// use message_schema_core::{
///     FieldDescriptor, FieldIndex, ParseOptions, PlainMessage, SchemaBuilder, parse,
/// };
///
/// let schema = SchemaBuilder::new("note")
///     .field(FieldDescriptor::new("title").at(0))
///     .field(FieldDescriptor::new("body").spanning(FieldIndex::tail(1)).nullable())
///     .build()
///     .unwrap();
///
/// let message = PlainMessage::with_text(1, "/note shopping eggs and milk");
/// let args = futures::executor::block_on(parse(&schema, &message, ParseOptions::default()))
///     .unwrap();
///
/// assert_eq!(args.get("title").unwrap(), "shopping");
/// ```
pub async fn parse(
    schema: &SchemaDefinition,
    message: &dyn IncomingMessage,
    options: ParseOptions,
) -> Result<ParsedArguments, ParseError> {
    let text = if options.skip_command {
        raw_text(message)
    } else {
        effective_text(message)
    };

    if text.is_none() && !options.allow_missing {
        return Err(ParseError::NoArgsGiven);
    }

    let tokens = match schema.tokenizer() {
        Some(tokenizer) => {
            let result = tokenizer
                .tokenize(message, text.as_deref(), schema.fields())
                .await;
            match result {
                Ok(tokens) => tokens,
                Err(error) => {
                    debug!(
                        schema = %schema.name(),
                        %error,
                        "root tokenizer failed, dropping invocation"
                    );
                    return Err(ParseError::SkipParsing);
                }
            }
        }
        None => match &text {
            Some(text) => split_tokens(text, schema.separator()),
            None => Vec::new(),
        },
    };
    debug!(schema = %schema.name(), tokens = tokens.len(), "parsing message arguments");

    let mut values = ParsedArguments::new();
    let mut payload: Option<Value> = None;
    let mut skipped = 0usize;

    for field in schema.fields() {
        let index = resolve::realign(field.index, skipped);

        let Some(resolved) = resolve::resolve(index, &tokens) else {
            match field.fallback.value() {
                Some(value) => {
                    values.push(&field.name, value);
                    continue;
                }
                None => {
                    return Err(ParseError::MissingField {
                        name: field.name.clone(),
                        field: field.clone(),
                    });
                }
            }
        };

        let Some(parser) = schema.parser_for(&field.name) else {
            values.push(&field.name, resolved);
            continue;
        };

        let input = ParserInput {
            message,
            value: if parser.whole_text {
                resolve::remaining_text(index, &tokens, schema.separator())
            } else {
                resolved
            },
            resolved: parser.last_fields.then_some(&values),
            payload: if parser.communicate {
                payload.as_ref()
            } else {
                None
            },
        };

        let result = parser.invoke(input).await;
        match result {
            Ok(output) => {
                if let Some(next) = output.payload {
                    payload = Some(next);
                }
                if is_empty_value(&output.value) {
                    return Err(ParseError::MissingField {
                        name: field.name.clone(),
                        field: field.clone(),
                    });
                }
                values.push(&field.name, output.value);
            }
            Err(error) => match field.fallback.value() {
                Some(value) => {
                    debug!(
                        schema = %schema.name(),
                        field = %field.name,
                        %error,
                        "field parser failed, recovering with fallback"
                    );
                    values.push(&field.name, value);
                    skipped += 1;
                }
                None => {
                    debug!(
                        schema = %schema.name(),
                        field = %field.name,
                        %error,
                        "field parser failed, dropping invocation"
                    );
                    return Err(ParseError::SkipParsing);
                }
            },
        }
    }

    Ok(values)
}

/// Text the fields actually parse: command prefix stripped, caption used
/// when there is no text, empty remainders treated as absent.
fn effective_text(message: &dyn IncomingMessage) -> Option<String> {
    let raw = match message.text() {
        // Drop the "/command" or "/command@botname" token.
        Some(text) if text.starts_with('/') => match text.split_once(char::is_whitespace) {
            Some((_, rest)) => rest.trim_start(),
            None => "",
        },
        Some(text) => text,
        // Captions never carry the command, use them as-is.
        None => message.caption().unwrap_or(""),
    };
    (!raw.is_empty()).then(|| raw.to_owned())
}

fn raw_text(message: &dyn IncomingMessage) -> Option<String> {
    message
        .text()
        .filter(|t| !t.is_empty())
        .or_else(|| message.caption().filter(|c| !c.is_empty()))
        .map(str::to_owned)
}

/// Falsy check applied to binding results: null, empty collections, the
/// empty string, `false`, and zero all count as missing.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::message::PlainMessage;

    use super::*;

    #[test]
    fn test_effective_text_strips_command_token() {
        let message = PlainMessage::with_text(1, "/ban spammer flooding");
        assert_eq!(effective_text(&message).as_deref(), Some("spammer flooding"));
    }

    #[test]
    fn test_effective_text_strips_bot_name_suffix() {
        let message = PlainMessage::with_text(1, "/ban@ExampleBot spammer");
        assert_eq!(effective_text(&message).as_deref(), Some("spammer"));
    }

    #[test]
    fn test_effective_text_bare_command_is_absent() {
        let message = PlainMessage::with_text(1, "/ban");
        assert_eq!(effective_text(&message), None);
    }

    #[test]
    fn test_effective_text_uses_caption_without_stripping() {
        let message = PlainMessage::with_caption(1, "/looks like a command");
        assert_eq!(
            effective_text(&message).as_deref(),
            Some("/looks like a command")
        );
    }

    #[test]
    fn test_effective_text_absent_when_message_is_empty() {
        assert_eq!(effective_text(&PlainMessage::empty(1)), None);
    }

    #[test]
    fn test_effective_text_keeps_non_command_text() {
        let message = PlainMessage::with_text(1, "plain words");
        assert_eq!(effective_text(&message).as_deref(), Some("plain words"));
    }

    #[test]
    fn test_empty_value_classification() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(is_empty_value(&json!(false)));
        assert!(is_empty_value(&json!(0)));

        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!(["x"])));
        assert!(!is_empty_value(&json!(true)));
        assert!(!is_empty_value(&json!(7)));
    }
}
