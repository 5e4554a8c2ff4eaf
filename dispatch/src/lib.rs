//! Dispatch wrapper around the argument-parsing engine.
//!
//! Sits between the transport layer and command handlers: it parses the
//! incoming message against the command's schema, turns argument failures
//! into user-facing reply text, and silently drops invocations whose field
//! parsers rejected them. Handler code only ever sees a complete
//! [`ParsedArguments`] record; parse errors never cross this boundary.
//!
//! Reply strings are plain English here; localization lives in an outer
//! layer.

use std::future::Future;

use tracing::debug;

use message_schema_core::{
    IncomingMessage, ParseError, ParseOptions, ParsedArguments, SchemaDefinition, parse,
};

/// What the transport should do after a dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome<T> {
    /// Arguments parsed; the handler ran and produced this value.
    Completed(T),
    /// Arguments were missing; reply with this hint. The handler did not
    /// run.
    Replied(String),
    /// A field parser rejected the invocation; send nothing at all.
    Dropped,
}

impl<T> DispatchOutcome<T> {
    /// Handler result, if the handler ran.
    pub fn completed(self) -> Option<T> {
        match self {
            DispatchOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// Parses `message` against `schema` and runs `handler` on success.
///
/// Error mapping follows the engine's caller contract:
/// [`ParseError::NoArgsGiven`] and [`ParseError::MissingField`] become
/// [`DispatchOutcome::Replied`] hints (the field's description is appended
/// when the schema declares one), and [`ParseError::SkipParsing`] becomes
/// [`DispatchOutcome::Dropped`] with no reply.
///
/// # Examples
///
/// ```
/// use message_schema_core::{FieldDescriptor, ParseOptions, PlainMessage, SchemaBuilder};
/// use message_schema_dispatch::{DispatchOutcome, dispatch_command};
///
/// let schema = SchemaBuilder::new("echo")
///     .field(FieldDescriptor::new("text").at(0))
///     .build()
///     .unwrap();
///
/// let message = PlainMessage::with_text(1, "/echo hi");
/// let outcome = futures::executor::block_on(dispatch_command(
///     &schema,
///     &message,
///     ParseOptions::default(),
///     |args| async move { args.get("text").unwrap().clone() },
/// ));
///
/// assert_eq!(outcome, DispatchOutcome::Completed("hi".into()));
/// ```
pub async fn dispatch_command<T, H, Fut>(
    schema: &SchemaDefinition,
    message: &dyn IncomingMessage,
    options: ParseOptions,
    handler: H,
) -> DispatchOutcome<T>
where
    H: FnOnce(ParsedArguments) -> Fut,
    Fut: Future<Output = T>,
{
    match parse(schema, message, options).await {
        Ok(arguments) => DispatchOutcome::Completed(handler(arguments).await),
        Err(ParseError::NoArgsGiven) => DispatchOutcome::Replied(
            "Not enough arguments! Check the command help for details.".to_owned(),
        ),
        Err(ParseError::MissingField { name, field }) => {
            let mut reply = format!("Not enough arguments! Missing '{name}'");
            if let Some(description) = &field.description {
                reply.push_str(&format!(" ({description})"));
            }
            DispatchOutcome::Replied(reply)
        }
        Err(ParseError::SkipParsing) => {
            debug!(
                schema = %schema.name(),
                message_id = message.message_id(),
                "invocation dropped by field parser"
            );
            DispatchOutcome::Dropped
        }
    }
}
