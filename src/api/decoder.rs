//! Purpose: Public decode entrypoints that parse a payload and resolve fields against it.
//! Exports: `Decoder`.
//! Role: Glue between the JSON boundary and the pure resolver; owns decode logging.
//! Invariants: Parse failures map to `ErrorKind::Parse`; resolution failures stay `MissingKey`.
//! Invariants: A decoder holds only configuration, so one instance can serve any number of calls.
use crate::core::error::{Error, ErrorKind};
use crate::core::field::FieldSpec;
use crate::core::normalize::KeyStrategy;
use crate::core::resolve::{Resolution, resolve_with};
use crate::json::parse::{self, ParseFailure};
use serde_json::{Map, Value};
use tracing::{debug, debug_span, warn};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Decoder {
    strategy: KeyStrategy,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> KeyStrategy {
        self.strategy
    }

    pub fn decode_str(&self, payload: &str, fields: &[FieldSpec]) -> Result<Resolution, Error> {
        self.decode_slice(payload.as_bytes(), fields)
    }

    pub fn decode_slice(&self, payload: &[u8], fields: &[FieldSpec]) -> Result<Resolution, Error> {
        let record = parse::record_from_slice(payload)
            .map_err(|failure| parse_error(failure, "decode.payload"))?;
        self.decode_record(&record, fields)
    }

    pub fn decode_record(
        &self,
        record: &Map<String, Value>,
        fields: &[FieldSpec],
    ) -> Result<Resolution, Error> {
        let span = debug_span!("decode", strategy = ?self.strategy, fields = fields.len());
        let _enter = span.enter();

        let resolution = resolve_with(record, fields, self.strategy).inspect_err(|err| {
            debug!(
                field = err.field().unwrap_or_default(),
                key = err.key().unwrap_or_default(),
                "required field missing"
            );
        })?;

        for resolved in resolution.fields() {
            debug!(
                field = %resolved.field,
                key = %resolved.key,
                matched = resolved.matched.as_str(),
                "resolved field"
            );
            if !resolved.alternatives.is_empty() {
                warn!(
                    field = %resolved.field,
                    chosen = %resolved.key,
                    ignored = ?resolved.alternatives,
                    "several record keys normalize to the same field name"
                );
            }
        }
        for field in resolution.skipped() {
            debug!(field = %field, "optional field missing; skipped");
        }
        Ok(resolution)
    }
}

pub(crate) fn parse_error(failure: ParseFailure, context: &str) -> Error {
    let hint = parse::hint_for_failure(&failure, context);
    let message = match &failure {
        ParseFailure::Json(_) => "invalid JSON".to_string(),
        ParseFailure::NotObject { .. } => failure.to_string(),
    };
    Error::new(ErrorKind::Parse)
        .with_message(message)
        .with_hint(hint)
        .with_source(failure)
}
