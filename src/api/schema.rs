//! Purpose: Load field schemas from JSON files and inline `--field` arguments.
//! Exports: `Schema`, `parse_field_arg`.
//! Role: Configuration layer that produces validated `FieldSpec` lists for the decoder.
//! Invariants: Field names are non-empty and unique within one schema.
//! Invariants: Unknown schema keys are rejected rather than ignored.
use crate::api::decoder::{Decoder, parse_error};
use crate::core::error::{Error, ErrorKind};
use crate::core::field::FieldSpec;
use crate::core::normalize::KeyStrategy;
use crate::json::parse::{self, ParseFailure};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schema {
    strategy: Option<KeyStrategy>,
    fields: Vec<FieldSpec>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default)]
    strategy: Option<KeyStrategy>,
    fields: Vec<FieldEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldEntry {
    name: String,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    optional: bool,
}

impl From<FieldEntry> for FieldSpec {
    fn from(entry: FieldEntry) -> Self {
        let spec = match entry.key {
            Some(key) => FieldSpec::explicit(entry.name, key),
            None => FieldSpec::normalized(entry.name),
        };
        if entry.optional { spec.optional() } else { spec }
    }
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name().is_empty() {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message("field name must not be empty")
                    .with_hint("Give every field a name, e.g. `firstName`."));
            }
            if !seen.insert(field.name()) {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message("duplicate field in schema")
                    .with_field(field.name())
                    .with_hint("Declare each field once."));
            }
        }
        Ok(Self {
            strategy: None,
            fields,
        })
    }

    pub fn with_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let file: SchemaFile = parse::from_slice(bytes)
            .map_err(|err| parse_error(ParseFailure::Json(err), "schema"))?;
        let schema = Self::new(file.fields.into_iter().map(FieldSpec::from).collect())?;
        Ok(match file.strategy {
            Some(strategy) => schema.with_strategy(strategy),
            None => schema,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read schema file")
                .with_path(path)
                .with_source(err)
        })?;
        Self::from_slice(&bytes).map_err(|err| err.with_path(path))
    }

    /// Appends fields after those already declared, keeping names unique.
    pub fn extend(self, fields: Vec<FieldSpec>) -> Result<Self, Error> {
        let strategy = self.strategy;
        let mut all = self.fields;
        all.extend(fields);
        let schema = Self::new(all)?;
        Ok(Self { strategy, ..schema })
    }

    pub fn strategy(&self) -> Option<KeyStrategy> {
        self.strategy
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// A decoder using the schema's strategy, or the default one when the schema names none.
    pub fn decoder(&self) -> Decoder {
        Decoder::new().with_strategy(self.strategy.unwrap_or_default())
    }
}

/// Parses `NAME`, `NAME=KEY`, `NAME?` or `NAME=KEY?` into a field spec.
///
/// A trailing `?` marks the field optional. Without `=KEY` the field is matched through
/// key normalization.
pub fn parse_field_arg(arg: &str) -> Result<FieldSpec, Error> {
    let (body, optional) = match arg.strip_suffix('?') {
        Some(body) => (body, true),
        None => (arg, false),
    };
    let spec = match body.split_once('=') {
        Some((name, key)) => {
            if key.is_empty() {
                return Err(invalid_field_arg(arg, "explicit key must not be empty"));
            }
            FieldSpec::explicit(name, key)
        }
        None => FieldSpec::normalized(body),
    };
    if spec.name().is_empty() {
        return Err(invalid_field_arg(arg, "field name must not be empty"));
    }
    Ok(if optional { spec.optional() } else { spec })
}

fn invalid_field_arg(arg: &str, message: &str) -> Error {
    Error::new(ErrorKind::Usage)
        .with_message(format!("invalid --field {arg:?}: {message}"))
        .with_hint("Use NAME, NAME=KEY, or append `?` for an optional field.")
}

#[cfg(test)]
mod tests {
    use super::{Schema, parse_field_arg};
    use crate::core::error::ErrorKind;
    use crate::core::field::{FieldSpec, KeySource};
    use crate::core::normalize::KeyStrategy;

    #[test]
    fn schema_file_parses_fields_and_strategy() {
        let schema = Schema::from_slice(
            br#"{
                "strategy": "use_default_keys",
                "fields": [
                    {"name": "id", "key": "user_id"},
                    {"name": "firstName"},
                    {"name": "nickname", "optional": true}
                ]
            }"#,
        )
        .expect("schema");
        assert_eq!(schema.strategy(), Some(KeyStrategy::UseDefaultKeys));
        assert_eq!(
            schema.fields(),
            [
                FieldSpec::explicit("id", "user_id"),
                FieldSpec::normalized("firstName"),
                FieldSpec::normalized("nickname").optional(),
            ]
        );
        assert_eq!(schema.decoder().strategy(), KeyStrategy::UseDefaultKeys);
    }

    #[test]
    fn schema_without_strategy_uses_default_decoder() {
        let schema = Schema::from_slice(br#"{"fields": [{"name": "a"}]}"#).expect("schema");
        assert_eq!(schema.strategy(), None);
        assert_eq!(schema.decoder().strategy(), KeyStrategy::ConvertFromSnakeCase);
    }

    #[test]
    fn schema_rejects_unknown_keys_and_duplicates() {
        let err = Schema::from_slice(br#"{"fields": [{"name": "a", "rename": "b"}]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = Schema::from_slice(br#"{"fields": [{"name": "a"}, {"name": "a", "key": "x"}]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(err.field(), Some("a"));
    }

    #[test]
    fn extend_keeps_strategy_and_checks_duplicates() {
        let schema = Schema::new(vec![FieldSpec::normalized("a")])
            .expect("schema")
            .with_strategy(KeyStrategy::UseDefaultKeys);
        let schema = schema
            .extend(vec![FieldSpec::normalized("b")])
            .expect("extend");
        assert_eq!(schema.strategy(), Some(KeyStrategy::UseDefaultKeys));
        assert_eq!(schema.fields().len(), 2);

        let err = schema
            .extend(vec![FieldSpec::explicit("a", "a_key")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn field_args_cover_all_forms() {
        assert_eq!(
            parse_field_arg("firstName").expect("plain"),
            FieldSpec::normalized("firstName")
        );
        assert_eq!(
            parse_field_arg("id=user_id").expect("explicit"),
            FieldSpec::explicit("id", "user_id")
        );
        let optional = parse_field_arg("email=user_email?").expect("optional");
        assert!(!optional.is_required());
        assert_eq!(
            optional.source(),
            &KeySource::Explicit("user_email".to_string())
        );
        assert!(!parse_field_arg("nick?").expect("optional").is_required());
    }

    #[test]
    fn field_args_reject_empty_parts() {
        for arg in ["", "?", "=user_id", "id=", "id=?"] {
            let err = parse_field_arg(arg).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Usage, "arg {arg:?}");
        }
    }
}
