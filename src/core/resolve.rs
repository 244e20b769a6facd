//! Purpose: Resolve target fields against a parsed record.
//! Exports: `resolve`, `resolve_with`, `Resolution`, `ResolvedField`, `MatchKind`.
//! Role: Decode step that combines explicit key overrides with key normalization.
//! Invariants: Fields resolve in declared order; the first missing required field fails the call.
//! Invariants: No partial record escapes a failure; nothing is cached across calls.
//! Invariants: Field names must be unique per call; `api::Schema` enforces this for callers.
//! Notes: When several record keys normalize to the same name the smallest raw key wins.
use crate::core::error::Error;
use crate::core::field::{FieldSpec, KeySource};
use crate::core::normalize::KeyStrategy;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchKind {
    /// Found under the field's explicit key.
    Explicit,
    /// Found because the record key normalizes to the field name.
    Normalized,
    /// Found under a record key equal to the field name (no conversion).
    Verbatim,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Explicit => "explicit",
            MatchKind::Normalized => "normalized",
            MatchKind::Verbatim => "verbatim",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedField {
    pub field: String,
    pub key: String,
    pub matched: MatchKind,
    pub value: Value,
    /// Other record keys that also matched the field and were passed over.
    pub alternatives: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    fields: Vec<ResolvedField>,
    skipped: Vec<String>,
}

impl Resolution {
    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Optional fields that had no entry in the record.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|resolved| resolved.field == field)
            .map(|resolved| &resolved.value)
    }

    pub fn into_record(self) -> Map<String, Value> {
        self.fields
            .into_iter()
            .map(|resolved| (resolved.field, resolved.value))
            .collect()
    }
}

/// Resolves `fields` against `record` using snake_case conversion for fields without an
/// explicit key.
pub fn resolve(record: &Map<String, Value>, fields: &[FieldSpec]) -> Result<Resolution, Error> {
    resolve_with(record, fields, KeyStrategy::ConvertFromSnakeCase)
}

/// Resolves `fields` in declared order using `strategy` for fields without an explicit key.
///
/// Field names are expected to be unique. Duplicates are not rejected here: each one is
/// resolved on its own and shows up in [`Resolution::fields`], and [`Resolution::into_record`]
/// keeps the value of the last one.
pub fn resolve_with(
    record: &Map<String, Value>,
    fields: &[FieldSpec],
    strategy: KeyStrategy,
) -> Result<Resolution, Error> {
    let mut resolution = Resolution::default();
    for spec in fields {
        match lookup(record, spec, strategy) {
            Lookup::Found {
                key,
                value,
                matched,
                alternatives,
            } => resolution.fields.push(ResolvedField {
                field: spec.name().to_string(),
                key,
                matched,
                value: value.clone(),
                alternatives,
            }),
            Lookup::Missing { searched } if spec.is_required() => {
                return Err(Error::missing_key(spec.name(), searched));
            }
            Lookup::Missing { .. } => resolution.skipped.push(spec.name().to_string()),
        }
    }
    Ok(resolution)
}

enum Lookup<'r> {
    Found {
        key: String,
        value: &'r Value,
        matched: MatchKind,
        alternatives: Vec<String>,
    },
    Missing {
        searched: String,
    },
}

fn lookup<'r>(
    record: &'r Map<String, Value>,
    spec: &FieldSpec,
    strategy: KeyStrategy,
) -> Lookup<'r> {
    match (spec.source(), strategy) {
        (KeySource::Explicit(key), _) => exact(record, key, MatchKind::Explicit),
        (KeySource::Normalize, KeyStrategy::UseDefaultKeys) => {
            exact(record, spec.name(), MatchKind::Verbatim)
        }
        (KeySource::Normalize, KeyStrategy::ConvertFromSnakeCase) => {
            let mut candidates = record
                .iter()
                .filter(|(raw, _)| strategy.apply(raw.as_str()) == spec.name())
                .collect::<Vec<_>>();
            candidates.sort_by(|(a, _), (b, _)| a.cmp(b));
            let mut candidates = candidates.into_iter();
            let Some((key, value)) = candidates.next() else {
                return Lookup::Missing {
                    searched: spec.name().to_string(),
                };
            };
            Lookup::Found {
                key: key.clone(),
                value,
                matched: MatchKind::Normalized,
                alternatives: candidates.map(|(raw, _)| raw.clone()).collect(),
            }
        }
    }
}

fn exact<'r>(record: &'r Map<String, Value>, key: &str, matched: MatchKind) -> Lookup<'r> {
    match record.get(key) {
        Some(value) => Lookup::Found {
            key: key.to_string(),
            value,
            matched,
            alternatives: Vec::new(),
        },
        None => Lookup::Missing {
            searched: key.to_string(),
        },
    }
}
