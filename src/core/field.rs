//! Purpose: Describe how each target field finds its raw key in a parsed record.
//! Exports: `FieldSpec`, `KeySource`.
//! Role: Static schema configuration consumed by the resolver.
//! Invariants: An explicit key is always looked up verbatim and never normalized.

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeySource {
    /// Look the field up under this exact raw key.
    Explicit(String),
    /// Find the record key whose normalized form equals the field name.
    Normalize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    name: String,
    source: KeySource,
    required: bool,
}

impl FieldSpec {
    pub fn normalized(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: KeySource::Normalize,
            required: true,
        }
    }

    pub fn explicit(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: KeySource::Explicit(key.into()),
            required: true,
        }
    }

    /// Marks the field optional: a missing entry is skipped instead of failing the decode.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &KeySource {
        &self.source
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldSpec, KeySource};

    #[test]
    fn constructors_default_to_required() {
        let field = FieldSpec::explicit("id", "user_id");
        assert_eq!(field.name(), "id");
        assert_eq!(field.source(), &KeySource::Explicit("user_id".to_string()));
        assert!(field.is_required());

        let field = FieldSpec::normalized("firstName").optional();
        assert_eq!(field.source(), &KeySource::Normalize);
        assert!(!field.is_required());
    }
}
