//! Purpose: Convert snake_case record keys into camelCase field names.
//! Exports: `convert_from_snake_case`, `KeyStrategy`.
//! Role: Pure, total leaf used by the resolver when a field has no explicit key.
//! Invariants: Leading and trailing underscore runs are preserved verbatim.
//! Invariants: Keys without any underscore come back unchanged (camelCase is a fixed point).
use serde::Deserialize;
use std::borrow::Cow;

/// How record keys are compared against field names that carry no explicit key.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Normalize every record key with [`convert_from_snake_case`] before comparing.
    #[default]
    ConvertFromSnakeCase,
    /// Compare record keys exactly as they appear.
    UseDefaultKeys,
}

impl KeyStrategy {
    /// Returns the form of a record key that is compared against field names.
    pub fn apply<'a>(self, key: &'a str) -> Cow<'a, str> {
        match self {
            KeyStrategy::ConvertFromSnakeCase => Cow::Owned(convert_from_snake_case(key)),
            KeyStrategy::UseDefaultKeys => Cow::Borrowed(key),
        }
    }
}

/// Converts `first_name` to `firstName`.
///
/// The middle of the key (between any leading and trailing underscore runs) is split on
/// `_` with empty segments dropped, so `first__name` behaves like `first_name`. The first
/// word is lowercased and every later word is capitalized. The underscore runs at either
/// end are put back as they were, which means `_first_name` becomes `_firstName` and will
/// not match a field declared as `firstName`. A key with no underscore at all is returned
/// as is.
pub fn convert_from_snake_case(key: &str) -> String {
    let start = key.len() - key.trim_start_matches('_').len();
    if start == key.len() || !key.contains('_') {
        // Empty, all underscores, or nothing to split.
        return key.to_string();
    }
    let end = key.trim_end_matches('_').len();

    let leading = &key[..start];
    let middle = &key[start..end];
    let trailing = &key[end..];

    let mut out = String::with_capacity(key.len());
    out.push_str(leading);
    for (index, word) in middle.split('_').filter(|word| !word.is_empty()).enumerate() {
        if index == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            push_capitalized(word, &mut out);
        }
    }
    out.push_str(trailing);
    out
}

fn push_capitalized(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyStrategy, convert_from_snake_case};

    #[test]
    fn empty_key_is_unchanged() {
        assert_eq!(convert_from_snake_case(""), "");
    }

    #[test]
    fn underscore_only_keys_are_unchanged() {
        for key in ["_", "__", "_____"] {
            assert_eq!(convert_from_snake_case(key), key);
        }
    }

    #[test]
    fn converts_basic_snake_case() {
        assert_eq!(convert_from_snake_case("first_name"), "firstName");
        assert_eq!(convert_from_snake_case("user_id"), "userId");
        assert_eq!(convert_from_snake_case("user_email_address"), "userEmailAddress");
    }

    #[test]
    fn preserves_leading_and_trailing_underscores() {
        assert_eq!(convert_from_snake_case("_first_name"), "_firstName");
        assert_eq!(convert_from_snake_case("last_name_"), "lastName_");
        assert_eq!(convert_from_snake_case("__first__name__"), "__firstName__");
        assert_eq!(convert_from_snake_case("_first__name_"), "_firstName_");
    }

    #[test]
    fn lowercases_single_word_between_underscore_runs() {
        assert_eq!(convert_from_snake_case("_URL"), "_url");
        assert_eq!(convert_from_snake_case("Id_"), "id_");
        assert_eq!(convert_from_snake_case("__FirstName__"), "__firstname__");
        for key in ["_private", "trailing_", "_both_"] {
            assert_eq!(convert_from_snake_case(key), key);
        }
    }

    #[test]
    fn collapses_inner_underscore_runs() {
        assert_eq!(convert_from_snake_case("first__name"), "firstName");
        assert_eq!(convert_from_snake_case("a___b____c"), "aBC");
    }

    #[test]
    fn recases_words_around_separators() {
        assert_eq!(convert_from_snake_case("FIRST_NAME"), "firstName");
        assert_eq!(convert_from_snake_case("user_ID"), "userId");
        assert_eq!(convert_from_snake_case("Http_Status_Code"), "httpStatusCode");
    }

    #[test]
    fn non_alphabetic_word_starts_pass_through() {
        assert_eq!(convert_from_snake_case("line_2nd_item"), "line2ndItem");
        assert_eq!(convert_from_snake_case("a_1"), "a1");
    }

    #[test]
    fn capitalizes_non_ascii_words() {
        assert_eq!(convert_from_snake_case("straße_über"), "straßeÜber");
        assert_eq!(convert_from_snake_case("élan_vital"), "élanVital");
    }

    #[test]
    fn keys_without_underscores_are_fixed_points() {
        for key in ["firstName", "URL", "id", "Überblick"] {
            assert_eq!(convert_from_snake_case(key), key);
        }
        let once = convert_from_snake_case("first_name");
        assert_eq!(convert_from_snake_case(&once), once);
    }

    #[test]
    fn strategy_apply_borrows_for_default_keys() {
        assert_eq!(KeyStrategy::UseDefaultKeys.apply("first_name"), "first_name");
        assert_eq!(KeyStrategy::ConvertFromSnakeCase.apply("first_name"), "firstName");
        assert_eq!(KeyStrategy::default(), KeyStrategy::ConvertFromSnakeCase);
    }
}
