//! Core types used throughout the project.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

/// Response body of the structured project endpoint.
///
/// Maps each content key (e.g. `greeting.hello`) to its entry. Order follows the response body.
pub type ProjectTranslations = IndexMap<String, TranslationKeyEntry>;

/// A single content key as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationKeyEntry {
    /// Base text of the key.
    pub text: String,

    /// Variant-specific overrides, keyed by variant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<IndexMap<String, VariantText>>,
}

/// Text of one variant of a content key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariantText {
    pub text: String,
}

impl TranslationKeyEntry {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), variants: None }
    }

    /// Adds a variant override, keeping insertion order.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>, text: impl Into<String>) -> Self {
        self.variants
            .get_or_insert_with(IndexMap::new)
            .insert(variant.into(), VariantText { text: text.into() });
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn test_deserialize_structured_response() {
        let body = r#"{
            "greeting.hello": {
                "text": "Hi",
                "status": "FINAL",
                "variants": { "formal": { "text": "Good day" } }
            },
            "greeting.bye": { "text": "Bye" }
        }"#;

        let response: ProjectTranslations = serde_json::from_str(body).unwrap();

        expect_that!(response.len(), eq(2));
        let hello = response.get("greeting.hello").unwrap();
        assert_eq!(hello.text, "Hi");
        assert_eq!(
            hello.variants.as_ref().and_then(|v| v.get("formal")).map(|v| v.text.as_str()),
            Some("Good day")
        );
        expect_that!(response.get("greeting.bye").unwrap().variants.is_none(), eq(true));
    }

    #[googletest::test]
    fn test_deserialize_keeps_response_order() {
        let body = r#"{ "b": { "text": "B" }, "a": { "text": "A" }, "c": { "text": "C" } }"#;

        let response: ProjectTranslations = serde_json::from_str(body).unwrap();
        let keys: Vec<&str> = response.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    /// `text` が無いエントリはエラーになる
    #[googletest::test]
    fn test_deserialize_missing_text_is_error() {
        let body = r#"{ "greeting.hello": { "variants": {} } }"#;

        let result = serde_json::from_str::<ProjectTranslations>(body);

        expect_that!(result.is_err(), eq(true));
    }

    #[googletest::test]
    fn test_deserialize_non_object_is_error() {
        let result = serde_json::from_str::<ProjectTranslations>(r#"["greeting.hello"]"#);

        expect_that!(result.is_err(), eq(true));
    }
}
