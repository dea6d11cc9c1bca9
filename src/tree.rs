//! Nested translation tree built from flat dotted keys.
//!
//! The remote API returns keys such as `greeting.hello`. Output files need them nested:
//!
//! ```text
//! { "base": { "greeting": { "hello": "Hi" } }, "formal": { "greeting": { "hello": "Good day" } } }
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::types::ProjectTranslations;

/// Separator between path segments of a content key.
pub const KEY_SEPARATOR: char = '.';

/// Children of an interior node, in insertion order.
pub type TranslationGroup = IndexMap<String, TranslationNode>;

/// A node of the translation tree: either a translated string or a nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationNode {
    Text(String),
    Group(TranslationGroup),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Key '{path}' contains an empty segment")]
    EmptySegment { path: String },

    /// A key needs `at` to be a group while it holds text, or the other way around.
    #[error("Key '{path}' conflicts with the existing entry at '{at}'")]
    PathConflict { path: String, at: String },
}

/// Failure while building the tree of one variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to build variant '{variant}': {source}")]
pub struct BuildError {
    pub variant: String,
    #[source]
    pub source: TreeError,
}

impl TranslationNode {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Group(_) => None,
        }
    }

    #[must_use]
    pub const fn as_group(&self) -> Option<&TranslationGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Text(_) => None,
        }
    }

    /// Reads a node back by dotted path.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Self> {
        path.split(KEY_SEPARATOR).try_fold(self, |node, segment| node.as_group()?.get(segment))
    }
}

/// Assigns `value` at the dotted `path`, creating intermediate groups where absent.
///
/// Existing text at the final segment is replaced. Text found at an intermediate segment, or a
/// group found at the final segment, is never overwritten and yields [`TreeError::PathConflict`].
///
/// # Errors
/// - The path is empty or contains an empty segment
/// - The path conflicts with an entry already in `group`
pub fn set_path_value(
    group: &mut TranslationGroup,
    path: &str,
    value: String,
) -> Result<(), TreeError> {
    let segments: Vec<&str> = path.split(KEY_SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(TreeError::EmptySegment { path: path.to_string() });
    }
    let Some((last, parents)) = segments.split_last() else {
        return Err(TreeError::EmptySegment { path: path.to_string() });
    };

    let mut prefix = String::new();
    let mut current = group;
    for segment in parents {
        if !prefix.is_empty() {
            prefix.push(KEY_SEPARATOR);
        }
        prefix.push_str(segment);

        let node = current
            .entry((*segment).to_string())
            .or_insert_with(|| TranslationNode::Group(TranslationGroup::new()));
        current = match node {
            TranslationNode::Group(children) => children,
            TranslationNode::Text(_) => {
                return Err(TreeError::PathConflict { path: path.to_string(), at: prefix });
            }
        };
    }

    match current.get_mut(*last) {
        Some(TranslationNode::Group(_)) => {
            Err(TreeError::PathConflict { path: path.to_string(), at: path.to_string() })
        }
        Some(TranslationNode::Text(existing)) => {
            *existing = value;
            Ok(())
        }
        None => {
            current.insert((*last).to_string(), TranslationNode::Text(value));
            Ok(())
        }
    }
}

/// Translations of one project, keyed first by variant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationTree {
    variants: TranslationGroup,
}

impl TranslationTree {
    /// Creates a tree holding an empty branch for `base_variant`.
    #[must_use]
    pub fn new(base_variant: &str) -> Self {
        let mut variants = TranslationGroup::new();
        variants.insert(base_variant.to_string(), TranslationNode::Group(TranslationGroup::new()));
        Self { variants }
    }

    /// Assigns `text` at `key` inside the branch of `variant`, creating the branch if needed.
    ///
    /// # Errors
    /// Returns `BuildError` when `key` is malformed or conflicts with an existing key.
    pub fn insert(&mut self, variant: &str, key: &str, text: &str) -> Result<(), BuildError> {
        let wrap = |source| BuildError { variant: variant.to_string(), source };

        let branch = self
            .variants
            .entry(variant.to_string())
            .or_insert_with(|| TranslationNode::Group(TranslationGroup::new()));
        match branch {
            TranslationNode::Group(group) => set_path_value(group, key, text.to_string()).map_err(wrap),
            // Variant branches are only ever created as groups.
            TranslationNode::Text(_) => Err(wrap(TreeError::PathConflict {
                path: key.to_string(),
                at: variant.to_string(),
            })),
        }
    }

    /// Branch of a single variant.
    #[must_use]
    pub fn variant(&self, name: &str) -> Option<&TranslationGroup> {
        self.variants.get(name).and_then(TranslationNode::as_group)
    }

    /// Variant names with their branches, in first-encounter order.
    pub fn variants(&self) -> impl Iterator<Item = (&str, &TranslationGroup)> {
        self.variants
            .iter()
            .filter_map(|(name, node)| node.as_group().map(|group| (name.as_str(), group)))
    }

    /// All variants as one group, for output files that hold every variant.
    #[must_use]
    pub const fn as_group(&self) -> &TranslationGroup {
        &self.variants
    }

    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// Folds the flat response of a project into a [`TranslationTree`].
///
/// Every key is written under `base_variant` with its base text, then under each of its variants
/// with the variant text.
///
/// # Errors
/// Returns `BuildError` when a key is malformed or two keys disagree on whether a path is a leaf.
pub fn build_translation_tree(
    translations: &ProjectTranslations,
    base_variant: &str,
) -> Result<TranslationTree, BuildError> {
    let mut tree = TranslationTree::new(base_variant);

    for (key, entry) in translations {
        tree.insert(base_variant, key, &entry.text)?;

        let Some(variants) = &entry.variants else {
            continue;
        };
        for (variant, variant_text) in variants {
            tree.insert(variant, key, &variant_text.text)?;
        }
    }

    tracing::debug!(
        keys = translations.len(),
        variants = tree.variant_count(),
        "Built translation tree"
    );
    Ok(tree)
}
