//! Rendering and writing of translation files.
//!
//! A destination ending in a module extension (`.ts`, `.tsx`, `.js`, ...) is written as
//! `export const translations = { ... };` and parsed before writing. Any other destination is
//! written as JSON. Both use 4-space indentation.

use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tree_sitter::{
    Node,
    Parser,
};

use crate::config::ProjectConfig;
use crate::tree::{
    TranslationGroup,
    TranslationNode,
};

/// Placeholder in a destination template replaced with the variant name.
pub const VARIANT_PLACEHOLDER: &str = "__variant";

/// Name of the exported binding in module output.
pub const EXPORT_NAME: &str = "translations";

const INDENT: &str = "    ";

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize translations: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to set language for parser: {0}")]
    ParserSetup(#[from] tree_sitter::LanguageError),

    #[error("Failed to parse generated module")]
    ParseFailed,

    #[error("Generated module is not valid {language:?} (line {line}, column {column})")]
    InvalidModule { language: ModuleLanguage, line: usize, column: usize },

    #[error("Variant name {0:?} cannot be used in a file path")]
    InvalidVariant(String),
}

/// Produces the source of one output file. Verification happens afterwards in
/// [`write_output_with`].
pub type Renderer = fn(&TranslationGroup, OutputFormat) -> Result<String, WriteError>;

/// Language of a source-module destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleLanguage {
    JavaScript,
    TypeScript,
    Tsx,
}

impl ModuleLanguage {
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// How a destination file is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    Module(ModuleLanguage),
}

impl OutputFormat {
    /// Infers the format from the file extension of `path`.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ts" | "mts" | "cts") => Self::Module(ModuleLanguage::TypeScript),
            Some("tsx") => Self::Module(ModuleLanguage::Tsx),
            Some("js" | "mjs" | "cjs") => Self::Module(ModuleLanguage::JavaScript),
            _ => Self::Json,
        }
    }
}

/// A file produced by [`write_output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub variant: Option<String>,
    pub format: OutputFormat,
}

/// Destination template of `project`, defaulting to `<name or id>.json`.
#[must_use]
pub fn destination_template(project: &ProjectConfig) -> String {
    project
        .destination
        .clone()
        .unwrap_or_else(|| format!("{}.json", project.display_name()))
}

/// Whether the destination of `project` is split per variant.
#[must_use]
pub fn is_variant_template(project: &ProjectConfig) -> bool {
    destination_template(project).contains(VARIANT_PLACEHOLDER)
}

/// Rejects variant names that would escape the destination directory.
///
/// # Errors
/// Returns `WriteError::InvalidVariant` for empty names, `.`/`..`, or names with path separators.
pub fn check_variant_name(variant: &str) -> Result<(), WriteError> {
    if variant.is_empty() || variant == "." || variant == ".." || variant.contains(['/', '\\']) {
        return Err(WriteError::InvalidVariant(variant.to_string()));
    }
    Ok(())
}

/// Destination path of `project` for `variant`, relative to the workspace.
#[must_use]
pub fn resolve_destination(project: &ProjectConfig, variant: Option<&str>) -> PathBuf {
    let template = destination_template(project);
    let path = match variant {
        Some(variant) => template.replace(VARIANT_PLACEHOLDER, variant),
        None => template,
    };
    PathBuf::from(path)
}

/// Renders `group` as pretty JSON with 4-space indentation.
///
/// # Errors
/// Returns `WriteError::Serialize` if serialization fails.
pub fn render_json(group: &TranslationGroup) -> Result<String, WriteError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    group.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Renders `group` as `export const translations = { ... };`.
///
/// Property names that are valid identifiers are left unquoted.
///
/// # Errors
/// Returns `WriteError::Serialize` if a string literal cannot be encoded.
pub fn render_module(group: &TranslationGroup) -> Result<String, WriteError> {
    let mut out = format!("export const {EXPORT_NAME} = ");
    write_group(&mut out, group, 0)?;
    out.push(';');
    Ok(out)
}

fn write_group(out: &mut String, group: &TranslationGroup, depth: usize) -> Result<(), WriteError> {
    if group.is_empty() {
        out.push_str("{}");
        return Ok(());
    }

    out.push_str("{\n");
    for (index, (key, node)) in group.iter().enumerate() {
        push_indent(out, depth + 1);
        if is_identifier(key) {
            out.push_str(key);
        } else {
            out.push_str(&serde_json::to_string(key)?);
        }
        out.push_str(": ");
        match node {
            TranslationNode::Text(text) => out.push_str(&serde_json::to_string(text)?),
            TranslationNode::Group(children) => write_group(out, children, depth + 1)?,
        }
        if index + 1 < group.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, depth);
    out.push('}');
    Ok(())
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Checks whether `key` can be written as a bare property name.
///
/// Only ASCII identifiers qualify; every other key is quoted.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Parses `source` and fails if the syntax tree contains an error.
///
/// # Errors
/// - `WriteError::ParserSetup` / `WriteError::ParseFailed` if the parser cannot run
/// - `WriteError::InvalidModule` at the first syntax error
pub fn verify_module_source(source: &str, language: ModuleLanguage) -> Result<(), WriteError> {
    let mut parser = Parser::new();
    parser.set_language(&language.tree_sitter_language())?;
    let tree = parser.parse(source, None).ok_or(WriteError::ParseFailed)?;

    let root = tree.root_node();
    if !root.has_error() {
        return Ok(());
    }

    let position = first_error_node(root).unwrap_or(root).start_position();
    Err(WriteError::InvalidModule {
        language,
        line: position.row + 1,
        column: position.column + 1,
    })
}

/// Finds the first error or missing node in document order.
fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error_node)
}

/// Renders `group` as `format`.
///
/// # Errors
/// Returns `WriteError::Serialize` if serialization fails.
pub fn render(group: &TranslationGroup, format: OutputFormat) -> Result<String, WriteError> {
    match format {
        OutputFormat::Json => render_json(group),
        OutputFormat::Module(_) => render_module(group),
    }
}

/// Verifies rendered module source. JSON output is produced by serde and not re-parsed.
///
/// # Errors
/// Returns `WriteError::InvalidModule` if a module does not parse.
pub fn verify_source(source: &str, format: OutputFormat) -> Result<(), WriteError> {
    match format {
        OutputFormat::Json => Ok(()),
        OutputFormat::Module(language) => verify_module_source(source, language),
    }
}

/// Writes one translation file for `project` under `workspace_root`.
///
/// # Errors
/// Returns `WriteError` if rendering, verification, or file I/O fails.
pub async fn write_output(
    workspace_root: &Path,
    project: &ProjectConfig,
    group: &TranslationGroup,
    variant: Option<&str>,
) -> Result<WrittenFile, WriteError> {
    write_output_with(workspace_root, project, group, variant, render).await
}

/// Writes one translation file using `renderer` to produce its content.
///
/// The content is verified before anything touches the disk, so a rejected module neither
/// creates nor truncates the destination. Parent directories are created as needed.
///
/// # Errors
/// Returns `WriteError` if the variant name, rendering, verification, or file I/O fails.
pub async fn write_output_with(
    workspace_root: &Path,
    project: &ProjectConfig,
    group: &TranslationGroup,
    variant: Option<&str>,
    renderer: Renderer,
) -> Result<WrittenFile, WriteError> {
    if let Some(variant) = variant {
        check_variant_name(variant)?;
    }
    let relative = resolve_destination(project, variant);
    let format = OutputFormat::from_path(&relative);
    let content = renderer(group, format)?;
    verify_source(&content, format)?;

    let path = workspace_root.join(relative);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| WriteError::Io { path: parent.to_path_buf(), source })?;
    }
    tokio::fs::write(&path, content)
        .await
        .map_err(|source| WriteError::Io { path: path.clone(), source })?;

    tracing::debug!(path = %path.display(), ?format, "Wrote translation file");
    Ok(WrittenFile { path, variant: variant.map(str::to_string), format })
}
