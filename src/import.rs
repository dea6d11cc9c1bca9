//! Runs the import of the configured projects.
//!
//! Projects are processed one after another. A failure in one project is logged and recorded in
//! its [`ProjectOutcome`]; the remaining projects still run.

use thiserror::Error;

use crate::config::{
    ConfigError,
    ConfigManager,
    ProjectConfig,
};
use crate::output::{
    Renderer,
    WriteError,
    WrittenFile,
    is_variant_template,
    render,
    write_output_with,
};
use crate::remote::{
    FetchError,
    ProjectFetcher,
};
use crate::tree::{
    BuildError,
    TranslationGroup,
    TranslationTree,
    build_translation_tree,
};

/// Errors that stop the whole run.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] FetchError),
}

/// Errors confined to a single project.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Result of importing one project.
#[derive(Debug)]
pub struct ProjectOutcome {
    pub project_id: String,
    pub written: Vec<WrittenFile>,
    pub errors: Vec<ProjectError>,
}

impl ProjectOutcome {
    fn new(project: &ProjectConfig) -> Self {
        Self { project_id: project.id.clone(), written: Vec::new(), errors: Vec::new() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcomes of a run, in project order.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub outcomes: Vec<ProjectOutcome>,
}

impl ImportReport {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|outcome| !outcome.is_success())
    }

    #[must_use]
    pub fn written_count(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.written.len()).sum()
    }

    #[must_use]
    pub fn outcome(&self, project_id: &str) -> Option<&ProjectOutcome> {
        self.outcomes.iter().find(|outcome| outcome.project_id == project_id)
    }
}

/// Imports projects from a [`ProjectFetcher`] into files under the workspace root.
#[derive(Debug)]
pub struct Importer<F> {
    config: ConfigManager,
    fetcher: F,
    renderer: Renderer,
}

impl<F: ProjectFetcher> Importer<F> {
    #[must_use]
    pub const fn new(config: ConfigManager, fetcher: F) -> Self {
        Self { config, fetcher, renderer: render }
    }

    /// Replaces how output files are rendered. The result is still verified before writing.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Imports every configured project, or only the one matching `filter` by id or name.
    ///
    /// # Errors
    /// Returns `ImportError::Config` if `filter` matches no project. Per-project failures are
    /// reported in the returned [`ImportReport`] instead.
    pub async fn run(&self, filter: Option<&str>) -> Result<ImportReport, ImportError> {
        let projects = self.config.select_projects(filter)?;

        let mut report = ImportReport::default();
        for project in projects {
            let outcome = self.import_project(project).await;
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    async fn import_project(&self, project: &ProjectConfig) -> ProjectOutcome {
        let mut outcome = ProjectOutcome::new(project);
        tracing::info!(project = project.display_name(), "Importing project");

        let tree = match self.fetch_tree(project).await {
            Ok(tree) => tree,
            Err(error) => {
                tracing::error!(
                    project = project.display_name(),
                    "Failed to import project: {error}"
                );
                outcome.errors.push(error);
                return outcome;
            }
        };

        if is_variant_template(project) {
            for (variant, group) in tree.variants() {
                self.write(project, group, Some(variant), &mut outcome).await;
            }
        } else {
            self.write(project, tree.as_group(), None, &mut outcome).await;
        }

        outcome
    }

    async fn fetch_tree(&self, project: &ProjectConfig) -> Result<TranslationTree, ProjectError> {
        let translations = self.fetcher.fetch_project(&project.id).await?;
        let base_variant = self.config.get_settings().base_variant_for(project);
        Ok(build_translation_tree(&translations, base_variant)?)
    }

    async fn write(
        &self,
        project: &ProjectConfig,
        group: &TranslationGroup,
        variant: Option<&str>,
        outcome: &mut ProjectOutcome,
    ) {
        let root = self.config.workspace_root();
        match write_output_with(root, project, group, variant, self.renderer).await {
            Ok(file) => {
                tracing::info!(
                    project = project.display_name(),
                    path = %file.path.display(),
                    "Wrote translations"
                );
                outcome.written.push(file);
            }
            Err(error @ WriteError::InvalidModule { .. }) => {
                tracing::error!(
                    "The output file for project {} could not be generated properly! {error}",
                    project.display_name()
                );
                outcome.errors.push(error.into());
            }
            Err(error) => {
                tracing::error!(project = project.display_name(), "Failed to write output: {error}");
                outcome.errors.push(error.into());
            }
        }
    }
}
