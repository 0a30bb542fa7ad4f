//! The migration pipeline: a linear stage machine over the transformers.
//!
//! Stages run strictly in sequence, one await at a time; there is no
//! parallelism anywhere in a run. Errors split by where they happen: before
//! the destination exists (extraction, reference setup, container creation)
//! they abort the run; afterwards they still abort but leave committed work
//! in place — there is no rollback, re-runs rely on idempotency instead.
//! Per-record problems never abort at all; they aggregate in the result.

use lift_client::{ExtractionClient, LoadClient};
use lift_core::responses::{ImportResult, ValidationReport};
use lift_core::sheet::{WorkspaceId, WorkspaceInfo, sanitize_container_name};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{EngineError, EngineResult};
use crate::reference::{
    PRIORITY_SET, RESOURCE_CATEGORY_SET, ReferenceLibrary, STATUS_SET, discover_values,
};
use crate::transform::{assignment, clear_placeholder_rows, project, resource, task};
use crate::upsert::get_or_create;
use crate::validate::validate_snapshot;

/// One stage of the migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Init,
    ReferenceSetup,
    ContainerCreation,
    SummaryConfig,
    TaskImport,
    /// Skipped when the project has no tasks.
    TaskConfig,
    ResourceImport,
    /// Skipped when the project has no assignments.
    AssignmentConfig,
    Done,
    /// Terminal from anywhere.
    Failed,
}

impl Stage {
    /// Total number of forward transitions, for progress reporting.
    pub const TOTAL: u64 = 8;

    /// Return the human-readable stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ReferenceSetup => "reference setup",
            Self::ContainerCreation => "container creation",
            Self::SummaryConfig => "summary",
            Self::TaskImport => "task import",
            Self::TaskConfig => "task configuration",
            Self::ResourceImport => "resource import",
            Self::AssignmentConfig => "assignment configuration",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// 0-based position in the forward sequence; terminal stages sit at the
    /// end.
    #[must_use]
    pub const fn position(self) -> u64 {
        match self {
            Self::Init => 0,
            Self::ReferenceSetup => 1,
            Self::ContainerCreation => 2,
            Self::SummaryConfig => 3,
            Self::TaskImport => 4,
            Self::TaskConfig => 5,
            Self::ResourceImport => 6,
            Self::AssignmentConfig => 7,
            Self::Done | Self::Failed => Self::TOTAL,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives stage transitions for display. The CLI implements this with a
/// progress bar; the engine tests collect transitions into a vector.
pub trait ProgressSink: Send + Sync {
    fn stage(&self, stage: Stage, done: u64, total: u64);
}

/// Sink that drops everything.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn stage(&self, _stage: Stage, _done: u64, _total: u64) {}
}

/// Knobs of one migration run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Existing destination workspace. When absent, a workspace named after
    /// the sanitized project name is found or created.
    pub destination: Option<WorkspaceId>,
    /// Existing reference workspace; must resolve when set.
    pub reference_workspace_id: Option<WorkspaceId>,
    /// Marks the run result as a rehearsal. The caller decides what load
    /// client backs a dry run — substituting the in-memory one keeps the
    /// whole stage sequence honest without platform traffic.
    pub dry_run: bool,
    /// Scaling factor for rendering durations as day counts.
    pub hours_per_day: f64,
    /// Deepest row nesting the destination accepts.
    pub max_indent: u32,
    /// Clear pre-existing rows from the task and resource sheets before
    /// populating them. For pre-structured templates only.
    pub clear_placeholders: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            destination: None,
            reference_workspace_id: None,
            dry_run: false,
            hours_per_day: lift_core::convert::DEFAULT_HOURS_PER_DAY,
            max_indent: 10,
            clear_placeholders: false,
        }
    }
}

/// The orchestrator owning the collaborators for one or more runs.
pub struct MigrationPipeline {
    extraction: Arc<dyn ExtractionClient>,
    load: Arc<dyn LoadClient>,
    progress: Arc<dyn ProgressSink>,
    options: PipelineOptions,
}

impl MigrationPipeline {
    /// Build a pipeline with no progress reporting.
    pub fn new(
        extraction: Arc<dyn ExtractionClient>,
        load: Arc<dyn LoadClient>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            extraction,
            load,
            progress: Arc::new(NullProgress),
            options,
        }
    }

    /// Attach a progress sink.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Run a full migration of one project.
    ///
    /// Never returns `Err`: stage-level failures land in the result's
    /// `failure` field with `success = false`, per-record problems in its
    /// `errors` and `warnings`.
    pub async fn run_import(&self, source_ref: &str) -> ImportResult {
        let started = Instant::now();
        let mut result = ImportResult {
            dry_run: self.options.dry_run,
            ..ImportResult::default()
        };

        match self.execute(source_ref, &mut result).await {
            Ok(()) => {
                result.success = true;
                self.report(Stage::Done);
            }
            Err(error) => {
                tracing::error!(%error, "migration aborted");
                result.failure = Some(error.to_string());
                self.report(Stage::Failed);
            }
        }

        result.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        result
    }

    /// Fetch and validate a source export without touching the target.
    ///
    /// # Errors
    ///
    /// Returns a connectivity error when the export cannot be fetched.
    pub async fn validate_source(&self, source_ref: &str) -> EngineResult<ValidationReport> {
        let snapshot = self.extraction.fetch_snapshot(source_ref).await?;
        Ok(validate_snapshot(snapshot).report())
    }

    fn report(&self, stage: Stage) {
        tracing::info!(stage = %stage, "stage");
        self.progress.stage(stage, stage.position(), Stage::TOTAL);
    }

    async fn execute(&self, source_ref: &str, result: &mut ImportResult) -> EngineResult<()> {
        let load = self.load.as_ref();

        self.report(Stage::Init);
        let snapshot = self.extraction.fetch_snapshot(source_ref).await?;
        let mut validated = validate_snapshot(snapshot);
        let project = validated.require_project()?.clone();
        result.errors.append(&mut validated.errors);

        self.report(Stage::ReferenceSetup);
        let mut library =
            ReferenceLibrary::setup(load, self.options.reference_workspace_id).await?;
        let categories = discover_values(&validated.resources, |r| r.category.as_deref());
        library
            .ensure_value_set(
                load,
                RESOURCE_CATEGORY_SET,
                categories.iter().map(String::as_str),
            )
            .await?;
        result.counts.sheets_created += library.sheets_created();
        result.counts.reference_values_added = library.values_added();

        self.report(Stage::ContainerCreation);
        let workspace = self.resolve_destination(&project.name).await?;
        result.workspace = Some(workspace.clone());

        self.report(Stage::SummaryConfig);
        let summary = project::import_summary(load, workspace.id, &project).await?;
        summary.outcome.absorb_into(result);

        self.report(Stage::TaskImport);
        if self.options.clear_placeholders {
            self.clear_template_rows(workspace.id).await?;
        }
        let task_import = task::import_tasks(
            load,
            workspace.id,
            &validated.tasks,
            self.options.hours_per_day,
            self.options.max_indent,
        )
        .await?;
        result.counts.tasks_imported = task_import.tasks_imported;

        if !validated.tasks.is_empty() {
            self.report(Stage::TaskConfig);
            task::configure_task_columns(
                load,
                &task_import,
                library.values(STATUS_SET),
                library.values(PRIORITY_SET),
            )
            .await?;
        }

        self.report(Stage::ResourceImport);
        let resource_import =
            resource::import_resources(load, workspace.id, &validated.resources, &categories)
                .await?;
        result.counts.resources_imported = resource_import.resources_imported;

        if !validated.assignments.is_empty() {
            self.report(Stage::AssignmentConfig);
            let config = assignment::configure_assignments(
                load,
                &task_import,
                resource_import.refs,
                &validated.resources,
                &validated.assignments,
            )
            .await?;
            result.counts.assignments_imported = config.assignments_imported;
            config.outcome.absorb_into(result);
        }

        task_import.outcome.absorb_into(result);
        resource_import.outcome.absorb_into(result);
        Ok(())
    }

    async fn resolve_destination(&self, project_name: &str) -> EngineResult<WorkspaceInfo> {
        match self.options.destination {
            Some(id) => self.load.get_workspace(id).await?.ok_or_else(|| {
                EngineError::Configuration(format!(
                    "destination workspace {id} does not resolve"
                ))
            }),
            None => {
                let name = sanitize_container_name(project_name);
                let fetched = get_or_create(
                    || self.load.find_workspace_by_name(&name),
                    || self.load.create_workspace(&name),
                )
                .await?;
                if fetched.was_created() {
                    tracing::info!(workspace = %name, "created destination workspace");
                }
                Ok(fetched.into_inner())
            }
        }
    }

    /// Clear placeholder rows from the entity sheets, when they pre-exist.
    async fn clear_template_rows(&self, workspace_id: WorkspaceId) -> EngineResult<()> {
        for name in [task::TASK_SHEET, resource::RESOURCE_SHEET] {
            if let Some(sheet) = self.load.find_sheet(workspace_id, name).await? {
                clear_placeholder_rows(self.load.as_ref(), sheet.id).await?;
            }
        }
        Ok(())
    }
}
