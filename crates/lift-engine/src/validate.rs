//! The parse-and-validate boundary: raw extraction records become typed ones.
//!
//! Runs exactly once per snapshot, before any transformation. Each record is
//! judged on its own: a malformed task is rejected with a [`RecordError`]
//! while the rest of the batch proceeds. Nothing downstream re-checks field
//! presence — the typed records guarantee it.

use lift_core::enums::{DependencyType, EntityKind};
use lift_core::errors::RecordError;
use lift_core::records::{
    PredecessorLink, ProjectSnapshot, RawAssignment, RawResource, RawTask, SourceAssignment,
    SourceProject, SourceResource, SourceTask,
};
use lift_core::responses::ValidationReport;
use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};

/// A snapshot after the validation boundary.
#[derive(Debug, Clone, Default)]
pub struct ValidatedSnapshot {
    /// The project record, when it validated. A missing project makes the
    /// whole run unusable; see [`ValidatedSnapshot::require_project`].
    pub project: Option<SourceProject>,
    pub tasks: Vec<SourceTask>,
    pub resources: Vec<SourceResource>,
    pub assignments: Vec<SourceAssignment>,
    /// Per-record rejections, in input order.
    pub errors: Vec<RecordError>,
}

impl ValidatedSnapshot {
    /// The project record, or a fatal validation error when it was rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] carrying the project's record
    /// error.
    pub fn require_project(&self) -> EngineResult<&SourceProject> {
        self.project.as_ref().ok_or_else(|| {
            let record_error = self
                .errors
                .iter()
                .find(|e| e.entity == EntityKind::Project)
                .cloned()
                .unwrap_or_else(|| {
                    RecordError::anonymous(EntityKind::Project, "name", "missing required field")
                });
            EngineError::Validation(record_error)
        })
    }

    /// Summarize as a validation report (used by the `validate` operation).
    #[must_use]
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            valid: self.errors.is_empty() && self.project.is_some(),
            tasks: self.tasks.len(),
            resources: self.resources.len(),
            assignments: self.assignments.len(),
            errors: self.errors.clone(),
        }
    }
}

/// Validate a raw snapshot into typed records, aggregating rejections.
#[must_use]
pub fn validate_snapshot(raw: ProjectSnapshot) -> ValidatedSnapshot {
    let mut out = ValidatedSnapshot::default();

    match validate_project(&raw) {
        Ok(project) => out.project = Some(project),
        Err(error) => out.errors.push(error),
    }

    let mut task_ids = HashSet::new();
    for task in raw.tasks {
        if let Some(task) = validate_task(task, &mut task_ids, &mut out.errors) {
            out.tasks.push(task);
        }
    }

    let mut resource_ids = HashSet::new();
    for resource in raw.resources {
        match validate_resource(resource, &mut resource_ids) {
            Ok(resource) => out.resources.push(resource),
            Err(error) => out.errors.push(error),
        }
    }

    for assignment in raw.assignments {
        match validate_assignment(assignment) {
            Ok(assignment) => out.assignments.push(assignment),
            Err(error) => out.errors.push(error),
        }
    }

    out
}

fn required(
    entity: EntityKind,
    source_id: Option<&str>,
    field: &str,
    value: Option<String>,
) -> Result<String, RecordError> {
    match value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty()) {
        Some(v) => Ok(v),
        None => Err(match source_id {
            Some(id) => RecordError::new(entity, id, field, "missing required field"),
            None => RecordError::anonymous(entity, field, "missing required field"),
        }),
    }
}

fn validate_project(raw: &ProjectSnapshot) -> Result<SourceProject, RecordError> {
    let project = &raw.project;
    let name = required(
        EntityKind::Project,
        project.id.as_deref(),
        "name",
        project.name.clone(),
    )?;

    Ok(SourceProject {
        id: project.id.clone().unwrap_or_else(|| name.clone()),
        name,
        start: project.start,
        finish: project.finish,
        manager_name: project.manager_name.clone(),
        manager_email: project.manager_email.clone(),
    })
}

fn validate_task(
    raw: RawTask,
    seen_ids: &mut HashSet<String>,
    errors: &mut Vec<RecordError>,
) -> Option<SourceTask> {
    let id = match required(EntityKind::Task, raw.id.as_deref(), "id", raw.id.clone()) {
        Ok(id) => id,
        Err(error) => {
            errors.push(error);
            return None;
        }
    };
    if !seen_ids.insert(id.clone()) {
        errors.push(RecordError::new(
            EntityKind::Task,
            &id,
            "id",
            "duplicate identifier",
        ));
        return None;
    }

    let name = match required(EntityKind::Task, Some(&id), "name", raw.name) {
        Ok(name) => name,
        Err(error) => {
            errors.push(error);
            return None;
        }
    };

    let outline_level = match raw.outline_level {
        Some(level) if level >= 1 => level,
        Some(_) => {
            errors.push(RecordError::new(
                EntityKind::Task,
                &id,
                "outline_level",
                "outline level must be at least 1",
            ));
            return None;
        }
        None => {
            errors.push(RecordError::new(
                EntityKind::Task,
                &id,
                "outline_level",
                "missing required field",
            ));
            return None;
        }
    };

    // Malformed links drop individually; the task itself stays.
    let mut predecessors = Vec::with_capacity(raw.predecessors.len());
    for link in raw.predecessors {
        let Some(predecessor_id) = link
            .predecessor_id
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty())
        else {
            errors.push(RecordError::new(
                EntityKind::Task,
                &id,
                "predecessors",
                "link is missing its predecessor id",
            ));
            continue;
        };

        // Absent link type means the source default, finish-to-start.
        let link_type = match link.link_type.as_deref() {
            None => DependencyType::FS,
            Some(token) => match DependencyType::try_from(token) {
                Ok(ty) => ty,
                Err(parse) => {
                    errors.push(RecordError::new(
                        EntityKind::Task,
                        &id,
                        "predecessors",
                        parse.to_string(),
                    ));
                    continue;
                }
            },
        };

        predecessors.push(PredecessorLink {
            predecessor_id,
            link_type,
            lag_days: link.lag_days.unwrap_or(0),
        });
    }

    Some(SourceTask {
        id,
        name,
        outline_level,
        start: raw.start,
        finish: raw.finish,
        duration_hours: raw.duration_hours,
        work_hours: raw.work_hours,
        percent_complete: raw.percent_complete,
        priority: raw.priority,
        milestone: raw.milestone.unwrap_or(false),
        notes: raw.notes,
        predecessors,
    })
}

fn validate_resource(
    raw: RawResource,
    seen_ids: &mut HashSet<String>,
) -> Result<SourceResource, RecordError> {
    let id = required(
        EntityKind::Resource,
        raw.id.as_deref(),
        "id",
        raw.id.clone(),
    )?;
    if !seen_ids.insert(id.clone()) {
        return Err(RecordError::new(
            EntityKind::Resource,
            &id,
            "id",
            "duplicate identifier",
        ));
    }
    let name = required(EntityKind::Resource, Some(&id), "name", raw.name)?;

    Ok(SourceResource {
        id,
        name,
        email: raw.email.filter(|e| !e.trim().is_empty()),
        category: raw.category,
    })
}

fn validate_assignment(raw: RawAssignment) -> Result<SourceAssignment, RecordError> {
    let task_id = required(
        EntityKind::Assignment,
        raw.task_id.as_deref(),
        "task_id",
        raw.task_id.clone(),
    )?;
    let resource_id = required(
        EntityKind::Assignment,
        Some(&task_id),
        "resource_id",
        raw.resource_id,
    )?;

    Ok(SourceAssignment {
        task_id,
        resource_id,
        units: raw.units,
        work_hours: raw.work_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_core::records::{RawPredecessor, RawProject};
    use pretty_assertions::assert_eq;

    fn snapshot_with_project() -> ProjectSnapshot {
        ProjectSnapshot {
            project: RawProject {
                id: Some("p1".into()),
                name: Some("Website Redesign".into()),
                ..RawProject::default()
            },
            ..ProjectSnapshot::default()
        }
    }

    fn task(id: &str, name: &str, level: u32) -> RawTask {
        RawTask {
            id: Some(id.into()),
            name: Some(name.into()),
            outline_level: Some(level),
            ..RawTask::default()
        }
    }

    #[test]
    fn missing_project_name_is_a_project_error() {
        let validated = validate_snapshot(ProjectSnapshot::default());
        assert!(validated.project.is_none());
        assert_eq!(validated.errors.len(), 1);
        assert_eq!(validated.errors[0].entity, EntityKind::Project);

        let err = validated.require_project().unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn nameless_task_is_rejected_alone() {
        let mut snapshot = snapshot_with_project();
        snapshot.tasks = vec![
            task("t1", "Kickoff", 1),
            RawTask {
                id: Some("t2".into()),
                outline_level: Some(1),
                ..RawTask::default()
            },
            task("t3", "Wrap up", 1),
        ];

        let validated = validate_snapshot(snapshot);
        assert_eq!(validated.tasks.len(), 2);
        assert_eq!(validated.errors.len(), 1);
        assert_eq!(validated.errors[0].source_id.as_deref(), Some("t2"));
        assert_eq!(validated.errors[0].field, "name");
    }

    #[test]
    fn duplicate_task_ids_keep_the_first() {
        let mut snapshot = snapshot_with_project();
        snapshot.tasks = vec![task("t1", "First", 1), task("t1", "Second", 1)];

        let validated = validate_snapshot(snapshot);
        assert_eq!(validated.tasks.len(), 1);
        assert_eq!(validated.tasks[0].name, "First");
        assert_eq!(validated.errors[0].message, "duplicate identifier");
    }

    #[test]
    fn zero_outline_level_is_rejected() {
        let mut snapshot = snapshot_with_project();
        snapshot.tasks = vec![task("t1", "Bad depth", 0)];

        let validated = validate_snapshot(snapshot);
        assert!(validated.tasks.is_empty());
        assert_eq!(validated.errors[0].field, "outline_level");
    }

    #[test]
    fn malformed_link_drops_without_taking_the_task() {
        let mut snapshot = snapshot_with_project();
        let mut t = task("t2", "Build", 1);
        t.predecessors = vec![
            RawPredecessor {
                predecessor_id: Some("t1".into()),
                link_type: Some("XX".into()),
                lag_days: None,
            },
            RawPredecessor {
                predecessor_id: Some("t1".into()),
                link_type: None,
                lag_days: Some(2),
            },
        ];
        snapshot.tasks = vec![task("t1", "Design", 1), t];

        let validated = validate_snapshot(snapshot);
        assert_eq!(validated.tasks.len(), 2);
        let links = &validated.tasks[1].predecessors;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].link_type, DependencyType::FS); // source default
        assert_eq!(links[0].lag_days, 2);
        assert_eq!(validated.errors.len(), 1);
    }

    #[test]
    fn blank_resource_email_becomes_none() {
        let mut snapshot = snapshot_with_project();
        snapshot.resources = vec![RawResource {
            id: Some("r1".into()),
            name: Some("Dana Cruz".into()),
            email: Some("   ".into()),
            category: None,
        }];

        let validated = validate_snapshot(snapshot);
        assert_eq!(validated.resources[0].email, None);
    }

    #[test]
    fn assignment_requires_both_sides() {
        let mut snapshot = snapshot_with_project();
        snapshot.assignments = vec![RawAssignment {
            task_id: Some("t1".into()),
            resource_id: None,
            units: None,
            work_hours: None,
        }];

        let validated = validate_snapshot(snapshot);
        assert!(validated.assignments.is_empty());
        assert_eq!(validated.errors[0].field, "resource_id");
    }

    #[test]
    fn clean_snapshot_reports_valid() {
        let mut snapshot = snapshot_with_project();
        snapshot.tasks = vec![task("t1", "Kickoff", 1)];

        let report = validate_snapshot(snapshot).report();
        assert!(report.valid);
        assert_eq!(report.tasks, 1);
    }
}
