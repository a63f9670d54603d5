use std::fmt::Write;

use control_room_core::decision::DecisionRecord;
use control_room_core::project::Project;
use control_room_session::dashboard::VerificationOutcome;
use control_room_session::gate::Restoration;

use crate::commands::Output;

/// Pretty JSON for `--json`.
pub fn json(output: &Output) -> serde_json::Result<String> {
    serde_json::to_string_pretty(output)
}

/// Human-readable text.
pub fn text(output: &Output) -> String {
    let mut out = String::new();
    match output {
        Output::Projects { listing, current } => {
            if listing.is_fallback() {
                out.push_str("Project registry unavailable; showing fallback listing.\n");
            }
            for project in &listing.projects {
                let marker = if current.as_ref() == Some(project.project_id()) {
                    '*'
                } else {
                    ' '
                };
                let _ = write!(out, "{marker} {}", project_line(project));
                if project.is_legacy() {
                    out.push_str("  (not selectable)");
                }
                out.push('\n');
            }
            if listing.selectable().next().is_none() {
                out.push_str("No selectable projects.\n");
            }
        }
        Output::Selected { project } => {
            let _ = writeln!(out, "Selected {}", project_line(project));
        }
        Output::Created { project } => {
            let _ = writeln!(out, "Created and selected {}", project_line(project));
        }
        Output::Current { project } => project_details(&mut out, project),
        Output::Decisions {
            project_id,
            decisions,
        } => {
            if decisions.is_empty() {
                let _ = writeln!(out, "No decisions recorded for {project_id}.");
            } else {
                let _ = writeln!(out, "Decisions for {project_id} ({}):", decisions.len());
                for d in decisions {
                    let _ = writeln!(
                        out,
                        "  {}  {}  {}  {}",
                        d.decision_id,
                        d.status,
                        d.hash_version.map_or("-", |v| v.as_str()),
                        d.created_at
                    );
                }
            }
        }
        Output::Decision { decision } => decision_details(&mut out, decision),
        Output::Verification { outcome } => match outcome {
            VerificationOutcome::Reported {
                decision_id,
                status,
            } => {
                let _ = writeln!(out, "{decision_id}: {status}");
            }
            VerificationOutcome::Failed {
                decision_id,
                reason,
            } => {
                let _ = writeln!(out, "{decision_id}: {} ({reason})", outcome.status());
            }
        },
        Output::Switched => {
            out.push_str("Project cleared. Select a project to continue.\n");
        }
        Output::Status {
            backend,
            current,
            status,
        } => {
            let _ = writeln!(
                out,
                "{} {}: {}",
                status.service.as_deref().unwrap_or("backend"),
                status.version.as_deref().unwrap_or(""),
                status.status
            );
            if let Some(count) = status.decisions_count {
                let _ = writeln!(out, "Decisions recorded: {count}");
            }
            let _ = writeln!(out, "Strategy: {backend}");
            match current {
                Some(id) => {
                    let _ = writeln!(out, "Current project: {id}");
                }
                None => out.push_str("Current project: none\n"),
            }
        }
    }
    out
}

/// Notice for stderr when startup restoration dropped the stored project.
pub fn restoration_notice(restoration: &Restoration) -> Option<String> {
    match restoration {
        Restoration::Discarded { project_id, reason } => Some(format!(
            "Previously selected project '{project_id}' could not be restored: {reason}"
        )),
        Restoration::NothingStored | Restoration::Restored { .. } => None,
    }
}

fn project_line(project: &Project) -> String {
    let mut line = format!("{}  {}", project.project_id(), project.label);
    let tags: Vec<&str> = [project.project_class.as_deref(), project.trust_tier.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !tags.is_empty() {
        let _ = write!(line, "  [{}]", tags.join("/"));
    }
    if project.locked {
        line.push_str("  locked");
    }
    line
}

fn project_details(out: &mut String, project: &Project) {
    let _ = writeln!(out, "Project:     {}", project.project_id());
    let _ = writeln!(out, "Label:       {}", project.label);
    if let Some(description) = &project.description {
        let _ = writeln!(out, "Description: {description}");
    }
    let _ = writeln!(out, "Status:      {}", project.status.as_str());
    let _ = writeln!(out, "Created:     {}", project.created_at.to_rfc3339());
}

fn decision_details(out: &mut String, decision: &DecisionRecord) {
    let _ = writeln!(out, "Decision:     {}", decision.decision_id);
    let _ = writeln!(out, "Project:      {}", decision.project_id);
    if let Some(kind) = &decision.decision_type {
        let _ = writeln!(out, "Type:         {kind}");
    }
    let _ = writeln!(out, "Status:       {}", decision.status);
    let _ = writeln!(
        out,
        "Hash version: {}",
        decision.hash_version.map_or("-", |v| v.as_str())
    );
    let _ = writeln!(
        out,
        "Payload hash: {}",
        decision.payload_hash.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "Context hash: {}",
        decision.context_hash.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "Created:      {}", decision.created_at);
}

#[cfg(test)]
mod tests {
    use control_room_client::directory::DirectoryListing;
    use control_room_client::fixtures::seed_projects;

    use super::*;

    #[test]
    fn listing_marks_current_and_legacy() {
        let projects = seed_projects();
        let current = projects
            .iter()
            .find(|p| p.project_id().as_str() == "medical-core")
            .map(|p| p.project_id().clone());
        let output = Output::Projects {
            listing: DirectoryListing::live(projects),
            current,
        };

        let rendered = text(&output);

        assert!(rendered.contains("* medical-core  Medical Core  [medical/T3]"));
        assert!(rendered.contains("legacy  Legacy (unscoped)"));
        assert!(rendered.contains("(not selectable)"));
        assert!(!rendered.contains("unavailable"));
    }

    #[test]
    fn fallback_listing_is_announced() {
        let output = Output::Projects {
            listing: DirectoryListing::fallback(),
            current: None,
        };

        let rendered = text(&output);

        assert!(rendered.contains("unavailable"));
        assert!(rendered.contains("No selectable projects."));
    }

    #[test]
    fn failed_verification_renders_failed() {
        let output = Output::Verification {
            outcome: VerificationOutcome::Failed {
                decision_id: "EVE-2026-000002".into(),
                reason: "timed out".into(),
            },
        };
        assert_eq!(text(&output), "EVE-2026-000002: FAILED (timed out)\n");
    }

    #[test]
    fn discarded_restoration_names_the_cause() {
        let notice = restoration_notice(&Restoration::Discarded {
            project_id: "medical-core".into(),
            reason: "Backend error (503): registry offline".into(),
        })
        .unwrap();

        assert!(notice.contains("'medical-core' could not be restored"));
        assert!(notice.contains("503"));
        assert!(!notice.contains("no longer available"));
        assert_eq!(restoration_notice(&Restoration::NothingStored), None);
    }

    #[test]
    fn json_output_is_tagged() {
        let value: serde_json::Value = serde_json::from_str(&json(&Output::Switched).unwrap()).unwrap();
        assert_eq!(value["kind"], "switched");

        let output = Output::Projects {
            listing: DirectoryListing::fallback(),
            current: None,
        };
        let value: serde_json::Value = serde_json::from_str(&json(&output).unwrap()).unwrap();
        assert_eq!(value["kind"], "projects");
        assert_eq!(value["source"], "fallback");
        assert_eq!(value["projects"][0]["project_id"], "legacy");
    }
}
