use crate::support::{self, Settings};
use serde_json::json;

pub fn run(id: String, assignee: Option<String>, json_output: bool, settings: &Settings) {
    let assignee = assignee
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(support::UNASSIGNED));

    if let Some(name) = &assignee
        && !settings.is_team_member(name)
    {
        support::exit_with(format!(
            "not a team member: {name} (known: {})",
            settings.team.join(", ")
        ));
    }

    let mut store = support::open_store(settings);
    let bug = store
        .update_assignee(&id, assignee.as_deref())
        .unwrap_or_else(|e| support::exit_with(e));

    if json_output {
        support::print_json(&json!({
            "action": "bug.assign",
            "storePath": settings.store_path().display().to_string(),
            "bug": support::bug_json(&bug)
        }));
    } else {
        println!(
            "bugtrack assign\n  Updated: {} -> {}",
            bug.id,
            bug.assigned_to.as_deref().unwrap_or(support::UNASSIGNED)
        );
    }
}
