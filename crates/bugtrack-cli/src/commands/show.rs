use crate::support::{self, Settings};
use serde_json::json;

pub fn run(id: String, json_output: bool, settings: &Settings) {
    let store = support::open_store(settings);
    let bug = store
        .get(&id)
        .unwrap_or_else(|| support::exit_with(format!("bug not found: {id}")));

    if json_output {
        support::print_json(&json!({
            "action": "bug.show",
            "bug": support::bug_json(&bug)
        }));
        return;
    }

    println!("bugtrack show\n  ID: {}", bug.id);
    println!("  Title: {}", bug.title);
    println!("  Status: {}", bug.status);
    println!("  Priority: {}", bug.priority);
    println!("  Reporter: {}", bug.reporter);
    println!(
        "  Assignee: {}",
        bug.assigned_to.as_deref().unwrap_or(support::UNASSIGNED)
    );
    println!(
        "  Created: {}",
        bug.created_at.format("%b %-d, %Y %H:%M UTC")
    );
    if let Some(screenshot) = &bug.screenshot {
        println!("  Screenshot: {screenshot}");
    }
    println!("  Description:");
    for line in bug.description.lines() {
        println!("    {line}");
    }
}
