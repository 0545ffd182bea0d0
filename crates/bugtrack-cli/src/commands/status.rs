use crate::support::{self, Settings};
use bugtrack_store::Status;
use serde_json::json;

pub fn run(id: String, status: String, json_output: bool, settings: &Settings) {
    let status: Status = status.parse().unwrap_or_else(|e| support::exit_with(e));
    let mut store = support::open_store(settings);
    let bug = store
        .update_status(&id, status)
        .unwrap_or_else(|e| support::exit_with(e));

    if json_output {
        support::print_json(&json!({
            "action": "bug.status",
            "storePath": settings.store_path().display().to_string(),
            "bug": support::bug_json(&bug)
        }));
    } else {
        println!("bugtrack status\n  Updated: {} -> {}", bug.id, bug.status);
    }
}
