use crate::support::{self, Settings};
use bugtrack_store::{FilterCriteria, PriorityFilter, StatusFilter, filter};
use serde_json::json;

pub fn run(
    search: String,
    status: String,
    priority: String,
    json_output: bool,
    settings: &Settings,
) {
    let store = support::open_store(settings);
    let bugs = store.list_all();
    let criteria = FilterCriteria::new(
        search,
        StatusFilter::parse_permissive(&status),
        PriorityFilter::parse_permissive(&priority),
    );
    let rows = filter(&bugs, &criteria);
    let path = settings.store_path();

    if json_output {
        let items = rows
            .iter()
            .map(|bug| support::bug_json(bug))
            .collect::<Vec<_>>();
        support::print_json(&json!({
            "action": "bug.list",
            "storePath": path.display().to_string(),
            "filters": {
                "search": criteria.text,
                "status": criteria.status.to_string(),
                "priority": criteria.priority.to_string()
            },
            "total": bugs.len(),
            "count": items.len(),
            "items": items
        }));
    } else {
        println!(
            "bugtrack list\n  Path: {}\n  Count: {} of {}",
            path.display(),
            rows.len(),
            bugs.len()
        );
        for bug in rows {
            println!("  - {}", support::bug_line(bug));
        }
    }
}
