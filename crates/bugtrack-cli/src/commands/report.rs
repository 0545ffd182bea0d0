use crate::support::{self, Settings};
use bugtrack_store::{NewBug, screenshot_reference};
use serde_json::json;

pub struct Args {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub reporter: String,
    pub screenshot: Option<String>,
    pub json: bool,
}

pub fn run(args: Args, settings: &Settings) {
    let screenshot = args.screenshot.as_deref().map(|path| {
        screenshot_reference(path, settings.max_screenshot_bytes)
            .unwrap_or_else(|e| support::exit_with(e))
    });

    let mut store = support::open_store(settings);
    let bug = store
        .create(NewBug {
            title: args.title,
            description: args.description,
            priority: args.priority,
            reporter: args.reporter,
            screenshot,
        })
        .unwrap_or_else(|e| support::exit_with(e));
    let path = settings.store_path();

    if args.json {
        support::print_json(&json!({
            "action": "bug.report",
            "storePath": path.display().to_string(),
            "bug": support::bug_json(&bug)
        }));
    } else {
        println!(
            "bugtrack report\n  Added: {} [{}]\n  Path: {}",
            bug.id,
            bug.status,
            path.display()
        );
    }
}
