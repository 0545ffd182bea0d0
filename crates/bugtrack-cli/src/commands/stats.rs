use crate::support::{self, Settings};
use bugtrack_store::Status;
use serde_json::json;

pub fn run(json_output: bool, settings: &Settings) {
    let counts = support::open_store(settings).status_counts();

    if json_output {
        support::print_json(&json!({
            "action": "bug.stats",
            "counts": counts
        }));
    } else {
        println!("bugtrack stats\n  Total: {}", counts.total);
        for status in Status::ALL {
            println!("  {status}: {}", counts.count(status));
        }
    }
}
