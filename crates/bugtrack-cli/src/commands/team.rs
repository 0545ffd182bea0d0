use crate::support::{self, Settings};
use serde_json::json;

pub fn run(json_output: bool, settings: &Settings) {
    if json_output {
        support::print_json(&json!({
            "action": "bug.team",
            "count": settings.team.len(),
            "members": settings.team
        }));
    } else {
        println!("bugtrack team\n  Count: {}", settings.team.len());
        for member in &settings.team {
            println!("  - {member}");
        }
    }
}
