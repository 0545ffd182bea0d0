//! Bug identifiers: `bug-<unix millis>-<9 base36 chars>`.
//!
//! The clock component orders ids roughly by creation; the random suffix
//! (drawn from a v4 UUID) separates ids minted in the same millisecond.
//! This is a collision-avoidance heuristic, not a cryptographic guarantee.

use chrono::Utc;
use uuid::Uuid;

pub const BUG_ID_PREFIX: &str = "bug-";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mint a fresh bug id.
pub fn generate_bug_id() -> String {
    let millis = Utc::now().timestamp_millis();
    format!("{BUG_ID_PREFIX}{millis}-{}", random_suffix())
}

fn random_suffix() -> String {
    let mut entropy = Uuid::new_v4().as_u128();
    let mut out = [b'0'; SUFFIX_LEN];
    for slot in out.iter_mut().rev() {
        *slot = BASE36[(entropy % 36) as usize];
        entropy /= 36;
    }
    out.iter().map(|&b| b as char).collect()
}
