pub mod assign;
pub mod list;
pub mod report;
pub mod show;
pub mod stats;
pub mod status;
pub mod team;
