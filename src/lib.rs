pub mod catalog;
pub mod constants;
pub mod deepsky_errors;
pub mod horizontal;
pub mod observers;
pub mod planner;
pub mod report;
pub mod scoring;
pub mod search;
pub mod solar;
pub mod target_interval;
pub mod targets;
pub mod thresholds;
pub mod time;
