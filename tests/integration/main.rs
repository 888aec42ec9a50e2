// Integration test module

mod sampling_test;
mod setup_test;
mod startup_test;

use std::path::Path;

// Helper to read back every JSON record written to a log file
pub fn read_records(path: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Log line is not JSON"))
        .collect()
}
