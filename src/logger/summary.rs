//! Plain-text report of the log files a run touched.

use super::RateLimitedLogger;

/// Render a summary of the files updated by `loggers` during this run.
pub fn render_log_summary(loggers: &[&RateLimitedLogger]) -> String {
    let files: Vec<_> = loggers
        .iter()
        .flat_map(|logger| logger.updated_log_files())
        .collect();

    if files.is_empty() {
        return "No logs were updated during this session.\n".to_string();
    }

    let mut summary = String::from("Log Summary\n\nThe following log files were updated:\n\n");
    for file in files {
        summary.push_str(&format!("  • {}\n", file.display()));
    }
    summary
}
