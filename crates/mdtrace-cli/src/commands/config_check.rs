use crate::support::{fail, yes_no};
use mdtrace_report::ReportConfig;
use std::path::PathBuf;

pub fn run(path: PathBuf, json: bool) {
    let config = ReportConfig::load(&path).unwrap_or_else(|e| fail(e));
    tracing::debug!(path = %path.display(), "config validated");

    if json {
        let rendered = serde_json::to_string_pretty(&config)
            .unwrap_or_else(|e| fail(format!("failed to render config: {e}")));
        println!("{rendered}");
        return;
    }

    println!("mdtrace config-check");
    println!("  Path: {}", path.display());
    println!("  Output: {}", config.output.display());
    if let Some(base_dir) = &config.base_dir {
        println!("  Base dir: {}", base_dir.display());
    }
    println!("  Console: {}", yes_no(config.console));
    println!("  Muted: {}", yes_no(config.muted));
    println!("  Header level: {}", config.header_level.order());
    if config.conditions.is_empty() {
        println!("  Conditions: none");
    } else {
        println!("  Conditions:");
        for (key, value) in &config.conditions {
            println!("    - {key} = {value}");
        }
    }
}
