use gardeplan_core::storage::{load_rules, rules_path, save_rules};
use gardeplan_core::{Config, Harmonizer};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let oracle = config.oracle();
    let path = rules_path()?;
    let (mut rules, decode_issues) = load_rules(&path)?;

    tracing::debug!(path = %path.display(), rules = rules.len(), "repairing rule file");
    let harmonizer = Harmonizer::new(&config.quotas, oracle.as_ref(), config.years());
    let report = harmonizer.fix(&mut rules);
    if report.has_changes() {
        save_rules(&path, &rules)?;
    }

    if json {
        let out = serde_json::json!({
            "file_issues": decode_issues,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in &report.details {
            println!("{line}");
        }
        println!("{}", report.message());
        for issue in &decode_issues {
            println!("[rule file] {}: {}", issue.kind, issue.message);
        }
    }
    Ok(())
}
