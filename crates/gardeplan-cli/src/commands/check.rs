use gardeplan_core::storage::{load_rules, rules_path};
use gardeplan_core::{Config, Harmonizer, Issue};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let oracle = config.oracle();
    let (rules, decode_issues) = load_rules(&rules_path()?)?;

    let harmonizer = Harmonizer::new(&config.quotas, oracle.as_ref(), config.years());
    let issues = harmonizer.check(&rules);

    if json {
        let out = serde_json::json!({
            "file_issues": decode_issues,
            "issues": issues,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_issues("rule file", &decode_issues);
        print_issues("consistency", &issues);
        if decode_issues.is_empty() && issues.is_empty() {
            println!("no issues found");
        }
    }

    if decode_issues.is_empty() && issues.is_empty() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn print_issues(label: &str, issues: &[Issue]) {
    for issue in issues {
        println!("[{label}] {}: {}", issue.kind, issue.message);
    }
}
