use chrono::NaiveDate;
use clap::Subcommand;
use gardeplan_core::storage::{load_rules, rules_path, save_rules};
use gardeplan_core::{ConfigRule, DayType};

#[derive(Subcommand)]
pub enum RulesAction {
    /// Show stored rules
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a rule
    Add {
        /// First covered date (YYYY-MM-DD)
        start_date: NaiveDate,
        /// Last covered date (YYYY-MM-DD)
        end_date: NaiveDate,
        /// Asserted day type (weekday, saturday, sunday_or_holiday)
        day_type: DayType,
        /// Quota override, repeatable (POST=HEADCOUNT)
        #[arg(long = "quota", value_parser = parse_quota)]
        quotas: Vec<(String, u32)>,
    },
    /// Remove a rule by list position
    Remove {
        /// Zero-based position from `rules list`
        index: usize,
    },
}

fn warn_dropped(issues: &[gardeplan_core::Issue]) {
    for issue in issues {
        eprintln!("warning: dropping undecodable record: {}", issue.message);
    }
}

fn parse_quota(s: &str) -> Result<(String, u32), String> {
    let (post, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected POST=HEADCOUNT, got \"{s}\""))?;
    let count: u32 = count
        .parse()
        .map_err(|_| format!("invalid headcount in \"{s}\""))?;
    Ok((post.to_string(), count))
}

pub fn run(action: RulesAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = rules_path()?;
    match action {
        RulesAction::List { json } => {
            let (rules, issues) = load_rules(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rules)?);
            } else {
                for (index, rule) in rules.iter().enumerate() {
                    let quotas: Vec<String> = rule
                        .post_quotas
                        .iter()
                        .map(|(post, count)| format!("{post}={count}"))
                        .collect();
                    println!(
                        "{index}: {}..{} {} [{}]",
                        rule.start_date,
                        rule.end_date,
                        rule.applied_day_type,
                        quotas.join(", ")
                    );
                }
            }
            for issue in &issues {
                eprintln!("warning: {}", issue.message);
            }
        }
        RulesAction::Add {
            start_date,
            end_date,
            day_type,
            quotas,
        } => {
            let (mut rules, issues) = load_rules(&path)?;
            warn_dropped(&issues);
            let mut rule = ConfigRule::new(start_date, end_date, day_type);
            for (post, count) in quotas {
                rule = rule.with_quota(post, count);
            }
            rules.push(rule);
            save_rules(&path, &rules)?;
            println!("rule added");
        }
        RulesAction::Remove { index } => {
            let (mut rules, issues) = load_rules(&path)?;
            warn_dropped(&issues);
            if index >= rules.len() {
                eprintln!("no rule at position {index}");
                std::process::exit(1);
            }
            rules.remove(index);
            save_rules(&path, &rules)?;
            println!("rule removed");
        }
    }
    Ok(())
}
