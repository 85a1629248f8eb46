use chrono::NaiveDate;
use gardeplan_core::{classify, Config};

pub fn run(date: NaiveDate, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let oracle = config.oracle();
    let class = classify(date, oracle.as_ref());

    if json {
        let out = serde_json::json!({
            "date": date,
            "day_type": class.day_type,
            "is_bridge": class.is_bridge,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if class.is_bridge {
        println!("{date}: {} (bridge day)", class.day_type);
    } else {
        println!("{date}: {}", class.day_type);
    }
    Ok(())
}
