use gardeplan_core::{bridge_days_in_year, Config, HolidayOracle};

pub fn run(year: i32, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let oracle = config.oracle();
    let holidays = oracle.holidays_in_year(year);
    let bridges = bridge_days_in_year(year, oracle.as_ref());

    if json {
        let out = serde_json::json!({
            "year": year,
            "holidays": holidays,
            "bridge_days": bridges,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("holidays {year}:");
        for day in &holidays {
            println!("  {day}");
        }
        println!("bridge days {year}:");
        for day in &bridges {
            println!("  {day}");
        }
    }
    Ok(())
}
