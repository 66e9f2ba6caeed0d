//! `utmzz decode` — Inspect a stored attribution cookie value.

use utmzz_core::{AttributionRecord, Field};

pub fn run(value: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let record: AttributionRecord = value.parse()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    for line in describe(&record) {
        println!("{line}");
    }
    Ok(())
}

fn describe(record: &AttributionRecord) -> Vec<String> {
    let mut lines: Vec<String> = Field::ALL
        .into_iter()
        .filter_map(|field| {
            record
                .get(field)
                .map(|value| format!("  {:<9} {value}", field.name()))
        })
        .collect();
    for (key, value) in &record.extra {
        lines.push(format!("  {key:<9} {value}  (unrecognized)"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_known_and_unknown_fields() {
        let record: AttributionRecord = "1.2.3.4.utmcsr=google|utmcmd=organic|utmctr=rust|utmv=vip"
            .parse()
            .unwrap();
        let lines = describe(&record);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("source") && lines[0].ends_with("google"));
        assert!(lines[2].contains("term") && lines[2].ends_with("rust"));
        assert!(lines[3].contains("utmv") && lines[3].contains("unrecognized"));
    }

    #[test]
    fn rejects_value_without_segments() {
        assert!(run("nothing-here", false).is_err());
    }
}
