use drive_client::Dataset;
use scraping::ProductOutcome;
use serde_json::Value;

/// Columns of the scrape report spreadsheet.
pub const REPORT_COLUMNS: [&str; 7] = [
    "names",
    "href",
    "language",
    "translated_text",
    "characteristics",
    "error_kind",
    "error",
];

/// One row per product. Failed products keep their name and link, with the
/// failure in `error_kind`/`error` and the content columns left blank.
pub fn outcomes_dataset(outcomes: &[ProductOutcome]) -> Dataset {
    let mut dataset = Dataset::new(REPORT_COLUMNS);

    for outcome in outcomes {
        let link = &outcome.link;
        let row = match &outcome.result {
            Ok(report) => vec![
                Value::from(link.name.as_str()),
                Value::from(link.href.as_str()),
                Value::from(report.language.as_str()),
                Value::from(report.translated_text.as_str()),
                Value::from(report.characteristics.as_str()),
                Value::Null,
                Value::Null,
            ],
            Err(e) => vec![
                Value::from(link.name.as_str()),
                Value::from(link.href.as_str()),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::from(e.kind().as_str()),
                Value::from(e.to_string()),
            ],
        };
        dataset.push_row(row);
    }

    dataset
}
