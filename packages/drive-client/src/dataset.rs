//! In-memory tables destined for spreadsheet upload.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// A rectangular table: named columns and rows of JSON cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset with the given columns.
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a dataset from per-record field maps.
    ///
    /// Columns are the union of all field names in first-seen order. A record
    /// missing a field gets a null cell for that column.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a IndexMap<String, Value>>,
    {
        let records: Vec<&IndexMap<String, Value>> = records.into_iter().collect();

        let columns: IndexSet<&str> = records
            .iter()
            .flat_map(|fields| fields.keys().map(String::as_str))
            .collect();

        let rows = records
            .iter()
            .map(|fields| {
                columns
                    .iter()
                    .map(|c| fields.get(*c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self {
            columns: columns.into_iter().map(str::to_string).collect(),
            rows,
        }
    }

    /// Append a row. Short rows are padded with nulls; extra cells are dropped.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_from_records_unions_columns_in_first_seen_order() {
        let a = fields(&[("Name", json!("Geisha")), ("Origin", json!("Panamá"))]);
        let b = fields(&[("Name", json!("Bourbon")), ("Altitude", json!(1600))]);

        let ds = Dataset::from_records([&a, &b]);

        assert_eq!(ds.columns(), &["Name", "Origin", "Altitude"]);
        assert_eq!(ds.rows()[0], vec![json!("Geisha"), json!("Panamá"), Value::Null]);
        assert_eq!(ds.rows()[1], vec![json!("Bourbon"), Value::Null, json!(1600)]);
    }

    #[test]
    fn test_from_no_records_is_empty() {
        let ds = Dataset::from_records(Vec::<&IndexMap<String, Value>>::new());
        assert!(ds.is_empty());
        assert!(ds.columns().is_empty());
    }

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut ds = Dataset::new(["a", "b"]);
        ds.push_row(vec![json!(1)]);
        ds.push_row(vec![json!(1), json!(2), json!(3)]);

        assert_eq!(ds.rows()[0], vec![json!(1), Value::Null]);
        assert_eq!(ds.rows()[1], vec![json!(1), json!(2)]);
        assert_eq!(ds.len(), 2);
    }
}
