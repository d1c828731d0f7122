// src/services/table_merger.rs
// DOCUMENTATION: JSON shape normalizer and table concatenator
// PURPOSE: Turn loaded JSON documents into one unified tabular structure

use crate::errors::PlacesError;
use crate::services::LoadedDocument;
use serde_json::{Map, Value};

/// Default name of the provenance column
pub const SOURCE_COLUMN: &str = "source_file";

/// Unified table built from all processed documents
/// DOCUMENTATION: Data columns appear in first-seen order across files,
/// the provenance column (when enabled) always comes last
#[derive(Debug, Clone)]
pub struct MergedTable {
    /// Column names
    pub columns: Vec<String>,
    /// Cell values, one inner vector per row, aligned with columns
    pub rows: Vec<Vec<Value>>,
    /// Name of the provenance column, when one was added
    pub source_column: Option<String>,
}

/// Summary of one fully numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Shape normalizer and concatenator
/// DOCUMENTATION: Normalizes each document to rows, then concatenates
/// every per-file table into one with a unified column set
pub struct TableMerger;

impl TableMerger {
    /// Combine all loaded documents into a single table
    /// DOCUMENTATION: Main entry point for the merger
    ///
    /// A document that cannot be normalized is skipped with a warning and
    /// does not abort the others. Missing cells and explicit nulls are
    /// filled with an empty-string sentinel. Returns None when nothing
    /// could be processed.
    ///
    /// # Arguments
    /// * `documents` - Loaded documents, in load order
    /// * `add_source_column` - Whether to append a provenance column
    /// * `source_column` - Name of the provenance column
    pub fn combine(
        documents: &[LoadedDocument],
        add_source_column: bool,
        source_column: &str,
    ) -> Option<MergedTable> {
        if documents.is_empty() {
            log::error!("No JSON data loaded");
            return None;
        }

        let mut tables: Vec<(String, Vec<Map<String, Value>>)> = Vec::new();

        for doc in documents {
            match Self::normalize_document(&doc.data) {
                Ok(rows) => {
                    log::info!("Processed {}: {} rows", doc.name, rows.len());
                    tables.push((doc.name.clone(), rows));
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", doc.name, e);
                }
            }
        }

        if tables.is_empty() {
            log::error!("No data could be processed");
            return None;
        }

        // Union of data columns in first-seen order. A record key that
        // collides with the provenance column is replaced by it.
        let mut columns: Vec<String> = Vec::new();
        for (_, rows) in &tables {
            for row in rows {
                for key in row.keys() {
                    if add_source_column && key == source_column {
                        continue;
                    }
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
            }
        }

        let mut all_rows: Vec<Vec<Value>> = Vec::new();
        for (name, rows) in &tables {
            for record in rows {
                let mut row: Vec<Value> = columns
                    .iter()
                    .map(|column| match record.get(column) {
                        Some(Value::Null) | None => Value::String(String::new()),
                        Some(value) => value.clone(),
                    })
                    .collect();

                if add_source_column {
                    row.push(Value::String(name.clone()));
                }
                all_rows.push(row);
            }
        }

        if add_source_column {
            columns.push(source_column.to_string());
        }

        log::info!(
            "Combined data: {} total rows, {} columns",
            all_rows.len(),
            columns.len()
        );

        Some(MergedTable {
            columns,
            rows: all_rows,
            source_column: add_source_column.then(|| source_column.to_string()),
        })
    }

    /// Normalize one document into flattened records
    /// DOCUMENTATION: Implements the shape rules
    ///
    /// An array of objects becomes one row per element. A mapping with at
    /// least one list-valued field becomes rows from the first such field,
    /// the rest of the mapping is dropped. A mapping without list-valued
    /// fields becomes a single row. Anything else is unsupported.
    fn normalize_document(data: &Value) -> Result<Vec<Map<String, Value>>, PlacesError> {
        match data {
            Value::Array(items) => Self::normalize_records(items),
            Value::Object(map) => {
                // Map iteration follows document key order, so the first
                // list-valued field is the first one in the file
                for value in map.values() {
                    if let Value::Array(items) = value {
                        return Self::normalize_records(items);
                    }
                }
                Ok(vec![Self::flatten_record(map)])
            }
            other => Err(PlacesError::UnsupportedShape(format!(
                "top-level value is a {}",
                value_kind(other)
            ))),
        }
    }

    /// Flatten each array element into a record
    fn normalize_records(items: &[Value]) -> Result<Vec<Map<String, Value>>, PlacesError> {
        let mut rows = Vec::with_capacity(items.len());

        for item in items {
            match item {
                Value::Object(map) => rows.push(Self::flatten_record(map)),
                other => {
                    return Err(PlacesError::UnsupportedShape(format!(
                        "array element is a {} rather than an object",
                        value_kind(other)
                    )));
                }
            }
        }

        Ok(rows)
    }

    /// Flatten nested objects into dotted column names
    /// DOCUMENTATION: {"geo": {"lat": 1}} becomes column "geo.lat"
    /// Arrays and scalars are kept as cell values unchanged
    fn flatten_record(object: &Map<String, Value>) -> Map<String, Value> {
        let mut flat = Map::new();
        Self::flatten_into("", object, &mut flat);
        flat
    }

    fn flatten_into(prefix: &str, object: &Map<String, Value>, out: &mut Map<String, Value>) {
        for (key, value) in object {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };

            match value {
                Value::Object(child) => Self::flatten_into(&path, child, out),
                other => {
                    out.insert(path, other.clone());
                }
            }
        }
    }
}

impl MergedTable {
    /// Render the first rows as an aligned text table
    /// DOCUMENTATION: Used for the console preview
    pub fn preview(&self, limit: usize) -> String {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .take(limit)
            .map(|row| row.iter().map(display_value).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let index_width = rendered.len().saturating_sub(1).to_string().len();
        let mut out = String::new();

        let mut header = " ".repeat(index_width);
        for (i, column) in self.columns.iter().enumerate() {
            header.push_str("  ");
            header.push_str(&format!("{:<width$}", column, width = widths[i]));
        }
        out.push_str(header.trim_end());
        out.push('\n');

        for (r, row) in rendered.iter().enumerate() {
            let mut line = format!("{:>width$}", r, width = index_width);
            for (i, cell) in row.iter().enumerate() {
                line.push_str("  ");
                line.push_str(&format!("{:<width$}", cell, width = widths[i]));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }

    /// Count rows per provenance value, most frequent first
    /// DOCUMENTATION: Empty when no provenance column was added
    pub fn source_counts(&self) -> Vec<(String, usize)> {
        let source_column = match self.source_column {
            Some(ref column) => column,
            None => return Vec::new(),
        };
        let idx = match self.columns.iter().position(|c| c == source_column) {
            Some(idx) => idx,
            None => return Vec::new(),
        };

        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in &self.rows {
            let name = display_value(&row[idx]);
            match counts.iter_mut().find(|(n, _)| *n == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Summarize columns whose cells are all numeric
    /// DOCUMENTATION: A column with any missing or non-numeric cell is
    /// excluded, mirroring how the empty-string fill de-types a column
    pub fn numeric_summary(&self) -> Vec<ColumnSummary> {
        let mut summaries = Vec::new();

        for (idx, column) in self.columns.iter().enumerate() {
            let mut values = Vec::new();
            let mut all_numeric = true;

            for row in &self.rows {
                match row[idx].as_f64() {
                    Some(value) => values.push(value),
                    None => {
                        all_numeric = false;
                        break;
                    }
                }
            }

            if !all_numeric || values.is_empty() {
                continue;
            }

            let count = values.len();
            let mean = values.iter().sum::<f64>() / count as f64;
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            summaries.push(ColumnSummary {
                column: column.clone(),
                count,
                mean,
                min,
                max,
            });
        }

        summaries
    }
}

/// Render a cell value the way it appears in a spreadsheet cell
/// DOCUMENTATION: Strings stay bare, scalars use their JSON form, arrays
/// and objects become compact JSON text
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(name: &str, data: Value) -> LoadedDocument {
        LoadedDocument {
            name: name.to_string(),
            data,
        }
    }

    #[test]
    fn test_merge_unions_columns_and_fills_missing() {
        let docs = vec![
            doc("a", json!([{"x": 1}])),
            doc("b", json!([{"y": 2}])),
        ];

        let table = TableMerger::combine(&docs, true, "source_file").unwrap();

        assert_eq!(table.columns, vec!["x", "y", "source_file"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec![json!(1), json!(""), json!("a")]);
        assert_eq!(table.rows[1], vec![json!(""), json!(2), json!("b")]);
    }

    #[test]
    fn test_first_list_field_wins_over_outer_object() {
        let docs = vec![doc("data", json!({"k": [{"a": 1}, {"a": 2}]}))];

        let table = TableMerger::combine(&docs, false, "source_file").unwrap();

        assert_eq!(table.columns, vec!["a"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec![json!(1)]);
        assert_eq!(table.rows[1], vec![json!(2)]);
    }

    #[test]
    fn test_first_list_follows_document_key_order() {
        // "zebra" precedes "alpha" in the document, so its list is the one
        // that gets normalized even though "alpha" sorts first
        let data: Value =
            serde_json::from_str(r#"{"zebra": [{"z": 1}], "alpha": [{"a": 9}]}"#).unwrap();
        let docs = vec![doc("data", data)];

        let table = TableMerger::combine(&docs, false, "source_file").unwrap();

        assert_eq!(table.columns, vec!["z"]);
        assert_eq!(table.rows, vec![vec![json!(1)]]);
    }

    #[test]
    fn test_single_object_becomes_one_row() {
        let docs = vec![doc("solo", json!({"id": 7, "name": "only"}))];

        let table = TableMerger::combine(&docs, true, "source_file").unwrap();

        assert_eq!(table.columns, vec!["id", "name", "source_file"]);
        assert_eq!(table.rows, vec![vec![json!(7), json!("only"), json!("solo")]]);
    }

    #[test]
    fn test_nested_objects_flatten_to_dotted_columns() {
        let docs = vec![doc(
            "places",
            json!([{"name": "spot", "geo": {"lat": 47.6, "lng": -122.3}}]),
        )];

        let table = TableMerger::combine(&docs, false, "source_file").unwrap();

        assert_eq!(table.columns, vec!["name", "geo.lat", "geo.lng"]);
        assert_eq!(
            table.rows[0],
            vec![json!("spot"), json!(47.6), json!(-122.3)]
        );
    }

    #[test]
    fn test_arrays_inside_records_stay_as_cells() {
        let docs = vec![doc("tagged", json!([{"n": 1, "tags": ["a", "b"]}]))];

        let table = TableMerger::combine(&docs, false, "source_file").unwrap();

        assert_eq!(table.columns, vec!["n", "tags"]);
        assert_eq!(table.rows[0][1], json!(["a", "b"]));
        assert_eq!(display_value(&table.rows[0][1]), r#"["a","b"]"#);
    }

    #[test]
    fn test_explicit_null_becomes_empty_string() {
        let docs = vec![doc("nulls", json!([{"a": null, "b": 1}]))];

        let table = TableMerger::combine(&docs, false, "source_file").unwrap();

        assert_eq!(table.rows[0], vec![json!(""), json!(1)]);
    }

    #[test]
    fn test_unsupported_document_is_isolated() {
        let docs = vec![
            doc("scalar", json!(42)),
            doc("good", json!([{"x": 1}])),
        ];

        let table = TableMerger::combine(&docs, true, "source_file").unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0], vec![json!(1), json!("good")]);
    }

    #[test]
    fn test_array_with_scalar_element_skips_whole_document() {
        let docs = vec![doc("mixed", json!([1, {"a": 1}]))];

        assert!(TableMerger::combine(&docs, true, "source_file").is_none());
    }

    #[test]
    fn test_combine_with_no_documents() {
        assert!(TableMerger::combine(&[], true, "source_file").is_none());
    }

    #[test]
    fn test_no_provenance_column_when_disabled() {
        let docs = vec![doc("a", json!([{"x": 1}]))];

        let table = TableMerger::combine(&docs, false, "source_file").unwrap();

        assert_eq!(table.columns, vec!["x"]);
        assert!(table.source_column.is_none());
        assert!(table.source_counts().is_empty());
    }

    #[test]
    fn test_record_key_colliding_with_provenance_is_overwritten() {
        let docs = vec![doc("real", json!([{"source_file": "spoof", "v": 1}]))];

        let table = TableMerger::combine(&docs, true, "source_file").unwrap();

        assert_eq!(table.columns, vec!["v", "source_file"]);
        assert_eq!(table.rows[0], vec![json!(1), json!("real")]);
    }

    #[test]
    fn test_source_counts_most_frequent_first() {
        let docs = vec![
            doc("a", json!([{"x": 1}])),
            doc("b", json!([{"x": 1}, {"x": 2}, {"x": 3}])),
            doc("c", json!([{"x": 1}, {"x": 2}])),
        ];

        let table = TableMerger::combine(&docs, true, "source_file").unwrap();

        assert_eq!(
            table.source_counts(),
            vec![
                ("b".to_string(), 3),
                ("c".to_string(), 2),
                ("a".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_numeric_summary_covers_fully_numeric_columns_only() {
        let docs = vec![
            doc("a", json!([{"n": 1, "label": "x", "m": 5}])),
            doc("b", json!([{"n": 3, "label": "y"}])),
        ];

        let table = TableMerger::combine(&docs, true, "source_file").unwrap();
        let summary = table.numeric_summary();

        // "label" is text, "m" has a missing cell, "n" qualifies
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].column, "n");
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].mean, 2.0);
        assert_eq!(summary[0].min, 1.0);
        assert_eq!(summary[0].max, 3.0);
    }

    #[test]
    fn test_preview_renders_header_and_rows() {
        let docs = vec![
            doc("a", json!([{"x": 1}])),
            doc("b", json!([{"y": 2}])),
        ];

        let table = TableMerger::combine(&docs, true, "source_file").unwrap();
        let preview = table.preview(10);

        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("x"));
        assert!(lines[0].contains("y"));
        assert!(lines[0].contains("source_file"));
        assert!(lines[1].contains('1'));
        assert!(lines[2].contains('2'));

        assert_eq!(table.preview(1).lines().count(), 2);
    }
}
