// src/services/json_loader.rs
// DOCUMENTATION: Multi-file JSON loader
// PURPOSE: Read JSON documents from disk, keyed by filename stem

use crate::errors::PlacesError;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One successfully loaded JSON document
/// DOCUMENTATION: The name is the filename stem, which later becomes the
/// provenance value in the merged table
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Filename stem (no directory, no extension)
    pub name: String,
    /// Parsed document body
    pub data: Value,
}

/// JSON file loader
/// DOCUMENTATION: Loads one or many JSON files, skipping per-file failures
pub struct JsonLoader;

impl JsonLoader {
    /// List files matching a glob pattern inside a directory
    /// DOCUMENTATION: Results are sorted so downstream output is
    /// deterministic regardless of filesystem enumeration order
    pub fn find_files(directory: &Path, pattern: &str) -> Result<Vec<PathBuf>, PlacesError> {
        let full_pattern = directory.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let entries = glob::glob(&full_pattern).map_err(|e| {
            PlacesError::InvalidConfig(format!("Bad glob pattern {}: {}", full_pattern, e))
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => log::warn!("Skipping unreadable entry: {}", e),
            }
        }

        files.sort();
        Ok(files)
    }

    /// Load and parse a single JSON file
    pub fn load_file(path: &Path) -> Result<LoadedDocument, PlacesError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PlacesError::FileNotFound(path.display().to_string())
            } else {
                PlacesError::ReadFailed {
                    path: path.display().to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let data: Value =
            serde_json::from_str(&contents).map_err(|e| PlacesError::MalformedJson {
                path: path.display().to_string(),
                detail: e.to_string(),
            })?;

        Ok(LoadedDocument {
            name: Self::stem_of(path),
            data,
        })
    }

    /// Load many files, skipping the ones that fail
    /// DOCUMENTATION: Failures are logged and do not abort the rest
    /// A stem seen twice keeps its original position but takes the later
    /// file's data
    pub fn load_files(paths: &[PathBuf]) -> Vec<LoadedDocument> {
        let mut documents: Vec<LoadedDocument> = Vec::new();
        let mut successful_loads = 0;

        for path in paths {
            match Self::load_file(path) {
                Ok(doc) => {
                    log::info!("Successfully loaded: {}", path.display());
                    successful_loads += 1;

                    if let Some(existing) = documents.iter_mut().find(|d| d.name == doc.name) {
                        log::warn!(
                            "Duplicate filename stem '{}', replacing earlier document",
                            doc.name
                        );
                        existing.data = doc.data;
                    } else {
                        documents.push(doc);
                    }
                }
                Err(e) => log::error!("{}", e),
            }
        }

        log::info!("Total files loaded: {}", successful_loads);
        documents
    }

    /// Load all matching files from a directory
    /// DOCUMENTATION: Returns an empty collection when nothing matches
    pub fn load_from_directory(directory: &Path, pattern: &str) -> Vec<LoadedDocument> {
        let files = match Self::find_files(directory, pattern) {
            Ok(files) => files,
            Err(e) => {
                log::error!("{}", e);
                return Vec::new();
            }
        };

        if files.is_empty() {
            log::error!("No JSON files found in {}", directory.display());
            return Vec::new();
        }

        log::info!(
            "Found {} JSON files in {}",
            files.len(),
            directory.display()
        );
        Self::load_files(&files)
    }

    fn stem_of(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_file_parses_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(&path, r#"[{"id": 1, "name": "John"}]"#).unwrap();

        let doc = JsonLoader::load_file(&path).unwrap();

        assert_eq!(doc.name, "employees");
        assert_eq!(doc.data, json!([{"id": 1, "name": "John"}]));
    }

    #[test]
    fn test_load_file_missing_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = JsonLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, PlacesError::FileNotFound(_)));
    }

    #[test]
    fn test_load_file_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, PlacesError::MalformedJson { .. }));
    }

    #[test]
    fn test_load_files_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let broken = dir.path().join("broken.json");
        fs::write(&good, r#"{"a": 1}"#).unwrap();
        fs::write(&broken, "oops").unwrap();

        let docs = JsonLoader::load_files(&[
            good,
            broken,
            dir.path().join("missing.json"),
        ]);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "good");
    }

    #[test]
    fn test_duplicate_stem_keeps_position_takes_later_data() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("one");
        let second = dir.path().join("two");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();

        let first_x = first.join("x.json");
        let other = first.join("y.json");
        let second_x = second.join("x.json");
        fs::write(&first_x, r#"{"version": 1}"#).unwrap();
        fs::write(&other, r#"{"other": true}"#).unwrap();
        fs::write(&second_x, r#"{"version": 2}"#).unwrap();

        let docs = JsonLoader::load_files(&[first_x, other, second_x]);

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, "x");
        assert_eq!(docs[0].data, json!({"version": 2}));
        assert_eq!(docs[1].name, "y");
    }

    #[test]
    fn test_find_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let files = JsonLoader::find_files(dir.path(), "*.json").unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name().unwrap(), "a.json");
        assert_eq!(files[1].file_name().unwrap(), "b.json");
    }

    #[test]
    fn test_load_from_directory_with_no_matches() {
        let dir = tempfile::tempdir().unwrap();

        let docs = JsonLoader::load_from_directory(dir.path(), "*.json");
        assert!(docs.is_empty());
    }
}
