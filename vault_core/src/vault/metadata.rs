//! Sidecar metadata records and the filesystem stats merged into them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::Metadata;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SIDECAR_SUFFIX: &str = ".json";

pub const FILE_NAME_KEY: &str = "File Name";
pub const SIZE_KEY: &str = "Size (KB)";
pub const CREATED_KEY: &str = "Created";
pub const MODIFIED_KEY: &str = "Modified";

pub const AUTHOR_KEY: &str = "Author";
pub const CUSTOMER_NAME_KEY: &str = "Customer Name";
pub const PROJECT_NAME_KEY: &str = "Project Name";
pub const OWNER_KEY: &str = "Owner";
pub const TAGS_KEY: &str = "Tags";

/// Keys derived from the filesystem; never persisted by an edit.
pub const BASE_STAT_KEYS: [&str; 4] = [FILE_NAME_KEY, SIZE_KEY, CREATED_KEY, MODIFIED_KEY];

/// Free-form field name to value mapping. Keys are never validated.
pub type MetadataRecord = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct FileStats {
    pub file_name: String,
    pub size_kb: f64,
    pub created: f64,
    pub modified: f64,
}

impl FileStats {
    pub fn from_fs(file_name: &str, metadata: &Metadata) -> Self {
        let modified = metadata.modified().ok();
        let created = created_or_modified(metadata.created(), modified);

        Self {
            file_name: file_name.to_string(),
            size_kb: round_kib(metadata.len()),
            created: created.map(epoch_seconds).unwrap_or_default(),
            modified: modified.map(epoch_seconds).unwrap_or_default(),
        }
    }

    pub fn into_record(self) -> MetadataRecord {
        let mut record = MetadataRecord::new();
        record.insert(FILE_NAME_KEY.to_string(), Value::String(self.file_name));
        record.insert(SIZE_KEY.to_string(), Value::from(self.size_kb));
        record.insert(CREATED_KEY.to_string(), Value::from(self.created));
        record.insert(MODIFIED_KEY.to_string(), Value::from(self.modified));
        record
    }
}

/// Size in KiB rounded to two decimals.
pub fn round_kib(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

/// Birth time where the filesystem records one, otherwise the modified time.
fn created_or_modified(
    created: io::Result<SystemTime>,
    modified: Option<SystemTime>,
) -> Option<SystemTime> {
    created.ok().or(modified)
}

fn epoch_seconds(time: SystemTime) -> f64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// Fields collected alongside an upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadForm {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub owner: String,
    /// Comma separated, as typed.
    #[serde(default)]
    pub tags: String,
}

impl UploadForm {
    pub fn into_record(self) -> MetadataRecord {
        let mut record = MetadataRecord::new();
        record.insert(AUTHOR_KEY.to_string(), Value::String(self.author));
        record.insert(CUSTOMER_NAME_KEY.to_string(), Value::String(self.customer_name));
        record.insert(PROJECT_NAME_KEY.to_string(), Value::String(self.project_name));
        record.insert(OWNER_KEY.to_string(), Value::String(self.owner));
        record.insert(TAGS_KEY.to_string(), tags_value(&self.tags));
        record
    }
}

pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn tags_value(input: &str) -> Value {
    Value::Array(parse_tags(input).into_iter().map(Value::String).collect())
}

/// Prepares an edited record for persistence: filesystem-derived keys are
/// dropped and a `Tags` string is split back into a list.
pub fn normalize_edits(mut edits: MetadataRecord) -> MetadataRecord {
    for key in BASE_STAT_KEYS {
        edits.remove(key);
    }

    if let Some(Value::String(raw)) = edits.get(TAGS_KEY) {
        let tags = tags_value(raw);
        edits.insert(TAGS_KEY.to_string(), tags);
    }

    edits
}

/// Display form of a value. Strings render bare, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether any metadata value (keys are ignored) contains `needle`.
/// `needle` must already be lowercased.
pub fn record_matches(record: &MetadataRecord, needle: &str) -> bool {
    record.values().any(|value| match value {
        Value::Array(items) => items.iter().any(|item| text_contains(item, needle)),
        other => text_contains(other, needle),
    })
}

fn text_contains(value: &Value, needle: &str) -> bool {
    value_text(value).to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn record(value: Value) -> MetadataRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_round_kib() {
        assert_eq!(round_kib(0), 0.0);
        assert_eq!(round_kib(1024), 1.0);
        assert_eq!(round_kib(1536), 1.5);
        assert_eq!(round_kib(1000), 0.98);
    }

    #[test]
    fn test_created_falls_back_to_modified() {
        let born = UNIX_EPOCH + Duration::from_secs(100);
        let touched = UNIX_EPOCH + Duration::from_secs(200);

        assert_eq!(created_or_modified(Ok(born), Some(touched)), Some(born));

        let unsupported = io::Error::new(io::ErrorKind::Unsupported, "no birth time");
        assert_eq!(created_or_modified(Err(unsupported), Some(touched)), Some(touched));

        let stats = FileStats {
            file_name: "a.txt".to_string(),
            size_kb: 0.0,
            created: epoch_seconds(touched),
            modified: epoch_seconds(touched),
        };
        assert_eq!(stats.into_record()[CREATED_KEY], json!(200.0));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("urgent, finance ,, q4 "), vec!["urgent", "finance", "q4"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_upload_form_record() {
        let form = UploadForm {
            author: "Ada".to_string(),
            tags: "a, b".to_string(),
            ..Default::default()
        };

        let record = form.into_record();
        assert_eq!(record[AUTHOR_KEY], json!("Ada"));
        assert_eq!(record[OWNER_KEY], json!(""));
        assert_eq!(record[TAGS_KEY], json!(["a", "b"]));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_normalize_edits() {
        let edits = record(json!({
            "File Name": "x.pdf",
            "Size (KB)": 1.0,
            "Author": "Grace",
            "Tags": "one, two",
        }));

        let normalized = normalize_edits(edits);
        assert!(!normalized.contains_key(FILE_NAME_KEY));
        assert!(!normalized.contains_key(SIZE_KEY));
        assert_eq!(normalized[AUTHOR_KEY], json!("Grace"));
        assert_eq!(normalized[TAGS_KEY], json!(["one", "two"]));

        let already_list = normalize_edits(record(json!({"Tags": ["x"]})));
        assert_eq!(already_list[TAGS_KEY], json!(["x"]));
    }

    #[test]
    fn test_record_matches_values_not_keys() {
        let meta = record(json!({
            "Author": "Jane Doe",
            "Tags": ["Urgent", "finance"],
            "Pages": 42,
        }));

        assert!(record_matches(&meta, "jane"));
        assert!(record_matches(&meta, "urgent"));
        assert!(record_matches(&meta, "42"));
        assert!(!record_matches(&meta, "author"));
        assert!(!record_matches(&meta, "legal"));
    }
}
