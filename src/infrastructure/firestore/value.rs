//! Firestore typed-value encoding for tip documents

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::domain::tip::{StoredTip, TipRecord};

/// Document field names, shared with the web client reading the collection
pub const FIELD_TITLE: &str = "title";
pub const FIELD_TRANSCRIPT: &str = "transcript";
pub const FIELD_AUDIO_FILE: &str = "audioFile";
pub const FIELD_AUDIO_URL: &str = "audioURL";
pub const FIELD_CREATED_AT: &str = "createdAt";

/// A document as returned by the REST API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    pub create_time: Option<String>,
}

impl Document {
    /// Last path segment of the resource name
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

fn timestamp_value(t: &DateTime<Utc>) -> Value {
    json!({ "timestampValue": t.to_rfc3339_opts(SecondsFormat::Micros, true) })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn as_string(value: &Value) -> Option<String> {
    value
        .get("stringValue")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .get("timestampValue")
        .or_else(|| value.get("stringValue"))
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
}

/// Request body for creating a document from a record
pub fn encode_record(record: &TipRecord) -> Value {
    let mut fields = Map::new();
    fields.insert(FIELD_TITLE.to_string(), string_value(&record.title));
    fields.insert(FIELD_TRANSCRIPT.to_string(), string_value(&record.transcript));
    fields.insert(FIELD_AUDIO_FILE.to_string(), string_value(&record.audio_file));
    fields.insert(FIELD_AUDIO_URL.to_string(), string_value(&record.audio_url));
    fields.insert(FIELD_CREATED_AT.to_string(), timestamp_value(&record.created_at));
    json!({ "fields": fields })
}

/// Read a stored document, tolerating missing or mistyped fields.
/// Without `createdAt` the server's create time is used.
pub fn decode_document(doc: &Document) -> StoredTip {
    let field = |name: &str| doc.fields.get(name);

    StoredTip {
        id: doc.id().to_string(),
        title: field(FIELD_TITLE).and_then(as_string),
        transcript: field(FIELD_TRANSCRIPT).and_then(as_string),
        audio_url: field(FIELD_AUDIO_URL).and_then(as_string),
        created_at: field(FIELD_CREATED_AT)
            .and_then(as_timestamp)
            .or_else(|| doc.create_time.as_deref().and_then(parse_timestamp)),
    }
}
