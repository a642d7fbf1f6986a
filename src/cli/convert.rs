//! JSON <-> TagRecord conversion
//!
//! Records are exchanged as an array of objects:
//!
//! ```json
//! [
//!   {
//!     "path": "music/01.flac",
//!     "backend": "libFLAC",
//!     "tags": [{"artist": "A"}, {"title": "Intro"}, {"artist": "B"}]
//!   }
//! ]
//! ```
//!
//! `tags` keeps file order as a list of single-key objects. An object mapping
//! each key to a value or an array of values is accepted as well.

use serde_json::{Map, Value as Json, json};

use super::CliError;
use crate::{TagList, TagRecord};

fn invalid(index: usize, reason: impl Into<String>) -> CliError {
    CliError::InvalidRecord {
        index,
        reason: reason.into(),
    }
}

fn tag_value(index: usize, key: &str, value: &Json) -> Result<String, CliError> {
    match value {
        Json::String(s) => Ok(s.clone()),
        Json::Number(n) => Ok(n.to_string()),
        _ => Err(invalid(
            index,
            format!("value of tag '{}' must be a string or a number", key),
        )),
    }
}

fn insert_values(tags: &mut TagList, index: usize, key: &str, value: &Json) -> Result<(), CliError> {
    match value {
        Json::Array(values) => {
            for v in values {
                tags.insert(key, tag_value(index, key, v)?);
            }
        }
        v => tags.insert(key, tag_value(index, key, v)?),
    }
    Ok(())
}

fn tags_from_json(index: usize, value: &Json) -> Result<TagList, CliError> {
    let mut tags = TagList::new();
    match value {
        Json::Array(entries) => {
            for entry in entries {
                let Json::Object(obj) = entry else {
                    return Err(invalid(index, "tag list entries must be objects"));
                };
                for (key, v) in obj {
                    tags.insert(key, tag_value(index, key, v)?);
                }
            }
        }
        Json::Object(obj) => {
            for (key, v) in obj {
                insert_values(&mut tags, index, key, v)?;
            }
        }
        Json::Null => {}
        _ => return Err(invalid(index, "'tags' must be an array or an object")),
    }
    Ok(tags)
}

fn string_field(index: usize, obj: &Map<String, Json>, name: &str) -> Result<String, CliError> {
    match obj.get(name) {
        Some(Json::String(s)) => Ok(s.clone()),
        None | Some(Json::Null) => Ok(String::new()),
        Some(_) => Err(invalid(index, format!("'{}' must be a string", name))),
    }
}

/// Converts a JSON document into records. A single object is read as a
/// one-record list.
pub fn json_to_records(v: &Json) -> Result<Vec<TagRecord>, CliError> {
    let items = match v {
        Json::Array(items) => items.as_slice(),
        Json::Object(_) => std::slice::from_ref(v),
        _ => return Err(invalid(0, "expected an array of records")),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let Json::Object(obj) = item else {
                return Err(invalid(index, "a record must be an object"));
            };
            let path = string_field(index, obj, "path")?;
            let backend = string_field(index, obj, "backend")?;
            let tags = match obj.get("tags") {
                Some(tags) => tags_from_json(index, tags)?,
                None => TagList::new(),
            };
            Ok(TagRecord::new(path, backend).with_tags(tags))
        })
        .collect()
}

/// Converts a record back to JSON, tags as an ordered list.
pub fn record_to_json(record: &TagRecord) -> Json {
    let tags: Vec<Json> = record
        .tags
        .iter()
        .map(|tag| json!({ tag.key.as_str(): tag.value }))
        .collect();

    json!({
        "path": record.path,
        "backend": record.backend,
        "tags": tags,
    })
}

pub fn records_to_json(records: &[TagRecord]) -> Json {
    Json::Array(records.iter().map(record_to_json).collect())
}
