//! Loading food item records from JSON files.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::quality::models::FoodItemRecord;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Many(Vec<FoodItemRecord>),
    One(Box<FoodItemRecord>),
}

/// Parse a JSON document holding either one record or an array of records.
pub fn parse_records(json: &str) -> Result<Vec<FoodItemRecord>> {
    let parsed: RecordFile =
        serde_json::from_str(json).context("Expected a food item object or an array of them")?;
    Ok(match parsed {
        RecordFile::Many(records) => records,
        RecordFile::One(record) => vec![*record],
    })
}

pub fn read_records(path: &Path) -> Result<Vec<FoodItemRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_records(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
