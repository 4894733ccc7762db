use std::collections::HashSet;

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use super::record::{Record, Ruling};

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawRecord {
    pub(super) id: String,
    #[serde(default)]
    pub(super) domain: String,
    pub(super) cycle: u32,
    #[serde(alias = "entity")]
    pub(super) state: String,
    pub(super) ruling: String,
    #[serde(default)]
    pub(super) position: String,
}

/// Parses either a bare array of records or a document with a `claims`
/// array.
pub(super) fn parse_corpus_document(raw: &str) -> Result<Vec<Record>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid corpus JSON")?;

    let entries = match &parsed {
        Value::Array(entries) => entries,
        Value::Object(object) => object
            .get("claims")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("corpus document has no `claims` array"))?,
        _ => return Err(anyhow!("unexpected JSON type for corpus document")),
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut records = Vec::with_capacity(entries.len());
    for (index, value) in entries.iter().enumerate() {
        let raw = match RawRecord::deserialize(value) {
            Ok(raw) => raw,
            Err(error) => {
                warn!("skipping corpus entry {index}: {error}");
                continue;
            }
        };

        let Some(record) = validate_record(raw, index) else {
            continue;
        };

        if !seen.insert(record.id.clone()) {
            warn!("skipping duplicate record id {}", record.id);
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

fn validate_record(raw: RawRecord, index: usize) -> Option<Record> {
    let id = raw.id.trim().to_owned();
    if id.is_empty() {
        warn!("skipping corpus entry {index}: empty id");
        return None;
    }

    if raw.cycle == 0 {
        warn!("skipping record {id}: cycle must be positive");
        return None;
    }

    let Some(ruling) = Ruling::parse(&raw.ruling) else {
        warn!("skipping record {id}: unknown ruling {:?}", raw.ruling);
        return None;
    };

    Some(Record {
        id,
        domain: raw.domain,
        cycle: raw.cycle,
        entity: raw.state,
        ruling,
        position: raw.position,
    })
}
