mod encoding;
mod table;

use crate::{Error, Result};

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

pub use encoding::decode;
pub use table::{
    BillingModeSummary, GlobalSecondaryIndexDescription, LocalSecondaryIndexDescription,
    ProvisionedThroughputDescription, SseDescription, SseSpecification, StreamSpecification,
    TableClassSummary, TableDescription,
};

/// Reads a describe-table document from disk, whatever its text encoding.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|err| Error::io(path, err))?;
    debug!("Read {} bytes from {}", raw.len(), path.display());
    parse_document(&raw)
}

pub fn parse_document(raw: &[u8]) -> Result<Value> {
    let text = decode(raw)?;
    Ok(serde_json::from_str(&text)?)
}

/// Locates the table object: either the `Table` member of the
/// describe-table response or a bare table carrying `TableName` and
/// `KeySchema`.
pub fn extract_table(document: &Value) -> Result<&Value> {
    if let Some(table) = document.get("Table").filter(|table| table.is_object()) {
        return Ok(table);
    }
    if document.get("TableName").is_some() && document.get("KeySchema").is_some() {
        return Ok(document);
    }
    Err(Error::malformed(
        "input JSON is not recognized as describe-table output",
    ))
}

pub fn parse_table(document: &Value) -> Result<TableDescription> {
    let table = extract_table(document)?;
    Ok(TableDescription::deserialize(table)?)
}
