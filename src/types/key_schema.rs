use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub key_type: KeyType,
}

impl KeySchemaElement {
    pub fn new<T: Into<String>>(name: T, key_type: KeyType) -> Self {
        Self {
            attribute_name: name.into(),
            key_type,
        }
    }

    pub fn hash<T: Into<String>>(name: T) -> Self {
        Self::new(name, KeyType::Hash)
    }

    pub fn range<T: Into<String>>(name: T) -> Self {
        Self::new(name, KeyType::Range)
    }
}

/// `HASH` is the partition key, `RANGE` the sort key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Hash,
    Range,
}
