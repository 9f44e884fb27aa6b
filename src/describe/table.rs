use crate::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, Projection, SseStatus, SseType,
    StreamViewType, TableClass,
};

use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// The `Table` object of `aws dynamodb describe-table` output.
///
/// Only the fields that have a counterpart in `AWS::DynamoDB::Table` are
/// modeled. Every other top-level field ends up in `other` so the converter
/// can report what it dropped.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom = "validate_name"
    )]
    pub table_name: String,
    pub attribute_definitions: Vec<AttributeDefinition>,
    #[validate(custom = "validate_key_schema")]
    pub key_schema: Vec<KeySchemaElement>,
    pub provisioned_throughput: Option<ProvisionedThroughputDescription>,
    pub billing_mode_summary: Option<BillingModeSummary>,
    #[serde(default)]
    #[validate]
    pub global_secondary_indexes: Vec<GlobalSecondaryIndexDescription>,
    #[serde(default)]
    #[validate]
    pub local_secondary_indexes: Vec<LocalSecondaryIndexDescription>,
    pub stream_specification: Option<StreamSpecification>,
    #[serde(rename = "SSEDescription")]
    pub sse_description: Option<SseDescription>,
    #[serde(rename = "SSESpecification")]
    pub sse_specification: Option<SseSpecification>,
    pub table_class_summary: Option<TableClassSummary>,
    pub deletion_protection_enabled: Option<bool>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl TableDescription {
    pub fn billing_mode(&self) -> Option<BillingMode> {
        self.billing_mode_summary
            .as_ref()
            .and_then(|summary| summary.billing_mode)
    }

    pub fn table_class(&self) -> Option<TableClass> {
        self.table_class_summary
            .as_ref()
            .and_then(|summary| summary.table_class)
    }

    /// Names of the fields that were present in the input but have no
    /// template counterpart.
    pub fn ignored_fields(&self) -> Vec<&str> {
        self.other.keys().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughputDescription {
    pub read_capacity_units: Option<i64>,
    pub write_capacity_units: Option<i64>,
}

impl ProvisionedThroughputDescription {
    /// Read and write units, when both are present.
    pub fn units(&self) -> Option<(i64, i64)> {
        self.read_capacity_units.zip(self.write_capacity_units)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingModeSummary {
    pub billing_mode: Option<BillingMode>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalSecondaryIndexDescription {
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom = "validate_name"
    )]
    pub index_name: String,
    #[validate(custom = "validate_key_schema")]
    pub key_schema: Vec<KeySchemaElement>,
    pub projection: Option<Projection>,
    pub provisioned_throughput: Option<ProvisionedThroughputDescription>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct LocalSecondaryIndexDescription {
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom = "validate_name"
    )]
    pub index_name: String,
    #[validate(custom = "validate_key_schema")]
    pub key_schema: Vec<KeySchemaElement>,
    pub projection: Option<Projection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamSpecification {
    #[serde(default)]
    pub stream_enabled: bool,
    pub stream_view_type: Option<StreamViewType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseDescription {
    #[serde(rename = "Status")]
    pub status: Option<SseStatus>,
    #[serde(rename = "SSEType")]
    pub sse_type: Option<SseType>,
    #[serde(rename = "KMSMasterKeyArn")]
    pub kms_master_key_arn: Option<String>,
}

/// Some tools dump the request-side `SSESpecification` instead of the
/// `SSEDescription`; both the API and CloudFormation spellings are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct SseSpecification {
    #[serde(rename = "Enabled", alias = "SSEEnabled")]
    pub enabled: Option<bool>,
    #[serde(rename = "SSEType")]
    pub sse_type: Option<SseType>,
    #[serde(rename = "KMSMasterKeyId")]
    pub kms_master_key_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableClassSummary {
    pub table_class: Option<TableClass>,
}

// A key schema is one HASH key optionally followed by one RANGE key.
fn validate_key_schema(keys: &[KeySchemaElement]) -> Result<(), ValidationError> {
    let key_types: Vec<KeyType> = keys.iter().map(|key| key.key_type).collect();
    match key_types.as_slice() {
        [KeyType::Hash] | [KeyType::Hash, KeyType::Range] => Ok(()),
        [] => Err(key_schema_error("must contain a HASH key")),
        [KeyType::Range, ..] => Err(key_schema_error("must start with the HASH key")),
        [KeyType::Hash, KeyType::Hash] => {
            Err(key_schema_error("must contain exactly one HASH key"))
        }
        _ => Err(key_schema_error("must contain at most one HASH and one RANGE key")),
    }
}

fn key_schema_error(message: &'static str) -> ValidationError {
    validation_error("key_schema", message)
}

// Table and index names are limited to `[a-zA-Z0-9_.-]`.
fn validate_name(name: &str) -> Result<(), ValidationError> {
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(validation_error(
            "name",
            "may only contain letters, digits, `_`, `-` and `.`",
        ))
    }
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::from(message));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_accepts_hash_and_range_keys() {
        let keys = vec![KeySchemaElement::hash("Pk"), KeySchemaElement::range("Sk")];
        assert!(validate_key_schema(&keys).is_ok());
        assert!(validate_key_schema(&keys[..1]).is_ok());
    }

    #[test]
    fn it_rejects_invalid_key_schemas() {
        let cases = vec![
            (vec![], "must contain a HASH key"),
            (
                vec![KeySchemaElement::range("Sk")],
                "must start with the HASH key",
            ),
            (
                vec![KeySchemaElement::hash("A"), KeySchemaElement::hash("B")],
                "must contain exactly one HASH key",
            ),
            (
                vec![
                    KeySchemaElement::hash("A"),
                    KeySchemaElement::range("B"),
                    KeySchemaElement::range("C"),
                ],
                "must contain at most one HASH and one RANGE key",
            ),
        ];

        for (keys, message) in cases {
            let err = validate_key_schema(&keys).unwrap_err();
            assert_eq!(err.message.unwrap(), message);
        }
    }

    #[test]
    fn it_accepts_dynamodb_names() {
        for name in ["People", "orders-prod", "user_events.v2", "T"] {
            assert!(validate_name(name).is_ok(), "name: {name}");
        }
    }

    #[test]
    fn it_rejects_names_outside_dynamodb_charset() {
        for name in ["../escaped", "a/b", "with space", "Ünïcode", "C:\\tables"] {
            let err = validate_name(name).unwrap_err();
            assert_eq!(
                err.message.unwrap(),
                "may only contain letters, digits, `_`, `-` and `.`",
                "name: {name}"
            );
        }
    }

    #[test]
    fn it_validates_index_names() {
        let value = serde_json::json!({
            "TableName": "People",
            "AttributeDefinitions": [{ "AttributeName": "Id", "AttributeType": "S" }],
            "KeySchema": [{ "AttributeName": "Id", "KeyType": "HASH" }],
            "LocalSecondaryIndexes": [{
                "IndexName": "by/id",
                "KeySchema": [{ "AttributeName": "Id", "KeyType": "HASH" }]
            }]
        });
        let table: TableDescription = serde_json::from_value(value).unwrap();
        let err = crate::Error::from(table.validate().unwrap_err());
        assert_eq!(
            format!("{err}"),
            "Malformed input: local_secondary_indexes[0].index_name: \
             may only contain letters, digits, `_`, `-` and `.`"
        );
    }

    #[test]
    fn it_collects_unmodeled_fields() {
        let value = serde_json::json!({
            "TableName": "People",
            "AttributeDefinitions": [{ "AttributeName": "Id", "AttributeType": "S" }],
            "KeySchema": [{ "AttributeName": "Id", "KeyType": "HASH" }],
            "TableStatus": "ACTIVE",
            "ItemCount": 42,
            "TableArn": "arn:aws:dynamodb:us-east-1:123456789012:table/People"
        });
        let table: TableDescription = serde_json::from_value(value).unwrap();
        assert_eq!(
            table.ignored_fields(),
            vec!["ItemCount", "TableArn", "TableStatus"]
        );
    }

    #[test]
    fn it_ignores_read_only_throughput_fields() {
        let value = serde_json::json!({
            "NumberOfDecreasesToday": 0,
            "ReadCapacityUnits": 5,
            "WriteCapacityUnits": 10
        });
        let throughput: ProvisionedThroughputDescription = serde_json::from_value(value).unwrap();
        assert_eq!(throughput.units(), Some((5, 10)));
    }

    #[test]
    fn it_reads_sse_specification_in_either_spelling() {
        let api: SseSpecification =
            serde_json::from_value(serde_json::json!({ "Enabled": true })).unwrap();
        let cfn: SseSpecification =
            serde_json::from_value(serde_json::json!({ "SSEEnabled": true })).unwrap();
        assert_eq!(api.enabled, Some(true));
        assert_eq!(cfn.enabled, Some(true));
    }
}
