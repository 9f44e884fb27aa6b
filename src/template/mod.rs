mod logical_name;

use crate::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, Projection, SseType, StreamViewType,
    TableClass,
};

use serde::Serialize;
use std::collections::BTreeMap;

pub use logical_name::logical_name;

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";
pub const TABLE_RESOURCE_TYPE: &str = "AWS::DynamoDB::Table";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: &'static str,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,
}

impl Template {
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION,
            description,
            resources: BTreeMap::new(),
        }
    }

    pub fn with_table<T: Into<String>>(
        mut self,
        logical_name: T,
        properties: TableProperties,
    ) -> Self {
        self.resources
            .insert(logical_name.into(), Resource::table(properties));
        self
    }

    pub fn resources(&self) -> &BTreeMap<String, Resource> {
        &self.resources
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    r#type: &'static str,
    properties: TableProperties,
}

impl Resource {
    fn table(properties: TableProperties) -> Self {
        Self {
            r#type: TABLE_RESOURCE_TYPE,
            properties,
        }
    }

    pub fn properties(&self) -> &TableProperties {
        &self.properties
    }
}

/// `Properties` of an `AWS::DynamoDB::Table` resource.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TableProperties {
    pub table_name: String,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub key_schema: Vec<KeySchemaElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<BillingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<ProvisionedThroughput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global_secondary_indexes: Vec<GlobalSecondaryIndex>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_secondary_indexes: Vec<LocalSecondaryIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_specification: Option<StreamSpecification>,
    #[serde(rename = "SSESpecification", skip_serializing_if = "Option::is_none")]
    pub sse_specification: Option<SseSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_class: Option<TableClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_protection_enabled: Option<bool>,
}

impl TableProperties {
    pub fn new<T: Into<String>>(table_name: T) -> Self {
        Self {
            table_name: table_name.into(),
            attribute_definitions: vec![],
            key_schema: vec![],
            billing_mode: None,
            provisioned_throughput: None,
            global_secondary_indexes: vec![],
            local_secondary_indexes: vec![],
            stream_specification: None,
            sse_specification: None,
            table_class: None,
            deletion_protection_enabled: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl From<(i64, i64)> for ProvisionedThroughput {
    fn from((read, write): (i64, i64)) -> Self {
        Self {
            read_capacity_units: read,
            write_capacity_units: write,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalSecondaryIndex {
    pub index_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    pub projection: Projection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<ProvisionedThroughput>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LocalSecondaryIndex {
    pub index_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    pub projection: Projection,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct StreamSpecification {
    pub stream_view_type: StreamViewType,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SseSpecification {
    #[serde(rename = "SSEEnabled")]
    pub sse_enabled: bool,
    #[serde(rename = "SSEType", skip_serializing_if = "Option::is_none")]
    pub sse_type: Option<SseType>,
    #[serde(rename = "KMSMasterKeyId", skip_serializing_if = "Option::is_none")]
    pub kms_master_key_id: Option<String>,
}

impl SseSpecification {
    pub fn enabled() -> Self {
        Self {
            sse_enabled: true,
            sse_type: None,
            kms_master_key_id: None,
        }
    }

    pub fn kms<T: Into<String>>(key_id: T) -> Self {
        Self {
            sse_enabled: true,
            sse_type: Some(SseType::Kms),
            kms_master_key_id: Some(key_id.into()),
        }
    }
}
