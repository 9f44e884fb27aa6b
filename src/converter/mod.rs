mod builder;

use crate::describe::{
    self, GlobalSecondaryIndexDescription, LocalSecondaryIndexDescription, TableDescription,
};
use crate::template::{
    self, GlobalSecondaryIndex, LocalSecondaryIndex, ProvisionedThroughput, SseSpecification,
    StreamSpecification, TableProperties, Template,
};
use crate::types::{BillingMode, SseType};
use crate::{Error, Result};

use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};
use validator::Validate;

pub use builder::ConverterBuilder;

/// Maps describe-table output onto an `AWS::DynamoDB::Table` template.
#[derive(Debug, Default)]
pub struct Converter {
    logical_name: Option<String>,
    logical_names: HashMap<String, String>,
    description: Option<String>,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn logical_name_for(&self, table_name: &str) -> String {
        self.logical_name
            .clone()
            .or_else(|| self.logical_names.get(table_name).cloned())
            .unwrap_or_else(|| template::logical_name(table_name))
    }

    /// Converts a whole describe-table document, wrapped or bare.
    pub fn convert_document(&self, document: &Value) -> Result<Template> {
        let table = describe::parse_table(document)?;
        self.convert(&table)
    }

    pub fn convert(&self, table: &TableDescription) -> Result<Template> {
        table.validate()?;
        check_references(table)?;

        let ignored = table.ignored_fields();
        if !ignored.is_empty() {
            debug!(
                "{}: dropping fields without a template counterpart: {}",
                table.table_name,
                ignored.join(", ")
            );
        }

        let logical_name = self.logical_name_for(&table.table_name);
        debug!("{}: using logical name {logical_name}", table.table_name);

        let template =
            Template::new(self.description.clone()).with_table(logical_name, properties(table));
        Ok(template)
    }
}

/// Converts a describe-table document with the default settings.
pub fn convert(document: &Value) -> Result<Template> {
    Converter::default().convert_document(document)
}

fn check_references(table: &TableDescription) -> Result<()> {
    let defined: BTreeSet<&str> = table
        .attribute_definitions
        .iter()
        .map(|def| def.attribute_name.as_str())
        .collect();

    let key_schemas = std::iter::once((table.table_name.as_str(), &table.key_schema))
        .chain(
            table
                .global_secondary_indexes
                .iter()
                .map(|index| (index.index_name.as_str(), &index.key_schema)),
        )
        .chain(
            table
                .local_secondary_indexes
                .iter()
                .map(|index| (index.index_name.as_str(), &index.key_schema)),
        );

    let mut used: BTreeSet<&str> = BTreeSet::new();
    for (owner, keys) in key_schemas {
        for key in keys {
            let name = key.attribute_name.as_str();
            if !defined.contains(name) {
                return Err(Error::ReferentialMismatch {
                    owner: owner.into(),
                    attribute: name.into(),
                });
            }
            used.insert(name);
        }
    }

    // CloudFormation refuses definitions that no key schema uses.
    for unused in defined.difference(&used) {
        warn!(
            "{}: attribute definition `{unused}` is not used by any key schema",
            table.table_name
        );
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Capacity {
    OnDemand,
    Provisioned(ProvisionedThroughput),
    Unspecified,
}

fn capacity(table: &TableDescription) -> Capacity {
    if table.billing_mode() == Some(BillingMode::PayPerRequest) {
        return Capacity::OnDemand;
    }

    match table
        .provisioned_throughput
        .as_ref()
        .and_then(|throughput| throughput.units())
    {
        Some((read, write)) if read <= 0 || write <= 0 => {
            warn!(
                "{}: provisioned throughput is {read}/{write}, treating the table as on-demand",
                table.table_name
            );
            Capacity::OnDemand
        }
        Some(units) => Capacity::Provisioned(units.into()),
        None => {
            warn!(
                "{}: neither on-demand billing nor provisioned throughput found",
                table.table_name
            );
            Capacity::Unspecified
        }
    }
}

fn properties(table: &TableDescription) -> TableProperties {
    let capacity = capacity(table);
    let mut props = TableProperties::new(&table.table_name);

    props.attribute_definitions = table.attribute_definitions.clone();
    props.key_schema = table.key_schema.clone();

    match capacity {
        Capacity::OnDemand => props.billing_mode = Some(BillingMode::PayPerRequest),
        Capacity::Provisioned(throughput) => props.provisioned_throughput = Some(throughput),
        Capacity::Unspecified => {}
    }

    props.global_secondary_indexes = table
        .global_secondary_indexes
        .iter()
        .map(|index| global_index(index, capacity))
        .collect();
    props.local_secondary_indexes = table
        .local_secondary_indexes
        .iter()
        .map(LocalSecondaryIndex::from)
        .collect();

    props.stream_specification = stream_specification(table);
    props.sse_specification = sse_specification(table);
    props.table_class = table.table_class();
    props.deletion_protection_enabled = table.deletion_protection_enabled;
    props
}

fn global_index(
    index: &GlobalSecondaryIndexDescription,
    capacity: Capacity,
) -> GlobalSecondaryIndex {
    let provisioned_throughput = match capacity {
        Capacity::Provisioned(_) => index
            .provisioned_throughput
            .as_ref()
            .and_then(|throughput| throughput.units())
            .filter(|(read, write)| *read > 0 && *write > 0)
            .map(ProvisionedThroughput::from),
        _ => None,
    };

    GlobalSecondaryIndex {
        index_name: index.index_name.clone(),
        key_schema: index.key_schema.clone(),
        projection: index.projection.clone().unwrap_or_default(),
        provisioned_throughput,
    }
}

impl From<&LocalSecondaryIndexDescription> for LocalSecondaryIndex {
    fn from(index: &LocalSecondaryIndexDescription) -> LocalSecondaryIndex {
        LocalSecondaryIndex {
            index_name: index.index_name.clone(),
            key_schema: index.key_schema.clone(),
            projection: index.projection.clone().unwrap_or_default(),
        }
    }
}

fn stream_specification(table: &TableDescription) -> Option<StreamSpecification> {
    table
        .stream_specification
        .as_ref()
        .filter(|spec| spec.stream_enabled)
        .map(|spec| StreamSpecification {
            stream_view_type: spec.stream_view_type.unwrap_or_default(),
        })
}

fn sse_specification(table: &TableDescription) -> Option<SseSpecification> {
    if let Some(sse) = table.sse_description.as_ref() {
        if sse.status.is_some_and(|status| status.is_on()) {
            return Some(match (sse.sse_type, sse.kms_master_key_arn.as_ref()) {
                (Some(SseType::Kms), Some(arn)) => SseSpecification::kms(arn),
                _ => SseSpecification::enabled(),
            });
        }
    }

    if let Some(sse) = table.sse_specification.as_ref() {
        if sse.enabled == Some(true) {
            return Some(match (sse.sse_type, sse.kms_master_key_id.as_ref()) {
                (Some(SseType::Kms), Some(key_id)) => SseSpecification::kms(key_id),
                _ => SseSpecification::enabled(),
            });
        }
    }

    None
}
