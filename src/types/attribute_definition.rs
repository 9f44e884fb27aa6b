use serde::{Deserialize, Serialize};

/// One entry of `AttributeDefinitions`. Both describe-table output and the
/// CloudFormation resource use the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    pub attribute_name: String,
    pub attribute_type: ScalarAttributeType,
}

impl AttributeDefinition {
    pub fn new<T: Into<String>>(name: T, attribute_type: ScalarAttributeType) -> Self {
        Self {
            attribute_name: name.into(),
            attribute_type,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub enum ScalarAttributeType {
    S,
    N,
    B,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_deserializes_attribute_definition() {
        let value = serde_json::json!({
            "AttributeName": "Id",
            "AttributeType": "N"
        });
        let def: AttributeDefinition = serde_json::from_value(value).unwrap();
        assert_eq!(def, AttributeDefinition::new("Id", ScalarAttributeType::N));
    }

    #[test]
    fn it_rejects_non_scalar_attribute_type() {
        let value = serde_json::json!({
            "AttributeName": "Tags",
            "AttributeType": "SS"
        });
        let result = serde_json::from_value::<AttributeDefinition>(value);
        assert!(result.is_err());
    }
}
