use super::Converter;

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ConverterBuilder {
    logical_name: Option<String>,
    logical_names: HashMap<String, String>,
    description: Option<String>,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical name used for every table, regardless of its name.
    pub fn set_logical_name<T: Into<String>>(self, logical_name: T) -> Self {
        Self {
            logical_name: Some(logical_name.into()),
            ..self
        }
    }

    /// Per-table logical names, keyed by table name.
    pub fn set_logical_names(self, logical_names: HashMap<String, String>) -> Self {
        Self {
            logical_names,
            ..self
        }
    }

    pub fn set_description<T: Into<String>>(self, description: T) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn build(self) -> Converter {
        Converter {
            logical_name: self.logical_name,
            logical_names: self.logical_names,
            description: self.description,
        }
    }
}
