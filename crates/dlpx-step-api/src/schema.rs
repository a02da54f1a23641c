use serde::{
    Deserialize,
    Serialize,
};

/// Parameter field type for form generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigFieldType {
    /// Single-line text input
    Text,
    /// Password input (hidden)
    Password,
    /// Boolean checkbox
    Boolean,
    /// Single selection dropdown; options come from `field_options`
    Select,
}

/// A single step parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigField {
    /// Field key (used when wiring step parameters)
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Field description/help text
    pub description: Option<String>,
    /// Field type
    pub field_type: ConfigFieldType,
    /// Whether the field is required
    pub required: bool,
}

/// Complete parameter schema for a step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub fields: Vec<ConfigField>,
}

impl ConfigSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn add_field(mut self, field: ConfigField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn select(key: &str, label: &str, description: &str) -> ConfigField {
        ConfigField {
            key: key.to_string(),
            label: label.to_string(),
            description: Some(description.to_string()),
            field_type: ConfigFieldType::Select,
            required: true,
        }
    }

    pub fn text(key: &str, label: &str, description: &str) -> ConfigField {
        ConfigField {
            key: key.to_string(),
            label: label.to_string(),
            description: Some(description.to_string()),
            field_type: ConfigFieldType::Text,
            required: true,
        }
    }
}
