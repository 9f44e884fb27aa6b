use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SseStatus {
    Enabling,
    Enabled,
    Disabling,
    Disabled,
    Updating,
}

impl SseStatus {
    pub fn is_on(&self) -> bool {
        matches!(self, Self::Enabling | Self::Enabled)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub enum SseType {
    #[serde(rename = "AES256")]
    Aes256,
    #[serde(rename = "KMS")]
    Kms,
}
