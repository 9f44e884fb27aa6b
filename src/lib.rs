//! Turns `aws dynamodb describe-table` output into a CloudFormation
//! template for the same table.

pub mod config;
pub mod converter;
pub mod describe;
mod error;
pub mod output;
pub mod process;
pub mod template;
pub mod types;

pub use converter::{convert, Converter};
pub use error::{Error, Result};
pub use output::Format;
pub use process::{Processor, Summary};
pub use template::Template;

pub const ENV_CONFIG_PATH: &str = "DYNAMO_CFN_CONFIG";
