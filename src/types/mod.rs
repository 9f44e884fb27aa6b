mod attribute_definition;
mod billing_mode;
mod key_schema;
mod projection;
mod sse;
mod stream_view_type;
mod table_class;

pub use attribute_definition::{AttributeDefinition, ScalarAttributeType};
pub use billing_mode::BillingMode;
pub use key_schema::{KeySchemaElement, KeyType};
pub use projection::{Projection, ProjectionType};
pub use sse::{SseStatus, SseType};
pub use stream_view_type::StreamViewType;
pub use table_class::TableClass;
