pub mod constants;
pub mod locate;
pub mod probe;
pub mod writer;

pub use locate::{discover_schema_reference, register_discovered, SchemaReference};
pub use probe::{GeometryProbeOrder, GENERIC_PROPERTY_TYPE};
pub use writer::SchemaWriter;
