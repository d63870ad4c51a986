pub mod converters;
pub mod errors;
pub mod json_schema;
pub mod models;
pub mod prompt_template;
pub mod providers;

pub use converters::{ConverterOptions, FormatConverter, SerializationFallback};
pub use errors::{ConversionError, ConversionResult};
