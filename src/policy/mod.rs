//! Policy data model: values, browsers, format metadata, loading and validation.
mod browser;
pub mod metadata;
mod source;
pub mod validation;
mod value;

pub use browser::Browser;
pub use metadata::{BrowserMetadata, JsonMetadata, ProfileMetadata, RegistryMetadata, metadata};
pub use source::PolicySource;
pub use value::{PolicyMap, PolicyValue};
