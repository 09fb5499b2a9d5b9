pub use self::bindings::{geo_bindings, GeoBinding, GeoType};
pub use self::metadata::{form_metadata, FormMetadata};

pub mod bindings;
pub mod metadata;
