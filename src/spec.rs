pub mod openapi;

pub use openapi::{fetch_spec, OpenApiSpec, SpecError};
