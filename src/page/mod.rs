pub mod manifest;
pub mod runtime;
