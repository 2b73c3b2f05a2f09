pub mod aggregate;
pub mod connector;
pub mod source;
