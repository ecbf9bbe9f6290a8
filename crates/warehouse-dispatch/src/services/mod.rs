//! Cross-actor operations of the warehouse console.

pub mod dispatch_service;
pub mod error;

pub use dispatch_service::*;
pub use error::*;
