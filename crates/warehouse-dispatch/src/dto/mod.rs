//! # Wire Contract
//!
//! The REST payloads the console exchanges with the backend ([`wire`]), the camelCase
//! view models it renders ([`view`]), and the adapters between them ([`adapter`]).
//! Domain types convert into wire DTOs with `From`, so a populated task or batch can be
//! handed to the console directly.

pub mod adapter;
pub mod view;
pub mod wire;

pub use adapter::*;
pub use view::*;
pub use wire::*;
