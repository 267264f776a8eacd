//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! Requests arrive as the DTOs of the `shared` crate, are mapped onto domain
//! commands, and the domain results are mapped back into response DTOs.
//! Domain errors become status codes with an [`shared::ErrorResponse`] body.

pub mod rest;

pub use rest::*;
