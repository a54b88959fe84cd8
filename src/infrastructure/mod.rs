//! Infrastructure layer for external integrations.
//!
//! This layer implements the lookup traits defined by the domain layer on
//! top of real HTTP services.
//!
//! # Modules
//!
//! - [`http`] - reqwest-based clients for the location and weather services

pub mod http;
