//! Service layer module
//!
//! Contains the Jadugar API client

pub mod client;

pub use client::{ApiClient, RequestOptions, PLATFORM};
