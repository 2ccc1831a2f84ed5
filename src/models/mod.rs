//! Data models module
//!
//! Defines the structures exchanged with the Jadugar API

pub mod error;

pub use error::ErrorModel;
