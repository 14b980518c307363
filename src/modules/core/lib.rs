//! Core domain logic for the HBnB API
//!
//! This crate contains the entities, their dict representation, the typed
//! place inputs, configuration models and the error type shared by every
//! other crate in the workspace.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::HbnbError;
