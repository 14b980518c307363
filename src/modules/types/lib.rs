//! Type definitions for the HBnB API
//!
//! This crate contains shared type definitions used across the workspace,
//! including entity kinds, storage engine types, wire types and the
//! timestamp format used in entity dicts.

pub mod kind;
pub mod runtime;
pub mod storage;
pub mod timestamp;

pub use kind::Kind;
pub use storage::StorageType;
