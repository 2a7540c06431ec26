//! Inventory normalization layer
//!
//! This module turns the heterogeneous resource documents returned by AWS
//! Config into flat [`record::InventoryRecord`] rows suitable for a
//! compliance report.
//!
//! # Architecture
//!
//! - [`raw`] - As-returned resource documents and tag access
//! - [`document`] - Defensive lookups into untyped configuration documents
//! - [`sanitize`] - Spreadsheet formula-injection defense for cell values
//! - [`record`] - The normalized inventory row
//! - [`mappers`] - Per-resource-kind mapping logic and the dispatch registry

pub mod document;
pub mod mappers;
pub mod raw;
pub mod record;
pub mod sanitize;
