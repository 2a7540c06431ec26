//! fedinv - integrated inventory collection from AWS Config
//!
//! Discovers cloud resources across an organization (via a Config aggregator
//! or per-account cross-account access), normalizes each resource into flat
//! inventory rows, and renders the result into a compliance-report workbook.

pub mod collector;
pub mod inventory;
pub mod report;
pub mod settings;
pub mod source;
