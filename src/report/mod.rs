//! Report rendering and delivery
//!
//! The pipeline's external boundary: [`workbook`] writes collected records
//! into an inventory workbook at the fixed column layout of the report
//! template, and [`deliver`] uploads the result to S3.

pub mod deliver;
pub mod workbook;

pub use deliver::deliver_report;
pub use workbook::write_report;
