//! Whole-file JSON persistence.

mod records;
mod store;

pub use records::{ContactRecord, Document, PropertyRecord, FORMAT_VERSION};
pub use store::JsonStore;
