//! Data models: the canonical record, field sentinels, and configuration.

pub mod config;
pub mod record;

pub use config::{DisplayConfig, FaturaConfig, PdfConfig};
pub use record::{Field, InvoiceRecord};
