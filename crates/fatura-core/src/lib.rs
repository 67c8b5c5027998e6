//! Core library for Brazilian electric-utility invoice extraction.
//!
//! This crate provides:
//! - PDF text retrieval (first-page text of born-digital invoices)
//! - Layout classification and regex field extraction for RGE and
//!   cooperative (Cooperluz, Certhil, Cermissões) invoice layouts
//! - Engineering parameter calculation from static sizing tables
//! - Locale-aware value formatting and derived display-field composition

pub mod calc;
pub mod compose;
pub mod error;
pub mod extract;
pub mod format;
pub mod models;
pub mod pdf;

pub use calc::{calculate, Calc, EngineeringParams, SystemInputs};
pub use compose::{compose, decimal_to_dms, Axis, CompositeFields};
pub use error::{ExtractionError, FaturaError, PdfError, Result};
pub use extract::{classify_rge, extract, extract_declared, Distributor, RgeLayout};
pub use format::{ValueFormatter, ValueKind};
pub use models::{Field, FaturaConfig, InvoiceRecord};
pub use pdf::{PdfExtractor, PdfTextSource};
