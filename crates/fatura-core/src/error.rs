//! Error types for the fatura-core library.

use thiserror::Error;

use crate::extract::Distributor;

/// Main error type for the fatura library.
#[derive(Error, Debug)]
pub enum FaturaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors surfaced by the layout classifier. Field-level misses never reach
/// here; these are the only failures that abort a whole extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No layout signature matched and fallback scoring found nothing usable.
    #[error("unrecognized {distributor} invoice layout in '{source_id}'")]
    UnrecognizedLayout {
        distributor: Distributor,
        source_id: String,
    },

    /// The mandatory customer name field could not be extracted.
    #[error("customer name not found in {distributor} invoice '{source_id}'")]
    NameNotFound {
        distributor: Distributor,
        source_id: String,
    },

    /// The declared distributor is not one of the supported values.
    #[error("unknown distributor: '{0}'")]
    UnknownDistributor(String),
}

/// Result type for the fatura library.
pub type Result<T> = std::result::Result<T, FaturaError>;
