use std::path::PathBuf;

use ross_validate::Selection;

/// Outcome of `ross export`.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub output: PathBuf,
    pub selection: Selection,
    pub written: usize,
    pub total: usize,
}

/// Outcome of `ross xml`.
#[derive(Debug, Clone)]
pub struct XmlResult {
    pub output: PathBuf,
    pub facility_code: String,
    /// Accepted records transformed into the document.
    pub records: usize,
    /// Rejected records left out.
    pub skipped: usize,
    pub movements: usize,
    /// SHA-256 of the written document.
    pub digest: String,
}

/// Outcome of `ross import-xml`.
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub output: PathBuf,
    pub records: usize,
}
