//! Output generation for accepted ROSS 1000 records.
//!
//! - [`movements`]: the movement XML document, grouped by date
//! - [`digest`]: SHA-256 fingerprint of a generated document
//! - [`submit`]: the boundary towards a regional submission service

mod common;
pub mod digest;
mod error;
pub mod movements;
pub mod submit;

pub use digest::sha256_hex;
pub use error::{OutputError, Result};
pub use movements::{
    Capacity, DEFAULT_FACILITY_CODE, DEFAULT_PRODUCT, Movement, XmlOptions,
    facility_code_from_file_name, group_movements, leader_links, movements_xml,
    write_movements_xml,
};
pub use submit::{SubmissionGateway, SubmissionRequest, SubmissionStatus, submit};
