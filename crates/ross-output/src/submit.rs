//! Hand-off of a movement document to a regional submission service.
//!
//! Only the boundary lives here: the request shape, its checks and the
//! gateway trait. Transports are supplied by the embedding application.

use std::fmt::Debug;

use ross_model::Region;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::digest::sha256_hex;
use crate::error::{OutputError, Result};

/// A movement document addressed to one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub xml: String,
    pub region: Region,
    /// SHA-256 of `xml`, lowercase hex.
    pub digest: String,
}

impl SubmissionRequest {
    /// Build a request, refusing an empty document.
    pub fn new(xml: impl Into<String>, region: Region) -> Result<Self> {
        let xml = xml.into();
        if xml.trim().is_empty() {
            return Err(OutputError::invalid_submission("XML document is empty"));
        }
        let digest = sha256_hex(&xml);
        Ok(Self {
            xml,
            region,
            digest,
        })
    }

    /// Build a request from a region name or slug, e.g. `emilia-romagna`.
    pub fn for_region_name(xml: impl Into<String>, region: &str) -> Result<Self> {
        let region = Region::parse_loose(region)
            .ok_or_else(|| OutputError::invalid_submission(format!("unknown region {region:?}")))?;
        Self::new(xml, region)
    }
}

/// What the regional service answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionStatus {
    Accepted { receipt: Option<String> },
    Rejected { reason: String },
}

impl SubmissionStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionStatus::Accepted { .. })
    }
}

/// A transport able to deliver a [`SubmissionRequest`].
///
/// `Err` means the request never got an answer; a refusal by the service
/// is `Ok(SubmissionStatus::Rejected)`.
pub trait SubmissionGateway: Send + Sync + Debug {
    fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionStatus>;
}

/// Send `request` through `gateway` and log the outcome.
pub fn submit<G: SubmissionGateway + ?Sized>(
    gateway: &G,
    request: &SubmissionRequest,
) -> Result<SubmissionStatus> {
    info!(
        region = %request.region,
        digest = %request.digest,
        bytes = request.xml.len(),
        "submitting movements"
    );
    let status = gateway.submit(request)?;
    match &status {
        SubmissionStatus::Accepted { receipt } => {
            info!(region = %request.region, receipt = ?receipt, "submission accepted");
        }
        SubmissionStatus::Rejected { reason } => {
            warn!(region = %request.region, %reason, "submission rejected");
        }
    }
    Ok(status)
}
