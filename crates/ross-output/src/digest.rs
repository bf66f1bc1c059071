//! SHA-256 fingerprint of a generated document.

use sha2::{Digest, Sha256};
use tracing::debug;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes.as_ref());
    let digest = hex::encode(hasher.finalize());
    debug!(%digest, "computed SHA-256");
    digest
}
