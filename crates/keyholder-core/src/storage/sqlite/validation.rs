//! Column constraints enforced before writes.

use crate::crypto::{MAX_SEALED_LEN, MIN_SEALED_LEN};
use crate::error::{Result, ValidationError};

/// Reject sealed blobs outside the range a valid seal can produce.
pub fn check_sealed_size(sealed: &[u8]) -> Result<()> {
    if sealed.len() < MIN_SEALED_LEN || sealed.len() > MAX_SEALED_LEN {
        return Err(ValidationError::BlobSize {
            min: MIN_SEALED_LEN,
            max: MAX_SEALED_LEN,
            actual: sealed.len(),
        }
        .into());
    }
    Ok(())
}

/// Case-insensitive substring match used by label search.
pub fn label_matches(label: &str, search: &str) -> bool {
    label.to_lowercase().contains(&search.to_lowercase())
}
