use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Reject uploads larger than this many bytes; None disables the ceiling.
    pub max_file_bytes: Option<u64>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_bytes: Some(10 * 1024 * 1024),
        }
    }
}
