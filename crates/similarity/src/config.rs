use crate::error::{Result, SimilarityError};
use serde::{Deserialize, Serialize};

/// Default width of the exact-match block window
pub const DEFAULT_BLOCK_WIDTH: usize = 5;

/// Configuration for a comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Number of consecutive nodes a window must share to count as an
    /// exact block match
    pub block_width: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            block_width: DEFAULT_BLOCK_WIDTH,
        }
    }
}

impl CompareConfig {
    /// Validate configuration
    ///
    /// Rejected at the boundary before any comparison begins; a zero-width
    /// window would match everywhere.
    pub fn validate(&self) -> Result<()> {
        if self.block_width == 0 {
            return Err(SimilarityError::invalid_config(
                "block_width must be a positive integer",
            ));
        }
        Ok(())
    }
}
