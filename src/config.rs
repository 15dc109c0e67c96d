//! Handler configuration
//!
//! Settings are plain serde structs so they can be embedded in a larger
//! application config or loaded from a JSON file.
//!
//! # Example JSON
//! ```json
//! {
//!   "scan_order": "content_hash",
//!   "dedup_candidates": true
//! }
//! ```

use crate::error::{HandlerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Order in which the batch resolver scans pending candidates
///
/// The resolver commits the first candidate in this order that is valid
/// against the current pool, so when two candidates spend the same output
/// this order decides which one survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Stable order of submission
    #[default]
    Submission,
    /// Ascending content hash, ties broken by the full encoding including
    /// signatures; the accepted set does not depend on how the batch was permuted
    ContentHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    pub scan_order: ScanOrder,
    /// Collapse byte-identical candidates in a batch to their first occurrence
    pub dedup_candidates: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            scan_order: ScanOrder::Submission,
            dedup_candidates: true,
        }
    }
}

impl HandlerConfig {
    pub fn with_scan_order(mut self, scan_order: ScanOrder) -> Self {
        self.scan_order = scan_order;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HandlerError::Config(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
