use serde::{Deserialize, Serialize};

use crate::threshold::ThresholdParams;

/// Everything a single thresholding job needs, minus the image itself.
///
/// Round-trips through TOML so runs can be described in a config file
/// instead of flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub threshold: ThresholdParams,
    /// Number of distributed workers in the collective.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Shared-memory threads per worker; 0 = rayon's pool width.
    #[serde(default)]
    pub inner_threads: usize,
}

fn default_workers() -> usize {
    1
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdParams::default(),
            workers: default_workers(),
            inner_threads: 0,
        }
    }
}
