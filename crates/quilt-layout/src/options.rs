//! Layout configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ORDER_ITERATIONS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Upper bound on barycenter sweeps before the orderer gives up on a fixed point.
    pub max_order_iterations: usize,
    /// Align the bottom row type of every component with the deepest one.
    pub reconcile_components: bool,
    /// Log per-phase durations at debug level.
    pub timing: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_order_iterations: DEFAULT_MAX_ORDER_ITERATIONS,
            reconcile_components: true,
            timing: false,
        }
    }
}

impl LayoutOptions {
    /// Defaults overridden by `QUILT_LAYOUT_TIMING` and `QUILT_ORDER_MAX_ITERATIONS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LayoutOptions::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(v) = lookup("QUILT_LAYOUT_TIMING") {
            options.timing = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(v) = lookup("QUILT_ORDER_MAX_ITERATIONS") {
            match v.trim().parse::<usize>() {
                Ok(n) => options.max_order_iterations = n,
                Err(_) => {
                    tracing::warn!(value = %v, "ignoring invalid QUILT_ORDER_MAX_ITERATIONS");
                }
            }
        }
        options
    }
}
