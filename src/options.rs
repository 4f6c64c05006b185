//! Container configuration.
//!
//! Bindings are always declared in code. What can be configured is how the
//! container guards its object graph: bind-time cycle detection and the
//! maximum nesting depth of a single resolution.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Environment variable toggling bind-time cycle detection.
pub const ENV_DETECT_CYCLES: &str = "DIYDI_DETECT_CYCLES";
/// Environment variable overriding the maximum resolution depth.
pub const ENV_MAX_DEPTH: &str = "DIYDI_MAX_DEPTH";

const DEFAULT_MAX_DEPTH: usize = 1024;

/// Options controlling container behavior.
///
/// # Examples
///
/// ```
/// use diydi::{Container, ContainerOptions};
///
/// let options = ContainerOptions::default()
///     .detect_cycles(false)
///     .max_depth(64);
///
/// let container = Container::with_options(options.clone());
/// assert_eq!(container.options(), &options);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Reject bindings that would close a dependency cycle
    pub detect_cycles: bool,
    /// Deepest nested resolution allowed before failing with `DepthExceeded`
    pub max_depth: usize,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ContainerOptions {
    pub fn detect_cycles(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Defaults overridden by `DIYDI_DETECT_CYCLES` and `DIYDI_MAX_DEPTH`.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(raw) = env::var(ENV_DETECT_CYCLES) {
            match parse_bool(&raw) {
                Some(enabled) => options.detect_cycles = enabled,
                None => tracing::warn!(variable = ENV_DETECT_CYCLES, value = %raw, "ignoring invalid boolean"),
            }
        }

        if let Ok(raw) = env::var(ENV_MAX_DEPTH) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => options.max_depth = depth,
                _ => tracing::warn!(variable = ENV_MAX_DEPTH, value = %raw, "ignoring invalid depth"),
            }
        }

        options
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
