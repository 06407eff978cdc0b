//! Frame dispatch configuration.
//!
//! The analyzer's original design spawned one unbounded task per
//! captured frame. That behavior is still available as
//! `task-per-frame`, but the default is a bounded worker pool with an
//! explicit drop policy under overload.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// How captured frames are handed to analysis tasks.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchMode {
    /// Bounded worker pool draining a bounded queue; frames are dropped
    /// (and counted) when the queue is full.
    #[default]
    Pool,
    /// One fire-and-forget task per frame. Minimal added latency, but
    /// unbounded resource growth under high packet rates.
    TaskPerFrame,
}

/// Frame dispatch parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DispatchConfig {
    /// Dispatch mode.
    #[serde(default)]
    pub mode: DispatchMode,

    /// Number of pool workers (ignored in task-per-frame mode).
    #[validate(range(min = 1, max = 1024))]
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Capacity of the dispatch queue (ignored in task-per-frame mode).
    #[validate(range(min = 16, max = 1048576))]
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_queue_capacity() -> usize {
    4096
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn valid_default_dispatch_config() {
        DispatchConfig::default()
            .validate()
            .expect("Default config should be valid");
    }

    #[test]
    fn rejects_zero_workers() {
        let mut config = DispatchConfig::default();
        config.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn mode_parses_from_kebab_case() {
        let mode = mode_from_str("task-per-frame");
        assert_eq!(mode, DispatchMode::TaskPerFrame);
    }

    fn mode_from_str(value: &str) -> DispatchMode {
        serde::Deserialize::deserialize(serde::de::value::StrDeserializer::<
            serde::de::value::Error,
        >::new(value))
        .unwrap()
    }
}
