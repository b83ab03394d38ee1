//!
//! Level gating.
//!
//! Severities are the [`log`] crate's [`Level`] values, where
//! [`Level::Error`] is the most important and [`Level::Trace`] the most
//! verbose. A [`LevelGate`] holds the output threshold as a [`LevelFilter`]
//! and lets a severity through when it is at least as important as the
//! threshold, i.e. `level <= threshold` in `log` ordering.
//!
//! The threshold is fixed when the gate is created. There is no setter.
//!

pub use log::{Level, LevelFilter};

/// Threshold used when nothing else is configured and no host is bound.
pub const DEFAULT_THRESHOLD: LevelFilter = LevelFilter::Info;

/// Levels ordered from the most verbose to the least verbose.
pub const LEVELS: [Level; 5] = [
    Level::Trace,
    Level::Debug,
    Level::Info,
    Level::Warn,
    Level::Error,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGate {
    threshold: LevelFilter,
}

impl LevelGate {
    pub const fn new(threshold: LevelFilter) -> Self {
        LevelGate { threshold }
    }

    /// Build a gate by asking an underlying logger which levels it has
    /// enabled. The most verbose enabled level becomes the threshold;
    /// when nothing is enabled the gate is [`LevelFilter::Off`].
    pub fn probe<F>(enabled: F) -> Self
    where
        F: Fn(Level) -> bool,
    {
        let threshold = LEVELS
            .iter()
            .find(|level| enabled(**level))
            .map(|level| level.to_level_filter())
            .unwrap_or(LevelFilter::Off);

        LevelGate { threshold }
    }

    #[inline(always)]
    pub fn threshold(&self) -> LevelFilter {
        self.threshold
    }

    /// Returns true if messages at `level` pass the threshold.
    #[inline(always)]
    pub fn is_enabled(&self, level: Level) -> bool {
        level <= self.threshold
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        LevelGate::new(DEFAULT_THRESHOLD)
    }
}

/// Build-tool loggers stop at debug, so trace is forwarded as debug.
#[inline]
pub fn host_level(level: Level) -> Level {
    match level {
        Level::Trace => Level::Debug,
        other => other,
    }
}

/// Label printed in front of an emitted line.
#[inline]
pub fn label(level: Level) -> &'static str {
    host_level(level).as_str()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_gate_threshold_boundaries() {
        let gate = LevelGate::new(LevelFilter::Warn);
        assert!(gate.is_enabled(Level::Error));
        assert!(gate.is_enabled(Level::Warn));
        assert!(!gate.is_enabled(Level::Info));
        assert!(!gate.is_enabled(Level::Debug));
        assert!(!gate.is_enabled(Level::Trace));
    }

    #[test]
    fn test_gate_every_threshold() {
        for threshold in LEVELS {
            let gate = LevelGate::new(threshold.to_level_filter());
            for level in LEVELS {
                assert_eq!(gate.is_enabled(level), level <= threshold);
            }
        }
    }

    #[test]
    fn test_gate_off_and_default() {
        let off = LevelGate::new(LevelFilter::Off);
        assert!(LEVELS.iter().all(|level| !off.is_enabled(*level)));

        let gate = LevelGate::default();
        assert_eq!(gate.threshold(), LevelFilter::Info);
        assert!(gate.is_enabled(Level::Info));
        assert!(!gate.is_enabled(Level::Debug));
    }

    #[test]
    fn test_gate_is_idempotent() {
        let gate = LevelGate::new(LevelFilter::Debug);
        let first: Vec<bool> = LEVELS.iter().map(|l| gate.is_enabled(*l)).collect();
        for _ in 0..3 {
            let again: Vec<bool> = LEVELS.iter().map(|l| gate.is_enabled(*l)).collect();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_probe_picks_most_verbose_enabled() {
        let gate = LevelGate::probe(|level| level <= Level::Debug);
        assert_eq!(gate.threshold(), LevelFilter::Debug);

        let gate = LevelGate::probe(|level| level == Level::Error);
        assert_eq!(gate.threshold(), LevelFilter::Error);

        let gate = LevelGate::probe(|_| false);
        assert_eq!(gate.threshold(), LevelFilter::Off);
    }

    #[test]
    fn test_labels() {
        assert_eq!(label(Level::Error), "ERROR");
        assert_eq!(label(Level::Warn), "WARN");
        assert_eq!(label(Level::Info), "INFO");
        assert_eq!(label(Level::Debug), "DEBUG");
        assert_eq!(label(Level::Trace), "DEBUG");
        assert_eq!(host_level(Level::Trace), Level::Debug);
        assert_eq!(host_level(Level::Warn), Level::Warn);
    }
}
