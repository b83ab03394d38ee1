//!
//! Host build-tool logger binding.
//!
//! When a plugin runs inside a build, the build tool supplies its own
//! logger. Implementing [`HostLog`] for it and binding it through
//! [`LoggerContext::bound`](crate::LoggerContext::bound) routes every
//! emitted message there instead of to standard output.
//!

use crate::levels::{Level, LevelGate};
use downcast::{downcast_sync, AnySync};
use std::error::Error as StdError;

/// The native logger of a host build tool.
///
/// Hosts usually have no trace level; trace messages arrive as
/// [`Level::Debug`]. The message is already formatted, and `error` carries
/// a trailing error argument that was not substituted into the template.
pub trait HostLog: AnySync {
    fn is_level_enabled(&self, level: Level) -> bool;

    fn write(&self, level: Level, message: &str, error: Option<&dyn StdError>);
}

downcast_sync!(dyn HostLog);

/// Derive an output threshold from the levels the host has enabled.
pub fn probe_threshold(host: &dyn HostLog) -> LevelGate {
    LevelGate::probe(|level| host.is_level_enabled(level))
}
