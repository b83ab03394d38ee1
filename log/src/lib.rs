//!
//! [`plugin_log`] routes the log output of a build-tool plugin either to the
//! host build tool's own logger or, when no host is bound, to standard
//! output as `[LEVEL] message` lines.
//!
//! Plugin code talks to a single [`PluginLogger`]. It implements the
//! crate's [`Logger`] trait, the host-logger shape [`HostLog`], and the
//! [`log`] crate facade, so code written against any of those interfaces
//! ends up in the same place.
//!
//! Messages use `{}` placeholders filled at runtime from an argument list
//! (see [`format`]). A trailing error argument that no placeholder consumes
//! is printed after the message together with its causes.
//!
//! The output threshold is fixed when the [`LoggerContext`] is built: set
//! explicitly, probed from the bound host, or [`levels::DEFAULT_THRESHOLD`].
//! Disabled levels return before any argument is formatted.
//!
//! ## Example:
//!
//! ```ignore
//! use plugin_log::prelude::*;
//!
//! let logger = PluginLogger::new(LoggerContext::unbound());
//! plog_info!(logger, "resolved {} commits in {}", count, branch);
//! plog_error!(logger, "cannot read {}", path; err);
//! ```
//!
//! With the `facade` feature, [`init`] installs a [`PluginLogger`] as the
//! `log` crate backend.
//!

extern crate self as plugin_log;

pub mod error;
pub mod result;

pub mod console;
pub mod format;
pub mod host;
pub mod levels;
pub mod sink;

mod logger;
pub use self::logger::*;

mod macros;

pub use self::format::{Argument, FormattedMessage};
pub use self::host::HostLog;
pub use self::levels::{Level, LevelFilter, LevelGate};
pub use self::sink::{CaptureSink, Sink, StdoutSink};


pub mod prelude {
    pub use super::format::*;
    pub use super::host::*;
    pub use super::levels::*;
    pub use super::logger::*;
    pub use super::sink::*;
    pub use super::{plog, plog_debug, plog_error, plog_info, plog_trace, plog_warn};
}
