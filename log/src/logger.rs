use crate::format::{format_message, with_error, Argument, UNPRINTABLE};
use crate::host::{probe_threshold, HostLog};
use crate::levels::{host_level, Level, LevelFilter, LevelGate};
use crate::sink::{Sink, StdoutSink};
use cfg_if::cfg_if;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Name reported by [`PluginLogger`] regardless of the name it was
/// requested under.
pub const LOGGER_NAME: &str = "plugin_log::PluginLogger";

/// The logging operations available to plugin code.
///
/// Templates use `{}` markers (see [`format`](crate::format)). Implementors
/// provide [`Logger::log`] and [`Logger::threshold`]; everything else is
/// derived from them.
pub trait Logger: Send + Sync {
    fn name(&self) -> &str;

    fn threshold(&self) -> LevelFilter;

    fn log(&self, level: Level, template: &str, args: &[Argument<'_>]);

    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        level <= self.threshold()
    }

    fn trace(&self, template: &str, args: &[Argument<'_>]) {
        self.log(Level::Trace, template, args)
    }
    fn debug(&self, template: &str, args: &[Argument<'_>]) {
        self.log(Level::Debug, template, args)
    }
    fn info(&self, template: &str, args: &[Argument<'_>]) {
        self.log(Level::Info, template, args)
    }
    fn warn(&self, template: &str, args: &[Argument<'_>]) {
        self.log(Level::Warn, template, args)
    }
    fn error(&self, template: &str, args: &[Argument<'_>]) {
        self.log(Level::Error, template, args)
    }

    fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }
    fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }
    fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }
    fn is_warn_enabled(&self) -> bool {
        self.is_enabled(Level::Warn)
    }
    fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn threshold(&self) -> LevelFilter {
        (**self).threshold()
    }
    fn log(&self, level: Level, template: &str, args: &[Argument<'_>]) {
        (**self).log(level, template, args)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn threshold(&self) -> LevelFilter {
        (**self).threshold()
    }
    fn log(&self, level: Level, template: &str, args: &[Argument<'_>]) {
        (**self).log(level, template, args)
    }
}

/// Everything a [`PluginLogger`] needs, fixed at construction.
///
/// An unbound context writes to standard output at
/// [`DEFAULT_THRESHOLD`](crate::levels::DEFAULT_THRESHOLD). A bound context
/// forwards to the host logger and takes its threshold from the levels the
/// host reports enabled.
#[derive(Clone)]
pub struct LoggerContext {
    gate: LevelGate,
    host: Option<Arc<dyn HostLog>>,
    sink: Arc<dyn Sink>,
}

impl LoggerContext {
    pub fn unbound() -> Self {
        LoggerContext {
            gate: LevelGate::default(),
            host: None,
            sink: Arc::new(StdoutSink),
        }
    }

    pub fn bound(host: Arc<dyn HostLog>) -> Self {
        LoggerContext {
            gate: probe_threshold(&*host),
            host: Some(host),
            sink: Arc::new(StdoutSink),
        }
    }

    /// Override the threshold.
    pub fn with_threshold(mut self, threshold: LevelFilter) -> Self {
        self.gate = LevelGate::new(threshold);
        self
    }

    /// Replace the sink used while unbound.
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn gate(&self) -> LevelGate {
        self.gate
    }

    pub fn is_bound(&self) -> bool {
        self.host.is_some()
    }

    pub fn host(&self) -> Option<&Arc<dyn HostLog>> {
        self.host.as_ref()
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }
}

impl Default for LoggerContext {
    fn default() -> Self {
        LoggerContext::unbound()
    }
}

impl fmt::Debug for LoggerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerContext")
            .field("threshold", &self.gate.threshold())
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// The single logger handed to plugin code.
///
/// It implements [`Logger`], [`HostLog`] and [`log::Log`], so the same
/// object serves callers of any of the three interfaces.
pub struct PluginLogger {
    ctx: LoggerContext,
}

impl PluginLogger {
    pub fn new(ctx: LoggerContext) -> Self {
        PluginLogger { ctx }
    }

    pub fn context(&self) -> &LoggerContext {
        &self.ctx
    }

    pub fn is_bound(&self) -> bool {
        self.ctx.is_bound()
    }

    /// The bound host logger as its concrete type.
    pub fn host_as<T: HostLog>(&self) -> Option<&T> {
        self.ctx.host.as_deref()?.downcast_ref::<T>().ok()
    }

    /// The sink as its concrete type.
    pub fn sink_as<T: Sink>(&self) -> Option<&T> {
        self.ctx.sink.downcast_ref::<T>().ok()
    }

    fn emit(&self, level: Level, message: &str, error: Option<&dyn StdError>) {
        match &self.ctx.host {
            Some(host) => host.write(host_level(level), message, error),
            None => {
                let message = match error {
                    Some(error) => Cow::Owned(with_error(message, error)),
                    None => Cow::Borrowed(message),
                };
                // a failed write is dropped, logging never aborts the caller
                self.ctx.sink.write(level, &message).ok();
            }
        }
    }
}

impl Logger for PluginLogger {
    fn name(&self) -> &str {
        LOGGER_NAME
    }

    fn threshold(&self) -> LevelFilter {
        self.ctx.gate.threshold()
    }

    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        self.ctx.gate.is_enabled(level)
    }

    fn log(&self, level: Level, template: &str, args: &[Argument<'_>]) {
        if !self.ctx.gate.is_enabled(level) {
            return;
        }
        let formatted = format_message(template, args);
        self.emit(level, &formatted.message, formatted.error);
    }
}

impl HostLog for PluginLogger {
    fn is_level_enabled(&self, level: Level) -> bool {
        self.ctx.gate.is_enabled(level)
    }

    fn write(&self, level: Level, message: &str, error: Option<&dyn StdError>) {
        if self.ctx.gate.is_enabled(level) {
            self.emit(level, message, error);
        }
    }
}

impl log::Log for PluginLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.ctx.gate.is_enabled(metadata.level())
    }

    fn log(&self, record: &log::Record) {
        if self.ctx.gate.is_enabled(record.level()) {
            let mut message = String::new();
            if fmt::write(&mut message, *record.args()).is_err() {
                message = UNPRINTABLE.to_string();
            }
            self.emit(record.level(), &message, None);
        }
    }

    fn flush(&self) {
        self.ctx.sink.flush().ok();
    }
}

/// Hands out loggers by name.
pub trait LoggerFactory {
    type Logger: Logger;

    fn logger(&self, name: &str) -> Arc<Self::Logger>;
}

/// Returns the same [`PluginLogger`] for every name.
#[derive(Clone)]
pub struct PluginLoggerFactory {
    logger: Arc<PluginLogger>,
}

impl PluginLoggerFactory {
    pub fn new(ctx: LoggerContext) -> Self {
        PluginLoggerFactory {
            logger: Arc::new(PluginLogger::new(ctx)),
        }
    }
}

impl LoggerFactory for PluginLoggerFactory {
    type Logger = PluginLogger;

    fn logger(&self, _name: &str) -> Arc<PluginLogger> {
        self.logger.clone()
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_LOGGER: PluginLogger = PluginLogger::new(LoggerContext::unbound());
}

/// An unbound stdout logger at the default threshold, created on first use.
pub fn default_logger() -> &'static PluginLogger {
    &DEFAULT_LOGGER
}

cfg_if! {
    if #[cfg(feature = "facade")] {
        /// Install a [`PluginLogger`] built from `ctx` as the [`log`] crate
        /// backend, so `log::info!()` and friends reach it.
        pub fn init(ctx: LoggerContext) -> crate::result::Result<()> {
            let logger = PluginLogger::new(ctx);
            let max_level = logger.ctx.gate.threshold();
            log::set_boxed_logger(Box::new(logger))?;
            log::set_max_level(max_level);
            Ok(())
        }
    }
}
