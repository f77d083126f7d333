//! Assertions that log their failure even when the fatal half is compiled
//! out.
//!
//! `std`'s `debug_assert!` vanishes entirely in release builds: the condition
//! is not evaluated and a violation leaves no trace. Here the condition is
//! always evaluated, and a violation is always reported to a logging
//! facility before the host's assertion reaction runs, so release builds
//! still leave a diagnostic behind. The message is only formatted on the
//! failure path.
//!
//! Most call sites want [`checked_assert!`] or [`assert_failure!`], which
//! route through the `log` facade and react fatally only when
//! `debug_assertions` are on. The underlying [`checked`] and [`fail`]
//! functions take the [`Sink`] and [`Failure`] collaborators explicitly for
//! callers (and tests) that need their own.

#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

pub mod convert;


use std::fmt;

/// Severity attached to a failure report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
  /// Something is wrong. The usual pick for assertion failures.
  Error,
  /// Something looks wrong.
  Warn,
  /// General information.
  Info,
  /// Debugging information.
  Debug,
  /// Noisy debugging information.
  Verbose,
}

impl Severity {
  fn to_level(self) -> log::Level {
    match self {
      Severity::Error => log::Level::Error,
      Severity::Warn => log::Level::Warn,
      Severity::Info => log::Level::Info,
      Severity::Debug => log::Level::Debug,
      Severity::Verbose => log::Level::Trace,
    }
  }
}

/// Where in the source an assertion lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
  /// The file, as per `file!`.
  pub file: &'static str,
  /// The enclosing module path, as per `module_path!`.
  pub function: &'static str,
  /// The line, as per `line!`.
  pub line: u32,
}

impl fmt::Display for Site {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{} ({})", self.file, self.line, self.function)
  }
}

/// Per-call knobs for [`checked`] and [`fail`].
///
/// The `Default` matches a bare call site: severity from the sink, context
/// 0, no tag, synchronous delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct Options<'a> {
  /// Severity for the report. `None` falls back to
  /// [`Sink::default_severity`].
  pub severity: Option<Severity>,
  /// Opaque marker the sink may use for routing or grouping. Not
  /// interpreted here.
  pub context: i32,
  /// Arbitrary caller-supplied annotation. Not interpreted here.
  pub tag: Option<&'a str>,
  /// Whether the sink may defer delivery. A hint passed through, never
  /// enforced here.
  pub asynchronous: bool,
}

/// Everything the sink learns about one failed assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report<'a> {
  /// The diagnostic text.
  pub message: &'a str,
  /// The severity, either from the caller or the sink's default.
  pub severity: Severity,
  /// The context marker from [`Options`].
  pub context: i32,
  /// Where the assertion lives.
  pub site: Site,
  /// The tag from [`Options`].
  pub tag: Option<&'a str>,
  /// The delivery hint from [`Options`].
  pub asynchronous: bool,
}

/// A logging facility accepting failure reports.
///
/// Implementations run on failure paths, so they should not themselves
/// assert.
pub trait Sink {
  /// Accepts one report.
  fn submit(&self, report: &Report<'_>);

  /// The severity used when the caller does not pick one.
  fn default_severity(&self) -> Severity {
    Severity::Error
  }
}

/// The host's reaction to a failed assertion, invoked after the report was
/// already submitted.
pub trait Failure {
  /// Reacts to the failure. Whether this returns at all is the
  /// implementation's policy.
  fn assertion_failed(&self, message: &str, site: Site);
}

/// A [`Sink`] routing reports through the `log` facade.
///
/// The facade has no slot for the context marker or the tag, so a nonzero
/// context and a present tag are appended to the message text.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Sink for LogSink {
  fn submit(&self, report: &Report<'_>) {
    let mut text = report.message.to_owned();
    if report.context != 0 {
      text.push_str(&format!(" [context {}]", report.context));
    }
    if let Some(tag) = report.tag {
      text.push_str(&format!(" [tag {tag}]"));
    }
    log::logger().log(
      &log::Record::builder()
        .args(format_args!("{text}"))
        .level(report.severity.to_level())
        .target(report.site.function)
        .module_path(Some(report.site.function))
        .file(Some(report.site.file))
        .line(Some(report.site.line))
        .build(),
    );
  }
}

/// The standard host reaction: fatal when `debug_assertions` are on, a no-op
/// otherwise.
///
/// The panic message repeats the text already submitted to the sink, so a
/// failure in a debug build shows up twice, once per channel. That matches
/// the usual log-then-assert shape and keeps the log complete in builds
/// where the panic half is absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugFailure;

impl Failure for DebugFailure {
  fn assertion_failed(&self, message: &str, site: Site) {
    if cfg!(debug_assertions) {
      panic!("assertion failed at {site}: {message}");
    }
  }
}

/// Evaluates `cond` exactly once. If it holds, does nothing. If not,
/// evaluates `message`, submits one [`Report`] to `sink`, then hands the
/// failure to `failure`.
///
/// The report goes out before `failure` runs, so the diagnostic is never
/// lost even when the reaction is fatal.
pub fn checked<C, M, S, F>(
  cond: C,
  message: M,
  options: Options<'_>,
  site: Site,
  sink: &S,
  failure: &F,
) where
  C: FnOnce() -> bool,
  M: FnOnce() -> String,
  S: Sink + ?Sized,
  F: Failure + ?Sized,
{
  if cond() {
    return;
  }
  let message = message();
  report(&message, options, site, sink);
  failure.assertion_failed(&message, site);
}

/// Like [`checked`] for call sites that already know they failed, e.g. a
/// supposedly unreachable branch: always submits one report, then hands the
/// failure to `failure`.
pub fn fail<M, S, F>(message: M, options: Options<'_>, site: Site, sink: &S, failure: &F)
where
  M: FnOnce() -> String,
  S: Sink + ?Sized,
  F: Failure + ?Sized,
{
  let message = message();
  report(&message, options, site, sink);
  failure.assertion_failed(&message, site);
}

fn report<S>(message: &str, options: Options<'_>, site: Site, sink: &S)
where
  S: Sink + ?Sized,
{
  let severity = options.severity.unwrap_or_else(|| sink.default_severity());
  sink.submit(&Report {
    message,
    severity,
    context: options.context,
    site,
    tag: options.tag,
    asynchronous: options.asynchronous,
  });
}

/// Captures a [`Site`] at the point of expansion.
#[macro_export]
macro_rules! site {
  () => {
    $crate::Site { file: file!(), function: module_path!(), line: line!() }
  };
}

/// Like `assert!` except the failure is also reported via [`LogSink`], even
/// in builds where the fatal half is compiled out.
///
/// The condition is always evaluated, exactly once. The message is only
/// formatted on failure.
#[macro_export]
macro_rules! checked_assert {
  ($cond:expr) => {
    $crate::checked_assert!($cond, "assertion failed: {}", stringify!($cond))
  };

  ($cond:expr, $fmt:literal $($arg:tt)*) => {
    $crate::checked(
      || $cond,
      || format!($fmt $($arg)*),
      $crate::Options::default(),
      $crate::site!(),
      &$crate::LogSink,
      &$crate::DebugFailure,
    )
  };
}

/// Like [`checked_assert!`] with the condition already known false: always
/// reports via [`LogSink`], then reacts per [`DebugFailure`].
#[macro_export]
macro_rules! assert_failure {
  () => {
    $crate::assert_failure!("")
  };

  ($fmt:literal $($arg:tt)*) => {
    $crate::fail(
      || format!($fmt $($arg)*),
      $crate::Options::default(),
      $crate::site!(),
      &$crate::LogSink,
      &$crate::DebugFailure,
    )
  };
}
