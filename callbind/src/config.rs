/// Binding and dispatch configuration.
///
/// Use the builder methods to customize, or [`Default`] for the lenient
/// defaults.
///
/// # Examples
///
/// ```rust
/// use callbind::Config;
///
/// let config = Config::default()
///     .with_deny_shadowed(true)     // Reject callbacks that can never run
///     .with_trace_dispatch(true);   // Emit a trace event per dispatch
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Fail binding when a supplied callback matches some event kind but is
    /// selected for none, because earlier callbacks already took every kind
    /// it matches. When disabled such callbacks are only logged.
    /// Default: false
    pub deny_shadowed: bool,

    /// Emit a `tracing` event at TRACE level for every dispatched occurrence.
    /// Default: false
    pub trace_dispatch: bool,
}

impl Config {
    pub fn with_deny_shadowed(mut self, deny: bool) -> Self {
        self.deny_shadowed = deny;
        self
    }

    pub fn with_trace_dispatch(mut self, trace: bool) -> Self {
        self.trace_dispatch = trace;
        self
    }
}
