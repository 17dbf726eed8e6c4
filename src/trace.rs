//! Human readable diagnostics of verbose draws
use std::fmt;

/// Default number of loop iterations reported by a verbose draw
pub const TRACE_STEPS: usize = 8;

/// Receiver of diagnostic lines
pub trait TraceSink {
    fn log(&mut self, line: &str);

    /// How many loop iterations an algorithm reports before going quiet
    fn step_limit(&self) -> usize {
        TRACE_STEPS
    }
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn log(&mut self, line: &str) {
        (**self).log(line)
    }

    fn step_limit(&self) -> usize {
        (**self).step_limit()
    }
}

impl TraceSink for Vec<String> {
    fn log(&mut self, line: &str) {
        self.push(line.to_owned())
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn log(&mut self, _line: &str) {}
}

/// Forwards lines to `tracing` as debug events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn log(&mut self, line: &str) {
        tracing::debug!(target: "gridraster::trace", "{}", line);
    }
}

/// Overrides step limit of the wrapped sink
pub struct LimitedTrace<T> {
    inner: T,
    limit: usize,
}

impl<T: TraceSink> LimitedTrace<T> {
    pub fn new(inner: T, limit: usize) -> Self {
        Self { inner, limit }
    }
}

impl<T: TraceSink> TraceSink for LimitedTrace<T> {
    fn log(&mut self, line: &str) {
        self.inner.log(line)
    }

    fn step_limit(&self) -> usize {
        self.limit
    }
}

/// Gate used by the algorithms: nothing is formatted unless verbose
pub(crate) struct Tracer<'a> {
    sink: &'a mut dyn TraceSink,
    verbose: bool,
    steps: usize,
}

impl<'a> Tracer<'a> {
    pub(crate) fn new(sink: &'a mut dyn TraceSink, verbose: bool) -> Self {
        Self {
            sink,
            verbose,
            steps: 0,
        }
    }

    /// Unconditional (in verbose mode) line, used for headers and summaries
    pub(crate) fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.verbose {
            self.sink.log(&args.to_string());
        }
    }

    /// Per iteration line, only the first `step_limit` iterations are reported
    pub(crate) fn step(&mut self, args: fmt::Arguments<'_>) {
        if !self.verbose {
            return;
        }
        let limit = self.sink.step_limit();
        if self.steps < limit {
            self.sink.log(&args.to_string());
        } else if self.steps == limit {
            self.sink.log("...");
        }
        self.steps += 1;
    }
}
