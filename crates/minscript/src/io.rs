//! Output boundary for the `print` builtin.

/// Sink for `print` output. The evaluator formats one line per `print`
/// invocation (arguments joined by single spaces) and hands it over without
/// the trailing newline.
pub trait PrintWriter {
    fn write_line(&mut self, line: &str);
}

/// Writes to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdPrint;

impl PrintWriter for StdPrint {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Collects output into a string, one `\n`-terminated line per print call.
/// Used to capture output in tests and embedding hosts.
#[derive(Debug, Default, Clone)]
pub struct CollectStringPrint {
    output: String,
}

impl CollectStringPrint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the collector, returning the captured output.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

impl PrintWriter for CollectStringPrint {
    fn write_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Discards all output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrint;

impl PrintWriter for NoPrint {
    fn write_line(&mut self, _line: &str) {}
}
