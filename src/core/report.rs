use crate::adapters::log_file::RunLog;
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;

/// Mirrors every run message to the console and, when enabled, the run log.
pub struct RunReporter<W: Write> {
    console: W,
    log: Option<RunLog>,
}

impl<W: Write> RunReporter<W> {
    pub fn new(console: W, log: Option<RunLog>) -> Self {
        Self { console, log }
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().map(RunLog::path)
    }

    pub fn emit(&mut self, message: &str) -> Result<()> {
        writeln!(self.console, "{}", message)?;
        if let Some(log) = self.log.as_mut() {
            log.write_line(message)?;
        }
        Ok(())
    }

    /// 摘要前空一行
    pub fn emit_summary(&mut self, message: &str) -> Result<()> {
        self.emit("")?;
        self.emit(message)?;
        self.console.flush()?;
        Ok(())
    }

    pub fn into_console(self) -> W {
        self.console
    }
}
