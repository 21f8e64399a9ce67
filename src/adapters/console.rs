//! Serial status-stream sink.
//!
//! Implements [`ReportSink`] by writing each report as one line to any
//! `std::io::Write`.  On device that is stdout, which ESP-IDF routes to the
//! UART / USB-CDC console.  Diagnostics go through `log` separately; this
//! stream carries only the fixed status lines.

use std::io::Write;

use log::{info, warn};

use crate::app::events::StatusReport;
use crate::app::ports::ReportSink;

pub struct SerialReportSink<W: Write> {
    out: W,
    write_failed: bool,
}

impl<W: Write> SerialReportSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }
}

impl<W: Write> ReportSink for SerialReportSink<W> {
    fn emit(&mut self, report: &StatusReport) {
        let line = report.render();
        let result = self
            .out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush());

        match result {
            Ok(()) if self.write_failed => {
                info!("console: status stream writable again");
                self.write_failed = false;
            }
            Ok(()) => {}
            Err(e) if !self.write_failed => {
                warn!("console: status line dropped: {e}");
                self.write_failed = true;
            }
            Err(_) => {}
        }
    }
}
