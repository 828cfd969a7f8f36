//! Report output as a text table, JSON, or JSON Lines.
//!
//! The table is the human-facing artifact of a benchmark; the JSON forms
//! carry the same [`ExecutionReport`] fields for machine consumption.

use serde::Serialize;
use std::io::{self, Write};

use crate::types::ExecutionReport;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table, one row per trial
    #[default]
    Table,
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

const TABLE_HEADER: [&str; 4] = ["Workers (P)", "Execution time", "Speed-up", "Efficiency"];
const COLUMN_WIDTHS: [usize; 4] = [12, 14, 12, 12];

/// A writer that renders benchmark reports in the chosen format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The underlying writer (file, stdout, etc.)
    /// * `format` - Output format
    /// * `pretty` - Whether to pretty-print JSON (only affects JSON format)
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write every report.
    ///
    /// Table: header, rule, one row per report.
    /// JSON: one array. JSONL: one object per line.
    pub fn write_reports(&mut self, reports: &[ExecutionReport]) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => {
                writeln!(self.writer, "{}", table_row(&TABLE_HEADER.map(String::from)))?;
                writeln!(self.writer, "{}", "-".repeat(table_width()))?;
                for report in reports {
                    writeln!(self.writer, "{}", table_row(&format_report(report)))?;
                }
                self.items_written += reports.len();
            }
            OutputFormat::Json => {
                self.write_json(reports)?;
                self.items_written += reports.len();
            }
            OutputFormat::JsonLines => {
                for report in reports {
                    serde_json::to_writer(&mut self.writer, report).map_err(io::Error::other)?;
                    writeln!(self.writer)?;
                    self.items_written += 1;
                }
            }
        }
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }

    /// Get the number of reports written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Render one report as table cells.
fn format_report(report: &ExecutionReport) -> [String; 4] {
    [
        report.workers.to_string(),
        format!("{:.4} s", report.elapsed.as_secs_f64()),
        format!("{:.4}", report.speedup),
        format!("{:.2}%", report.efficiency * 100.0),
    ]
}

fn table_row(cells: &[String; 4]) -> String {
    cells
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn table_width() -> usize {
    COLUMN_WIDTHS.iter().sum::<usize>() + 3 * (COLUMN_WIDTHS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn reports() -> Vec<ExecutionReport> {
        vec![
            ExecutionReport {
                workers: 1,
                elapsed: Duration::from_millis(2000),
                speedup: 1.0,
                efficiency: 1.0,
                succeeded: 10,
                failed: 0,
            },
            ExecutionReport {
                workers: 4,
                elapsed: Duration::from_millis(800),
                speedup: 2.5,
                efficiency: 0.625,
                succeeded: 10,
                failed: 0,
            },
        ]
    }

    #[test]
    fn test_write_table() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Table, false);
        writer.write_reports(&reports()).unwrap();
        assert_eq!(writer.items_written(), 2);

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Workers (P)  | Execution time | Speed-up"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "1            | 2.0000 s       | 1.0000       | 100.00%");
        assert_eq!(lines[3], "4            | 0.8000 s       | 2.5000       | 62.50%");
    }

    #[test]
    fn test_write_json_array() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, false);
        writer.write_reports(&reports()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["speedup"], 2.5);
        assert_eq!(value[1]["elapsed_secs"], 0.8);
    }

    #[test]
    fn test_write_jsonl() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::JsonLines, false);
        writer.write_reports(&reports()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.trim().split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"workers\":1"));
    }
}
