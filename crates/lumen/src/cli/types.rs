//! CLI enum types shared by the commands.

use clap::ValueEnum;
use lumen_core::OutputFormat as CoreOutputFormat;

/// Supported report formats.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ReportFormat {
    /// Aligned text table (default)
    #[default]
    Table,
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<ReportFormat> for CoreOutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Table => CoreOutputFormat::Table,
            ReportFormat::Json => CoreOutputFormat::Json,
            ReportFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_formats_map_to_core_formats() {
        assert_eq!(CoreOutputFormat::from(ReportFormat::Table), CoreOutputFormat::Table);
        assert_eq!(CoreOutputFormat::from(ReportFormat::Json), CoreOutputFormat::Json);
        assert_eq!(CoreOutputFormat::from(ReportFormat::Jsonl), CoreOutputFormat::JsonLines);
    }
}
