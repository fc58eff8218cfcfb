/// Formatter adapters for the license report
mod text_report_formatter;

pub use text_report_formatter::TextReportFormatter;
