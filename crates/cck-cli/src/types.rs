use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TemplateName {
    Minimal,
    Workflow,
}

impl From<TemplateName> for cck_runtime::ConfigTemplate {
    fn from(name: TemplateName) -> Self {
        match name {
            TemplateName::Minimal => cck_runtime::ConfigTemplate::Minimal,
            TemplateName::Workflow => cck_runtime::ConfigTemplate::Workflow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum HistoryStyle {
    Compact,
    Detailed,
}

impl From<HistoryStyle> for cck_index::HistoryFormat {
    fn from(style: HistoryStyle) -> Self {
        match style {
            HistoryStyle::Compact => cck_index::HistoryFormat::Compact,
            HistoryStyle::Detailed => cck_index::HistoryFormat::Detailed,
        }
    }
}
