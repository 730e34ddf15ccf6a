use std::fmt;

use clap::ValueEnum;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Completely disables logging
    Off,
    /// Only errors
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Build progress, warnings and errors
    Info,
    /// Every resolved type
    Debug,
    /// Every classified field, from all dependencies
    Trace,
}

impl LogLevel {
    /// `EnvFilter` directives for this level. Below `trace` only our own crates log.
    pub(crate) fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "graphql_schema_builder=error,gen_graphql_schema=error,off",
            LogLevel::Warn => "graphql_schema_builder=warn,gen_graphql_schema=warn,off",
            LogLevel::Info => "graphql_schema_builder=info,gen_graphql_schema=info,off",
            LogLevel::Debug => "graphql_schema_builder=debug,gen_graphql_schema=debug,off",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}
