use std::{fmt, fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use graphql_schema_builder::BuildOptions;

mod log;

pub(crate) use log::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "gen-graphql-schema", version)]
#[command(arg_required_else_help = true)]
/// Generate a GraphQL schema from the types of a host package
pub(crate) struct Args {
    /// Set the logging level
    #[arg(long = "log", global = true, env = "GEN_GRAPHQL_SCHEMA_LOG", default_value_t = LogLevel::default())]
    pub log_level: LogLevel,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Resolve the schema reachable from the root types
    Schema(SchemaCommand),
    /// List the enums declared by the package
    Enums(EnumsCommand),
}

#[derive(Debug, clap::Args)]
pub(crate) struct SchemaCommand {
    /// Path to the JSON type source of the package
    pub source: PathBuf,
    /// Path to a TOML file with build options
    #[arg(long, short, env = "GEN_GRAPHQL_SCHEMA_CONFIG")]
    pub config: Option<PathBuf>,
    /// Name of the query root struct, overriding the configuration
    #[arg(long)]
    pub query: Option<String>,
    /// Name of the mutation root struct, overriding the configuration
    #[arg(long)]
    pub mutation: Option<String>,
    /// Write the schema to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    #[arg(long, default_value_t = OutputFormat::Sdl)]
    pub format: OutputFormat,
}

#[derive(Debug, clap::Args)]
pub(crate) struct EnumsCommand {
    /// Path to the JSON type source of the package
    pub source: PathBuf,
    /// Write the listing to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// GraphQL SDL for gqlgen
    Sdl,
    /// The resolved schema objects as JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Sdl => f.write_str("sdl"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl SchemaCommand {
    /// Build options from the configuration file, if any, with the root overrides applied.
    pub fn options(&self) -> anyhow::Result<BuildOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let config = fs::read_to_string(path)
                    .with_context(|| format!("error reading the configuration at {}", path.display()))?;

                toml::from_str(&config)
                    .with_context(|| format!("error parsing the configuration at {}", path.display()))?
            }
            None => BuildOptions::default(),
        };

        if let Some(query) = &self.query {
            options = options.with_root_query_name(query);
        }

        if let Some(mutation) = &self.mutation {
            options = options.with_root_mutation_name(mutation);
        }

        Ok(options)
    }
}

pub(crate) fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn schema_command(args: &[&str]) -> SchemaCommand {
        let args = Args::try_parse_from(args).unwrap();

        match args.command {
            Command::Schema(command) => command,
            Command::Enums(_) => unreachable!(),
        }
    }

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["gen-graphql-schema", "enums", "models.json"]).unwrap();
        assert_eq!(args.log_level, LogLevel::Warn);

        let command = schema_command(&["gen-graphql-schema", "schema", "models.json"]);
        assert_eq!(command.format, OutputFormat::Sdl);
        assert_eq!(command.options().unwrap(), BuildOptions::default());
    }

    #[test]
    fn root_overrides() {
        let command = schema_command(&[
            "gen-graphql-schema",
            "--log",
            "debug",
            "schema",
            "models.json",
            "--query",
            "RootQuery",
            "--format",
            "json",
        ]);

        let options = command.options().unwrap();
        assert_eq!(options.root_query_name, "RootQuery");
        assert_eq!(options.root_mutation_name, "Mutation");
        assert_eq!(command.format, OutputFormat::Json);
    }

    #[test]
    fn configuration_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");

        fs::write(
            &path,
            r#"
            root_mutation_name = "Mutations"
            tag_key = "gql"

            [scalars."github.com/google/uuid.UUID"]
            scalar = "UUID"
            model = "github.com/99designs/gqlgen/graphql.UUID"
            "#,
        )
        .unwrap();

        let config = path.to_str().unwrap();
        let command = schema_command(&["gen-graphql-schema", "schema", "models.json", "--config", config]);
        let options = command.options().unwrap();

        assert_eq!(options.root_query_name, "Query");
        assert_eq!(options.root_mutation_name, "Mutations");
        assert_eq!(options.tag_key, "gql");
        // Listed scalars replace the defaults.
        assert_eq!(options.scalars.len(), 1);
        assert_eq!(
            options.scalars["github.com/google/uuid.UUID"].model.as_deref(),
            Some("github.com/99designs/gqlgen/graphql.UUID")
        );
    }

    #[test]
    fn unknown_configuration_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");
        fs::write(&path, "roots = []\n").unwrap();

        let command = schema_command(&["gen-graphql-schema", "schema", "models.json", "-c", path.to_str().unwrap()]);
        let err = command.options().unwrap_err();

        assert!(err.to_string().starts_with("error parsing the configuration at"));
    }
}
