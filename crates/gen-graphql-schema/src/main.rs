#![cfg_attr(test, allow(unused_crate_dependencies))]

use std::{fs, io::Write as _, path::Path, process::ExitCode};

use anyhow::Context as _;
use args::{Args, Command, EnumsCommand, OutputFormat, SchemaCommand};
use clap::crate_version;
use graphql_schema_builder::source::Package;
use tracing_subscriber::EnvFilter;

mod args;

fn main() -> ExitCode {
    let args = self::args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(args.log_level.as_filter_str()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    tracing::debug!("gen-graphql-schema {}", crate_version!());

    match args.command {
        Command::Schema(command) => schema(&command),
        Command::Enums(command) => enums(&command),
    }
}

fn schema(command: &SchemaCommand) -> anyhow::Result<()> {
    let options = command.options()?;
    let package = Package::load(&command.source)?;
    let objects = graphql_schema_builder::build(&package, &options)?;

    let output = match command.format {
        OutputFormat::Sdl => graphql_schema_builder::render_sdl(&objects),
        OutputFormat::Json => serde_json::to_string_pretty(&objects)? + "\n",
    };

    write_output(command.output.as_deref(), &output)
}

fn enums(command: &EnumsCommand) -> anyhow::Result<()> {
    let package = Package::load(&command.source)?;
    let enums = graphql_schema_builder::enums(&package);
    tracing::info!("found {} enums", enums.len());

    let output = serde_json::to_string_pretty(&enums)? + "\n";

    write_output(command.output.as_deref(), &output)
}

fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents).with_context(|| format!("error writing {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn models() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../graphql-schema-builder/tests/fixtures/models.json")
    }

    #[test]
    fn schema_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("schema.graphql");

        let command = SchemaCommand {
            source: models(),
            config: None,
            query: None,
            mutation: None,
            output: Some(output.clone()),
            format: OutputFormat::Sdl,
        };

        schema(&command).unwrap();

        let sdl = fs::read_to_string(output).unwrap();
        assert!(sdl.starts_with("# GENERATED BY gen-graphql-schema\n"));
        assert!(sdl.contains("type Query @goModel(model: \"example.com/todo.Query\") {\n  todos: [Todo]\n}\n"));
        assert!(sdl.ends_with("enum Status @goModel(model: \"example.com/todo.Status\") {\n  Open\n  Closed\n}\n"));
    }

    #[test]
    fn missing_source() {
        let dir = tempfile::tempdir().unwrap();

        let command = EnumsCommand {
            source: dir.path().join("models.json"),
            output: None,
        };

        let err = enums(&command).unwrap_err();
        assert!(format!("{err:#}").contains("models.json"));
    }
}
