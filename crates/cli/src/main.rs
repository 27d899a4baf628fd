use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use docref_core::constants::{MAX_ATTACHMENT_BYTES_ENV, SOURCE_ROOT_ENV};
use docref_core::{SampleConfig, SampleDataBuilder, SourceLocator};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docref")]
#[command(about = "DocRef sample FHIR data CLI")]
struct Cli {
    /// Base directory for relative locators (overrides DOCREF_SOURCE_ROOT)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the demonstration practitioner
    Practitioner,
    /// Print the practice specialty and document type concepts
    Concepts,
    /// Build an attachment from a file
    Attachment {
        /// Path or file:// URI of the source file
        locator: String,
    },
    /// Build a document reference, attaching the given files
    Document {
        /// Document title
        #[arg(long)]
        title: String,
        /// Paths or file:// URIs of files to attach
        locators: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docref=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = SampleConfig::from_values(
        std::env::var(MAX_ATTACHMENT_BYTES_ENV).ok(),
        std::env::var(SOURCE_ROOT_ENV).ok(),
    )?;
    if let Some(root) = cli.root {
        config = config.with_source_root(root);
    }
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Some(Commands::Practitioner) => {
            let practitioner = SampleDataBuilder::practitioner();
            let rendered = match cli.format {
                Format::Json => practitioner.render_json()?,
                Format::Yaml => practitioner.render_yaml()?,
            };
            println!("{rendered}");
        }
        Some(Commands::Concepts) => {
            let concepts = serde_json::json!({
                "practiceSetting": SampleDataBuilder::practice_speciality(),
                "type": SampleDataBuilder::document_reference_type(),
            });
            let rendered = match cli.format {
                Format::Json => serde_json::to_string_pretty(&concepts)?,
                Format::Yaml => serde_yaml::to_string(&concepts)?,
            };
            println!("{rendered}");
        }
        Some(Commands::Attachment { locator }) => {
            let builder = config.builder();
            let resolver = config.resolver()?;
            let locator = SourceLocator::parse(&locator)?;

            let attachment = builder
                .build_attachment(&locator, &resolver)
                .with_context(|| format!("cannot attach {locator}"))?;
            match attachment {
                Some(attachment) => {
                    let rendered = match cli.format {
                        Format::Json => attachment.render_json()?,
                        Format::Yaml => attachment.render_yaml()?,
                    };
                    println!("{rendered}");
                }
                None => eprintln!("No attachment: no data available for {locator}"),
            }
        }
        Some(Commands::Document { title, locators }) => {
            let builder = config.builder();
            let resolver = config.resolver()?;

            let mut attachments = Vec::with_capacity(locators.len());
            for raw in &locators {
                let locator = SourceLocator::parse(raw)?;
                match builder
                    .build_attachment(&locator, &resolver)
                    .with_context(|| format!("cannot attach {locator}"))?
                {
                    Some(attachment) => attachments.push(attachment),
                    None => eprintln!("Skipping {locator}: no data available"),
                }
            }

            let document = SampleDataBuilder::build_document(&title, attachments);
            let rendered = match cli.format {
                Format::Json => document.render_json()?,
                Format::Yaml => document.render_yaml()?,
            };
            println!("{rendered}");
        }
        None => {
            println!("Use 'docref --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_document_command() {
        let cli = Cli::parse_from([
            "docref",
            "--format",
            "yaml",
            "document",
            "--title",
            "Visit Note",
            "scan.png",
            "file:///tmp/letter.pdf",
        ]);

        assert_eq!(cli.format, Format::Yaml);
        match cli.command {
            Some(Commands::Document { title, locators }) => {
                assert_eq!(title, "Visit Note");
                assert_eq!(locators, vec!["scan.png", "file:///tmp/letter.pdf"]);
            }
            _ => panic!("expected document command"),
        }
    }

    #[test]
    fn root_flag_is_global() {
        let cli = Cli::parse_from(["docref", "attachment", "scan.png", "--root", "/srv/scans"]);
        assert_eq!(cli.root, Some(PathBuf::from("/srv/scans")));
    }
}
