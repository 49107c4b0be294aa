//! Decade facet CLI
//!
//! Local entry point for facet extraction, link ranking, and batch indexing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use decade_facets::{
    error::Result,
    models::{Config, HeuristicContext},
    pipeline,
    services::{DateFacets, DecadeFacetEngine, HyperlinkRelevanceScorer},
};
use serde_json::json;

/// decade-facets - Year and decade facets for harvested metadata
#[derive(Parser, Debug)]
#[command(
    name = "decade-facets",
    version,
    about = "Extract decade facets and rank links for metadata records"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "facets.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract years and decades from date values
    Dates {
        /// Free-text date values of one record
        #[arg(required = true)]
        values: Vec<String>,

        /// Drop years after the current calendar year
        #[arg(long)]
        filter_future: bool,
    },

    /// Rank candidate links for a record
    Links {
        /// Host the record was harvested from
        #[arg(long)]
        host: String,

        /// Record identifier (namespaced or local)
        #[arg(long)]
        identifier: String,

        /// Candidate URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Build index fields for a JSON file of harvested records
    Records {
        /// Path to the records file
        #[arg(long)]
        input: PathBuf,

        /// Host the records were harvested from
        #[arg(long)]
        host: String,

        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Dates {
            values,
            filter_future,
        } => {
            let config = Config::load_or_default(&cli.config);
            let engine = DecadeFacetEngine::from_flag(filter_future || config.facets.filter_future);
            let mut facets = DateFacets::new(values).with_engine(engine);

            let years = facets.years();
            let decades = facets.decades().clone();
            log::debug!("Resolved tokens: {:?}", facets.tokens());

            let output = json!({ "years": years, "decades": decades });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Links {
            host,
            identifier,
            urls,
        } => {
            let config = Config::load_or_default(&cli.config);
            let context =
                HeuristicContext::for_record(host, &identifier, &config.links.identifier_scheme);
            log::debug!("Scoring against {:?}", context);

            let ranked = HyperlinkRelevanceScorer::new(context).rank(urls);
            let output = json!({
                "links": ranked.links(),
                "external_link": ranked.most_relevant().map(|l| &l.url),
                "alternate_external_link": ranked.rest().iter().map(|l| &l.url).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Records {
            input,
            host,
            output,
        } => {
            let config = Config::load_or_default(&cli.config);
            config.validate()?;
            let count = pipeline::run_records(&config, &input, &host, output.as_deref())?;
            log::info!("Indexed {} records", count);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = Config::load(&cli.config)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            println!("Config OK: {}", cli.config.display());
        }
    }

    Ok(())
}
