// ABOUTME: CLI binary for extracting values from archived factbook country pages.
// ABOUTME: Prints the country list, one field value, or the whole profile as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use factbook_extract::selectors::precompile_roles;
use factbook_extract::{
    extract_catalog_field, extract_country_list, extract_field_value, extract_profile,
    load_builtin_catalog, Document,
};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "factbook")]
#[command(about = "Extract country lists and field values from archived factbook pages")]
struct Args {
    /// Enable verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output", global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the country page filenames listed in the country selector
    Countries {
        /// Saved country page
        file: PathBuf,
    },

    /// Print the value of one field
    Field {
        /// Saved country page
        file: PathBuf,

        /// Field key, e.g. 2011
        #[arg(required_unless_present = "name")]
        key: Option<String>,

        /// Catalog field as section.field, e.g. geography.natural_hazards or terrorism.home_based
        #[arg(long, conflicts_with = "key")]
        name: Option<String>,
    },

    /// Print every known field on the page as JSON
    Profile {
        /// Saved country page
        file: PathBuf,

        /// Output compact JSON instead of pretty
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded page");
    Ok(Document::from_bytes(&bytes))
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Countries { file } => {
            let doc = load_document(&file)?;
            Ok(extract_country_list(&doc)?.join("\n"))
        }
        Command::Field { file, key, name } => match (key, name) {
            (Some(key), _) => {
                let doc = load_document(&file)?;
                Ok(extract_field_value(&doc, &key)?)
            }
            (None, Some(name)) => {
                let catalog = load_builtin_catalog();
                let spec = catalog
                    .resolve(&name)
                    .ok_or_else(|| anyhow!("unknown catalog field {name}"))?;
                let doc = load_document(&file)?;
                Ok(extract_catalog_field(&doc, spec)?)
            }
            (None, None) => Err(anyhow!("a field key or --name is required")),
        },
        Command::Profile { file, compact } => {
            let doc = load_document(&file)?;
            let profile = extract_profile(&doc, &load_builtin_catalog());
            let json = if compact {
                serde_json::to_string(&profile)?
            } else {
                serde_json::to_string_pretty(&profile)?
            };
            Ok(json)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("error: {:#}", e);
        return ExitCode::from(1);
    }
    precompile_roles();

    let output_str = match run(args.command) {
        Ok(output_str) => output_str,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(output_path) = &args.output {
        if let Err(e) = fs::write(output_path, format!("{}\n", output_str)) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            return ExitCode::from(1);
        }
    } else {
        println!("{}", output_str);
    }

    ExitCode::SUCCESS
}
