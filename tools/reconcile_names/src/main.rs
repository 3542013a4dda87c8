use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use ppgcc_metrics::names::{
    canon_maps, canonicalize, is_author, AuthorListFormat, AuthorPosition, MatchTolerance, NameOrder,
    ReconcileOptions,
};

#[derive(Parser, Debug)]
#[command(name = "reconcile_names")]
#[command(about = "Match person names and reconcile them across data sources")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print correction maps for name lists (one name per line), most authoritative file first
    Maps {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Map names that match several names of another file
        #[arg(long)]
        allow_ambiguous: bool,

        #[arg(long, default_value_t = 1)]
        max_edit_distance: usize,

        /// Defaults to --max-edit-distance
        #[arg(long)]
        max_last_edit_distance: Option<usize>,
    },

    /// Print the canonical name if A and B are the same person (exit status 1 otherwise)
    Compare {
        a: String,
        b: String,

        #[arg(short, long, default_value_t = 0)]
        levenshtein: usize,

        #[arg(long)]
        levenshtein_last: Option<usize>,
    },

    /// Print whether NAME is one of the authors in AUTHORS
    IsAuthor {
        name: String,
        authors: String,

        #[arg(long, default_value = ";")]
        sep: String,

        /// ",", LAST_FIRST or FIRST_FIRST
        #[arg(long, default_value = ",")]
        order: String,

        /// FIRST or a 0-based index
        #[arg(long)]
        position: Option<String>,

        #[arg(short, long, default_value_t = 0)]
        levenshtein: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    match args.command {
        Command::Maps {
            files,
            allow_ambiguous,
            max_edit_distance,
            max_last_edit_distance,
        } => {
            let options = ReconcileOptions {
                allow_ambiguous,
                max_edit_distance,
                max_last_edit_distance,
                ..ReconcileOptions::default()
            };
            options.validate()?;
            let output = reconcile_files(&files, &options)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Compare {
            a,
            b,
            levenshtein,
            levenshtein_last,
        } => {
            let mut tolerance = MatchTolerance::levenshtein(levenshtein);
            tolerance.last_max_edit_distance = levenshtein_last;
            match canonicalize(&a, &b, &tolerance) {
                Some(canonical) => println!("{canonical}"),
                None => {
                    info!("{:?} and {:?} are different people", a, b);
                    std::process::exit(1);
                }
            }
        }
        Command::IsAuthor {
            name,
            authors,
            sep,
            order,
            position,
            levenshtein,
        } => {
            let format = AuthorListFormat {
                separator: sep,
                order: order.parse::<NameOrder>()?,
                ..AuthorListFormat::default()
            };
            let position = match position {
                Some(p) => p.parse::<AuthorPosition>()?,
                None => AuthorPosition::Any,
            };
            let tolerance = MatchTolerance::levenshtein(levenshtein);
            println!("{}", is_author(&name, &authors, &format, position, &tolerance)?);
        }
    }

    Ok(())
}

fn reconcile_files(files: &[PathBuf], options: &ReconcileOptions) -> Result<Value> {
    let mut collections = Vec::with_capacity(files.len());
    for path in files {
        let names = read_names(path)?;
        if names.is_empty() {
            warn!("No names found in {}", path.display());
        }
        info!("Loaded {} names from {}", names.len(), path.display());
        collections.push(names);
    }

    let maps = canon_maps(collections, options);

    let mut output = Map::new();
    for (path, map) in files.iter().zip(maps) {
        info!("{} corrections for {}", map.len(), path.display());
        output.insert(path.display().to_string(), json!(map));
    }
    Ok(Value::Object(output))
}

fn read_names(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read names from {}", path.display()))?;
    Ok(name_lines(&text))
}

fn name_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
