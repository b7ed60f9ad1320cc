//! Cinefile command-line tool
//!
//! Parses movie release names and identifies movie files against OMDb.
//! Records are printed as a text dump or, with `--json`, one JSON object
//! per line.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cinefile_core::{MediaRecord, MovieParser, MovieParserConfig};
use cinefile_omdb::{OmdbClient, OmdbConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, warn, Level};

/// CLI arguments
#[derive(Parser)]
#[command(name = "cinefile")]
#[command(about = "Identify movie files from their release names")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print one JSON object per record instead of the text dump
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and year from release names (no network access)
    Parse {
        /// Release names; read from stdin, one per line, when omitted
        names: Vec<String>,

        /// Skip the release parser and use only the fallback pattern
        #[arg(long)]
        fallback_only: bool,
    },
    /// Parse movie files and look them up on OMDb
    Identify {
        /// Movie file paths; read from stdin, one per line, when omitted
        paths: Vec<PathBuf>,

        /// Subtitle file to attach (repeatable)
        #[arg(long = "sub")]
        subtitles: Vec<PathBuf>,

        /// OMDb API key
        #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
        api_key: String,

        /// OMDb endpoint
        #[arg(long, env = "OMDB_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Request timeout in seconds
        #[arg(long, env = "OMDB_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Command-line values, or stdin lines when there are none.
fn inputs_or_stdin<T: From<String>>(args: Vec<T>) -> Result<Vec<T>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            inputs.push(T::from(line.to_string()));
        }
    }
    Ok(inputs)
}

/// Subtitles belonging to `movie`: all of them for a single movie,
/// otherwise those whose file name is the movie's base name followed by a dot.
fn subtitles_for(movie: &Path, subtitles: &[PathBuf], single: bool) -> Vec<PathBuf> {
    if single {
        return subtitles.to_vec();
    }
    let Some(stem) = movie.file_stem().and_then(|s| s.to_str()) else {
        return Vec::new();
    };
    subtitles
        .iter()
        .filter(|sub| {
            sub.file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(stem))
                .is_some_and(|rest| rest.starts_with('.'))
        })
        .cloned()
        .collect()
}

fn emit(record: &MediaRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(record)?);
    } else {
        print!("{record}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_for(cli.verbose))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Parse {
            names,
            fallback_only,
        } => {
            let config = MovieParserConfig::new().with_release_parser(!fallback_only);
            let parser = MovieParser::new(config).context("Failed to build movie parser")?;

            for name in inputs_or_stdin(names)? {
                let mut record = MediaRecord::from_release_name(&name);
                let source = parser.extract(&mut record);
                info!(name = %name, source = ?source, "parsed");
                emit(&record, cli.json)?;
            }
        }
        Commands::Identify {
            paths,
            subtitles,
            api_key,
            base_url,
            timeout,
        } => {
            let parser = MovieParser::default().context("Failed to build movie parser")?;
            let config = OmdbConfig::new(api_key)
                .with_base_url(base_url)
                .with_timeout_secs(timeout);
            let client = OmdbClient::new(config).context("Failed to configure OMDb client")?;

            let paths = inputs_or_stdin(paths)?;
            let single = paths.len() == 1;

            for path in paths {
                let mut record = MediaRecord::movie(&path);
                record.add_subtitles(subtitles_for(&path, &subtitles, single));
                parser.extract(&mut record);

                let found = record
                    .search_imdb_id(&client)
                    .with_context(|| format!("OMDb lookup failed for {}", path.display()))?;
                if !found {
                    warn!(path = %path.display(), title = %record.title, "no OMDb match");
                }

                emit(&record, cli.json)?;
            }
        }
    }

    Ok(())
}
