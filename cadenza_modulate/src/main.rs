// Cadenza Modulate — CLI entry point.
//
// Subcommands:
//   modulate path <START> <END> [--relations 0,1,2,3,4,5] [--search bfs|dfs] [--json]
//     Prints the shortest chain of related keys from START to END, or
//     reports that none exists.
//   modulate related <KEY> [--relations ...] [--json]
//     Prints the keys one relation away from KEY.
//
// Keys are written "<tonic> <major|minor>", e.g. "Bb minor" or "F# major".
// Log verbosity comes from RUST_LOG, falling back to --log-level.

use cadenza_modulate::{RelationSet, Search, SpelledKey};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "modulate", version, about = "Find modulations between closely related keys")]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a modulation path between two keys.
    Path {
        start: SpelledKey,
        end: SpelledKey,
        /// Allowed relation indices, comma separated.
        #[arg(long, default_value = "0,1,2,3,4,5")]
        relations: RelationSet,
        #[arg(long, default_value_t = Search::Bfs)]
        search: Search,
        /// Print the path as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// List the keys related to a key.
    Related {
        key: SpelledKey,
        #[arg(long, default_value = "0,1,2,3,4,5")]
        relations: RelationSet,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Path {
            start,
            end,
            relations,
            search,
            json,
        } => {
            let path: Vec<String> = search
                .modulate(start, end, relations)
                .iter()
                .map(ToString::to_string)
                .collect();
            if json {
                println!("{}", serde_json::to_string(&path)?);
            } else if path.is_empty() {
                println!("No modulation from {start} to {end} using relations {relations:?}");
            } else {
                println!("{} ({} keys, {search})", path.join(" -> "), path.len());
            }
        }
        Command::Related {
            key,
            relations,
            json,
        } => {
            let related: Vec<String> = key
                .key
                .related(relations)
                .into_iter()
                .map(String::from)
                .collect();
            if json {
                println!("{}", serde_json::to_string(&related)?);
            } else {
                for name in &related {
                    println!("{name}");
                }
            }
        }
    }
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
