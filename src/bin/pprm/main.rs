
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use pprm::lexicon::load_lexicon;
use pprm::pairs::{analyze_pairs, german_pairs, PhonePair};
use pprm::report::{render_json, render_text, EnvironmentOrder, ReportOptions};

/// Scores how predictable the choice between two phones is from their environment.
#[derive(Parser, Debug)]
#[command()]
struct Args {
  /// CSV lexicon with Word, Phono and Frequency columns
  #[arg()]
  lexicon: PathBuf,

  /// Phone pair and rule as X,Y,RULE (RULE is x-c, s-sh or d-t); repeatable.
  /// Defaults to the German pairs x,C,x-c s,S,s-sh d,t,d-t
  #[arg(long = "pair")]
  pairs: Vec<PhonePair>,

  /// Print results as JSON
  #[arg(long)]
  json: bool,

  /// Show the raw counts of both phones for each environment
  #[arg(long)]
  counts: bool,

  /// List environments by descending weight instead of a fixed order
  #[arg(long)]
  sort_by_weight: bool,

  /// Log progress to stderr (RUST_LOG overrides)
  #[arg(short, long)]
  verbose: bool,
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() -> ExitCode {
  let args = Args::parse();
  init_tracing(args.verbose);

  let lexicon = match load_lexicon(&args.lexicon) {
    Ok(lexicon) => lexicon,
    Err(e) => {
      eprintln!("{} {}: {}", style("error:").red().bold(), args.lexicon.display(), e);
      return ExitCode::FAILURE;
    }
  };

  let pairs = if args.pairs.is_empty() { german_pairs() } else { args.pairs };
  let results = analyze_pairs(&lexicon.words, &pairs);

  if args.json {
    match render_json(&results) {
      Ok(json) => println!("{}", json),
      Err(e) => {
        eprintln!("{} {}", style("error:").red().bold(), e);
        return ExitCode::FAILURE;
      }
    }
  }
  else {
    let options = ReportOptions {
      show_counts: args.counts,
      order: if args.sort_by_weight { EnvironmentOrder::ByWeight } else { EnvironmentOrder::Declared },
    };
    print!("{}", render_text(&results, &options));
  }

  ExitCode::SUCCESS
}
