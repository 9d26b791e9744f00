use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use truthlens::policy::{Policy, PolicySource};
use truthlens::scoring::Scorer;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_OUTPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every post in one or more JSONL feeds
    Score {
        /// Input files or glob patterns (one JSON post per line)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Directory for per-post score cards
        #[arg(short, long, default_value = "scorecards")]
        out_dir: PathBuf,

        /// Print summaries without writing score cards
        #[arg(long)]
        no_write: bool,

        /// Print tab-separated summaries (post_id, label, score)
        #[arg(long)]
        tsv: bool,
    },
    /// Check the policy for errors
    Validate,
    /// Write the built-in policy to a file
    Init {
        /// Destination (defaults to ~/.config/truthlens/scoring.json)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "truthlens")]
#[command(about = "Offline credibility scoring for posts and their sources", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to policy file, JSON or YAML (defaults to ~/.config/truthlens/scoring.json)
    #[arg(short, long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Init { path, force } => run_init(path, force),
        Commands::Validate => match load_validated_policy(cli.policy, true) {
            Ok(_) => {
                println!("Policy OK");
                EXIT_SUCCESS
            }
            Err(code) => code,
        },
        Commands::Score {
            inputs,
            out_dir,
            no_write,
            tsv,
        } => match load_validated_policy(cli.policy, cli.verbose) {
            Ok(policy) => {
                let options = ScoreOptions {
                    out_dir,
                    no_write,
                    tsv,
                    verbose: cli.verbose,
                };
                run_score(&policy, &inputs, &options)
            }
            Err(code) => code,
        },
    };

    std::process::exit(code);
}

fn run_init(path: Option<PathBuf>, force: bool) -> i32 {
    let path = match path {
        Some(p) => p,
        None => match truthlens::policy::get_policy_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                return EXIT_CONFIG;
            }
        },
    };

    if let Err(e) = truthlens::policy::write_default_policy(&path, force) {
        eprintln!("Failed to write policy: {:#}", e);
        return EXIT_OUTPUT;
    }
    println!("Wrote default policy to {}", path.display());
    EXIT_SUCCESS
}

/// Load the policy and validate it, reporting every error on stderr.
/// Warnings are reported only when `verbose` is set.
fn load_validated_policy(path: Option<PathBuf>, verbose: bool) -> Result<Policy, i32> {
    let (policy, source) = match truthlens::policy::load_policy(path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Policy error: {:#}", e);
            return Err(EXIT_CONFIG);
        }
    };

    if verbose {
        match &source {
            PolicySource::File(path) => eprintln!("Loaded policy from {}", path.display()),
            PolicySource::BuiltIn => eprintln!("No policy file found, using built-in policy"),
        }
        eprintln!(
            "  base {}, floor {} sources, {} ladder rules",
            policy.base(),
            policy.evidence_floor.min_sources(),
            policy.ladder.len()
        );
    }

    if let Err(errors) = truthlens::policy::validate_policy(&policy) {
        eprintln!("Policy errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(EXIT_CONFIG);
    }

    if verbose {
        for warning in truthlens::policy::policy_warnings(&policy) {
            eprintln!("Policy warning: {}", warning);
        }
    }

    Ok(policy)
}

struct ScoreOptions {
    out_dir: PathBuf,
    no_write: bool,
    tsv: bool,
    verbose: bool,
}

fn run_score(policy: &Policy, inputs: &[String], options: &ScoreOptions) -> i32 {
    let start_time = Instant::now();

    let paths = match truthlens::feed::expand_inputs(inputs) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    let scorer = Scorer::new(policy);
    let use_colors = truthlens::output::should_use_colors();
    let mut records = Vec::new();
    let mut skipped_total = 0;

    for path in &paths {
        let report = match truthlens::feed::read_posts(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                return EXIT_INPUT;
            }
        };

        if options.verbose {
            eprintln!(
                "Read {} posts from {} ({} skipped)",
                report.posts.len(),
                path.display(),
                report.skipped.len()
            );
        }
        for skipped in &report.skipped {
            eprintln!("Skipping {}:{}: {}", path.display(), skipped.line, skipped.error);
        }
        skipped_total += report.skipped.len();

        for post in &report.posts {
            let record = scorer.score(post);

            if !options.no_write {
                let card = truthlens::output::card_path(
                    &options.out_dir,
                    &post.post_id,
                    records.len() + 1,
                );
                if let Err(e) = truthlens::output::write_card(&card, &record) {
                    eprintln!("Output error: {:#}", e);
                    return EXIT_OUTPUT;
                }
            }

            if options.verbose {
                eprintln!("{}", truthlens::output::format_breakdown(&record));
            }
            if !options.tsv {
                let line = truthlens::output::format_summary(&record, &policy.ladder, use_colors);
                println!("{}", line);
            }
            records.push(record);
        }
    }

    if options.tsv && !records.is_empty() {
        println!("{}", truthlens::output::format_tsv(&records));
    }

    // Every line malformed: nothing usable was read
    if records.is_empty() && skipped_total > 0 {
        eprintln!("No valid posts found ({} malformed lines).", skipped_total);
        return EXIT_INPUT;
    }

    if options.verbose {
        eprintln!();
        eprintln!(
            "Total: {} posts scored, {} lines skipped in {}",
            records.len(),
            skipped_total,
            humantime::format_duration(start_time.elapsed())
        );
        if !options.no_write {
            eprintln!("Score cards written to {}", options.out_dir.display());
        }
    }

    EXIT_SUCCESS
}
