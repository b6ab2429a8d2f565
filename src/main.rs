mod debug_report;

use clap::Parser;
use kbs::{Budget, Error, Options, Strategy, group_order_verbose_with};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Computes the order of a finitely presented group by Knuth–Bendix
/// completion. Reads one relation per line; blank lines and lines starting
/// with `#` are ignored.
#[derive(Parser, Debug)]
#[command(name = "kbs")]
#[command(version)]
#[command(after_help = "Exit codes:\n  0  Success.\n  1  Completion or enumeration did not finish.\n  2  Invalid arguments, unreadable input or a malformed presentation.")]
struct Cli {
    /// Presentation file; reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Maximum number of completion rounds.
    #[arg(long, value_name = "N")]
    max_rounds: Option<usize>,

    /// Maximum size of the rule set during completion.
    #[arg(long, value_name = "N")]
    max_rules: Option<usize>,

    /// Maximum number of elements to enumerate.
    #[arg(long, value_name = "N")]
    max_elements: Option<usize>,

    /// Wall-clock limit for completion and enumeration, in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Keep rules that contain the pattern of a newer rule.
    #[arg(long)]
    no_subsume: bool,

    /// Reduce critical pairs on the calling thread only.
    #[arg(long)]
    sequential: bool,

    /// Restart rule scanning from the shortest rule after every rewrite.
    #[arg(long)]
    restart: bool,

    /// Print per-round completion and per-level enumeration details.
    #[arg(short, long)]
    verbose: bool,

    /// Print the completed rule set.
    #[arg(long)]
    rules: bool,

    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let mut budget = Budget::unlimited();
        budget.max_rounds = self.max_rounds;
        budget.max_rules = self.max_rules;
        budget.max_elements = self.max_elements;
        if let Some(ms) = self.timeout {
            budget = budget.with_timeout(Duration::from_millis(ms));
        }

        let mut strategy = Strategy::default();
        strategy.set(Strategy::SUBSUME, !self.no_subsume);
        strategy.set(Strategy::PARALLEL_REDUCE, !self.sequential);
        strategy.set(Strategy::EAGER_RESTART, self.restart);
        Options { budget, strategy }
    }

    fn color(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            io::stdout().is_terminal()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing();

    let started = Instant::now();
    let text = match read_input(cli.input.as_ref()) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let run = match group_order_verbose_with(&text, &cli.options()) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("error: {err}");
            return exit_code(&err);
        }
    };
    let elapsed = started.elapsed();

    if cli.verbose || cli.rules {
        let palette = debug_report::Palette::new(cli.color());
        if cli.verbose {
            debug_report::print_run(&run, &palette);
        }
        if cli.rules {
            debug_report::print_rules(&run.details.rules, &palette);
        }
    }

    let millis = elapsed.as_millis();
    println!("{:9} {:6}.{:03} s", run.order, millis / 1000, millis % 1000);
    ExitCode::SUCCESS
}

fn read_input(path: Option<&PathBuf>) -> Result<String, Error> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(text)
}

fn exit_code(err: &Error) -> ExitCode {
    match err {
        Error::DidNotConverge { .. } | Error::InvalidRule { .. } => ExitCode::from(1),
        Error::Parse { .. } | Error::ZeroExponent { .. } | Error::Io(_) => ExitCode::from(2),
    }
}

/// Logs go to stderr. `KBS_LOG` takes an `EnvFilter` directive,
/// `KBS_DEBUG=1` is shorthand for `kbs=debug`.
fn setup_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("KBS_LOG").unwrap_or_else(|_| {
        if std::env::var_os("KBS_DEBUG").is_some_and(|v| v == "1") {
            EnvFilter::new("kbs=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}
