mod config;
mod render;
mod repl;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use stepcalc_engine::{AngleMode, Engine};
use stepcalc_parser::extract_problems;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::render::{render_json, render_text};
use crate::repl::Repl;

#[derive(Parser, Debug)]
#[command(name = "stepcalc", version, about = "Step-by-step math solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the full result (solution and steps) as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print only the solution
    #[arg(long, global = true)]
    no_steps: bool,

    /// How trig arguments are read: auto, degrees, radians
    #[arg(long, global = true, value_parser = parse_angle_mode)]
    angle: Option<AngleMode>,

    /// Largest n accepted by n!, nCr and nPr
    #[arg(long, global = true)]
    max_factorial: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve one problem, or every problem line read from stdin
    Solve {
        /// Problem text; read from stdin when omitted
        text: Vec<String>,
    },
    /// Interactive calculator with answer recall
    Calc,
}

fn parse_angle_mode(s: &str) -> Result<AngleMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "auto" => Ok(AngleMode::Auto),
        "degrees" | "deg" => Ok(AngleMode::Degrees),
        "radians" | "rad" => Ok(AngleMode::Radians),
        other => Err(format!("unknown angle mode '{other}' (expected auto, degrees or radians)")),
    }
}

impl Cli {
    /// Command-line flags win over `stepcalc.toml`.
    fn apply_to(&self, config: &mut CliConfig) {
        if self.json {
            config.json = true;
        }
        if self.no_steps {
            config.show_steps = false;
        }
        if let Some(mode) = self.angle {
            config.solver.angle_mode = mode;
        }
        if let Some(limit) = self.max_factorial {
            config.solver.max_factorial = limit;
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STEPCALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run_solve(text: &[String], config: &CliConfig) -> Result<()> {
    let engine = Engine::with_options(config.solver.clone());

    if !text.is_empty() {
        let result = engine.solve(&text.join(" "));
        if config.json {
            println!("{}", render_json(&result)?);
        } else {
            println!("{}", render_text(&result, config.show_steps));
        }
        return Ok(());
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let results: Vec<_> = extract_problems(&input)
        .iter()
        .map(|problem| engine.solve(problem))
        .collect();

    if config.json {
        println!("{}", render_json(&results)?);
    } else {
        let blocks: Vec<String> = results
            .iter()
            .map(|r| render_text(r, config.show_steps))
            .collect();
        let separator = if config.show_steps { "\n\n" } else { "\n" };
        println!("{}", blocks.join(separator));
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = CliConfig::load();
    cli.apply_to(&mut config);

    match &cli.command {
        Command::Solve { text } => run_solve(text, &config),
        Command::Calc => {
            Repl::new(&config).run()?;
            Ok(())
        }
    }
}
