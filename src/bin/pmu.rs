use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pmu_rs::config::{self, Config};
use pmu_rs::selection::parse_runners;
use pmu_rs::{catalog, race_code, Category, CombinationCounter, SettlementEngine};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pmu")]
#[command(about = "PMU wager settlement CLI", long_about = None)]
struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered wager types
    Catalog {
        /// Only list one category (simple, couple, trio, multi, special)
        #[arg(short = 'C', long)]
        category: Option<Category>,
    },
    /// Settle a selection against a finish order and print the verdict as JSON
    Settle {
        /// Wager type code, e.g. trio_ordre
        code: String,
        /// Selected runners in predicted order, e.g. 7,5,12
        selection: String,
        /// Official finish order; omit while the race is not resolved
        #[arg(short, long, value_delimiter = ',')]
        finish: Vec<u32>,
    },
    /// Count the combinations a wager type represents over a pool of runners
    Count {
        code: String,
        /// Number of distinct runners covered
        pool: usize,
    },
    /// Format or parse compact race codes (R1C4/trio/7-5-12)
    Code {
        #[command(subcommand)]
        action: CodeAction,
    },
}

#[derive(Subcommand)]
enum CodeAction {
    Format {
        #[arg(short, long)]
        reunion: u32,
        #[arg(short, long)]
        course: u32,
        #[arg(short, long)]
        bet_type: Option<String>,
        /// Selected runners, e.g. 7,5,12
        selections: String,
    },
    Parse { code: String },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?;
    init_tracing(&config);

    catalog::init().context("bet type catalog is unusable")?;
    info!("PMU settlement engine ready");

    match cli.command {
        Commands::Catalog { category } => print_catalog(category),
        Commands::Settle {
            code,
            selection,
            finish,
        } => {
            let engine = SettlementEngine::global()?.with_language(config.settlement.language);
            let verdict = engine.settle_raw(&code, &selection, &finish)?;
            println!("{}", serde_json::to_string_pretty(&verdict)?);
            Ok(())
        }
        Commands::Count { code, pool } => {
            let count = CombinationCounter::global()?.count(&code, pool)?;
            println!("{count}");
            Ok(())
        }
        Commands::Code { action } => run_code(action),
    }
}

fn print_catalog(category: Option<Category>) -> Result<()> {
    let catalog = catalog::global()?;
    let definitions: Vec<_> = match category {
        Some(category) => catalog.list_by_category(category),
        None => catalog.iter().collect(),
    };

    println!(
        "{:<16} {:<22} {:<8} {:<10} {:<6}",
        "CODE", "NAME", "CATEGORY", "RUNNERS", "ORDER"
    );
    println!("{}", "-".repeat(66));
    for def in definitions {
        let runners = match def.max_selections {
            Some(max) if max == def.min_selections => max.to_string(),
            Some(max) => format!("{}-{}", def.min_selections, max),
            None => format!("{}+", def.min_selections),
        };
        println!(
            "{:<16} {:<22} {:<8} {:<10} {:<6}",
            def.code,
            def.name,
            def.category.as_str(),
            runners,
            if def.requires_order { "yes" } else { "no" }
        );
    }
    Ok(())
}

fn run_code(action: CodeAction) -> Result<()> {
    match action {
        CodeAction::Format {
            reunion,
            course,
            bet_type,
            selections,
        } => {
            let runners = parse_runners(&selections)?;
            let code = race_code::format(reunion, course, &runners, bet_type.as_deref())
                .ok_or_else(|| anyhow::anyhow!("Cannot render a race code from these parts"))?;
            println!("{}", code);
        }
        CodeAction::Parse { code } => {
            let parsed = race_code::parse(&code)
                .ok_or_else(|| anyhow::anyhow!("Malformed race code '{}'", code))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }
    Ok(())
}
