use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vax_locator::config::usage;
use vax_locator::{
    Command, Config, Roster, SiteFinder, SiteTable, ZipTable, intent_counts,
};

const CHART_WIDTH: usize = 40;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("vax-locator");
    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        println!("{}", usage(program));
        return Ok(());
    }

    let config = match Config::from_env().and_then(|c| c.apply_args(args.iter().skip(1).cloned())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("{}", usage(program));
            std::process::exit(2);
        }
    };

    init_tracing(config.verbose);

    match config.command {
        Command::Locate => locate(&config),
        Command::Phases { json } => phases(&config, json),
        Command::Charts => charts(&config),
    }
}

/// Log to stderr so stdout only carries program output
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "vax_locator=info"
    } else {
        "vax_locator=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_roster(config: &Config) -> Result<Roster> {
    let report = Roster::load(&config.individuals, config.duplicates)
        .context("Failed to load individuals")?;
    Ok(report.into_logged("individuals"))
}

fn locate(config: &Config) -> Result<()> {
    let zips = ZipTable::load(&config.zipcodes)
        .context("Failed to load zip codes")?
        .into_logged("zipcodes");
    let sites = SiteTable::load(&config.sites)
        .context("Failed to load vaccine sites")?
        .into_logged("sites");
    if zips.is_empty() {
        tracing::warn!("No zip codes loaded from {}", config.zipcodes.display());
    }
    if sites.is_empty() {
        tracing::warn!("No vaccine sites loaded from {}", config.sites.display());
    }
    let finder = SiteFinder {
        roster: load_roster(config)?,
        zips,
        sites,
        unit: config.unit,
    };

    let stdin = io::stdin();
    finder.prompt(stdin.lock(), io::stdout().lock())
}

fn phases(config: &Config, json: bool) -> Result<()> {
    let roster = load_roster(config)?;
    let mut out = io::stdout().lock();

    if json {
        let people: Vec<_> = roster.iter().collect();
        serde_json::to_writer_pretty(&mut out, &people)?;
        writeln!(out)?;
    } else {
        for person in roster.iter() {
            writeln!(out, "{} {}", person.name, person.phase)?;
        }
    }
    Ok(())
}

fn charts(config: &Config) -> Result<()> {
    let roster = load_roster(config)?;
    let mut out = io::stdout().lock();

    for willing in [true, false] {
        let chart = intent_counts(&roster, willing);
        writeln!(out, "{}", chart.render(CHART_WIDTH))?;
    }
    Ok(())
}
