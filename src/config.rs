use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::eligibility::DuplicatePolicy;
use crate::geodesy::DistanceUnit;

pub const DEFAULT_INDIVIDUALS: &str = "individuals.txt";
pub const DEFAULT_ZIPCODES: &str = "zipcodes.txt";
pub const DEFAULT_SITES: &str = "vaccine_locations.txt";

/// What the binary was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Prompt for a name and print the nearest site
    #[default]
    Locate,
    /// Print every individual with their phase
    Phases { json: bool },
    /// Print the vaccine intent charts
    Charts,
}

/// Runtime configuration: environment first, command-line flags on top
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub command: Command,
    pub individuals: PathBuf,
    pub zipcodes: PathBuf,
    pub sites: PathBuf,
    pub unit: DistanceUnit,
    pub duplicates: DuplicatePolicy,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: Command::default(),
            individuals: PathBuf::from(DEFAULT_INDIVIDUALS),
            zipcodes: PathBuf::from(DEFAULT_ZIPCODES),
            sites: PathBuf::from(DEFAULT_SITES),
            unit: DistanceUnit::default(),
            duplicates: DuplicatePolicy::default(),
            verbose: false,
        }
    }
}

impl Config {
    /// Read `VAX_*` environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = var("VAX_INDIVIDUALS") {
            config.individuals = path.into();
        }
        if let Some(path) = var("VAX_ZIPCODES") {
            config.zipcodes = path.into();
        }
        if let Some(path) = var("VAX_SITES") {
            config.sites = path.into();
        }
        if let Some(unit) = var("VAX_UNIT") {
            config.unit = unit
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid VAX_UNIT")?;
        }
        if let Some(policy) = var("VAX_DUPLICATES") {
            config.duplicates = policy
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid VAX_DUPLICATES")?;
        }
        Ok(config)
    }

    /// Apply command-line arguments (without the program name)
    pub fn apply_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::<String>::into);
        let mut command: Option<Command> = None;
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "locate" if command.is_none() => command = Some(Command::Locate),
                "phases" if command.is_none() => command = Some(Command::Phases { json: false }),
                "charts" if command.is_none() => command = Some(Command::Charts),
                "--individuals" => self.individuals = next_value(&mut args, &arg)?.into(),
                "--zipcodes" => self.zipcodes = next_value(&mut args, &arg)?.into(),
                "--sites" => self.sites = next_value(&mut args, &arg)?.into(),
                "--duplicates" => {
                    self.duplicates = next_value(&mut args, &arg)?
                        .parse()
                        .map_err(anyhow::Error::msg)?;
                }
                "--miles" => self.unit = DistanceUnit::Miles,
                "--km" => self.unit = DistanceUnit::Kilometers,
                "--json" => json = true,
                "-v" | "--verbose" => self.verbose = true,
                other => bail!("Unknown argument: {}", other),
            }
        }

        self.command = match command.unwrap_or_default() {
            Command::Phases { .. } => Command::Phases { json },
            _ if json => bail!("--json only applies to the phases command"),
            other => other,
        };
        Ok(self)
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{} expects a value", flag))
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [locate|phases|charts] [options]\n\
         \x20 locate                 prompt for a name and print the nearest vaccine site (default)\n\
         \x20 phases [--json]        print each individual's vaccination phase\n\
         \x20 charts                 print vaccine intent by age group\n\
         Options:\n\
         \x20 --individuals <path>   individuals file (env VAX_INDIVIDUALS, default {DEFAULT_INDIVIDUALS})\n\
         \x20 --zipcodes <path>      zip coordinate file (env VAX_ZIPCODES, default {DEFAULT_ZIPCODES})\n\
         \x20 --sites <path>         vaccine site file (env VAX_SITES, default {DEFAULT_SITES})\n\
         \x20 --miles | --km         distance unit (env VAX_UNIT)\n\
         \x20 --duplicates <policy>  first, last or reject (env VAX_DUPLICATES, default last)\n\
         \x20 -v, --verbose          log lookup details to stderr"
    )
}
