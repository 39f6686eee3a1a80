//! Name → nearest vaccine site, the flow behind the interactive prompt.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::eligibility::Roster;
use crate::error::LocateError;
use crate::gazetteer::{SiteTable, ZipTable};
use crate::geodesy::DistanceUnit;
use crate::locator::{self, NearestSite};
use crate::types::{Coordinate, Individual};

pub const PROMPT: &str = "What is your name? ";
pub const NAME_NOT_FOUND: &str = "Name not found";

/// Everything the lookup needs, loaded once up front
pub struct SiteFinder {
    pub roster: Roster,
    pub zips: ZipTable,
    pub sites: SiteTable,
    pub unit: DistanceUnit,
}

/// Result of looking a person up by name
#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    Found {
        person: &'a Individual,
        origin: Coordinate,
        site: NearestSite<'a>,
    },
    NameNotFound,
}

impl SiteFinder {
    /// Find the site nearest to the named person's zip code.
    ///
    /// An unknown name is a normal outcome and touches neither the zip table
    /// nor the site table.
    pub fn find(&self, name: &str) -> Result<Lookup<'_>, LocateError> {
        let Some(person) = self.roster.get(name) else {
            return Ok(Lookup::NameNotFound);
        };
        let origin = self.zips.resolve(&person.zip_code)?;
        let site =
            locator::nearest(origin, &self.sites, self.unit).ok_or(LocateError::NoSites)?;
        Ok(Lookup::Found {
            person,
            origin,
            site,
        })
    }

    /// Prompt on `output`, read one name from `input` and print the answer
    pub fn prompt<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line).context("Failed to read name")?;
        let name = line.trim();

        match self.find(name)? {
            Lookup::Found {
                person,
                origin,
                site,
            } => {
                tracing::info!(
                    "{} ({}) lives in {} at {}; nearest site {} is {} away ({:?})",
                    person.name,
                    person.phase,
                    crate::zipcode::describe_zip(&person.zip_code),
                    origin,
                    site.name,
                    site.distance,
                    site.distance.method
                );
                writeln!(output, "{}", site.name)?;
            }
            Lookup::NameNotFound => {
                tracing::info!("No record for '{}'", name);
                writeln!(output, "{}", NAME_NOT_FOUND)?;
            }
        }
        Ok(())
    }
}
