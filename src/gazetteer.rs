//! Static reference tables: zip code centroids and vaccine sites.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{self, LoadError, LoadReport, LocateError, RecordError, RecordErrorKind};
use crate::types::{Coordinate, VaccineSite, ZipCoordinate};

/// Zip code → coordinate lookup, `zip, latitude, longitude` per line
#[derive(Debug, Clone, Default)]
pub struct ZipTable {
    rows: HashMap<String, ZipCoordinate>,
}

impl ZipTable {
    pub fn parse(input: &str) -> LoadReport<Self> {
        let mut table = Self::default();
        let rejected = for_each_row(input, 3, |fields| {
            let coordinate = parse_coordinate(fields[1], fields[2])?;
            let zip_code = fields[0].to_string();
            table.rows.insert(
                zip_code.clone(),
                ZipCoordinate {
                    zip_code,
                    coordinate,
                },
            );
            Ok(())
        });
        LoadReport {
            value: table,
            rejected,
        }
    }

    pub fn load(path: &Path) -> Result<LoadReport<Self>, LoadError> {
        let text = error::read_file(path)?;
        let report = Self::parse(&text);
        tracing::info!(
            "Loaded {} zip codes from {} ({} rejected)",
            report.value.len(),
            path.display(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Coordinate for `zip_code`, exactly as parsed from the table
    pub fn resolve(&self, zip_code: &str) -> Result<Coordinate, LocateError> {
        self.rows
            .get(zip_code.trim())
            .map(|row| row.coordinate)
            .ok_or_else(|| LocateError::UnknownZip(zip_code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Vaccine sites keyed by name, kept in file order.
///
/// A repeated name replaces the earlier row's data but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct SiteTable {
    sites: Vec<VaccineSite>,
    index: HashMap<String, usize>,
}

impl SiteTable {
    pub fn parse(input: &str) -> LoadReport<Self> {
        let mut table = Self::default();
        let rejected = for_each_row(input, 4, |fields| {
            let coordinate = parse_coordinate(fields[2], fields[3])?;
            table.insert(VaccineSite {
                name: fields[0].to_string(),
                zip_code: fields[1].to_string(),
                coordinate,
            });
            Ok(())
        });
        LoadReport {
            value: table,
            rejected,
        }
    }

    pub fn load(path: &Path) -> Result<LoadReport<Self>, LoadError> {
        let text = error::read_file(path)?;
        let report = Self::parse(&text);
        tracing::info!(
            "Loaded {} vaccine sites from {} ({} rejected)",
            report.value.len(),
            path.display(),
            report.rejected.len()
        );
        Ok(report)
    }

    pub fn insert(&mut self, site: VaccineSite) {
        match self.index.get(&site.name) {
            Some(&slot) => {
                tracing::warn!("Vaccine site '{}' listed twice, keeping later row", site.name);
                self.sites[slot] = site;
            }
            None => {
                self.index.insert(site.name.clone(), self.sites.len());
                self.sites.push(site);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&VaccineSite> {
        self.index.get(name).map(|&i| &self.sites[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VaccineSite> {
        self.sites.iter()
    }
}

impl FromIterator<VaccineSite> for SiteTable {
    fn from_iter<I: IntoIterator<Item = VaccineSite>>(iter: I) -> Self {
        let mut table = Self::default();
        for site in iter {
            table.insert(site);
        }
        table
    }
}

/// Split each non-blank line on commas and hand the trimmed fields to `row`.
/// Returns the lines that were rejected.
fn for_each_row<F>(input: &str, expected: usize, mut row: F) -> Vec<RecordError>
where
    F: FnMut(&[&str]) -> Result<(), RecordErrorKind>,
{
    let mut rejected = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let result = if fields.len() == expected {
            row(&fields)
        } else {
            Err(RecordErrorKind::FieldCount {
                expected,
                found: fields.len(),
            })
        };
        if let Err(kind) = result {
            rejected.push(RecordError::new(idx + 1, kind));
        }
    }
    rejected
}

fn parse_coordinate(lat: &str, lng: &str) -> Result<Coordinate, RecordErrorKind> {
    let latitude = parse_degrees("latitude", lat)?;
    let longitude = parse_degrees("longitude", lng)?;
    let coordinate = Coordinate::new(latitude, longitude);
    if !coordinate.is_valid() {
        let (field, value) = if (-90.0..=90.0).contains(&latitude) {
            ("longitude", lng)
        } else {
            ("latitude", lat)
        };
        return Err(RecordErrorKind::InvalidCoordinate {
            field,
            value: value.to_string(),
        });
    }
    Ok(coordinate)
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64, RecordErrorKind> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RecordErrorKind::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}
