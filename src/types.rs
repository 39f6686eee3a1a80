use serde::{Serialize, Serializer};
use std::fmt;

/// Vaccination priority phase, `Phase1` being served first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Phase1,
    Phase2,
    Phase3,
}

impl Phase {
    pub fn number(self) -> u8 {
        match self {
            Self::Phase1 => 1,
            Self::Phase2 => 2,
            Self::Phase3 => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {}", self.number())
    }
}

impl Serialize for Phase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// One person from the individuals file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Individual {
    pub name: String,
    pub age: u32,
    pub immunocompromised: bool,
    pub job: String,
    pub vaccine_intent: bool,
    pub zip_code: String,
    pub phase: Phase,
}

impl Individual {
    /// Build an individual, deriving the phase from age, immune status and job
    pub fn new(
        name: impl Into<String>,
        age: u32,
        immunocompromised: bool,
        job: impl Into<String>,
        vaccine_intent: bool,
        zip_code: impl Into<String>,
    ) -> Self {
        let job = job.into();
        let phase = crate::eligibility::classify(age, immunocompromised, &job);
        Self {
            name: name.into(),
            age,
            immunocompromised,
            job,
            vaccine_intent,
            zip_code: zip_code.into(),
            phase,
        }
    }
}

/// Gazetteer row mapping a zip code to its centroid
#[derive(Debug, Clone, PartialEq)]
pub struct ZipCoordinate {
    pub zip_code: String,
    pub coordinate: Coordinate,
}

/// A named vaccination site
#[derive(Debug, Clone, PartialEq)]
pub struct VaccineSite {
    pub name: String,
    pub zip_code: String,
    pub coordinate: Coordinate,
}

/// Parse a "yes"/"no" flag, ignoring ASCII case
pub fn parse_yes_no(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}
