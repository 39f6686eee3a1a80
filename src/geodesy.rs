//! Distances between coordinates on the WGS-84 ellipsoid.
//!
//! [`distance`] first runs Vincenty's inverse formula. Vincenty does not
//! converge for nearly antipodal points; in that case the haversine great
//! circle on a sphere of mean Earth radius is used instead, and the returned
//! [`Distance`] records which method produced the value.

use std::fmt;
use std::str::FromStr;

use geo::vincenty_distance::FailedToConvergeError;
use geo::{HaversineDistance, Point, VincentyDistance};

use crate::types::Coordinate;

const METRES_PER_KILOMETRE: f64 = 1000.0;
const MILES_PER_KILOMETRE: f64 = 0.621371;

/// Output unit for distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    pub fn from_metres(self, metres: f64) -> f64 {
        let km = metres / METRES_PER_KILOMETRE;
        match self {
            Self::Kilometers => km,
            Self::Miles => km * MILES_PER_KILOMETRE,
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Kilometers => "km",
            Self::Miles => "mi",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Ok(Self::Kilometers),
            "mi" | "miles" => Ok(Self::Miles),
            other => Err(format!("unknown distance unit '{}'", other)),
        }
    }
}

/// Which formula produced a distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMethod {
    Vincenty,
    Haversine,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
    pub method: DistanceMethod,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {}", self.value, self.unit.abbreviation())
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}

/// Vincenty inverse distance in metres on the WGS-84 ellipsoid
pub fn vincenty(p1: Coordinate, p2: Coordinate) -> Result<f64, FailedToConvergeError> {
    Point::from(p1).vincenty_distance(&Point::from(p2))
}

/// Great-circle distance in metres on a sphere of mean Earth radius
pub fn haversine(p1: Coordinate, p2: Coordinate) -> f64 {
    Point::from(p1).haversine_distance(&Point::from(p2))
}

/// Distance in `unit`, Vincenty first with haversine as the fallback
pub fn distance(p1: Coordinate, p2: Coordinate, unit: DistanceUnit) -> Distance {
    let primary = match vincenty(p1, p2) {
        Ok(metres) if metres.is_finite() => Some(metres),
        Ok(metres) => {
            tracing::debug!("Vincenty returned {} for {} -> {}", metres, p1, p2);
            None
        }
        Err(err) => {
            tracing::debug!("Vincenty failed for {} -> {}: {}", p1, p2, err);
            None
        }
    };
    with_fallback(primary, p1, p2, unit)
}

fn with_fallback(
    primary: Option<f64>,
    p1: Coordinate,
    p2: Coordinate,
    unit: DistanceUnit,
) -> Distance {
    match primary {
        Some(metres) => Distance {
            value: unit.from_metres(metres),
            unit,
            method: DistanceMethod::Vincenty,
        },
        None => Distance {
            value: unit.from_metres(haversine(p1, p2)),
            unit,
            method: DistanceMethod::Haversine,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WGS84_A: f64 = 6_378_137.0;
    const BOSTON: Coordinate = Coordinate::new(42.3601, -71.0589);
    const NEW_YORK: Coordinate = Coordinate::new(40.7128, -74.0060);

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_coincident_points_are_zero() {
        assert_eq!(vincenty(BOSTON, BOSTON).ok(), Some(0.0));
        assert_eq!(haversine(BOSTON, BOSTON), 0.0);
        let d = distance(BOSTON, BOSTON, DistanceUnit::Kilometers);
        assert_eq!(d.value, 0.0);
        assert_eq!(d.method, DistanceMethod::Vincenty);
    }

    #[test]
    fn test_vincenty_known_distance() {
        // Boston to New York is roughly 306 km on the ellipsoid
        let metres = vincenty(BOSTON, NEW_YORK).unwrap();
        assert!(approx(metres / 1000.0, 306.0, 3.0), "{metres}");
        // and symmetric
        let back = vincenty(NEW_YORK, BOSTON).unwrap();
        assert!(approx(metres, back, 1e-6));
    }

    #[test]
    fn test_vincenty_along_equator() {
        // one degree of longitude on the equator = a * π / 180
        let metres = vincenty(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)).unwrap();
        assert!(approx(metres, WGS84_A * std::f64::consts::PI / 180.0, 1e-3), "{metres}");
    }

    #[test]
    fn test_haversine_close_to_vincenty() {
        let v = vincenty(BOSTON, NEW_YORK).unwrap();
        let h = haversine(BOSTON, NEW_YORK);
        // spherical approximation within 0.5%
        assert!((v - h).abs() / v < 0.005, "{v} vs {h}");
    }

    #[test]
    fn test_vincenty_fails_near_antipode() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.5, 179.7);
        assert!(vincenty(a, b).is_err());

        let d = distance(a, b, DistanceUnit::Kilometers);
        assert_eq!(d.method, DistanceMethod::Haversine);
        assert!(d.value.is_finite());
        assert!(d.value > 19_900.0 && d.value < 20_100.0, "{}", d.value);
    }

    #[test]
    fn test_fallback_tier_used_when_primary_missing() {
        let d = with_fallback(None, BOSTON, NEW_YORK, DistanceUnit::Kilometers);
        assert_eq!(d.method, DistanceMethod::Haversine);
        assert_eq!(d.value, haversine(BOSTON, NEW_YORK) / 1000.0);

        let d = with_fallback(Some(1500.0), BOSTON, NEW_YORK, DistanceUnit::Kilometers);
        assert_eq!(d.method, DistanceMethod::Vincenty);
        assert_eq!(d.value, 1.5);
    }

    #[test]
    fn test_units_apply_to_both_tiers() {
        let km = with_fallback(None, BOSTON, NEW_YORK, DistanceUnit::Kilometers);
        let mi = with_fallback(None, BOSTON, NEW_YORK, DistanceUnit::Miles);
        assert_eq!(mi.unit, DistanceUnit::Miles);
        assert!(approx(mi.value, km.value * MILES_PER_KILOMETRE, 1e-9));

        let km = distance(BOSTON, NEW_YORK, DistanceUnit::Kilometers);
        let mi = distance(BOSTON, NEW_YORK, DistanceUnit::Miles);
        assert!(approx(mi.value, km.value * MILES_PER_KILOMETRE, 1e-9));
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("miles".parse::<DistanceUnit>(), Ok(DistanceUnit::Miles));
        assert_eq!("KM".parse::<DistanceUnit>(), Ok(DistanceUnit::Kilometers));
        assert!("furlongs".parse::<DistanceUnit>().is_err());
    }
}
