pub mod charts;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod gazetteer;
pub mod geodesy;
pub mod locator;
pub mod lookup;
pub mod types;
pub mod zipcode;

pub use charts::{AgeGroup, IntentChart, intent_counts};
pub use config::{Command, Config};
pub use eligibility::{DuplicatePolicy, Roster, classify};
pub use error::{LoadError, LoadReport, LocateError, RecordError, RecordErrorKind};
pub use gazetteer::{SiteTable, ZipTable};
pub use geodesy::{Distance, DistanceMethod, DistanceUnit};
pub use locator::{NearestSite, nearest};
pub use lookup::{Lookup, SiteFinder};
pub use types::{Coordinate, Individual, Phase, VaccineSite, ZipCoordinate};
pub use zipcode::describe_zip;
