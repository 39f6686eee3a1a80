use crate::gazetteer::SiteTable;
use crate::geodesy::{self, Distance, DistanceUnit};
use crate::types::Coordinate;

/// The closest site found by [`nearest`]
#[derive(Debug, Clone, PartialEq)]
pub struct NearestSite<'a> {
    pub name: &'a str,
    pub zip_code: &'a str,
    pub distance: Distance,
}

/// Scan every site and return the one closest to `query`.
///
/// All distances in one scan use the same `unit`. On a tie the site that
/// comes first in the table wins. Returns `None` only for an empty table.
pub fn nearest<'a>(
    query: Coordinate,
    sites: &'a SiteTable,
    unit: DistanceUnit,
) -> Option<NearestSite<'a>> {
    let mut best: Option<NearestSite<'a>> = None;

    for site in sites.iter() {
        let distance = geodesy::distance(query, site.coordinate, unit);
        tracing::debug!(
            "{} is {} away ({:?})",
            site.name,
            distance,
            distance.method
        );
        if best
            .as_ref()
            .is_none_or(|b| distance.value < b.distance.value)
        {
            best = Some(NearestSite {
                name: &site.name,
                zip_code: &site.zip_code,
                distance,
            });
        }
    }

    best
}
