/// Look up city and state from a US zip code in the embedded database
pub fn lookup_zipcode(zip: &str) -> Option<(String, String)> {
    // Five-digit prefix only; ZIP+4 is not in the database.
    let zip = zip.trim().get(..5)?;
    // Avoid zipcodes::matching to suppress debug_print output.
    let results = zipcodes::filter_by(vec![|z: &zipcodes::Zipcode| z.zip_code == zip], None).ok()?;
    let info = results.first()?;
    Some((info.city.clone(), info.state.clone()))
}

/// Format a zip code with its place name when one is known, e.g. "02139 (Cambridge, MA)"
pub fn describe_zip(zip: &str) -> String {
    match lookup_zipcode(zip) {
        Some((city, state)) => format!("{} ({}, {})", zip, city, state),
        None => zip.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_zip_has_no_place() {
        assert_eq!(lookup_zipcode("021"), None);
        assert_eq!(describe_zip("021"), "021");
    }

    #[test]
    fn test_describe_zip_with_place() {
        assert_eq!(describe_zip("02139"), "02139 (Cambridge, MA)");
    }

    #[test]
    fn test_lookup_zip_plus_four() {
        assert_eq!(
            lookup_zipcode("02139-1234"),
            Some(("Cambridge".to_string(), "MA".to_string()))
        );
        assert_eq!(describe_zip("02139-1234"), "02139-1234 (Cambridge, MA)");
    }
}
