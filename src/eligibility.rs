//! Phase classification and the roster of individuals.
//!
//! Records are one per line, whitespace separated:
//! `name age immunocompromised job vaccine_intent zip_code`.
//! Lines that fail validation are reported back in a [`LoadReport`] rather
//! than aborting the whole load.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{self, LoadError, LoadReport, RecordError, RecordErrorKind};
use crate::types::{Individual, Phase, parse_yes_no};

const PHASE1_JOBS: [&str; 3] = ["doctor", "nurse", "therapist"];
const PHASE2_JOBS: [&str; 2] = ["cashier", "teacher"];
const PHASE1_MIN_AGE: u32 = 60;
const MAX_AGE: u32 = 150;
const FIELD_COUNT: usize = 6;

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern is valid"));

/// Assign the vaccination phase. Rules are checked in order, first match wins.
pub fn classify(age: u32, immunocompromised: bool, job: &str) -> Phase {
    if age >= PHASE1_MIN_AGE || PHASE1_JOBS.contains(&job) {
        Phase::Phase1
    } else if immunocompromised || PHASE2_JOBS.contains(&job) {
        Phase::Phase2
    } else {
        Phase::Phase3
    }
}

/// What to do when a name appears on more than one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    KeepFirst,
    #[default]
    KeepLast,
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(Self::KeepFirst),
            "last" => Ok(Self::KeepLast),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown duplicate policy '{}'", other)),
        }
    }
}

/// Individuals keyed by name, iterated in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct Roster {
    people: Vec<Individual>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Parse an individuals file already held in memory
    pub fn parse(input: &str, policy: DuplicatePolicy) -> LoadReport<Self> {
        let mut roster = Self::default();
        let mut rejected = Vec::new();

        for (idx, line) in input.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let person = match parse_record(line) {
                Ok(person) => person,
                Err(kind) => {
                    rejected.push(RecordError::new(line_no, kind));
                    continue;
                }
            };
            if let Err(kind) = roster.insert(person, policy) {
                rejected.push(RecordError::new(line_no, kind));
            }
        }

        LoadReport {
            value: roster,
            rejected,
        }
    }

    pub fn load(path: &Path, policy: DuplicatePolicy) -> Result<LoadReport<Self>, LoadError> {
        let text = error::read_file(path)?;
        let report = Self::parse(&text, policy);
        tracing::info!(
            "Loaded {} individuals from {} ({} rejected)",
            report.value.len(),
            path.display(),
            report.rejected.len()
        );
        Ok(report)
    }

    fn insert(&mut self, person: Individual, policy: DuplicatePolicy) -> Result<(), RecordErrorKind> {
        let Some(&slot) = self.index.get(&person.name) else {
            self.index.insert(person.name.clone(), self.people.len());
            self.people.push(person);
            return Ok(());
        };

        tracing::warn!("Duplicate record for '{}' ({:?})", person.name, policy);
        match policy {
            DuplicatePolicy::KeepFirst => Ok(()),
            DuplicatePolicy::KeepLast => {
                self.people[slot] = person;
                Ok(())
            }
            DuplicatePolicy::Reject => Err(RecordErrorKind::Duplicate(person.name)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Individual> {
        self.index.get(name).map(|&i| &self.people[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.people.iter()
    }
}

fn parse_record(line: &str) -> Result<Individual, RecordErrorKind> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[name, age, immuno, job, intent, zip] = fields.as_slice() else {
        return Err(RecordErrorKind::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    let age: u32 = age
        .parse()
        .map_err(|_| RecordErrorKind::InvalidAge(age.to_string()))?;
    if age > MAX_AGE {
        return Err(RecordErrorKind::AgeOutOfRange(age));
    }
    let immunocompromised = parse_flag("immunocompromised", immuno)?;
    let vaccine_intent = parse_flag("vaccine_intent", intent)?;
    if !ZIP_RE.is_match(zip) {
        return Err(RecordErrorKind::InvalidZip(zip.to_string()));
    }

    Ok(Individual::new(
        name,
        age,
        immunocompromised,
        job,
        vaccine_intent,
        zip,
    ))
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, RecordErrorKind> {
    parse_yes_no(value).ok_or_else(|| RecordErrorKind::InvalidFlag {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_sixty_and_over_is_phase1() {
        for age in [60, 61, 75, 99, 150] {
            for immuno in [true, false] {
                for job in ["clerk", "cashier", "doctor", "teacher", ""] {
                    assert_eq!(classify(age, immuno, job), Phase::Phase1, "{age} {immuno} {job}");
                }
            }
        }
    }

    #[test]
    fn test_classify_rule_table() {
        assert_eq!(classify(30, true, "clerk"), Phase::Phase2);
        assert_eq!(classify(30, false, "clerk"), Phase::Phase3);
        assert_eq!(classify(65, false, "doctor"), Phase::Phase1);
        assert_eq!(classify(59, false, "nurse"), Phase::Phase1);
        assert_eq!(classify(20, false, "therapist"), Phase::Phase1);
        assert_eq!(classify(20, false, "cashier"), Phase::Phase2);
        assert_eq!(classify(20, false, "teacher"), Phase::Phase2);
        // job rule one beats immune status rule two
        assert_eq!(classify(20, true, "doctor"), Phase::Phase1);
    }

    #[test]
    fn test_job_match_is_exact() {
        assert_eq!(classify(30, false, "Doctor"), Phase::Phase3);
        assert_eq!(classify(30, false, "doctors"), Phase::Phase3);
    }

    #[test]
    fn test_parse_fariba() {
        let report = Roster::parse("Fariba 45 no doctor yes 02139\n", DuplicatePolicy::default());
        assert!(report.is_clean());
        let fariba = report.value.get("Fariba").unwrap();
        assert_eq!(fariba.age, 45);
        assert!(!fariba.immunocompromised);
        assert!(fariba.vaccine_intent);
        assert_eq!(fariba.zip_code, "02139");
        assert_eq!(fariba.phase, Phase::Phase1);
    }

    #[test]
    fn test_malformed_lines_are_reported_not_fatal() {
        let input = "\
Ana 30 yes clerk no 20740
Bob thirty no clerk yes 20740
Cid 30 no clerk

Dee 200 no clerk yes 20740
Eve 40 sometimes clerk yes 20740
Fay 40 no clerk perhaps 20740
Gus 40 no clerk yes 2074
Hal 40 no clerk yes 20740-1234
";
        let report = Roster::parse(input, DuplicatePolicy::default());
        let roster = &report.value;
        assert_eq!(roster.len(), 2);
        assert!(roster.contains("Ana"));
        assert!(roster.contains("Hal"));

        let kinds: Vec<(usize, &RecordErrorKind)> =
            report.rejected.iter().map(|e| (e.line, &e.kind)).collect();
        assert_eq!(kinds.len(), 6);
        assert_eq!(kinds[0], (2, &RecordErrorKind::InvalidAge("thirty".into())));
        assert_eq!(
            kinds[1],
            (3, &RecordErrorKind::FieldCount { expected: 6, found: 4 })
        );
        assert_eq!(kinds[2], (5, &RecordErrorKind::AgeOutOfRange(200)));
        assert!(matches!(
            kinds[3],
            (6, RecordErrorKind::InvalidFlag { field: "immunocompromised", .. })
        ));
        assert!(matches!(
            kinds[4],
            (7, RecordErrorKind::InvalidFlag { field: "vaccine_intent", .. })
        ));
        assert_eq!(kinds[5], (8, &RecordErrorKind::InvalidZip("2074".into())));
    }

    #[test]
    fn test_duplicate_policies() {
        let input = "Sam 30 no clerk yes 20740\nSam 70 no clerk no 20741\nTia 20 no clerk yes 20740\n";

        let last = Roster::parse(input, DuplicatePolicy::KeepLast);
        assert!(last.is_clean());
        assert_eq!(last.value.len(), 2);
        assert_eq!(last.value.get("Sam").unwrap().age, 70);
        assert_eq!(last.value.get("Sam").unwrap().phase, Phase::Phase1);
        // position of first appearance is kept
        let names: Vec<&str> = last.value.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Sam", "Tia"]);

        let first = Roster::parse(input, DuplicatePolicy::KeepFirst);
        assert!(first.is_clean());
        assert_eq!(first.value.get("Sam").unwrap().age, 30);

        let reject = Roster::parse(input, DuplicatePolicy::Reject);
        assert_eq!(reject.value.get("Sam").unwrap().age, 30);
        assert_eq!(
            reject.rejected,
            vec![RecordError::new(2, RecordErrorKind::Duplicate("Sam".into()))]
        );
    }

    #[test]
    fn test_duplicate_policy_from_str() {
        assert_eq!("first".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::KeepFirst));
        assert_eq!("LAST".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::KeepLast));
        assert_eq!("reject".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Reject));
        assert!("newest".parse::<DuplicatePolicy>().is_err());
    }
}
