//! Text bar charts of vaccine intent by age group.

use std::fmt::Write as _;

use crate::eligibility::Roster;

/// Half-open age bins used on the chart x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    Under25,
    From25To49,
    From50To74,
    From75To99,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        Self::Under25,
        Self::From25To49,
        Self::From50To74,
        Self::From75To99,
    ];

    /// Bin for `age`; 100 and over falls outside every bin
    pub fn of(age: u32) -> Option<Self> {
        match age {
            0..25 => Some(Self::Under25),
            25..50 => Some(Self::From25To49),
            50..75 => Some(Self::From50To74),
            75..100 => Some(Self::From75To99),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Under25 => "0-24",
            Self::From25To49 => "25-49",
            Self::From50To74 => "50-74",
            Self::From75To99 => "75-99",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Counts per age group for one side of the vaccine-intent question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentChart {
    pub title: &'static str,
    pub counts: [usize; 4],
}

impl IntentChart {
    pub fn count(&self, group: AgeGroup) -> usize {
        self.counts[group.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Render as horizontal bars scaled so the largest count spans `width` cells
    pub fn render(&self, width: usize) -> String {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "Age Groups | Number of People");
        for group in AgeGroup::ALL {
            let count = self.count(group);
            let bar = if max == 0 {
                0
            } else {
                // at least one cell for any non-zero count
                (count * width).div_ceil(max)
            };
            let _ = writeln!(out, "{:>10} | {} {}", group.label(), "#".repeat(bar), count);
        }
        let _ = writeln!(out, "Total: {}", self.total());
        out
    }
}

/// Count individuals with the given vaccine intent in each age group
pub fn intent_counts(roster: &Roster, willing: bool) -> IntentChart {
    let mut counts = [0usize; 4];
    for person in roster.iter().filter(|p| p.vaccine_intent == willing) {
        if let Some(group) = AgeGroup::of(person.age) {
            counts[group.index()] += 1;
        }
    }

    IntentChart {
        title: if willing {
            "Individuals Who Would Take The Vaccine"
        } else {
            "Individuals Who Would Not Take The Vaccine"
        },
        counts,
    }
}
