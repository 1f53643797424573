use crate::plan::PlannedCourse;
use chrono::{Datelike, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{Display as FmtDisplay, Formatter, Result as FmtResult},
    num::ParseIntError,
    ops::Deref,
    str::FromStr,
};
use strum::{Display, EnumIter, EnumString};

/// Academic season, declared in chronological order within a calendar year
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    Display,
)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Rank used to order terms within the same year
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Calendar year of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(pub i32);

impl Year {
    pub fn current() -> Year {
        Year(Utc::now().year())
    }

    /// The following year, or `None` past the last representable year
    pub fn next(self) -> Option<Year> {
        self.0.checked_add(1).map(Year)
    }
}

impl Deref for Year {
    type Target = i32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Year {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year = s.trim().parse()?;
        Ok(Year(year))
    }
}

impl FmtDisplay for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Custom error type for parsing term titles
#[derive(Debug, Clone, PartialEq)]
pub enum ParseTermError {
    EmptyTitle,
    UnknownSeason(String),
    InvalidYear(String),
}

impl FmtDisplay for ParseTermError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyTitle => write!(f, "Empty term title"),
            Self::UnknownSeason(label) => write!(f, "Unknown season: {label}"),
            Self::InvalidYear(year) => write!(f, "Invalid year: {year}"),
        }
    }
}

impl Error for ParseTermError {}

/// A season and year pair such as "Fall 2024"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermTitle {
    pub year: Year,
    pub season: Season,
}

impl FromStr for TermTitle {
    type Err = ParseTermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let label = parts.next().ok_or(ParseTermError::EmptyTitle)?;
        let season =
            Season::from_str(label).map_err(|_| ParseTermError::UnknownSeason(label.to_string()))?;
        let year = parts.next().unwrap_or_default();
        let year = year
            .parse()
            .map_err(|_| ParseTermError::InvalidYear(year.to_string()))?;

        Ok(Self { year, season })
    }
}

impl FmtDisplay for TermTitle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.season, self.year)
    }
}

/// Opaque term identifier assigned by the persistence layer
pub type TermId = String;

/// A named academic period holding planned courses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: TermId,
    pub title: String,
    /// Season label; labels outside [`Season`] are kept and sort last
    #[serde(rename = "term")]
    pub season: String,
    pub year: Year,
    #[serde(default)]
    pub courses: Vec<PlannedCourse>,
}

impl Term {
    /// Creates an empty term titled `"{season} {year}"`
    pub fn new(id: impl Into<TermId>, season: Season, year: Year) -> Self {
        Self {
            id: id.into(),
            title: TermTitle { year, season }.to_string(),
            season: season.to_string(),
            year,
            courses: Vec::new(),
        }
    }

    /// Builds an empty term from a stored title such as "Spring 2025"
    ///
    /// The first token is kept as the season label even when unrecognized
    /// (defaulting to "Fall" when the title is blank) and a missing or
    /// unparseable year falls back to `default_year`.
    pub fn from_title(id: impl Into<TermId>, title: &str, default_year: Year) -> Self {
        let (season, year) = match title.parse::<TermTitle>() {
            Ok(parsed) if parsed.year.0 != 0 => (parsed.season.to_string(), parsed.year),
            parsed => {
                if let Err(e) = &parsed {
                    debug!("Falling back for term title {title:?}: {e}");
                }

                // Unrecognized labels still keep a well-formed year
                let mut parts = title.split_whitespace();
                let label = parts
                    .next()
                    .map_or_else(|| Season::Fall.to_string(), str::to_string);
                let year = match parsed {
                    Err(ParseTermError::UnknownSeason(_)) => parts
                        .next()
                        .and_then(|year| year.parse().ok())
                        .filter(|year: &Year| year.0 != 0),
                    _ => None,
                };

                (label, year.unwrap_or(default_year))
            }
        };

        Self {
            id: id.into(),
            title: title.to_string(),
            season,
            year,
            courses: Vec::new(),
        }
    }

    pub fn with_courses(mut self, courses: Vec<PlannedCourse>) -> Self {
        self.courses = courses;
        self
    }

    /// Recognized season, if the label is one of the four known ones
    pub fn season(&self) -> Option<Season> {
        Season::from_str(&self.season).ok()
    }

    /// Position within the year; unknown labels rank after every known season
    pub fn season_rank(&self) -> u8 {
        self.season().map(Season::rank).unwrap_or(u8::MAX)
    }

    /// Chronological sort key: year first, then season rank
    pub fn order_key(&self) -> (Year, u8) {
        (self.year, self.season_rank())
    }

    /// Moves the term to a new season and year, keeping the title in sync
    pub fn rename(&mut self, season: Season, year: Year) {
        self.season = season.to_string();
        self.year = year;
        self.title = TermTitle { year, season }.to_string();
    }

    /// Sum of course credits, saturating at `u32::MAX`
    pub fn total_credits(&self) -> u32 {
        self.courses
            .iter()
            .fold(0u32, |total, course| total.saturating_add(course.credits))
    }
}

/// Returns references to `terms` in chronological order
///
/// The sort is stable, so terms sharing a key (including unknown season
/// labels in the same year) keep their relative input order.
pub fn chronological(terms: &[Term]) -> Vec<&Term> {
    let mut ordered: Vec<&Term> = terms.iter().collect();
    ordered.sort_by_key(|term| term.order_key());
    ordered
}

/// Returns a chronologically ordered copy of `terms`
pub fn order_terms(terms: &[Term]) -> Vec<Term> {
    chronological(terms).into_iter().cloned().collect()
}

/// Suggests the season and year for a term following `last`
///
/// # Arguments
/// * `last` - The chronologically last term of the plan, if any
/// * `current_year` - Year used when there is nothing to follow
///
/// # Returns
/// `None` when the following term would fall past the last representable year
pub fn suggest_next_term(last: Option<&Term>, current_year: Year) -> Option<(Season, Year)> {
    let Some(last) = last else {
        return Some((Season::Fall, current_year));
    };

    match last.season() {
        Some(Season::Summer) => Some((Season::Fall, last.year)),
        Some(Season::Fall) => last.year.next().map(|year| (Season::Spring, year)),
        Some(Season::Winter) => Some((Season::Spring, last.year)),
        Some(Season::Spring) => Some((Season::Fall, last.year)),
        None => Some((Season::Fall, current_year)),
    }
}
