//! Tournament constraints: dates, operational hours, match timing, venues, and format.

use crate::models::tournament::TournamentError;
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Shortest and longest accepted average match duration, in minutes.
pub const MIN_MATCH_DURATION: u32 = 5;
pub const MAX_MATCH_DURATION: u32 = 480;
/// Longest accepted buffer between matches at one venue, in minutes.
pub const MAX_BUFFER_TIME: u32 = 60;

const CLOCK_FORMAT: &str = "%H:%M";

/// Tournament format. Unrecognized names deserialize to `Custom`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    #[default]
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    GroupToKnockout,
    Swiss,
    #[serde(other)]
    Custom,
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatType::SingleElimination => "single_elimination",
            FormatType::DoubleElimination => "double_elimination",
            FormatType::RoundRobin => "round_robin",
            FormatType::GroupToKnockout => "group_to_knockout",
            FormatType::Swiss => "swiss",
            FormatType::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Format-specific parameters. Zero counts are treated as unset.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub number_of_groups: Option<u32>,
    pub group_size: Option<u32>,
    /// Swiss rounds.
    pub number_of_rounds: Option<u32>,
    /// Single elimination: play off the two semifinal losers.
    pub third_place_match: bool,
}

impl FormatConfig {
    pub fn groups(&self) -> Option<u32> {
        self.number_of_groups.filter(|&g| g > 0)
    }

    pub fn group_size(&self) -> Option<u32> {
        self.group_size.filter(|&s| s > 0)
    }

    pub fn swiss_rounds(&self) -> Option<u32> {
        self.number_of_rounds.filter(|&r| r > 0)
    }
}

/// Opening window for one weekday, as "HH:MM" clock times.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub start_time: String,
    pub end_time: String,
}

impl DayHours {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Length of the window in minutes (negative or zero when end is not after start).
    pub fn window_minutes(&self) -> Result<i64, TournamentError> {
        let start = parse_clock(&self.start_time)?;
        let end = parse_clock(&self.end_time)?;
        Ok((end - start).num_minutes())
    }
}

fn parse_clock(value: &str) -> Result<NaiveTime, TournamentError> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|_| {
        TournamentError::InvalidConstraints(format!("invalid clock time {value:?}, expected HH:MM"))
    })
}

/// Weekday name ("monday", "tue", ...) to opening window.
pub type OperationalHours = BTreeMap<String, DayHours>;

/// Everything that bounds how many matches a tournament can hold.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConstraints {
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub timezone: String,
    pub max_matches_per_day: u32,
    pub operational_hours: OperationalHours,
    /// Minutes.
    pub avg_match_duration: u32,
    /// Minutes between consecutive matches at the same venue.
    #[serde(default)]
    pub buffer_time: u32,
    pub venue_count: u32,
    pub format: FormatType,
    #[serde(default)]
    pub format_config: FormatConfig,
}

impl TournamentConstraints {
    /// Check ranges, date order, and operational-hours data.
    pub fn validate(&self) -> Result<(), TournamentError> {
        let invalid = |msg: &str| Err(TournamentError::InvalidConstraints(msg.to_string()));

        if self.end_date < self.start_date {
            return invalid("end date is before start date");
        }
        if self.timezone.trim().is_empty() {
            return invalid("timezone is required");
        }
        if self.max_matches_per_day == 0 {
            return invalid("max matches per day must be at least 1");
        }
        if self.venue_count == 0 {
            return invalid("at least one venue is required");
        }
        if !(MIN_MATCH_DURATION..=MAX_MATCH_DURATION).contains(&self.avg_match_duration) {
            return Err(TournamentError::InvalidConstraints(format!(
                "average match duration must be between {MIN_MATCH_DURATION} and {MAX_MATCH_DURATION} minutes"
            )));
        }
        if self.buffer_time > MAX_BUFFER_TIME {
            return Err(TournamentError::InvalidConstraints(format!(
                "buffer time must not exceed {MAX_BUFFER_TIME} minutes"
            )));
        }
        for (day, hours) in &self.operational_hours {
            day.parse::<Weekday>().map_err(|_| {
                TournamentError::InvalidConstraints(format!("unknown weekday {day:?} in operational hours"))
            })?;
            hours.window_minutes()?;
        }
        Ok(())
    }

    /// Number of calendar days, both ends included.
    pub fn days(&self) -> u64 {
        let span = (self.end_date - self.start_date).num_days() + 1;
        u64::try_from(span).unwrap_or(0)
    }

    /// Hard ceiling on matches from the daily cap alone.
    pub fn max_possible_matches(&self) -> u64 {
        u64::from(self.max_matches_per_day) * self.days()
    }
}
