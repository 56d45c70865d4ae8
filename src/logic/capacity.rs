//! Operational capacity: how many participants fit in the tournament's days, venues, and hours.

use crate::models::{FormatConfig, FormatType, OperationalHours, TournamentConstraints, TournamentError};
use serde::{Deserialize, Serialize};

/// Swiss rounds assumed when the format config does not say.
pub const DEFAULT_SWISS_ROUNDS: u32 = 5;

/// Every intermediate figure of a capacity calculation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CapacityBreakdown {
    pub days: u64,
    /// `max_matches_per_day × days`.
    pub slots_by_daily_cap: u64,
    /// Average opening window over configured weekdays.
    pub daily_operational_minutes: u64,
    pub matches_per_venue_per_day: u64,
    /// `matches_per_venue_per_day × venues × days`.
    pub venue_slots: u64,
    /// The tighter of the two slot counts.
    pub total_match_slots: u64,
    pub capacity: u32,
}

impl CapacityBreakdown {
    /// Run the calculation without rejecting small capacities.
    pub fn compute(constraints: &TournamentConstraints) -> Result<Self, TournamentError> {
        constraints.validate()?;

        let days = constraints.days();
        let slots_by_daily_cap = constraints.max_possible_matches();
        log::debug!(
            "Capacity: {} days x {} matches/day = {} match slots",
            days,
            constraints.max_matches_per_day,
            slots_by_daily_cap
        );

        let daily_operational_minutes = daily_operational_minutes(&constraints.operational_hours)?;
        let slot_length = u64::from(constraints.avg_match_duration) + u64::from(constraints.buffer_time);
        let matches_per_venue_per_day = daily_operational_minutes / slot_length;
        let venue_slots = matches_per_venue_per_day * u64::from(constraints.venue_count) * days;
        log::debug!(
            "Capacity: {} min/day / {} min per match = {} matches per venue per day, {} venue slots",
            daily_operational_minutes,
            slot_length,
            matches_per_venue_per_day,
            venue_slots
        );

        let total_match_slots = slots_by_daily_cap.min(venue_slots);
        if venue_slots < slots_by_daily_cap {
            log::debug!("Venue capacity is more restrictive: {} matches", venue_slots);
        }

        let capacity = participants_for_slots(constraints.format, &constraints.format_config, total_match_slots);
        log::info!(
            "Calculated capacity: {} participants for {} format ({} match slots)",
            capacity,
            constraints.format,
            total_match_slots
        );

        Ok(Self {
            days,
            slots_by_daily_cap,
            daily_operational_minutes,
            matches_per_venue_per_day,
            venue_slots,
            total_match_slots,
            capacity,
        })
    }

    /// As `compute`, rejecting a capacity below 2 with `InvalidConstraints`.
    pub fn supported(constraints: &TournamentConstraints) -> Result<Self, TournamentError> {
        let breakdown = Self::compute(constraints)?;
        if breakdown.capacity < 2 {
            return Err(TournamentError::InvalidConstraints(format!(
                "constraints too restrictive: capacity is {} but at least 2 participants are required",
                breakdown.capacity
            )));
        }
        Ok(breakdown)
    }
}

/// Maximum participant count the constraints support.
///
/// Fails with `InvalidConstraints` when the constraints are malformed or the
/// result is below 2; the caller is expected to adjust and resubmit.
pub fn calculate_capacity(constraints: &TournamentConstraints) -> Result<u32, TournamentError> {
    CapacityBreakdown::supported(constraints).map(|b| b.capacity)
}

/// Integer average of positive opening windows; 0 when none is usable.
fn daily_operational_minutes(hours: &OperationalHours) -> Result<u64, TournamentError> {
    let mut total = 0u64;
    let mut days = 0u64;
    for window in hours.values() {
        let minutes = window.window_minutes()?;
        if minutes > 0 {
            total += minutes.unsigned_abs();
            days += 1;
        }
    }
    Ok(if days == 0 { 0 } else { total / days })
}

/// Invert a format's match count to the largest participant count fitting `slots`.
fn participants_for_slots(format: FormatType, config: &FormatConfig, slots: u64) -> u32 {
    let capacity = match format {
        // n participants need n - 1 matches.
        FormatType::SingleElimination => slots + 1,
        // About 2n - 2 matches.
        FormatType::DoubleElimination => (slots + 2) / 2,
        FormatType::RoundRobin => round_robin_capacity(slots),
        FormatType::GroupToKnockout => match (config.groups(), config.group_size()) {
            (Some(groups), Some(size)) => group_to_knockout_capacity(u64::from(groups), u64::from(size), slots),
            _ => slots / 3,
        },
        FormatType::Swiss => {
            let rounds = config.swiss_rounds().unwrap_or(DEFAULT_SWISS_ROUNDS);
            slots * 2 / u64::from(rounds)
        }
        FormatType::Custom => slots / 3,
    };
    u32::try_from(capacity).unwrap_or(u32::MAX)
}

/// Largest n with n(n-1)/2 <= slots.
fn round_robin_capacity(slots: u64) -> u64 {
    let discriminant = 1.0 + 8.0 * slots as f64;
    let mut n = ((1.0 + discriminant.sqrt()) / 2.0).floor() as u64;
    while n > 0 && n * (n - 1) / 2 > slots {
        n -= 1;
    }
    n
}

/// Group round robins plus a knockout among the top two of each group.
fn group_to_knockout_capacity(groups: u64, size: u64, slots: u64) -> u64 {
    // Saturating: group values are not bounded by validation.
    let group_matches = groups.saturating_mul(size.saturating_mul(size.saturating_sub(1)) / 2);
    let knockout_matches = groups.saturating_mul(2).saturating_sub(1);
    let required = group_matches.saturating_add(knockout_matches);
    let full = groups.saturating_mul(size);
    if required <= slots {
        full
    } else {
        full.saturating_mul(slots) / required
    }
}
