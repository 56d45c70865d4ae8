//! Seeding: order participants by the chosen method and number them 1..n.

use crate::models::{ManualSeed, Participant, ParticipantId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// How participants are ranked before fixtures are built.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingMethod {
    /// Organizer-provided seeds; unseeded participants follow by name.
    Manual,
    Random,
    /// No rating source exists yet, so this orders by name.
    Skill,
    /// Keep the registration order and any seeds already present.
    #[default]
    #[serde(other)]
    AsRegistered,
}

/// Reorder `participants` in place and stamp seeds 1..n (except `AsRegistered`).
///
/// Only the order of the slice and each participant's `seed` change.
pub fn apply_seeding<R: Rng + ?Sized>(
    participants: &mut [Participant],
    method: SeedingMethod,
    manual_seeds: &[ManualSeed],
    rng: &mut R,
) {
    match method {
        SeedingMethod::Manual => {
            let seeds = manual_seed_map(participants, manual_seeds);
            participants.sort_by(|a, b| match (seeds.get(&a.id), seeds.get(&b.id)) {
                (Some(x), Some(y)) => x.cmp(y).then_with(|| a.name.cmp(&b.name)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.name.cmp(&b.name),
            });
        }
        SeedingMethod::Random => participants.shuffle(rng),
        SeedingMethod::Skill => {
            log::info!("Skill seeding has no rating source; ordering by name");
            participants.sort_by(|a, b| a.name.cmp(&b.name));
        }
        SeedingMethod::AsRegistered => return,
    }

    for (i, p) in participants.iter_mut().enumerate() {
        p.seed = Some(i as u32 + 1);
    }
}

fn manual_seed_map(participants: &[Participant], manual_seeds: &[ManualSeed]) -> HashMap<ParticipantId, u32> {
    let mut seeds = HashMap::with_capacity(manual_seeds.len());
    for entry in manual_seeds {
        if participants.iter().any(|p| p.id == entry.participant_id) {
            seeds.insert(entry.participant_id, entry.seed);
        } else {
            log::warn!("Ignoring manual seed {} for unknown participant {}", entry.seed, entry.participant_id);
        }
    }
    seeds
}

/// Participants by seed rank: seeded ones ascending, unseeded after them in slice order.
pub(crate) fn seed_order(participants: &[Participant]) -> Vec<&Participant> {
    let mut ranked: Vec<&Participant> = participants.iter().collect();
    // Stable, so equal or missing seeds keep slice order.
    ranked.sort_by_key(|p| p.seed.map_or((1, 0), |s| (0, s)));
    ranked
}
