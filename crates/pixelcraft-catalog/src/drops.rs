//! Drop table resolution.
//!
//! This module provides:
//! - Probability view: weights normalized into per-entry chances
//! - Resolution: one weighted entry pick, then a uniform amount roll
//! - Expected yield and repeated-roll simulation for balance checks
//!
//! Breaking a resource yields exactly ONE entry. The chance of entry `i` is
//! `weight_i / total_weight`. A table whose total weight is zero has no
//! distribution; resolving it is an error, never a silent pick of entry 0.

use fastrand::Rng;
use pixelcraft_common::{DropError, ItemId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::breakables::DropEntry;

// ============================================================================
// Probability View
// ============================================================================

/// Resolved chance of a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropChance {
    /// Position in the drop table.
    pub index: usize,
    /// Item dropped.
    pub item_id: ItemId,
    /// Raw weight.
    pub weight: u32,
    /// `weight / total_weight`, in [0, 1].
    pub probability: f64,
    /// Probability as a percentage rounded to two decimals.
    pub percent: f64,
    /// Smallest amount dropped.
    pub min_amount: u32,
    /// Largest amount dropped.
    pub max_amount: u32,
}

/// Normalized view of a drop table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbabilityView {
    /// Total weight is positive.
    Distribution {
        /// Sum of all weights.
        total_weight: u64,
        /// One chance per entry, in table order.
        chances: Vec<DropChance>,
    },
    /// Table is empty or every weight is zero.
    NoDistribution,
}

impl ProbabilityView {
    /// True if the table has a usable distribution.
    #[must_use]
    pub fn is_distribution(&self) -> bool {
        matches!(self, Self::Distribution { .. })
    }

    /// Total weight (0 when there is no distribution).
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        match self {
            Self::Distribution { total_weight, .. } => *total_weight,
            Self::NoDistribution => 0,
        }
    }

    /// Per-entry chances (empty when there is no distribution).
    #[must_use]
    pub fn chances(&self) -> &[DropChance] {
        match self {
            Self::Distribution { chances, .. } => chances,
            Self::NoDistribution => &[],
        }
    }

    /// Combined probability of every entry dropping the given item.
    #[must_use]
    pub fn chance_for(&self, item_id: &str) -> f64 {
        self.chances()
            .iter()
            .filter(|c| c.item_id.as_str() == item_id)
            .map(|c| c.probability)
            .sum()
    }
}

/// Sum of all entry weights.
#[must_use]
pub fn total_weight(entries: &[DropEntry]) -> u64 {
    entries.iter().map(|e| u64::from(e.weight)).sum()
}

/// Convert a probability in [0, 1] to a percentage rounded to two decimals.
#[must_use]
pub fn round_percent(probability: f64) -> f64 {
    (probability * 10_000.0).round() / 100.0
}

/// Format a percentage for display, e.g. `"25.00%"`.
#[must_use]
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.2}%")
}

/// Normalize a drop table into per-entry chances.
#[must_use]
pub fn probability_view(entries: &[DropEntry]) -> ProbabilityView {
    let total = total_weight(entries);
    if total == 0 {
        return ProbabilityView::NoDistribution;
    }

    let chances = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let probability = f64::from(entry.weight) / total as f64;
            DropChance {
                index,
                item_id: entry.item_id.clone(),
                weight: entry.weight,
                probability,
                percent: round_percent(probability),
                min_amount: entry.min_amount,
                max_amount: entry.max_amount,
            }
        })
        .collect();

    ProbabilityView::Distribution {
        total_weight: total,
        chances,
    }
}

/// Expected amount of an item per break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedYield {
    /// Item dropped.
    pub item_id: ItemId,
    /// Sum over entries of `probability * (min + max) / 2`.
    pub expected_amount: f64,
}

/// Expected amount per item per break, in first-seen order.
///
/// Returns `None` when the table has no distribution.
#[must_use]
pub fn expected_yield(entries: &[DropEntry]) -> Option<Vec<ExpectedYield>> {
    let view = probability_view(entries);
    if !view.is_distribution() {
        return None;
    }

    let mut yields: Vec<ExpectedYield> = Vec::new();
    for chance in view.chances() {
        let (min, max) = clamp_amounts(chance.min_amount, chance.max_amount);
        let mean = (f64::from(min) + f64::from(max)) / 2.0;
        let amount = chance.probability * mean;
        match yields.iter_mut().find(|y| y.item_id == chance.item_id) {
            Some(existing) => existing.expected_amount += amount,
            None => yields.push(ExpectedYield {
                item_id: chance.item_id.clone(),
                expected_amount: amount,
            }),
        }
    }
    Some(yields)
}

// ============================================================================
// Resolution
// ============================================================================

/// Result of breaking a resource once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropOutcome {
    /// Position of the chosen entry.
    pub entry_index: usize,
    /// Item dropped.
    pub item_id: ItemId,
    /// Amount dropped.
    pub amount: u32,
}

/// Tally of repeated resolutions of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropSimulation {
    /// Number of rolls performed.
    pub rolls: u32,
    /// Times each entry was picked, by table index.
    pub picks: Vec<u32>,
    /// Total amount produced by each entry, by table index.
    pub amounts: Vec<u64>,
}

impl DropSimulation {
    /// Observed pick rate of an entry.
    #[must_use]
    pub fn observed_rate(&self, index: usize) -> f64 {
        if self.rolls == 0 {
            return 0.0;
        }
        self.picks
            .get(index)
            .map_or(0.0, |&p| f64::from(p) / f64::from(self.rolls))
    }

    /// Observed mean amount per roll for an entry.
    #[must_use]
    pub fn mean_amount_per_roll(&self, index: usize) -> f64 {
        if self.rolls == 0 {
            return 0.0;
        }
        self.amounts
            .get(index)
            .map_or(0.0, |&a| a as f64 / f64::from(self.rolls))
    }
}

/// Pick one entry by weight, then roll its amount uniformly in `[min, max]`.
///
/// # Errors
///
/// Returns [`DropError::NoDistribution`] if the table is empty or every
/// weight is zero.
pub fn resolve_drop(entries: &[DropEntry], rng: &mut Rng) -> Result<DropOutcome, DropError> {
    let total = total_weight(entries);
    let no_distribution = DropError::NoDistribution {
        entries: entries.len(),
    };
    if total == 0 {
        warn!("Drop table with {} entries has zero total weight", entries.len());
        return Err(no_distribution);
    }

    let roll = rng.u64(0..total);
    let entry_index = select_entry(entries, roll).ok_or(no_distribution)?;
    let entry = &entries[entry_index];
    let (min, max) = clamp_amounts(entry.min_amount, entry.max_amount);
    let amount = if min == max { min } else { rng.u32(min..=max) };

    Ok(DropOutcome {
        entry_index,
        item_id: entry.item_id.clone(),
        amount,
    })
}

/// Resolve a table `rolls` times and tally the results.
///
/// # Errors
///
/// Returns [`DropError::NoDistribution`] if the table is empty or every
/// weight is zero.
pub fn simulate(entries: &[DropEntry], rolls: u32, rng: &mut Rng) -> Result<DropSimulation, DropError> {
    if total_weight(entries) == 0 {
        return Err(DropError::NoDistribution {
            entries: entries.len(),
        });
    }

    let mut sim = DropSimulation {
        rolls,
        picks: vec![0; entries.len()],
        amounts: vec![0; entries.len()],
    };
    for _ in 0..rolls {
        let outcome = resolve_drop(entries, rng)?;
        sim.picks[outcome.entry_index] += 1;
        sim.amounts[outcome.entry_index] += u64::from(outcome.amount);
    }

    debug!("Simulated {rolls} drops over {} entries", entries.len());
    Ok(sim)
}

/// Owns the random source used for drop resolution.
#[derive(Debug, Clone)]
pub struct DropRoller {
    rng: Rng,
}

impl Default for DropRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DropRoller {
    /// Create a roller seeded from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    /// Create a deterministic roller.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// See [`resolve_drop`].
    ///
    /// # Errors
    ///
    /// Returns [`DropError::NoDistribution`] for a table without weight.
    pub fn roll(&mut self, entries: &[DropEntry]) -> Result<DropOutcome, DropError> {
        resolve_drop(entries, &mut self.rng)
    }

    /// See [`simulate`].
    ///
    /// # Errors
    ///
    /// Returns [`DropError::NoDistribution`] for a table without weight.
    pub fn simulate(&mut self, entries: &[DropEntry], rolls: u32) -> Result<DropSimulation, DropError> {
        simulate(entries, rolls, &mut self.rng)
    }
}

/// Index of the entry whose cumulative weight band contains `roll`.
fn select_entry(entries: &[DropEntry], mut roll: u64) -> Option<usize> {
    for (index, entry) in entries.iter().enumerate() {
        let weight = u64::from(entry.weight);
        if roll < weight {
            return Some(index);
        }
        roll -= weight;
    }
    None
}

/// Clamp an amount range to `1 <= min <= max`.
fn clamp_amounts(min: u32, max: u32) -> (u32, u32) {
    let min = min.max(1);
    (min, max.max(min))
}
