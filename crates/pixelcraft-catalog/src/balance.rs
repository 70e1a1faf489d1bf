//! XP balance analysis of equipment crafting rewards.
//!
//! Equipment with a positive `exp_after_craft` is grouped by
//! `required_level_to_craft`. Each bracket is compared against the progression
//! curve at that level to spot rewards that are too small, too large or
//! inconsistent.

use pixelcraft_common::{ConfigError, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::items::{Item, ItemType};
use crate::progression::ProgressionCurve;

// ============================================================================
// Thresholds
// ============================================================================

/// Ratios that drive bracket status and per-item flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceThresholds {
    /// Spread above `average * ratio` is high variance.
    pub high_variance_ratio: f64,
    /// Average below `level_total * ratio` is too low.
    pub too_low_ratio: f64,
    /// Average above `level_total * ratio` is very high.
    pub very_high_ratio: f64,
    /// Item reward below `average * ratio` is flagged low.
    pub low_reward_ratio: f64,
    /// Item reward above `average * ratio` is flagged high.
    pub high_reward_ratio: f64,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self {
            high_variance_ratio: 0.5,
            too_low_ratio: 0.01,
            very_high_ratio: 0.5,
            low_reward_ratio: 0.5,
            high_reward_ratio: 1.5,
        }
    }
}

impl BalanceThresholds {
    /// Check every ratio is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("high_variance_ratio", self.high_variance_ratio),
            ("too_low_ratio", self.too_low_ratio),
            ("very_high_ratio", self.very_high_ratio),
            ("low_reward_ratio", self.low_reward_ratio),
            ("high_reward_ratio", self.high_reward_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Report Types
// ============================================================================

/// Overall verdict for a level bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceStatus {
    /// No threshold tripped.
    WellBalanced,
    /// Rewards in the bracket differ a lot.
    HighVariance,
    /// Rewards are tiny compared to the XP already earned.
    XpTooLow,
    /// Rewards are large compared to the XP already earned.
    XpVeryHigh,
}

impl BalanceStatus {
    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WellBalanced => "Well balanced",
            Self::HighVariance => "High variance",
            Self::XpTooLow => "XP too low",
            Self::XpVeryHigh => "XP very high",
        }
    }

    /// True for any status other than well balanced.
    #[must_use]
    pub fn needs_attention(self) -> bool {
        self != Self::WellBalanced
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How many crafts at the bracket average reach the next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CraftsEstimate {
    /// A finite number of crafts.
    Finite(u64),
    /// Average reward is zero.
    Unbounded,
}

impl fmt::Display for CraftsEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("∞"),
        }
    }
}

/// Per-item flag relative to its bracket average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardFlag {
    /// Well below average.
    Low,
    /// Near average.
    Normal,
    /// Well above average.
    High,
}

/// One item's reward inside a bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReward {
    /// Item id.
    pub item_id: ItemId,
    /// Name for display.
    pub name: String,
    /// XP granted on craft.
    pub exp_after_craft: u32,
    /// Reward as a percentage of the bracket average, rounded.
    pub percent_of_average: u64,
    /// Low/normal/high flag.
    pub flag: RewardFlag,
}

/// Equipment with no XP reward configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingXp {
    /// Item id.
    pub item_id: ItemId,
    /// Name for display.
    pub name: String,
    /// Level needed to craft.
    pub required_level: u32,
}

/// Analysis of every rewarded item sharing a required level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBracket {
    /// Required crafting level shared by the items.
    pub required_level: u32,
    /// Items in catalog order.
    pub items: Vec<ItemReward>,
    /// Mean reward, rounded.
    pub average_xp: u64,
    /// Smallest reward.
    pub min_xp: u32,
    /// Largest reward.
    pub max_xp: u32,
    /// `max_xp - min_xp`.
    pub spread: u32,
    /// Cumulative XP to reach the required level.
    pub level_total_xp: u64,
    /// XP from the required level to the next.
    pub xp_to_next_level: u64,
    /// Crafts at the average reward needed to level up.
    pub crafts_to_level_up: CraftsEstimate,
    /// `average / level_total * 100`. `None` when the level total is zero.
    pub reward_ratio_percent: Option<f64>,
    /// Verdict.
    pub status: BalanceStatus,
}

impl LevelBracket {
    /// Number of items in the bracket.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Totals across every rewarded item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallXp {
    /// Equipment items in the catalog.
    pub equipment_count: usize,
    /// Equipment items with a reward.
    pub items_with_xp: usize,
    /// Mean reward, rounded.
    pub average_xp: u64,
    /// Smallest reward.
    pub min_xp: u32,
    /// Largest reward.
    pub max_xp: u32,
}

/// Full analysis when at least one item is rewarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceAnalysis {
    /// Brackets in ascending required level.
    pub brackets: Vec<LevelBracket>,
    /// Equipment still missing a reward.
    pub missing_xp: Vec<MissingXp>,
    /// Totals.
    pub overall: OverallXp,
}

/// Result of a balance analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BalanceReport {
    /// The catalog has no items.
    NoItems,
    /// Items exist but none is equipment.
    NoEquipment {
        /// Number of items in the catalog.
        total_items: usize,
    },
    /// Equipment exists but none grants XP.
    NoXpRewards {
        /// Every equipment item.
        missing: Vec<MissingXp>,
    },
    /// At least one item grants XP.
    Analysis(BalanceAnalysis),
}

impl BalanceReport {
    /// The analysis, if there is one.
    #[must_use]
    pub fn analysis(&self) -> Option<&BalanceAnalysis> {
        match self {
            Self::Analysis(analysis) => Some(analysis),
            _ => None,
        }
    }
}

// ============================================================================
// Analysis
// ============================================================================

fn rounded_mean(values: &[u32]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    (sum as f64 / values.len() as f64).round() as u64
}

fn classify(
    spread: u32,
    average: u64,
    level_total: u64,
    thresholds: &BalanceThresholds,
) -> BalanceStatus {
    let average = average as f64;
    let level_total = level_total as f64;

    if average < level_total * thresholds.too_low_ratio {
        return BalanceStatus::XpTooLow;
    }
    if average > level_total * thresholds.very_high_ratio {
        return BalanceStatus::XpVeryHigh;
    }
    if f64::from(spread) > average * thresholds.high_variance_ratio {
        return BalanceStatus::HighVariance;
    }
    BalanceStatus::WellBalanced
}

fn reward_row(item: &Item, xp: u32, average: u64, thresholds: &BalanceThresholds) -> ItemReward {
    let average_f = average as f64;
    let xp_f = f64::from(xp);
    let flag = if xp_f < average_f * thresholds.low_reward_ratio {
        RewardFlag::Low
    } else if xp_f > average_f * thresholds.high_reward_ratio {
        RewardFlag::High
    } else {
        RewardFlag::Normal
    };
    let percent_of_average = if average == 0 {
        0
    } else {
        (xp_f / average_f * 100.0).round() as u64
    };
    ItemReward {
        item_id: item.id.clone(),
        name: item.display_name().to_string(),
        exp_after_craft: xp,
        percent_of_average,
        flag,
    }
}

fn bracket(
    required_level: u32,
    members: &[(&Item, u32)],
    curve: &ProgressionCurve,
    thresholds: &BalanceThresholds,
) -> LevelBracket {
    let rewards: Vec<u32> = members.iter().map(|&(_, xp)| xp).collect();
    let average_xp = rounded_mean(&rewards);
    let min_xp = rewards.iter().copied().min().unwrap_or(0);
    let max_xp = rewards.iter().copied().max().unwrap_or(0);
    let spread = max_xp - min_xp;

    let level_total_xp = curve.total_exp_for_level(required_level);
    let xp_to_next_level = curve.total_exp_for_level(required_level.saturating_add(1)) - level_total_xp;

    let crafts_to_level_up = if average_xp == 0 {
        CraftsEstimate::Unbounded
    } else {
        CraftsEstimate::Finite(xp_to_next_level.div_ceil(average_xp))
    };
    let reward_ratio_percent =
        (level_total_xp > 0).then(|| average_xp as f64 / level_total_xp as f64 * 100.0);

    LevelBracket {
        required_level,
        items: members
            .iter()
            .map(|&(item, xp)| reward_row(item, xp, average_xp, thresholds))
            .collect(),
        average_xp,
        min_xp,
        max_xp,
        spread,
        level_total_xp,
        xp_to_next_level,
        crafts_to_level_up,
        reward_ratio_percent,
        status: classify(spread, average_xp, level_total_xp, thresholds),
    }
}

/// Analyze equipment XP rewards against the curve.
#[must_use]
pub fn balance_report(
    items: &[Item],
    curve: &ProgressionCurve,
    thresholds: &BalanceThresholds,
) -> BalanceReport {
    if items.is_empty() {
        return BalanceReport::NoItems;
    }

    let equipment: Vec<(&Item, u32, u32)> = items
        .iter()
        .filter(|item| item.item_type() == ItemType::Equipment)
        .filter_map(|item| item.crafting_xp().map(|(level, xp)| (item, level, xp)))
        .collect();
    if equipment.is_empty() {
        return BalanceReport::NoEquipment {
            total_items: items.len(),
        };
    }

    let missing_xp: Vec<MissingXp> = equipment
        .iter()
        .filter(|&&(_, _, xp)| xp == 0)
        .map(|&(item, level, _)| MissingXp {
            item_id: item.id.clone(),
            name: item.display_name().to_string(),
            required_level: level,
        })
        .collect();

    let mut grouped: BTreeMap<u32, Vec<(&Item, u32)>> = BTreeMap::new();
    for &(item, level, xp) in equipment.iter().filter(|&&(_, _, xp)| xp > 0) {
        grouped.entry(level).or_default().push((item, xp));
    }
    if grouped.is_empty() {
        return BalanceReport::NoXpRewards { missing: missing_xp };
    }

    let brackets: Vec<LevelBracket> = grouped
        .iter()
        .map(|(&level, members)| bracket(level, members, curve, thresholds))
        .collect();

    let all_rewards: Vec<u32> = grouped.values().flatten().map(|&(_, xp)| xp).collect();
    let overall = OverallXp {
        equipment_count: equipment.len(),
        items_with_xp: all_rewards.len(),
        average_xp: rounded_mean(&all_rewards),
        min_xp: all_rewards.iter().copied().min().unwrap_or(0),
        max_xp: all_rewards.iter().copied().max().unwrap_or(0),
    };

    debug!(
        "Balance report: {} brackets, {} items with XP, {} missing XP",
        brackets.len(),
        overall.items_with_xp,
        missing_xp.len()
    );

    BalanceReport::Analysis(BalanceAnalysis {
        brackets,
        missing_xp,
        overall,
    })
}
