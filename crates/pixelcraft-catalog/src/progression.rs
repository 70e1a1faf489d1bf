//! XP progression curve.
//!
//! XP needed to go from `level - 1` to `level`:
//!
//! ```text
//! required(level) = round(q * min(level, max)^2 + l * min(level, max))
//! ```
//!
//! The cumulative total is precomputed once per configuration, so the inverse
//! (`level_from_exp`) is a binary search.

use pixelcraft_common::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::warn;

/// Highest `max_level` a curve can be built for.
pub const LEVEL_CAP: u32 = 1_000_000;

/// Levels highlighted in progression summaries (plus `max_level`).
pub const MILESTONE_LEVELS: [u32; 4] = [10, 25, 50, 75];

// ============================================================================
// Configuration
// ============================================================================

/// Curve parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Coefficient of the squared term.
    pub quadratic_multiplier: f64,
    /// Coefficient of the linear term.
    pub linear_multiplier: f64,
    /// Level at which the per-level cost stops growing.
    pub max_level: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            quadratic_multiplier: 5.0,
            linear_multiplier: 50.0,
            max_level: 100,
        }
    }
}

impl ProgressionConfig {
    /// Check the parameters describe a usable curve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("quadratic_multiplier", self.quadratic_multiplier),
            ("linear_multiplier", self.linear_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMultiplier { name, value });
            }
        }
        if self.quadratic_multiplier == 0.0 && self.linear_multiplier == 0.0 {
            return Err(ConfigError::FlatCurve);
        }
        // Every later level costs at least as much as level 1
        if (self.quadratic_multiplier + self.linear_multiplier).round() == 0.0 {
            return Err(ConfigError::ZeroFirstLevel {
                quadratic: self.quadratic_multiplier,
                linear: self.linear_multiplier,
            });
        }
        if self.max_level == 0 {
            return Err(ConfigError::ZeroMaxLevel);
        }
        if self.max_level > LEVEL_CAP {
            return Err(ConfigError::MaxLevelTooHigh {
                max_level: self.max_level,
                cap: LEVEL_CAP,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Report Rows
// ============================================================================

/// Progress within the current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Level reached.
    pub level: u32,
    /// XP earned past the start of `level`.
    pub exp_into_level: u64,
    /// XP still needed for `level + 1`. `None` at max level.
    pub exp_to_next: Option<u64>,
    /// Fraction of the current level completed, in [0, 1]. 1 at max level.
    pub fraction: f64,
}

/// One row of the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRow {
    /// Level.
    pub level: u32,
    /// XP to go from the previous level to this one.
    pub required: u64,
    /// Cumulative XP to reach this level.
    pub total: u64,
    /// Increase in total over the previous level.
    pub difference: u64,
}

/// Total XP at a highlighted level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Level.
    pub level: u32,
    /// Cumulative XP to reach it.
    pub total_exp: u64,
}

/// Headline numbers for a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveSummary {
    /// Configured max level.
    pub max_level: u32,
    /// Cumulative XP to reach max level.
    pub total_exp_to_max: u64,
    /// `total_exp_to_max / max_level`, rounded.
    pub average_exp_per_level: u64,
}

// ============================================================================
// Curve
// ============================================================================

/// A validated curve with its cumulative XP table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionCurve {
    config: ProgressionConfig,
    /// `cumulative[level]` is the total XP to reach `level`, for `0..=max_level`.
    cumulative: Vec<u64>,
}

impl Default for ProgressionCurve {
    fn default() -> Self {
        Self::from_valid(ProgressionConfig::default())
    }
}

impl ProgressionCurve {
    /// Build a curve, rejecting unusable parameters.
    pub fn new(config: ProgressionConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!("Rejected progression config: {err}");
            return Err(err);
        }
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ProgressionConfig) -> Self {
        let max = config.max_level;
        let mut cumulative = Vec::with_capacity(max as usize + 1);
        let mut total: u64 = 0;
        cumulative.push(total);
        for level in 1..=max {
            total = total.saturating_add(required_for(&config, level));
            cumulative.push(total);
        }
        Self { config, cumulative }
    }

    /// Parameters the curve was built from.
    #[must_use]
    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Configured max level.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.config.max_level
    }

    /// XP to go from `level - 1` to `level`. Levels past max cost the same as max.
    #[must_use]
    pub fn required_exp_for_level(&self, level: u32) -> u64 {
        required_for(&self.config, level)
    }

    /// Cumulative XP to reach `level` (0 for level 0).
    #[must_use]
    pub fn total_exp_for_level(&self, level: u32) -> u64 {
        let max = self.config.max_level;
        if level <= max {
            return self.cumulative[level as usize];
        }
        let extra = u64::from(level - max).saturating_mul(self.required_exp_for_level(max));
        self.cumulative[max as usize].saturating_add(extra)
    }

    /// Largest level (at most max) whose cumulative total is `<= exp`.
    ///
    /// Zero XP is always level 0.
    #[must_use]
    pub fn level_from_exp(&self, exp: u64) -> u32 {
        if exp == 0 {
            return 0;
        }
        // cumulative[0] == 0, so the partition point is at least 1
        let reached = self.cumulative.partition_point(|&total| total <= exp);
        reached.saturating_sub(1) as u32
    }

    /// Reference inverse that accumulates level by level.
    #[must_use]
    pub fn level_from_exp_linear(&self, exp: u64) -> u32 {
        if exp == 0 {
            return 0;
        }
        let mut level = 0;
        let mut total: u64 = 0;
        while level < self.config.max_level {
            let next = total.saturating_add(self.required_exp_for_level(level + 1));
            if next > exp {
                break;
            }
            total = next;
            level += 1;
        }
        level
    }

    /// Current level and progress toward the next one.
    #[must_use]
    pub fn level_progress(&self, exp: u64) -> LevelProgress {
        let level = self.level_from_exp(exp);
        let start = self.total_exp_for_level(level);
        let exp_into_level = exp - start;

        if level >= self.config.max_level {
            return LevelProgress {
                level,
                exp_into_level,
                exp_to_next: None,
                fraction: 1.0,
            };
        }

        let span = self.required_exp_for_level(level + 1);
        let fraction = if span == 0 {
            1.0
        } else {
            (exp_into_level as f64 / span as f64).min(1.0)
        };
        LevelProgress {
            level,
            exp_into_level,
            exp_to_next: Some(span.saturating_sub(exp_into_level)),
            fraction,
        }
    }

    /// Table rows for the given levels, clamped to `1..=max_level`.
    #[must_use]
    pub fn table(&self, levels: RangeInclusive<u32>) -> Vec<LevelRow> {
        let start = (*levels.start()).max(1);
        let end = (*levels.end()).min(self.config.max_level);
        (start..=end)
            .map(|level| {
                let total = self.total_exp_for_level(level);
                LevelRow {
                    level,
                    required: self.required_exp_for_level(level),
                    total,
                    difference: total - self.total_exp_for_level(level - 1),
                }
            })
            .collect()
    }

    /// Every level from 1 to max.
    #[must_use]
    pub fn full_table(&self) -> Vec<LevelRow> {
        self.table(1..=self.config.max_level)
    }

    /// Totals at the milestone levels that exist on this curve, plus max level.
    #[must_use]
    pub fn milestones(&self) -> Vec<Milestone> {
        let max = self.config.max_level;
        let mut levels: Vec<u32> = MILESTONE_LEVELS.iter().copied().filter(|&l| l < max).collect();
        levels.push(max);
        levels
            .into_iter()
            .map(|level| Milestone {
                level,
                total_exp: self.total_exp_for_level(level),
            })
            .collect()
    }

    /// Total to max level and the average per level.
    #[must_use]
    pub fn summary(&self) -> CurveSummary {
        let max = self.config.max_level;
        let total = self.total_exp_for_level(max);
        CurveSummary {
            max_level: max,
            total_exp_to_max: total,
            average_exp_per_level: (total as f64 / f64::from(max)).round() as u64,
        }
    }
}

fn required_for(config: &ProgressionConfig, level: u32) -> u64 {
    let level = f64::from(level.min(config.max_level));
    let exp = config.quadratic_multiplier * level * level + config.linear_multiplier * level;
    exp.round() as u64
}

/// Render table rows as CSV with a header line.
#[must_use]
pub fn table_to_csv(rows: &[LevelRow]) -> String {
    let mut csv = String::from("Level,XP for Level,Total XP,Difference\n");
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            row.level, row.required, row.total, row.difference
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn curve(q: f64, l: f64, max: u32) -> ProgressionCurve {
        ProgressionCurve::new(ProgressionConfig {
            quadratic_multiplier: q,
            linear_multiplier: l,
            max_level: max,
        })
        .unwrap()
    }

    #[test]
    fn test_default_values() {
        let curve = ProgressionCurve::default();
        assert_eq!(curve.required_exp_for_level(1), 55);
        assert_eq!(curve.required_exp_for_level(10), 1000);
        assert_eq!(curve.total_exp_for_level(0), 0);
        assert_eq!(curve.total_exp_for_level(1), 55);
        assert_eq!(curve.total_exp_for_level(2), 55 + 120);
    }

    #[test]
    fn test_required_clamped_at_max() {
        let curve = curve(5.0, 50.0, 10);
        assert_eq!(curve.required_exp_for_level(11), curve.required_exp_for_level(10));
        assert_eq!(
            curve.total_exp_for_level(12),
            curve.total_exp_for_level(10) + 2 * 1000
        );
    }

    #[test]
    fn test_level_from_exp_boundaries() {
        let curve = ProgressionCurve::default();
        assert_eq!(curve.level_from_exp(0), 0);
        assert_eq!(curve.level_from_exp(54), 0);
        assert_eq!(curve.level_from_exp(55), 1);
        assert_eq!(curve.level_from_exp(174), 1);
        assert_eq!(curve.level_from_exp(175), 2);
        assert_eq!(curve.level_from_exp(u64::MAX), 100);
    }

    #[test]
    fn test_rejects_bad_config() {
        let bad = |q: f64, l: f64, max: u32| {
            ProgressionCurve::new(ProgressionConfig {
                quadratic_multiplier: q,
                linear_multiplier: l,
                max_level: max,
            })
            .unwrap_err()
        };
        assert!(matches!(bad(-1.0, 50.0, 100), ConfigError::InvalidMultiplier { name: "quadratic_multiplier", .. }));
        assert!(matches!(bad(5.0, f64::NAN, 100), ConfigError::InvalidMultiplier { name: "linear_multiplier", .. }));
        assert_eq!(bad(0.0, 0.0, 100), ConfigError::FlatCurve);
        assert_eq!(bad(5.0, 50.0, 0), ConfigError::ZeroMaxLevel);
        assert!(matches!(bad(5.0, 50.0, LEVEL_CAP + 1), ConfigError::MaxLevelTooHigh { .. }));
    }

    #[test]
    fn test_zero_cost_first_level_rejected() {
        let config = ProgressionConfig {
            quadratic_multiplier: 0.1,
            linear_multiplier: 0.0,
            max_level: 100,
        };
        assert!(matches!(
            ProgressionCurve::new(config),
            Err(ConfigError::ZeroFirstLevel { .. })
        ));
    }

    #[test]
    fn test_zero_exp_is_level_zero() {
        // round(0.5) = 1, the smallest accepted first level cost
        let cheap = curve(0.0, 0.5, 100);
        assert_eq!(cheap.required_exp_for_level(1), 1);
        assert_eq!(cheap.level_from_exp(0), 0);
        assert_eq!(cheap.level_from_exp_linear(0), 0);
        assert_eq!(cheap.level_from_exp(1), 1);
        assert!((1..=100).all(|l| cheap.total_exp_for_level(l) > cheap.total_exp_for_level(l - 1)));
    }

    #[test]
    fn test_level_progress() {
        let curve = ProgressionCurve::default();
        let progress = curve.level_progress(55 + 60);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.exp_into_level, 60);
        assert_eq!(progress.exp_to_next, Some(60));
        assert!((progress.fraction - 0.5).abs() < 1e-9);

        let capped = curve.level_progress(u64::MAX / 2);
        assert_eq!(capped.level, 100);
        assert_eq!(capped.exp_to_next, None);
    }

    #[test]
    fn test_table_and_csv() {
        let curve = ProgressionCurve::default();
        let rows = curve.table(0..=3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], LevelRow { level: 1, required: 55, total: 55, difference: 55 });
        assert_eq!(rows[2].total, 55 + 120 + 195);
        assert!(rows.iter().all(|r| r.difference == r.required));

        let csv = table_to_csv(&rows[..1]);
        assert_eq!(csv, "Level,XP for Level,Total XP,Difference\n1,55,55,55\n");
        assert_eq!(curve.full_table().len(), 100);
        assert!(curve.table(150..=200).is_empty());
    }

    #[test]
    fn test_milestones() {
        let levels: Vec<u32> = ProgressionCurve::default().milestones().iter().map(|m| m.level).collect();
        assert_eq!(levels, vec![10, 25, 50, 75, 100]);

        let short = curve(5.0, 50.0, 30);
        let levels: Vec<u32> = short.milestones().iter().map(|m| m.level).collect();
        assert_eq!(levels, vec![10, 25, 30]);
    }

    #[test]
    fn test_summary() {
        let curve = curve(0.0, 10.0, 4);
        // 10 + 20 + 30 + 40
        let summary = curve.summary();
        assert_eq!(summary.total_exp_to_max, 100);
        assert_eq!(summary.average_exp_per_level, 25);
    }

    fn config_strategy() -> impl Strategy<Value = ProgressionConfig> {
        (0.0f64..20.0, 0.0f64..200.0, 1u32..200)
            .prop_filter("level 1 must cost XP", |(q, l, _)| (q + l).round() > 0.0)
            .prop_map(|(q, l, max)| ProgressionConfig {
                quadratic_multiplier: q,
                linear_multiplier: l,
                max_level: max,
            })
    }

    proptest! {
        #[test]
        fn prop_cumulative_recurrence(config in config_strategy(), level in 1u32..400) {
            let curve = ProgressionCurve::new(config).unwrap();
            prop_assert_eq!(
                curve.total_exp_for_level(level),
                curve.total_exp_for_level(level - 1) + curve.required_exp_for_level(level)
            );
        }

        #[test]
        fn prop_inverse_bounds(config in config_strategy(), exp in 0u64..5_000_000) {
            let curve = ProgressionCurve::new(config).unwrap();
            let level = curve.level_from_exp(exp);
            prop_assert!(level <= curve.max_level());
            prop_assert!(curve.total_exp_for_level(level) <= exp);
            if level < curve.max_level() {
                prop_assert!(exp < curve.total_exp_for_level(level + 1));
            }
        }

        #[test]
        fn prop_binary_matches_linear(config in config_strategy(), exp in 0u64..5_000_000) {
            let curve = ProgressionCurve::new(config).unwrap();
            prop_assert_eq!(curve.level_from_exp(exp), curve.level_from_exp_linear(exp));
        }
    }
}
