//! Fixed-point helpers and per-stat clamp bounds.
//!
//! All derivation and combat math is integer arithmetic: weights are stored in
//! hundredths and multipliers in percent, and the final division rounds half
//! away from zero. Results are identical on every platform.

use crate::config::BattleConfig;

/// Clamp bounds for a stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Attack and defense values never drop below 1.
    pub const COMBAT: Self = Self {
        min: 1,
        max: i32::MAX,
    };

    pub const HEALTH: Self = Self {
        min: 10,
        max: i32::MAX,
    };

    pub const INITIATIVE: Self = Self {
        min: 0,
        max: i32::MAX,
    };

    pub const CRITICAL: Self = Self {
        min: 0,
        max: BattleConfig::CRITICAL_CAP,
    };

    pub const DODGE: Self = Self {
        min: 0,
        max: BattleConfig::DODGE_CAP,
    };

    pub const ENERGY_COST: Self = Self {
        min: 1,
        max: i32::MAX,
    };

    /// Clamp a value into these bounds.
    pub const fn clamp(&self, value: i64) -> i32 {
        if value < self.min as i64 {
            self.min
        } else if value > self.max as i64 {
            self.max
        } else {
            value as i32
        }
    }
}

/// Integer division rounding half away from zero.
///
/// A zero denominator yields 0.
pub const fn div_round(numerator: i64, denominator: i64) -> i64 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    if n >= 0 {
        (n + d / 2) / d
    } else {
        -((-n + d / 2) / d)
    }
}

/// [`div_round`] over 128-bit intermediates, saturated into the `i32`
/// range every stat is stored in.
///
/// Used where products of attributes and multipliers can exceed `i64`.
pub const fn div_round_saturating(numerator: i128, denominator: i128) -> i64 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    let rounded = if n >= 0 {
        (n + d / 2) / d
    } else {
        -((-n + d / 2) / d)
    };
    if rounded > i32::MAX as i128 {
        i32::MAX as i64
    } else if rounded < i32::MIN as i128 {
        i32::MIN as i64
    } else {
        rounded as i64
    }
}

/// Scale a value by a percentage, rounding half away from zero.
pub const fn scale_pct(value: i64, pct: i64) -> i64 {
    div_round(value * pct, 100)
}
