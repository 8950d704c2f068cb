//! Named width tiers and the pixel thresholds that separate them.

use strum::IntoEnumIterator;

/// Size tiers, narrowest first.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    fn index(self) -> usize {
        self as usize
    }

    /// The next wider tier, `None` for `Xl`.
    pub fn next(self) -> Option<Breakpoint> {
        Breakpoint::iter().nth(self.index() + 1)
    }

    pub fn is_first(self) -> bool {
        self == Breakpoint::Xs
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BreakpointError {
    #[error("breakpoint `{tier}` has invalid width {value}")]
    InvalidWidth { tier: Breakpoint, value: f64 },
    #[error("breakpoint `{upper}` ({upper_value}px) must be wider than `{lower}` ({lower_value}px)")]
    NotIncreasing {
        lower: Breakpoint,
        lower_value: f64,
        upper: Breakpoint,
        upper_value: f64,
    },
    #[error("invalid breakpoint config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw shape of the table as it appears in theme config.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
struct BreakpointValues {
    xs: f64,
    sm: f64,
    md: f64,
    lg: f64,
    xl: f64,
}

/// Minimum width in pixels of every tier. Strictly increasing from `xs` to `xl`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "BreakpointValues", into = "BreakpointValues")]
pub struct BreakpointTable {
    values: [f64; 5],
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            values: [0.0, 600.0, 900.0, 1200.0, 1536.0],
        }
    }
}

impl BreakpointTable {
    pub fn new(xs: f64, sm: f64, md: f64, lg: f64, xl: f64) -> Result<Self, BreakpointError> {
        let values = [xs, sm, md, lg, xl];

        for (tier, value) in Breakpoint::iter().zip(values) {
            if !value.is_finite() || value < 0.0 {
                return Err(BreakpointError::InvalidWidth { tier, value });
            }
        }

        for (lower, upper) in Breakpoint::iter().zip(Breakpoint::iter().skip(1)) {
            let lower_value = values[lower.index()];
            let upper_value = values[upper.index()];
            if upper_value <= lower_value {
                return Err(BreakpointError::NotIncreasing {
                    lower,
                    lower_value,
                    upper,
                    upper_value,
                });
            }
        }

        Ok(Self { values })
    }

    /// Parse a `{"xs":..,"sm":..,"md":..,"lg":..,"xl":..}` document.
    pub fn from_json(json: &str) -> Result<Self, BreakpointError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn value(&self, tier: Breakpoint) -> f64 {
        self.values[tier.index()]
    }

    /// The widest tier whose threshold `width` reaches. Widths below the `xs`
    /// threshold still count as `Xs`.
    pub fn tier_for(&self, width: f64) -> Breakpoint {
        Breakpoint::iter()
            .rev()
            .find(|tier| width >= self.value(*tier))
            .unwrap_or(Breakpoint::Xs)
    }
}

impl TryFrom<BreakpointValues> for BreakpointTable {
    type Error = BreakpointError;

    fn try_from(v: BreakpointValues) -> Result<Self, Self::Error> {
        Self::new(v.xs, v.sm, v.md, v.lg, v.xl)
    }
}

impl From<BreakpointTable> for BreakpointValues {
    fn from(table: BreakpointTable) -> Self {
        let [xs, sm, md, lg, xl] = table.values;
        BreakpointValues { xs, sm, md, lg, xl }
    }
}
