use serde::{Deserialize, Serialize};
use std::fmt;

/// Money in the smallest currency unit.
///
/// Every price in the crate is carried as `Cents`; absence is `Option<Cents>`.
/// Float math happens only on ratios, and results are rounded back with
/// [`Cents::from_f64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub fn new(value: i64) -> Self {
        Cents(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Rounds to the nearest cent. Non-finite input yields `None`.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Cents(value.round() as i64))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// `self / other`, or `None` when `other` is not positive.
    pub fn ratio_to(&self, other: Cents) -> Option<f64> {
        if other.0 <= 0 {
            return None;
        }
        Some(self.0 as f64 / other.0 as f64)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
