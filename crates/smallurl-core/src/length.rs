use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Target length class for a generated short id.
///
/// Each class carries the width of the Gaussian pull toward the generator's
/// bias value. A wider bell pulls harder, so earlier classes tend to produce
/// shorter ids. Only the ordering is meaningful; the widths are tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LengthClass {
    VeryShort,
    Short,
    Medium,
    VeryLong,
}

impl LengthClass {
    /// The order in which the shortener escalates after collisions.
    pub const ESCALATION: [LengthClass; 4] = [
        LengthClass::VeryShort,
        LengthClass::Short,
        LengthClass::Medium,
        LengthClass::VeryLong,
    ];

    pub fn deviation(self) -> f64 {
        match self {
            LengthClass::VeryShort => 20_000.0,
            LengthClass::Short => 10_000.0,
            LengthClass::Medium => 2_500.0,
            LengthClass::VeryLong => 1.0,
        }
    }
}

impl Display for LengthClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthClass::VeryShort => write!(f, "very-short"),
            LengthClass::Short => write!(f, "short"),
            LengthClass::Medium => write!(f, "medium"),
            LengthClass::VeryLong => write!(f, "very-long"),
        }
    }
}
