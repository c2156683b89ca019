//! Fare amounts and the per-edge weight pair.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A monetary fare amount, stored in minor currency units (centavos).
///
/// The representation is signed so that negative amounts arriving from
/// malformed fare tables survive loading; routing treats a negative weight
/// as an absent edge instead of applying it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fare(i64);

impl Fare {
    pub const ZERO: Fare = Fare(0);

    pub const fn from_minor(minor: i64) -> Self {
        Fare(minor)
    }

    pub const fn from_major(major: i64) -> Self {
        Fare(major * 100)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Half fare, truncated to the minor unit. Concessionary discounts are
    /// applied by callers to already-computed totals, never inside routing.
    pub const fn halved(self) -> Fare {
        Fare(self.0 / 2)
    }
}

impl Add for Fare {
    type Output = Fare;

    fn add(self, rhs: Fare) -> Fare {
        Fare(self.0 + rhs.0)
    }
}

impl AddAssign for Fare {
    fn add_assign(&mut self, rhs: Fare) {
        self.0 += rhs.0;
    }
}

impl Sum for Fare {
    fn sum<I: Iterator<Item = Fare>>(iter: I) -> Fare {
        iter.fold(Fare::ZERO, Add::add)
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid fare amount: {0:?}")]
pub struct ParseFareError(pub String);

impl FromStr for Fare {
    type Err = ParseFareError;

    /// Accepts plain and two-decimal forms: `"12"`, `"12.5"`, `"12.50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseFareError(s.to_string());
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };
        if whole.is_empty() || frac.len() > 2 {
            return Err(err());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let whole: i64 = whole.parse().map_err(|_| err())?;
        let cents = match frac.len() {
            0 => 0,
            1 => i64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => frac.parse::<i64>().map_err(|_| err())?,
        };
        let minor = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(err)?;
        Ok(Fare(if negative { -minor } else { minor }))
    }
}

impl Serialize for Fare {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            #[allow(clippy::cast_precision_loss)]
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Fare {
    /// Fare tables carry amounts in major units, as integers or decimals.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FareVisitor;

        impl Visitor<'_> for FareVisitor {
            type Value = Fare;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a fare amount in major currency units")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Fare, E> {
                v.checked_mul(100)
                    .map(Fare)
                    .ok_or_else(|| E::custom("fare amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Fare, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Fare)
                    .ok_or_else(|| E::custom("fare amount out of range"))
            }

            #[allow(clippy::cast_possible_truncation)]
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Fare, E> {
                let minor = (v * 100.0).round();
                if minor.is_finite() && (-1e18..=1e18).contains(&minor) {
                    Ok(Fare(minor as i64))
                } else {
                    Err(E::custom("fare amount out of range"))
                }
            }
        }

        deserializer.deserialize_any(FareVisitor)
    }
}

/// The two fare policies a network quotes for every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FarePolicy {
    StoredValueCard,
    SingleJourneyTicket,
}

impl FarePolicy {
    pub const ALL: [FarePolicy; 2] = [FarePolicy::StoredValueCard, FarePolicy::SingleJourneyTicket];
}

impl fmt::Display for FarePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FarePolicy::StoredValueCard => "stored value card",
            FarePolicy::SingleJourneyTicket => "single journey ticket",
        })
    }
}

/// The weight pair carried by every edge: one amount per fare policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareInfo {
    pub stored_value: Fare,
    pub single_journey: Fare,
}

impl FareInfo {
    /// The all-zero pair marking a transfer link.
    pub const TRANSFER: FareInfo = FareInfo {
        stored_value: Fare::ZERO,
        single_journey: Fare::ZERO,
    };

    pub const fn new(stored_value: Fare, single_journey: Fare) -> Self {
        FareInfo {
            stored_value,
            single_journey,
        }
    }

    pub const fn fare(&self, policy: FarePolicy) -> Fare {
        match policy {
            FarePolicy::StoredValueCard => self.stored_value,
            FarePolicy::SingleJourneyTicket => self.single_journey,
        }
    }

    pub const fn is_transfer(&self) -> bool {
        self.stored_value.is_zero() && self.single_journey.is_zero()
    }
}
