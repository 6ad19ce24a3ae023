//! Arbitrary-magnitude numbers for resource gains.
//!
//! Late-game gains overflow `f64` by hundreds of orders of magnitude, so a
//! [`BigNumber`] stores a mantissa and a base-10 exponent. Values that fit
//! comfortably in an `f64` are kept in compact form (exponent 0) so that
//! ordinary quantities survive a round trip exactly.
//!
//! On the wire a `BigNumber` is written as a decimal string (`"2.5e1000"`)
//! and read from either a string or a plain JSON number.

use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest exponent magnitude kept in compact form.
const COMPACT_EXPONENT_LIMIT: i64 = 300;

/// Exponent range printed as a plain decimal by [`Display`](core::fmt::Display).
const PLAIN_DISPLAY_LIMIT: i64 = 16;

/// Error returned when a string is not a valid [`BigNumber`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid number: {input:?}")]
pub struct NumberParseError {
    /// The rejected input.
    pub input: String,
}

/// A number of the form `mantissa * 10^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BigNumber {
    mantissa: f64,
    exponent: i64,
}

impl BigNumber {
    /// Zero.
    pub const ZERO: Self = Self {
        mantissa: 0.0,
        exponent: 0,
    };

    /// Build from an `f64` without loss.
    pub const fn from_f64(value: f64) -> Self {
        Self {
            mantissa: value,
            exponent: 0,
        }
    }

    /// Build from a mantissa and base-10 exponent.
    ///
    /// The result is normalized; if it fits an `f64` it is stored compactly.
    pub fn from_parts(mantissa: f64, exponent: i64) -> Self {
        if exponent == 0 || mantissa == 0.0 || !mantissa.is_finite() {
            return Self::from_f64(mantissa);
        }
        let (m, e) = normalize(mantissa, exponent);
        if e.abs() <= COMPACT_EXPONENT_LIMIT {
            let compact = m * pow10(e);
            if compact.is_finite() && compact != 0.0 {
                return Self::from_f64(compact);
            }
        }
        Self {
            mantissa: m,
            exponent: e,
        }
    }

    /// Split into a mantissa in `[1, 10)` and its exponent.
    ///
    /// Zero and non-finite values return themselves with exponent 0.
    pub fn parts(&self) -> (f64, i64) {
        normalize(self.mantissa, self.exponent)
    }

    /// Convert to `f64`, saturating to infinity or zero out of range.
    pub fn to_f64(&self) -> f64 {
        if self.exponent == 0 {
            return self.mantissa;
        }
        self.mantissa * pow10(self.exponent)
    }

    /// Whether this number is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    /// Whether this number is finite.
    pub const fn is_finite(&self) -> bool {
        self.mantissa.is_finite()
    }

    /// Whether this number is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0.0
    }

    /// Divide by a plain `f64`.
    pub fn div_f64(&self, divisor: f64) -> Self {
        if self.exponent == 0 {
            let quotient = self.mantissa / divisor;
            if quotient.is_finite() || !self.mantissa.is_finite() {
                return Self::from_f64(quotient);
            }
        }
        let (m, e) = self.parts();
        let (dm, de) = normalize(divisor, 0);
        Self::from_parts(m / dm, e.saturating_sub(de))
    }
}

impl From<f64> for BigNumber {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<u32> for BigNumber {
    fn from(value: u32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

impl FromStr for BigNumber {
    type Err = NumberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NumberParseError {
            input: s.to_owned(),
        };
        let trimmed = s.trim();
        match trimmed.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => {
                let mantissa: f64 = mantissa.parse().map_err(|_| invalid())?;
                let exponent: i64 = exponent
                    .strip_prefix('+')
                    .unwrap_or(exponent)
                    .parse()
                    .map_err(|_| invalid())?;
                if let Ok(value) = trimmed.parse::<f64>()
                    && value.is_finite()
                    && (value != 0.0 || mantissa == 0.0)
                {
                    return Ok(Self::from_f64(value));
                }
                Ok(Self::from_parts(mantissa, exponent))
            }
            None => trimmed.parse::<f64>().map(Self::from_f64).map_err(|_| invalid()),
        }
    }
}

impl core::fmt::Display for BigNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (m, e) = self.parts();
        if self.exponent != 0 {
            write!(f, "{m}e{e}")
        } else if e.abs() < PLAIN_DISPLAY_LIMIT {
            write!(f, "{}", self.mantissa)
        } else {
            write!(f, "{:e}", self.mantissa)
        }
    }
}

impl Serialize for BigNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigNumberVisitor)
    }
}

struct BigNumberVisitor;

impl Visitor<'_> for BigNumberVisitor {
    type Value = BigNumber;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<BigNumber, E> {
        Ok(BigNumber::from_f64(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigNumber, E> {
        Ok(BigNumber::from_f64(v as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigNumber, E> {
        Ok(BigNumber::from_f64(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigNumber, E> {
        v.parse().map_err(E::custom)
    }
}

/// `10^exponent`, saturating at the `i32` boundary `powi` accepts.
fn pow10(exponent: i64) -> f64 {
    let clamped = i32::try_from(exponent).unwrap_or(if exponent < 0 { i32::MIN } else { i32::MAX });
    10f64.powi(clamped)
}

/// Bring `mantissa` into `[1, 10)`, adjusting `exponent` to match.
#[allow(clippy::cast_possible_truncation)]
fn normalize(mantissa: f64, exponent: i64) -> (f64, i64) {
    if mantissa == 0.0 || !mantissa.is_finite() {
        return (mantissa, 0);
    }
    let shift = mantissa.abs().log10().floor() as i64;
    // 10^shift underflows to zero for subnormals, so divide in two steps.
    let half = shift.checked_div(2).unwrap_or(0);
    let mut m = mantissa / pow10(half) / pow10(shift.saturating_sub(half));
    let mut e = exponent.saturating_add(shift);
    if m.abs() >= 10.0 {
        m /= 10.0;
        e = e.saturating_add(1);
    } else if m.abs() < 1.0 {
        m *= 10.0;
        e = e.saturating_sub(1);
    }
    (m, e)
}
