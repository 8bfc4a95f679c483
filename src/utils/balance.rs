//! TORUS/rems conversions with compile-time type safety.
//!
//! All on-chain amounts are in rems (1 TORUS = 1e18 rems) unless explicitly
//! stated otherwise.
//!
//! # Type Safety
//! - [`Rems`] wraps `u128` raw base units.
//! - [`Torus`] wraps `f64` display values.
//! Neither type converts to the other implicitly; conversion direction is
//! explicit at every call site. Query results are only ever converted
//! base -> display; the reverse direction exists for constructing amounts to
//! submit to the chain.
//!
//! # Precision
//! Conversions use exact integer arithmetic where possible:
//! - TORUS -> rems: `rems = (torus * REMS_PER_TORUS) as u128` (truncates toward zero)
//! - rems -> TORUS: `torus = rems as f64 / REMS_PER_TORUS as f64`
//!
//! The 2^53 mantissa limit bounds which integers `f64` can hold exactly; it
//! does not make smaller values safe. Sub-TORUS amounts (a few hundred rems
//! and up) can already truncate on the way back, so the round trip
//! `torus_to_rems(rems_to_torus(x)) == x` must be checked per value with
//! [`is_lossless_conversion`]. Keep arithmetic in `Rems` when exactness
//! matters.

use crate::config::UNIT_NAME;
use crate::errors::{TorusResult, TypeFault};
use scale_value::{Composite, Primitive, Value, ValueDef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// One TORUS in rems (exactly 10^18)
pub const REMS_PER_TORUS: u128 = 1_000_000_000_000_000_000;

/// Maximum exact integer value in f64 (2^53)
const F64_MAX_EXACT_INT: u128 = 9_007_199_254_740_992;

/// An amount in rems, the chain's smallest indivisible unit of value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Rems(pub u128);

impl Rems {
    /// Zero rems.
    pub const ZERO: Self = Self(0);

    /// One TORUS worth of rems.
    pub const PER_TORUS: Self = Self(REMS_PER_TORUS);

    /// Create a `Rems` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw `u128` value in rems.
    pub const fn as_u128(self) -> u128 {
        self.0
    }

    /// Convert to TORUS as `f64`, for display purposes only.
    pub fn to_torus(self) -> f64 {
        rems_to_torus(self.0)
    }

    /// Create from a TORUS `f64` value, truncating toward zero.
    pub fn from_torus(torus: f64) -> Self {
        Self(torus_to_rems(torus))
    }

    /// Whether the raw value is within `f64`'s exact integer range (2^53).
    ///
    /// This does not imply the rems -> TORUS -> rems round trip is exact;
    /// use [`is_lossless_conversion`] for that.
    pub fn is_exactly_representable_as_f64(self) -> bool {
        self.0 <= F64_MAX_EXACT_INT
    }

    /// Checked addition, `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Format as a display string, e.g. `"103.2 TORUS"`.
    pub fn format(self) -> String {
        format_rems(self.0)
    }
}

impl fmt::Display for Rems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_rems(self.0))
    }
}

impl Add for Rems {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl Sub for Rems {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

impl From<u128> for Rems {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

/// An amount in TORUS display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Torus(pub f64);

impl Torus {
    /// Create a `Torus` from an `f64` display amount.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw `f64` display value.
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// Convert to rems, truncating toward zero.
    pub fn as_rems(self) -> Rems {
        Rems(torus_to_rems(self.0))
    }
}

impl fmt::Display for Torus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, UNIT_NAME)
    }
}

/// Convert rems to TORUS.
pub fn rems_to_torus(amount: u128) -> f64 {
    amount as f64 / REMS_PER_TORUS as f64
}

/// Convert TORUS to rems, truncating toward zero.
///
/// Negative, NaN, and infinite inputs clamp to zero; values that would
/// overflow `u128` saturate to `u128::MAX`.
pub fn torus_to_rems(amount: f64) -> u128 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    let rems = amount * REMS_PER_TORUS as f64;
    if rems >= u128::MAX as f64 {
        u128::MAX
    } else {
        rems as u128
    }
}

/// Convert an emission-rate style quantity to TORUS per block, dividing by
/// the subnet tempo in addition to the unit scale.
///
/// A zero tempo yields `0.0` rather than dividing by zero.
pub fn rems_to_torus_per_tempo(amount: u128, tempo: u64) -> f64 {
    if tempo == 0 {
        return 0.0;
    }
    amount as f64 / (REMS_PER_TORUS as f64 * tempo as f64)
}

/// Check whether `x` survives the rems -> TORUS -> rems round trip exactly.
pub fn is_lossless_conversion(x: u128) -> bool {
    torus_to_rems(rems_to_torus(x)) == x
}

/// Format a rems amount as a TORUS display string, e.g. `"103.2 TORUS"`.
///
/// Integral amounts keep one decimal (`"1.0 TORUS"`).
pub fn format_rems(amount: u128) -> String {
    let torus = rems_to_torus(amount);
    if torus.fract() == 0.0 {
        format!("{:.1} {}", torus, UNIT_NAME)
    } else {
        format!("{} {}", torus, UNIT_NAME)
    }
}

/// Rewrite every occurrence of the listed fields, at any nesting depth, from
/// a raw integer amount to its TORUS display string.
///
/// Returns a structurally identical value. A listed field that is present but
/// neither an unsigned integer nor `None` is a [`TypeFault`] naming the
/// field. Fields not present are left alone.
pub fn rewrite_amount_fields(value: &Value, fields: &[&str]) -> TorusResult<Value> {
    match &value.value {
        ValueDef::Composite(composite) => Ok(match rewrite_composite(composite, fields)? {
            Composite::Named(entries) => Value::named_composite(entries),
            Composite::Unnamed(items) => Value::unnamed_composite(items),
        }),
        ValueDef::Variant(variant) => Ok(Value::variant(
            variant.name.clone(),
            rewrite_composite(&variant.values, fields)?,
        )),
        _ => Ok(value.clone()),
    }
}

fn rewrite_composite(composite: &Composite<()>, fields: &[&str]) -> TorusResult<Composite<()>> {
    match composite {
        Composite::Named(entries) => {
            let mut out = Vec::with_capacity(entries.len());
            for (name, inner) in entries {
                let rewritten = if fields.contains(&name.as_str()) {
                    rewrite_amount_leaf(name, inner)?
                } else {
                    rewrite_amount_fields(inner, fields)?
                };
                out.push((name.clone(), rewritten));
            }
            Ok(Composite::Named(out))
        }
        Composite::Unnamed(items) => {
            let out = items
                .iter()
                .map(|inner| rewrite_amount_fields(inner, fields))
                .collect::<TorusResult<Vec<_>>>()?;
            Ok(Composite::Unnamed(out))
        }
    }
}

fn rewrite_amount_leaf(name: &str, value: &Value) -> TorusResult<Value> {
    match &value.value {
        ValueDef::Primitive(Primitive::U128(amount)) => Ok(Value::string(format_rems(*amount))),
        ValueDef::Variant(variant) if variant.name == "None" => Ok(value.clone()),
        _ => Err(TypeFault::new(name, "expected an integer amount or None").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rems_to_torus() {
        assert_eq!(rems_to_torus(0), 0.0);
        assert_eq!(rems_to_torus(REMS_PER_TORUS), 1.0);
        assert_eq!(rems_to_torus(REMS_PER_TORUS / 2), 0.5);
    }

    #[test]
    fn test_torus_to_rems_truncates_toward_zero() {
        assert_eq!(torus_to_rems(1.0), REMS_PER_TORUS);
        assert_eq!(torus_to_rems(0.0), 0);
        assert_eq!(torus_to_rems(-1.5), 0);
        assert_eq!(torus_to_rems(f64::NAN), 0);
        assert_eq!(torus_to_rems(f64::INFINITY), u128::MAX);
    }

    #[test]
    fn test_tempo_scaled_conversion() {
        assert_eq!(rems_to_torus_per_tempo(REMS_PER_TORUS * 100, 100), 1.0);
        assert_eq!(rems_to_torus_per_tempo(REMS_PER_TORUS, 0), 0.0);
    }

    #[test]
    fn test_format_rems() {
        assert_eq!(format_rems(REMS_PER_TORUS), "1.0 TORUS");
        assert_eq!(format_rems(0), "0.0 TORUS");
        let formatted = format_rems(REMS_PER_TORUS / 10 * 1032);
        assert_eq!(formatted, "103.2 TORUS");
    }

    #[test]
    fn test_rems_arithmetic() {
        let a = Rems::new(100);
        let b = Rems::new(50);
        assert_eq!(a + b, Rems::new(150));
        assert_eq!(b - a, Rems::ZERO);
        assert_eq!(Rems::new(u128::MAX).checked_add(Rems::new(1)), None);
    }

    #[test]
    fn test_torus_display_amounts() {
        let amount = Torus::new(12.5);
        assert_eq!(amount.as_rems(), Rems::new(REMS_PER_TORUS / 2 * 25));
        assert_eq!(amount.to_string(), "12.5 TORUS");
        assert_eq!(Rems::PER_TORUS.to_torus(), 1.0);
        assert_eq!(Rems::from_torus(2.0), Rems::new(2 * REMS_PER_TORUS));
    }

    #[test]
    fn test_lossless_boundary() {
        assert!(is_lossless_conversion(0));
        assert!(is_lossless_conversion(REMS_PER_TORUS));
        assert!(!is_lossless_conversion(u128::MAX));
    }

    #[test]
    fn test_sub_torus_truncation_is_flagged_as_lossy() {
        // 447 rems is the smallest amount whose TORUS form truncates on the
        // way back, well below the 2^53 integer limit.
        assert!(!is_lossless_conversion(447));
        assert_ne!(torus_to_rems(rems_to_torus(447)), 447);
        for x in 1u128..447 {
            assert!(is_lossless_conversion(x), "expected {} to be lossless", x);
        }
    }

    #[test]
    fn test_rewrite_amount_fields_nested() {
        let value = Value::named_composite([(
            "a",
            Value::named_composite([("cost", Value::u128(REMS_PER_TORUS))]),
        )]);
        let rewritten = rewrite_amount_fields(&value, &["cost"]).unwrap();
        let expected = Value::named_composite([(
            "a",
            Value::named_composite([("cost", Value::string("1.0 TORUS"))]),
        )]);
        assert_eq!(rewritten, expected);
    }

    #[test]
    fn test_rewrite_amount_fields_leaves_other_fields() {
        let value = Value::named_composite([
            ("cost", Value::u128(REMS_PER_TORUS)),
            ("name", Value::string("alpha")),
        ]);
        let rewritten = rewrite_amount_fields(&value, &["cost"]).unwrap();
        let expected = Value::named_composite([
            ("cost", Value::string("1.0 TORUS")),
            ("name", Value::string("alpha")),
        ]);
        assert_eq!(rewritten, expected);
    }

    #[test]
    fn test_rewrite_amount_fields_none_passthrough() {
        let value = Value::named_composite([(
            "cost",
            Value::variant("None", Composite::Unnamed(vec![])),
        )]);
        let rewritten = rewrite_amount_fields(&value, &["cost"]).unwrap();
        assert_eq!(rewritten, value);
    }

    #[test]
    fn test_rewrite_amount_fields_type_fault() {
        let value = Value::named_composite([("cost", Value::string("oops"))]);
        let err = rewrite_amount_fields(&value, &["cost"]).unwrap_err();
        assert!(err.is_type_fault());
        match err {
            crate::errors::TorusError::Type(fault) => assert_eq!(fault.field, "cost"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_whole_torus_round_trip(k in 0u128..2_000u128) {
            // the mantissa of k * 10^18 (k * 5^18 after factoring out the
            // power of two) still fits in 53 bits here, so conversion must
            // be exact in both directions
            let rems = k * REMS_PER_TORUS;
            prop_assert_eq!(rems_to_torus(rems), k as f64);
            prop_assert_eq!(torus_to_rems(rems_to_torus(rems)), rems);
            prop_assert!(is_lossless_conversion(rems));
        }
    }
}
