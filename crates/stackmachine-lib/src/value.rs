//! Bounded stack values.
//!
//! Every value that reaches the stack lies in the inclusive range
//! [`MIN_VALUE`, `MAX_VALUE`]. The only way to obtain a [`Value`] is through a
//! bound-checked constructor or one of the checked arithmetic helpers, so an
//! out-of-range number can never be pushed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest value the stack may hold.
pub const MIN_VALUE: u16 = 0;

/// Largest value the stack may hold.
pub const MAX_VALUE: u16 = 50_000;

/// A stack value within [`MIN_VALUE`, `MAX_VALUE`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u16")]
pub struct Value(u16);

impl Value {
    /// The lower bound as a value.
    pub const MIN: Value = Value(MIN_VALUE);

    /// The upper bound as a value.
    pub const MAX: Value = Value(MAX_VALUE);

    /// Create a value, returning `None` when `n` exceeds [`MAX_VALUE`].
    pub fn new(n: u64) -> Option<Self> {
        if n <= u64::from(MAX_VALUE) {
            u16::try_from(n).ok().map(Value)
        } else {
            None
        }
    }

    /// The underlying number.
    pub const fn get(self) -> u16 {
        self.0
    }

    /// `self + rhs`, failing with [`Error::Overflow`] above the upper bound.
    pub fn checked_add(self, rhs: Value) -> Result<Value> {
        let total = u64::from(self.0) + u64::from(rhs.0);
        Value::new(total).ok_or_else(|| Error::Overflow {
            expression: format!("{} + {} = {}", self, rhs, total),
        })
    }

    /// `self - rhs`, failing with [`Error::NegativeResult`] below zero.
    pub fn checked_sub(self, rhs: Value) -> Result<Value> {
        self.0
            .checked_sub(rhs.0)
            .map(Value)
            .ok_or(Error::NegativeResult {
                minuend: self.0,
                subtrahend: rhs.0,
            })
    }

    /// `self * rhs`, failing with [`Error::Overflow`] above the upper bound.
    pub fn checked_mul(self, rhs: Value) -> Result<Value> {
        let product = u64::from(self.0) * u64::from(rhs.0);
        Value::new(product).ok_or_else(|| Error::Overflow {
            expression: format!("{} * {} = {}", self, rhs, product),
        })
    }

    /// Total of all `values`, failing with [`Error::Overflow`] above the upper bound.
    ///
    /// The total is accumulated in 64 bits, so intermediate sums never wrap
    /// regardless of how many values are summed.
    pub fn checked_sum<I>(values: I) -> Result<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        let (count, total) = values
            .into_iter()
            .fold((0usize, 0u64), |(count, total), value| {
                (count + 1, total + u64::from(value.0))
            });
        Value::new(total).ok_or_else(|| Error::Overflow {
            expression: format!("SUM of {} values = {}", count, total),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Value {
    type Error = Error;

    fn try_from(n: u64) -> Result<Self> {
        Value::new(n).ok_or_else(|| Error::Overflow {
            expression: n.to_string(),
        })
    }
}

impl From<Value> for u16 {
    fn from(value: Value) -> Self {
        value.0
    }
}

impl From<Value> for u32 {
    fn from(value: Value) -> Self {
        u32::from(value.0)
    }
}

impl From<Value> for u64 {
    fn from(value: Value) -> Self {
        u64::from(value.0)
    }
}

impl From<Value> for i64 {
    fn from(value: Value) -> Self {
        i64::from(value.0)
    }
}
