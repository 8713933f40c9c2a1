//! Binary and two's-complement conversion.
//!
//! Widths are always derived from the exact two's-complement inequality
//! `-2^(w-1) <= n < 2^(w-1)`, evaluated in 128-bit arithmetic so that the
//! `i64` extremes cannot overflow intermediate values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Widest representation any `i64` can need.
pub const MAX_BIT_WIDTH: u32 = 64;

/// Bits per group used by [`format_grouped_default`].
pub const DEFAULT_GROUP_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("binary string must not be empty")]
    Empty,
    #[error("invalid binary digit {found:?} at position {index}")]
    InvalidDigit { index: usize, found: char },
    #[error("bit width {width} is outside 1..={MAX_BIT_WIDTH}")]
    InvalidWidth { width: u32 },
    #[error("{value} does not fit in {width} bits")]
    DoesNotFit { value: i64, width: u32 },
    #[error("{width}-bit value does not fit in a 64-bit integer")]
    Overflow { width: usize },
    #[error("expected a {expected}-bit answer, got {found} bits")]
    WidthMismatch { expected: u32, found: usize },
}

// ============================================================================
// Bits
// ============================================================================

/// A single binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bit {
    #[default]
    Zero,
    One,
}

impl Bit {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }
}

/// An ordered, non-empty run of bits, most significant first.
///
/// Invariant: never empty. Every constructor rejects a zero width, so
/// [`BitSequence::sign_bit`] always has a bit to return.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitSequence(Vec<Bit>);

impl BitSequence {
    /// All-zero sequence of `width` bits.
    pub fn zeros(width: u32) -> Result<Self, DomainError> {
        check_width(width)?;
        Ok(Self(vec![Bit::Zero; width as usize]))
    }

    /// All-zero answer sized for `target` at its minimum width.
    #[must_use]
    pub fn zeros_for(target: i64) -> Self {
        Self(vec![Bit::Zero; minimum_bit_width(target) as usize])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept alongside `len` for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn sign_bit(&self) -> Bit {
        self.0.first().copied().unwrap_or_default()
    }

    /// Flip the bit at `index`. Returns `false` (and changes nothing) when
    /// `index` is out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.0.get_mut(index) {
            Some(bit) => {
                *bit = bit.toggled();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    /// Space-separated groups of `group_size` bits, see [`format_grouped`].
    #[must_use]
    pub fn grouped(&self, group_size: usize) -> String {
        format_grouped(&self.to_string(), group_size)
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for BitSequence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::Empty);
        }
        s.chars()
            .enumerate()
            .map(|(index, found)| {
                Bit::from_char(found).ok_or(DomainError::InvalidDigit { index, found })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<String> for BitSequence {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BitSequence> for String {
    fn from(value: BitSequence) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Canonical representation of a value at its minimum width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryConversion {
    pub decimal: i64,
    pub bits: BitSequence,
    pub bit_width: u32,
    pub signed: bool,
}

fn check_width(width: u32) -> Result<(), DomainError> {
    if width == 0 || width > MAX_BIT_WIDTH {
        return Err(DomainError::InvalidWidth { width });
    }
    Ok(())
}

fn fits_twos_complement(value: i128, width: u32) -> bool {
    let half = 1i128 << (width - 1);
    -half <= value && value < half
}

/// Minimum number of bits needed to represent `n`.
///
/// Non-negative values use the unsigned length (at least one bit, so `0`
/// takes one). Negative values use the smallest `w` with
/// `-2^(w-1) <= n <= 2^(w-1) - 1`, which makes `-1` a single bit.
#[must_use]
pub fn minimum_bit_width(n: i64) -> u32 {
    if n >= 0 {
        return (u64::BITS - n.unsigned_abs().leading_zeros()).max(1);
    }
    let value = i128::from(n);
    let mut width = 1;
    while !fits_twos_complement(value, width) {
        width += 1;
    }
    width
}

/// Caller guarantees `width` is valid and large enough for `value`.
fn encode(value: i64, width: u32) -> BitSequence {
    let raw = if value < 0 {
        ((1i128 << width) + i128::from(value)) as u128
    } else {
        value as u128
    };
    BitSequence(
        (0..width)
            .rev()
            .map(|shift| if (raw >> shift) & 1 == 1 { Bit::One } else { Bit::Zero })
            .collect(),
    )
}

/// Render `n` in exactly `width` bits.
///
/// Non-negative values are plain unsigned binary; negative values are
/// two's complement, i.e. the unsigned rendering of `2^width + n`.
pub fn to_binary(n: i64, width: u32) -> Result<BitSequence, DomainError> {
    check_width(width)?;
    let fits = if n >= 0 {
        (n as u128) < (1u128 << width)
    } else {
        i128::from(n) >= -(1i128 << (width - 1))
    };
    if !fits {
        return Err(DomainError::DoesNotFit { value: n, width });
    }
    Ok(encode(n, width))
}

/// Interpret `bits` as unsigned, or as two's complement when `signed`.
pub fn from_binary(bits: &BitSequence, signed: bool) -> Result<i64, DomainError> {
    let width = bits.len();
    let overflow = DomainError::Overflow { width };

    // Leading sign bits past bit 64 are redundant; the checked fold keeps
    // them as long as the value still fits.
    if signed && bits.sign_bit() == Bit::One {
        let inverted = bits.iter().try_fold(0u128, |acc, bit| {
            acc.checked_mul(2)?
                .checked_add(u128::from(bit.toggled().value()))
        });
        return inverted
            .and_then(|inverted| i128::try_from(inverted).ok())
            .and_then(|inverted| inverted.checked_add(1))
            .and_then(|magnitude| i64::try_from(-magnitude).ok())
            .ok_or(overflow);
    }

    let raw = bits.iter().try_fold(0u128, |acc, bit| {
        acc.checked_mul(2)?.checked_add(u128::from(bit.value()))
    });
    raw.and_then(|raw| i64::try_from(raw).ok()).ok_or(overflow)
}

/// Parse and convert a `'0'`/`'1'` string.
pub fn from_binary_str(s: &str, signed: bool) -> Result<i64, DomainError> {
    from_binary(&s.parse()?, signed)
}

#[must_use]
pub fn is_valid_binary(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c == '0' || c == '1')
}

/// Split `bits` into space-separated groups of `group_size` characters,
/// left to right. A size of zero leaves the input ungrouped.
#[must_use]
pub fn format_grouped(bits: &str, group_size: usize) -> String {
    if group_size == 0 {
        return bits.to_string();
    }
    let chars: Vec<char> = bits.chars().collect();
    chars
        .chunks(group_size)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn format_grouped_default(bits: &str) -> String {
    format_grouped(bits, DEFAULT_GROUP_SIZE)
}

/// Whether `bits` spells `target`.
///
/// Signedness comes from the target, not from the answer: a pattern with a
/// leading one is read unsigned when the target is non-negative.
#[must_use]
pub fn check_answer(bits: &BitSequence, target: i64) -> bool {
    from_binary(bits, target < 0).is_ok_and(|value| value == target)
}

#[must_use]
pub fn describe(n: i64) -> BinaryConversion {
    let bit_width = minimum_bit_width(n);
    BinaryConversion {
        decimal: n,
        bits: encode(n, bit_width),
        bit_width,
        signed: n < 0,
    }
}

/// Explanatory text for a quiz target.
#[must_use]
pub fn hint_for(n: i64) -> &'static str {
    match n {
        0 => "Zero in binary is just 0!",
        1 => "One in binary is just 1!",
        2 => "Two in binary is 10 (1×2¹ + 0×2⁰)",
        4 => "Four in binary is 100 (1×2² + 0×2¹ + 0×2⁰)",
        10 => "Ten in binary is 1010 (1×2³ + 0×2² + 1×2¹ + 0×2⁰)",
        100 => "100 in binary is 1100100 (1×2⁶ + 1×2⁵ + 0×2⁴ + 0×2³ + 1×2² + 0×2¹ + 0×2⁰)",
        128 => "128 in binary is 10000000 (1×2⁷ followed by seven zeros)",
        256 => "256 in binary is 100000000 (1×2⁸ followed by eight zeros)",
        -1 => "Negative one in 1-bit two's complement is 1 (the sign bit alone weighs -2⁰)",
        -10 => "Negative ten in 5-bit two's complement is 10110 (-2⁴ + 2² + 2¹)",
        -128 => "Negative 128 in 8-bit two's complement is 10000000 (-2⁷)",
        _ => "Try converting the number step by step using powers of 2!",
    }
}
