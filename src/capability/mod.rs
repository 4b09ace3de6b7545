//! Bitfield capability model.
//!
//! A closed set of named flags is mapped onto distinct power-of-two bits once at
//! startup. Subjects (guilds, roles, users) then carry a single integer [`FieldValue`]
//! holding the union of their flags, which is what the database persists. This module
//! only interprets and transforms those integers; it never stores them.
//!
//! # Building an assignment
//!
//! [`BitAssignment::build`] hands out `1, 2, 4, ...` in the order the flags are given.
//! [`BitAssignment::from_bits`] accepts an explicit table and validates it. Both reject
//! any table that would let two flags alias each other, so an invalid table can never
//! be observed by a permission check.
//!
//! # Querying
//!
//! Every query accepts anything implementing [`IntoBits`]: a single flag, an array,
//! slice or `Vec` of flags, or pre-resolved [`RawBits`].

use std::fmt;
use thiserror::Error;

/// A closed enumeration of named capabilities.
pub trait Flag: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Position of the variant within [`Flag::ALL`].
    fn index(self) -> usize;

    /// Human readable name, used in listings and logs.
    fn name(self) -> &'static str;
}

/// Integer bitfield for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldValue(i64);

impl FieldValue {
    pub const EMPTY: Self = Self(0);

    pub const fn new(bits: i64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> i64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union of two field values.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl From<i64> for FieldValue {
    fn from(bits: i64) -> Self {
        Self(bits)
    }
}

impl From<FieldValue> for i64 {
    fn from(value: FieldValue) -> Self {
        value.0
    }
}

/// Returns the zero field value.
pub const fn clear() -> FieldValue {
    FieldValue::EMPTY
}

/// Bits that were resolved ahead of time, e.g. read straight from a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBits(pub i64);

/// Reasons a bit assignment is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("flag `{0}` appears more than once")]
    DuplicateFlag(&'static str),

    #[error("flag `{0}` has no bit assigned")]
    MissingFlag(&'static str),

    #[error("flag `{flag}` was assigned {bits}, which is not a positive power of two")]
    InvalidBit { flag: &'static str, bits: i64 },

    #[error("flags `{first}` and `{second}` share bit {bits}")]
    DuplicateBit {
        first: &'static str,
        second: &'static str,
        bits: i64,
    },

    #[error("{count} flags do not fit in a 63-bit field")]
    TooManyFlags { count: usize },
}

/// Mapping of every flag of `F` to its unique bit.
#[derive(Debug, Clone)]
pub struct BitAssignment<F: Flag> {
    /// Indexed by [`Flag::index`].
    bits: Vec<i64>,
    _flag: std::marker::PhantomData<F>,
}

impl<F: Flag> BitAssignment<F> {
    /// Assigns `1 << i` to the i-th flag of `flags`.
    ///
    /// `flags` must name every variant of `F` exactly once.
    pub fn build(flags: &[F]) -> Result<Self, AssignmentError> {
        if flags.len() > 63 {
            return Err(AssignmentError::TooManyFlags { count: flags.len() });
        }

        let pairs: Vec<(F, i64)> = flags
            .iter()
            .enumerate()
            .map(|(position, flag)| (*flag, 1_i64 << position))
            .collect();

        Self::from_bits(&pairs)
    }

    /// Assigns bits in the declaration order of `F`.
    pub fn standard() -> Result<Self, AssignmentError> {
        Self::build(F::ALL)
    }

    /// Validates an explicit flag to bit table.
    pub fn from_bits(pairs: &[(F, i64)]) -> Result<Self, AssignmentError> {
        let mut bits: Vec<Option<i64>> = vec![None; F::ALL.len()];
        let mut owners: Vec<(i64, F)> = Vec::with_capacity(pairs.len());

        for &(flag, value) in pairs {
            if value <= 0 || value & (value - 1) != 0 {
                return Err(AssignmentError::InvalidBit {
                    flag: flag.name(),
                    bits: value,
                });
            }

            let slot = &mut bits[flag.index()];
            if slot.is_some() {
                return Err(AssignmentError::DuplicateFlag(flag.name()));
            }

            if let Some((_, owner)) = owners.iter().find(|(b, _)| *b == value) {
                return Err(AssignmentError::DuplicateBit {
                    first: owner.name(),
                    second: flag.name(),
                    bits: value,
                });
            }

            *slot = Some(value);
            owners.push((value, flag));
        }

        let bits = F::ALL
            .iter()
            .map(|flag| bits[flag.index()].ok_or(AssignmentError::MissingFlag(flag.name())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bits,
            _flag: std::marker::PhantomData,
        })
    }

    /// Bit assigned to `flag`.
    pub fn bit(&self, flag: F) -> i64 {
        self.bits[flag.index()]
    }

    /// OR of the requested flags' bits.
    pub fn mask(&self, flags: impl IntoBits<F>) -> i64 {
        flags.into_bits(self)
    }

    /// Union of every flag.
    pub fn full(&self) -> FieldValue {
        FieldValue(self.bits.iter().fold(0, |acc, bit| acc | bit))
    }

    /// True when every requested flag is set in `value`.
    pub fn has_all(&self, value: FieldValue, flags: impl IntoBits<F>) -> bool {
        let mask = self.mask(flags);
        value.0 & mask == mask
    }

    pub fn grant(&self, value: FieldValue, flags: impl IntoBits<F>) -> FieldValue {
        FieldValue(value.0 | self.mask(flags))
    }

    pub fn revoke(&self, value: FieldValue, flags: impl IntoBits<F>) -> FieldValue {
        FieldValue(value.0 & !self.mask(flags))
    }

    /// Flags set in `value`, in declaration order.
    pub fn list_set(&self, value: FieldValue) -> Vec<F> {
        F::ALL
            .iter()
            .copied()
            .filter(|flag| value.0 & self.bit(*flag) != 0)
            .collect()
    }
}

/// Anything that resolves to a set of bits under an assignment.
pub trait IntoBits<F: Flag> {
    fn into_bits(self, assignment: &BitAssignment<F>) -> i64;
}

impl<F: Flag> IntoBits<F> for F {
    fn into_bits(self, assignment: &BitAssignment<F>) -> i64 {
        assignment.bit(self)
    }
}

impl<F: Flag> IntoBits<F> for &[F] {
    fn into_bits(self, assignment: &BitAssignment<F>) -> i64 {
        self.iter().fold(0, |acc, flag| acc | assignment.bit(*flag))
    }
}

impl<F: Flag, const N: usize> IntoBits<F> for [F; N] {
    fn into_bits(self, assignment: &BitAssignment<F>) -> i64 {
        self.as_slice().into_bits(assignment)
    }
}

impl<F: Flag> IntoBits<F> for Vec<F> {
    fn into_bits(self, assignment: &BitAssignment<F>) -> i64 {
        self.as_slice().into_bits(assignment)
    }
}

impl<F: Flag> IntoBits<F> for RawBits {
    fn into_bits(self, _assignment: &BitAssignment<F>) -> i64 {
        self.0
    }
}

/// Declares a closed flag enum and its shared, validated bit assignment.
///
/// Variants are listed in the order their bits are handed out. The generated
/// `assignment()` is built on first use; call sites are expected to have validated
/// the table at startup through [`flags::verify_flag_tables`].
macro_rules! flag_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::capability::Flag for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl $name {
            /// Process-wide bit table for this flag type.
            pub fn assignment() -> &'static $crate::capability::BitAssignment<Self> {
                static BITS: std::sync::LazyLock<$crate::capability::BitAssignment<$name>> =
                    std::sync::LazyLock::new(|| {
                        $crate::capability::BitAssignment::standard().unwrap_or_else(|e| {
                            panic!(concat!("invalid ", stringify!($name), " bit table: {}"), e)
                        })
                    });

                &BITS
            }
        }
    };
}

pub mod flags;
