use std::cmp::Ordering;

/// A named integer constant of one enumerated type.
///
/// The value is stored as a bit pattern alone. `signed` says whether to read
/// it as an `i64` or a `u64`; ordering is the only place this matters inside
/// the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstantRecord {
    /// The printed name, after any naming policy has been applied.
    pub name: String,
    /// Raw 64-bit pattern of the value.
    pub value: u64,
    /// Whether `value` is a two's complement signed integer.
    pub signed: bool,
}

impl ConstantRecord {
    /// Creates a record for a signed constant.
    pub fn signed(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: value as u64,
            signed: true,
        }
    }

    /// Creates a record for an unsigned constant.
    pub fn unsigned(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
            signed: false,
        }
    }

    /// Compares two records by numeric value.
    ///
    /// Signedness is taken from `self`; records of one type always agree.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        compare_bits(self.value, other.value, self.signed)
    }
}

/// Compares two bit patterns as `i64` or `u64`.
pub(crate) fn compare_bits(a: u64, b: u64, signed: bool) -> Ordering {
    if signed {
        (a as i64).cmp(&(b as i64))
    } else {
        a.cmp(&b)
    }
}

/// Formats a bit pattern as a decimal literal.
pub(crate) fn format_bits(value: u64, signed: bool) -> String {
    if signed {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
