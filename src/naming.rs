//! Collector-side naming policy.
//!
//! Scanners hand over raw [`Declaration`]s. A [`NamingPolicy`] turns them into
//! [`ConstantRecord`]s, deciding the printed name of each constant. The
//! compiler itself never sees the policy.

use crate::error::{Error, Result};
use crate::record::ConstantRecord;
use serde::Deserialize;

/// Value of a declared constant as resolved by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstValue {
    /// A constant whose underlying type is a signed integer.
    Signed(i64),
    /// A constant whose underlying type is an unsigned integer.
    Unsigned(u64),
    /// Anything else; `kind` names it for error reporting.
    NonInteger { kind: String },
}

/// A constant declaration as found in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: ConstValue,
    /// Text of the trailing line comment, if there is exactly one.
    pub line_comment: Option<String>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: ConstValue) -> Self {
        Self {
            name: name.into(),
            value,
            line_comment: None,
        }
    }

    pub fn with_line_comment(mut self, comment: impl Into<String>) -> Self {
        self.line_comment = Some(comment.into());
        self
    }
}

/// How printed names are derived from declarations.
///
/// ```
/// use stringer_rs::NamingPolicy;
///
/// let policy = NamingPolicy::from_toml("trim_prefix = \"Pill\"").unwrap();
/// assert_eq!(policy.trim_prefix, "Pill");
/// assert!(!policy.line_comment);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingPolicy {
    /// Prefix removed from each constant name.
    pub trim_prefix: String,
    /// Print the line comment instead of the name when one is present.
    pub line_comment: bool,
}

impl NamingPolicy {
    /// Parses a policy from TOML. Missing keys take their defaults.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Returns the printed name for `decl`.
    pub fn printed_name(&self, decl: &Declaration) -> String {
        match &decl.line_comment {
            Some(comment) if self.line_comment => comment.trim().to_owned(),
            _ => decl
                .name
                .strip_prefix(self.trim_prefix.as_str())
                .unwrap_or(decl.name.as_str())
                .to_owned(),
        }
    }

    /// Converts declarations into records, in declaration order.
    ///
    /// Blank identifiers (`_`) are skipped. A non-integer value fails the
    /// whole type.
    pub fn collect<I>(&self, declarations: I) -> Result<Vec<ConstantRecord>>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut records = Vec::new();
        for decl in declarations {
            if decl.name == "_" {
                continue;
            }
            let name = self.printed_name(&decl);
            let record = match decl.value {
                ConstValue::Signed(v) => ConstantRecord::signed(name, v),
                ConstValue::Unsigned(v) => ConstantRecord::unsigned(name, v),
                ConstValue::NonInteger { kind } => {
                    return Err(Error::NonIntegerConstant {
                        name: decl.name,
                        kind,
                    });
                }
            };
            records.push(record);
        }
        Ok(records)
    }
}
