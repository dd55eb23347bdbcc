use crate::error::Result;
use crate::normalize::normalize;
use crate::record::{format_bits, ConstantRecord};
use crate::run::{split_into_runs, Run};
use crate::strategy::Strategy;
use crate::table::{IndexWidth, Tables};

/// The compiled lookup table for one enumerated type.
///
/// Built once by [`TableDescriptor::compile`] and never mutated. Emitters
/// serialize it into a lookup construct; [`TableDescriptor::lookup`] is the
/// reference for what that construct must return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    type_name: String,
    signed: bool,
    strategy: Strategy,
    runs: Vec<Run>,
    tables: Tables,
}

impl TableDescriptor {
    /// Compiles the constants of `type_name` into a descriptor.
    ///
    /// Records may arrive in any order and may repeat values; for a repeated
    /// value the first declared name wins.
    pub fn compile(type_name: &str, records: Vec<ConstantRecord>) -> Result<Self> {
        let records = normalize(type_name, records)?;
        let signed = records[0].signed;

        let runs = split_into_runs(records);
        let strategy = Strategy::select(runs.len());
        let tables = Tables::build(strategy, &runs)?;

        tracing::debug!(
            type_name,
            ?strategy,
            runs = runs.len(),
            width = tables.width().bits(),
            "Compiled name table"
        );

        Ok(Self {
            type_name: type_name.to_owned(),
            signed,
            strategy,
            runs,
            tables,
        })
    }

    /// Display name of the type, used by the fallback form.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Runs in ascending value order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// The widest offset width used by any table.
    pub fn index_width(&self) -> IndexWidth {
        self.tables.width()
    }

    /// Returns the declared name for `value`, if any.
    ///
    /// `value` is a bit pattern, read with the type's signedness.
    pub fn lookup(&self, value: u64) -> Option<&str> {
        match &self.tables {
            // Each run is range tested once, in run order
            Tables::Runs(tables) => self
                .runs
                .iter()
                .zip(tables)
                .find_map(|(run, table)| run.position(value).map(|i| (table, i)))
                .and_then(|(table, i)| table.name(i)),
            Tables::Sparse(table) => table.name(value),
        }
    }

    /// Renders `value` as its name, or as `Type(value)` when it has none.
    pub fn render(&self, value: u64) -> String {
        match self.lookup(value) {
            Some(name) => name.to_owned(),
            None => self.fallback(value),
        }
    }

    /// Renders `value` without consulting any name table.
    pub fn fallback(&self, value: u64) -> String {
        format!("{}({})", self.type_name, format_bits(value, self.signed))
    }
}
