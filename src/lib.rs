//! # stringer-rs - Constant Name Table Compiler
//!
//! Compiles the named integer constants of one enumerated type into a compact
//! lookup table that renders any value of the type to its declared name.
//!
//! Compilation is a linear pipeline:
//! 1. **Normalize**: stable sort by value (signed or unsigned), then drop
//!    duplicate values, keeping the first declared name
//! 2. **Partition**: split into maximal runs of consecutive values
//! 3. **Select**: one run is indexed directly, up to ten runs use range tests,
//!    anything sparser uses a map
//! 4. **Build**: concatenate names into blobs delimited by offset tables of the
//!    narrowest width that fits
//!
//! ## Example
//!
//! ```
//! use stringer_rs::{ConstantRecord, Strategy, TableDescriptor};
//!
//! let records = vec![
//!     ConstantRecord::unsigned("A", 0),
//!     ConstantRecord::unsigned("B", 1),
//!     ConstantRecord::unsigned("C", 2),
//! ];
//! let table = TableDescriptor::compile("Letter", records).unwrap();
//!
//! assert_eq!(table.strategy(), Strategy::OneRun);
//! assert_eq!(table.render(1), "B");
//! assert_eq!(table.render(5), "Letter(5)");
//! ```

mod descriptor;
mod emit;
mod error;
mod naming;
mod normalize;
mod record;
mod run;
mod strategy;
mod table;


pub use descriptor::TableDescriptor;
pub use emit::{Emit, GoEmitter, VERSION};
pub use error::{Error, Result};
pub use naming::{ConstValue, Declaration, NamingPolicy};
pub use normalize::normalize;
pub use record::ConstantRecord;
pub use run::{split_into_runs, Run};
pub use strategy::{Strategy, MAX_SWITCH_RUNS};
pub use table::{IndexWidth, NameTable, OffsetTable, SparseTable, Tables};
