//! Packed name storage.
//!
//! Names are concatenated into a single string (the blob) and delimited by an
//! ascending offset table. Offsets are stored at the narrowest unsigned width
//! able to hold the blob length, so small enumerations pay one byte per name.

use crate::error::{Error, Result};
use crate::record::ConstantRecord;
use crate::run::Run;
use crate::strategy::Strategy;
use ahash::AHashMap as HashMap;

/// Element width of an offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    /// Returns the narrowest width whose range covers `len`.
    pub fn for_len(len: usize) -> Result<Self> {
        if len <= u8::MAX as usize {
            Ok(IndexWidth::U8)
        } else if len <= u16::MAX as usize {
            Ok(IndexWidth::U16)
        } else if u32::try_from(len).is_ok() {
            Ok(IndexWidth::U32)
        } else {
            Err(Error::IndexWidthOverflow { len })
        }
    }

    /// Width in bits.
    pub fn bits(self) -> u32 {
        match self {
            IndexWidth::U8 => 8,
            IndexWidth::U16 => 16,
            IndexWidth::U32 => 32,
        }
    }
}

/// Offsets into a blob, packed at their index width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OffsetTable {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl OffsetTable {
    /// Packs offsets whose last (largest) element fits `width`.
    fn pack(offsets: &[usize], width: IndexWidth) -> Self {
        debug_assert!(
            offsets.windows(2).all(|w| w[0] <= w[1]),
            "Offsets must be ascending"
        );
        match width {
            IndexWidth::U8 => OffsetTable::U8(offsets.iter().map(|&o| o as u8).collect()),
            IndexWidth::U16 => OffsetTable::U16(offsets.iter().map(|&o| o as u16).collect()),
            IndexWidth::U32 => OffsetTable::U32(offsets.iter().map(|&o| o as u32).collect()),
        }
    }

    pub fn width(&self) -> IndexWidth {
        match self {
            OffsetTable::U8(_) => IndexWidth::U8,
            OffsetTable::U16(_) => IndexWidth::U16,
            OffsetTable::U32(_) => IndexWidth::U32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OffsetTable::U8(v) => v.len(),
            OffsetTable::U16(v) => v.len(),
            OffsetTable::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the offset at `index`, widened to `usize`.
    pub fn get(&self, index: usize) -> Option<usize> {
        match self {
            OffsetTable::U8(v) => v.get(index).map(|&o| o as usize),
            OffsetTable::U16(v) => v.get(index).map(|&o| o as usize),
            OffsetTable::U32(v) => v.get(index).map(|&o| o as usize),
        }
    }

    /// Iterates over all offsets, widened to `usize`.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Blob and offset table for one run.
///
/// Holds `len + 1` offsets; member `k` is `blob[offsets[k]..offsets[k + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameTable {
    blob: String,
    offsets: OffsetTable,
}

impl NameTable {
    /// Concatenates the names of `records` in order.
    pub fn build(records: &[ConstantRecord]) -> Result<Self> {
        let mut blob = String::new();
        let mut offsets = Vec::with_capacity(records.len() + 1);
        offsets.push(0);
        for record in records {
            blob.push_str(&record.name);
            offsets.push(blob.len());
        }

        let width = IndexWidth::for_len(blob.len())?;
        Ok(Self {
            offsets: OffsetTable::pack(&offsets, width),
            blob,
        })
    }

    pub fn blob(&self) -> &str {
        &self.blob
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    pub fn width(&self) -> IndexWidth {
        self.offsets.width()
    }

    /// Returns the name of member `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        let start = self.offsets.get(index)?;
        let end = self.offsets.get(index + 1)?;
        self.blob.get(start..end)
    }
}

/// One global blob plus a value to span map, for sparse domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseTable {
    blob: String,
    width: IndexWidth,
    spans: HashMap<u64, (u32, u32)>,
}

impl SparseTable {
    /// Concatenates every member of every run, in run then value order.
    pub fn build(runs: &[Run]) -> Result<Self> {
        let mut blob = String::new();
        let mut spans = HashMap::default();

        for record in runs.iter().flat_map(Run::records) {
            let start = blob.len();
            blob.push_str(&record.name);
            let end = blob.len();
            let to_u32 = |n: usize| u32::try_from(n).map_err(|_| Error::IndexWidthOverflow { len: n });
            spans.insert(record.value, (to_u32(start)?, to_u32(end)?));
        }

        let width = IndexWidth::for_len(blob.len())?;
        Ok(Self { blob, width, spans })
    }

    pub fn blob(&self) -> &str {
        &self.blob
    }

    pub fn width(&self) -> IndexWidth {
        self.width
    }

    /// Number of mapped values.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the `(start, end)` byte span of `value`'s name.
    pub fn span(&self, value: u64) -> Option<(u32, u32)> {
        self.spans.get(&value).copied()
    }

    /// Returns the name for `value`.
    pub fn name(&self, value: u64) -> Option<&str> {
        let (start, end) = self.span(value)?;
        self.blob.get(start as usize..end as usize)
    }
}

/// Name storage for the chosen strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tables {
    /// One table per run, in run order. Used by `OneRun` and `MultiRun`.
    Runs(Vec<NameTable>),
    /// A single global table. Used by `SparseMap`.
    Sparse(SparseTable),
}

impl Tables {
    /// Builds the tables `strategy` needs for `runs`.
    pub fn build(strategy: Strategy, runs: &[Run]) -> Result<Self> {
        match strategy {
            Strategy::OneRun | Strategy::MultiRun => runs
                .iter()
                .map(|run| NameTable::build(run.records()))
                .collect::<Result<Vec<_>>>()
                .map(Tables::Runs),
            Strategy::SparseMap => SparseTable::build(runs).map(Tables::Sparse),
        }
    }

    /// The widest index width among all tables.
    pub fn width(&self) -> IndexWidth {
        match self {
            Tables::Runs(tables) => tables
                .iter()
                .map(NameTable::width)
                .max()
                .unwrap_or(IndexWidth::U8),
            Tables::Sparse(table) => table.width(),
        }
    }
}
