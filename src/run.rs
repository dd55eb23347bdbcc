use crate::record::{compare_bits, ConstantRecord};
use std::cmp::Ordering;

/// A maximal sequence of constants with consecutive values.
///
/// Never empty. Adjacent members differ by exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    records: Vec<ConstantRecord>,
}

impl Run {
    /// Returns the members in ascending value order.
    pub fn records(&self) -> &[ConstantRecord] {
        &self.records
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; runs are never empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bit pattern of the smallest member.
    pub fn min(&self) -> u64 {
        self.records[0].value
    }

    /// Bit pattern of the largest member.
    pub fn max(&self) -> u64 {
        self.records[self.records.len() - 1].value
    }

    /// Whether the members are signed.
    pub fn signed(&self) -> bool {
        self.records[0].signed
    }

    /// Whether `value` lies within `[min, max]`.
    pub fn contains(&self, value: u64) -> bool {
        let signed = self.signed();
        compare_bits(self.min(), value, signed) != Ordering::Greater
            && compare_bits(value, self.max(), signed) != Ordering::Greater
    }

    /// Position of `value` within the run, if it is a member.
    pub fn position(&self, value: u64) -> Option<usize> {
        if !self.contains(value) {
            return None;
        }
        usize::try_from(value.wrapping_sub(self.min())).ok()
    }
}

/// Breaks normalized records into runs of contiguous values.
///
/// For example, 1,2,3,5,6,7 becomes {1,2,3},{5,6,7}. Adjacency is checked
/// on the bit pattern with wrapping arithmetic, so a signed -1 runs into 0.
/// The input must be sorted and free of duplicates.
pub fn split_into_runs(records: Vec<ConstantRecord>) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Vec<ConstantRecord> = Vec::new();

    for record in records {
        if let Some(last) = current.last() {
            if record.value != last.value.wrapping_add(1) {
                runs.push(Run {
                    records: std::mem::take(&mut current),
                });
            }
        }
        current.push(record);
    }

    if !current.is_empty() {
        runs.push(Run { records: current });
    }

    tracing::trace!(runs = runs.len(), "Split constants into runs");
    runs
}
