//! External/internal zone numbering for one matrix axis.

use std::collections::BTreeSet;

use crate::error::{Axis, MatrixError, Result};

/// Value stored in the internal lookup for external numbers that are not in use.
pub const NOT_MAPPED: isize = -1;

/// Bidirectional map between sparse external zone numbers and dense storage slots.
///
/// The external array keeps position 0 as an unused sentinel so that the
/// `i`-th zone lives at `external[i + 1]`, the layout used by matrix codecs.
/// The internal lookup is sized `max(external) + 1` and holds
/// [`NOT_MAPPED`] for every number that is not a zone.
///
/// # Example
/// ```
/// use zonalfit_matrix::ZoneNumbering;
///
/// let zones = ZoneNumbering::new(vec![1, 2, 5, 7]).unwrap();
/// assert_eq!(zones.len(), 4);
/// assert_eq!(zones.internal(5), Some(2));
/// assert_eq!(zones.internal(3), None);
/// assert_eq!(zones.external(3), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneNumbering {
    /// External numbers, `external[0]` is the sentinel.
    external: Vec<u32>,
    /// `internal[ext]` is the storage slot of `ext`, or `NOT_MAPPED`.
    internal: Vec<isize>,
}

impl ZoneNumbering {
    /// Build a numbering from strictly ascending external numbers.
    pub fn new(externals: Vec<u32>) -> Result<Self> {
        if let Some(pair) = externals.windows(2).find(|w| w[0] >= w[1]) {
            return Err(MatrixError::InvalidExternalNumbers {
                reason: format!(
                    "external numbers must be strictly ascending, found {} before {}",
                    pair[0], pair[1]
                ),
            });
        }

        Ok(Self::from_ascending(externals))
    }

    /// Build the lookup for externals already known to be strictly ascending.
    fn from_ascending(externals: Vec<u32>) -> Self {
        let highest = externals.last().copied().unwrap_or(0) as usize;
        let mut internal = vec![NOT_MAPPED; highest + 1];
        for (slot, &ext) in externals.iter().enumerate() {
            internal[ext as usize] = slot as isize;
        }

        let mut external = Vec::with_capacity(externals.len() + 1);
        external.push(0);
        external.extend(externals);

        Self { external, internal }
    }

    /// Numbering `1..=n`, the default for freshly created matrices.
    pub fn sequential(n: usize) -> Self {
        let external: Vec<u32> = (0..=n as u32).collect();
        let mut internal: Vec<isize> = (0..=n as isize).map(|i| i - 1).collect();
        internal[0] = NOT_MAPPED;
        Self { external, internal }
    }

    /// Build from a codec-style array whose position 0 is the sentinel.
    pub fn from_one_based(externals: &[u32]) -> Result<Self> {
        match externals.split_first() {
            Some((_, rest)) => Self::new(rest.to_vec()),
            None => Err(MatrixError::InvalidExternalNumbers {
                reason: "one-based numbering must contain the sentinel position".to_string(),
            }),
        }
    }

    /// Build from an unordered set of zones.
    pub fn from_set(zones: &BTreeSet<u32>) -> Self {
        // BTreeSet iteration is ascending and unique.
        Self::from_ascending(zones.iter().copied().collect())
    }

    /// Build from an arbitrary slice of zones, sorting and deduplicating it.
    pub fn from_unsorted(zones: &[u32]) -> Self {
        let set: BTreeSet<u32> = zones.iter().copied().collect();
        Self::from_set(&set)
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.external.len() - 1
    }

    /// Returns true if there are no zones.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// External numbers in storage order (without the sentinel).
    pub fn externals(&self) -> &[u32] {
        &self.external[1..]
    }

    /// External numbers with the position-0 sentinel, as codecs expect.
    pub fn one_based(&self) -> &[u32] {
        &self.external
    }

    /// Internal lookup table (`NOT_MAPPED` for unused numbers).
    pub fn internal_lookup(&self) -> &[isize] {
        &self.internal
    }

    /// Highest external number, if any.
    pub fn max_external(&self) -> Option<u32> {
        self.externals().last().copied()
    }

    /// Storage slot for an external number.
    pub fn internal(&self, external: u32) -> Option<usize> {
        match self.internal.get(external as usize) {
            Some(&slot) if slot >= 0 && (slot as usize) < self.len() => Some(slot as usize),
            _ => None,
        }
    }

    /// Storage slot for an external number, faulting when it is not mapped.
    pub fn try_internal(&self, external: u32, axis: Axis) -> Result<usize> {
        self.internal(external)
            .ok_or(MatrixError::InvalidIndex { axis, external })
    }

    /// External number stored at a slot.
    pub fn external(&self, internal: usize) -> Option<u32> {
        self.external.get(internal + 1).copied()
    }

    /// Whether the external number is part of this numbering.
    pub fn contains(&self, external: u32) -> bool {
        self.internal(external).is_some()
    }

    /// Iterate over `(slot, external)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.externals().iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_numbering_lookup() {
        let zones = ZoneNumbering::new(vec![1, 2, 5, 7]).unwrap();
        assert_eq!(zones.one_based(), &[0, 1, 2, 5, 7]);
        assert_eq!(zones.internal_lookup(), &[-1, 0, 1, -1, -1, 2, -1, 3]);
        assert_eq!(zones.internal(7), Some(3));
        assert_eq!(zones.internal(8), None);
        assert_eq!(zones.internal(0), None);
        assert_eq!(zones.external(0), Some(1));
        assert_eq!(zones.external(4), None);
    }

    #[test]
    fn test_sequential_matches_explicit() {
        let seq = ZoneNumbering::sequential(4);
        let explicit = ZoneNumbering::new(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(seq, explicit);
    }

    #[test]
    fn test_rejects_unsorted_and_duplicates() {
        assert!(matches!(
            ZoneNumbering::new(vec![3, 1]),
            Err(MatrixError::InvalidExternalNumbers { .. })
        ));
        assert!(matches!(
            ZoneNumbering::new(vec![1, 1]),
            Err(MatrixError::InvalidExternalNumbers { .. })
        ));
    }

    #[test]
    fn test_one_based_round_trip() {
        let zones = ZoneNumbering::from_one_based(&[0, 10, 20, 30]).unwrap();
        assert_eq!(zones.externals(), &[10, 20, 30]);
        assert_eq!(zones.one_based(), &[0, 10, 20, 30]);
        assert!(ZoneNumbering::from_one_based(&[]).is_err());
    }

    #[test]
    fn test_from_unsorted() {
        let zones = ZoneNumbering::from_unsorted(&[9, 3, 3, 4]);
        assert_eq!(zones.externals(), &[3, 4, 9]);
    }

    #[test]
    fn test_try_internal_reports_axis() {
        let zones = ZoneNumbering::sequential(2);
        let err = zones.try_internal(5, Axis::Column).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidIndex {
                axis: Axis::Column,
                external: 5
            }
        );
    }
}
