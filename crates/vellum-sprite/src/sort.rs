//! Draw-order sort over the index table.

use vellum_core::profiling::profile_function;

use crate::record::SpriteRecord;

/// Reorder `indices` so the referenced records ascend by [`SortKey`].
///
/// Only the index table moves; `records` is borrowed immutably. The
/// submission sequence is part of the key, so sprites with equal layer and
/// order keep their submission order regardless of the sort algorithm.
///
/// Every entry of `indices` must be a valid slot in `records`.
///
/// [`SortKey`]: crate::record::SortKey
pub fn sort_indices(records: &[SpriteRecord], indices: &mut [u32]) {
    profile_function!();
    let key = |&index: &u32| records[index as usize].sort_key();

    // Frames submitted in paint order are common; skip the sort for them.
    if indices.is_sorted_by_key(key) {
        return;
    }

    indices.sort_by_key(key);
}
