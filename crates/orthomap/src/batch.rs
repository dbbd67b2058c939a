//! Splitting identifier lists into bounded batches

use std::slice::Chunks;

/// Split `items` into consecutive batches of `size` elements
///
/// The last batch may be shorter. An empty slice yields no batches.
///
/// # Panics
///
/// Panics if `size` is zero.
///
/// # Example
///
/// ```
/// use orthomap::batch::batches;
///
/// let ids = ["TP53", "TERT", "EPCAM"];
/// let split: Vec<_> = batches(&ids, 2).collect();
/// assert_eq!(split, vec![&ids[..2], &ids[2..]]);
/// ```
pub fn batches<T>(items: &[T], size: usize) -> Chunks<'_, T> {
    assert!(size > 0, "batch size must be positive");
    items.chunks(size)
}
