//! Back Aligner: pre-permutes back tiles so they register with their fronts
//! after the printed sheet is flipped for duplex printing.
//!
//! The sheet is flipped about its vertical axis: column order reverses within
//! each row, row order is unchanged. Position `i` in the back layout therefore
//! takes the back whose front sits in the mirrored column of the same row:
//!
//! ```text
//! row      = i / columns
//! c        = i % columns
//! mirrored = row * columns + (columns - c - 1)
//! ```
//!
//! In a partial final row the mirrored index can run past the end of the list.
//! Those slots are dropped (never wrapped or clamped) and the remaining tiles are
//! emitted compactly, so the output can be shorter than the input.

use image::{imageops, RgbImage};

use crate::errors::SheetError;

fn mirrored_index(index: usize, columns: usize) -> usize {
    let row = index / columns;
    let col = index % columns;
    row * columns + (columns - col - 1)
}

/// Reorders `backs` (given in front order) into the layout to print on the back side.
pub fn reorder_for_duplex<T: Clone>(backs: &[T], columns: usize) -> Result<Vec<T>, SheetError> {
    if columns == 0 {
        return Err(SheetError::InvalidColumns(0));
    }

    Ok((0..backs.len())
        .map(|i| mirrored_index(i, columns))
        .filter_map(|mirrored| backs.get(mirrored).cloned())
        .collect())
}

/// Number of slots `reorder_for_duplex` drops for a list of `len` backs.
///
/// Zero whenever `len` is a multiple of `columns`.
pub fn dropped_slots(len: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    (0..len)
        .filter(|&i| mirrored_index(i, columns) >= len)
        .count()
}

/// Mirrors a whole sheet about its vertical axis, as the paper is flipped.
///
/// Applied to the reordered back sheet this puts the tiles back into front
/// order (each tile mirrored). Diagnostic only.
pub fn mirror_horizontal(sheet: &RgbImage) -> RgbImage {
    imageops::flip_horizontal(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::memory::solid;
    use image::Rgb;

    fn make_backs(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("b{i}")).collect()
    }

    fn names(items: &[String]) -> Vec<&str> {
        items.iter().map(String::as_str).collect()
    }

    // ── full rows ───────────────────────────────────────────────────────────

    #[test]
    fn test_reorder_mirrors_each_row() {
        let out = reorder_for_duplex(&make_backs(6), 3).unwrap();
        assert_eq!(names(&out), ["b2", "b1", "b0", "b5", "b4", "b3"]);
    }

    #[test]
    fn test_reorder_is_involution_on_full_rows() {
        let backs = make_backs(8);
        let once = reorder_for_duplex(&backs, 4).unwrap();
        let twice = reorder_for_duplex(&once, 4).unwrap();
        assert_ne!(once, backs);
        assert_eq!(twice, backs);
    }

    #[test]
    fn test_reorder_single_column_is_identity() {
        let backs = make_backs(5);
        assert_eq!(reorder_for_duplex(&backs, 1).unwrap(), backs);
    }

    #[test]
    fn test_reorder_is_deterministic() {
        let backs = make_backs(11);
        assert_eq!(
            reorder_for_duplex(&backs, 4).unwrap(),
            reorder_for_duplex(&backs, 4).unwrap()
        );
    }

    // ── partial final row ───────────────────────────────────────────────────

    #[test]
    fn test_reorder_partial_row_drops_unmatched_slots() {
        let out = reorder_for_duplex(&make_backs(5), 3).unwrap();
        assert_eq!(out.len(), 4, "slot whose mirror is past the end is dropped");
        assert_eq!(names(&out), ["b2", "b1", "b0", "b4"]);
        assert_eq!(dropped_slots(5, 3), 1);
    }

    #[test]
    fn test_reorder_fewer_backs_than_columns() {
        let out = reorder_for_duplex(&make_backs(3), 5).unwrap();
        assert_eq!(names(&out), ["b2"]);
        assert_eq!(dropped_slots(3, 5), 2);
    }

    #[test]
    fn test_reorder_output_is_subset_of_input() {
        let backs = make_backs(13);
        let out = reorder_for_duplex(&backs, 5).unwrap();
        assert_eq!(out.len() + dropped_slots(13, 5), 13);
        let mut seen = std::collections::HashSet::new();
        for item in &out {
            assert!(backs.contains(item));
            assert!(seen.insert(item.clone()), "no back is duplicated");
        }
    }

    #[test]
    fn test_dropped_slots_zero_for_full_rows() {
        assert_eq!(dropped_slots(8, 4), 0);
        assert_eq!(dropped_slots(0, 4), 0);
    }

    // ── edge cases ──────────────────────────────────────────────────────────

    #[test]
    fn test_reorder_empty_is_empty() {
        let out = reorder_for_duplex::<String>(&[], 3).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_reorder_zero_columns_is_invalid() {
        assert!(matches!(
            reorder_for_duplex(&make_backs(3), 0),
            Err(SheetError::InvalidColumns(0))
        ));
    }

    #[test]
    fn test_reorder_keeps_image_handles() {
        let backs = vec![
            solid("x", 2, 2, [0, 0, 0, 255]),
            solid("y", 2, 2, [0, 0, 0, 255]),
        ];
        let out = reorder_for_duplex(&backs, 2).unwrap();
        let out_names: Vec<&str> = out.iter().map(|h| h.name()).collect();
        assert_eq!(out_names, ["y", "x"]);
    }

    // ── mirror_horizontal ───────────────────────────────────────────────────

    #[test]
    fn test_mirror_horizontal_swaps_columns() {
        let mut sheet = RgbImage::from_pixel(4, 1, Rgb([255, 255, 255]));
        sheet.put_pixel(0, 0, Rgb([255, 0, 0]));
        let mirrored = mirror_horizontal(&sheet);
        assert_eq!(*mirrored.get_pixel(3, 0), Rgb([255, 0, 0]));
        assert_eq!(*mirrored.get_pixel(0, 0), Rgb([255, 255, 255]));
    }
}
