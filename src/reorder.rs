//! List-move arithmetic behind drag-and-drop reordering.
//!
//! The store fetches an account's task ids in display order, hands them to
//! [`move_item`], then writes `position = index` for every entry.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("source index {index} out of range for list of {len}")]
    SourceOutOfRange { index: usize, len: usize },

    #[error("target index {index} out of range for list of {len}")]
    TargetOutOfRange { index: usize, len: usize },
}

/// Removes the element at `from` and re-inserts it at `to`.
///
/// `to` is interpreted against the list after removal, so moving index 0 to
/// index 1 in `[a, b, c]` yields `[b, a, c]`. An empty list is left untouched
/// whatever the indices are; otherwise both indices must be below the length
/// and nothing is modified when they are not.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), MoveError> {
    let len = items.len();
    if len == 0 {
        return Ok(());
    }
    if from >= len {
        return Err(MoveError::SourceOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(MoveError::TargetOutOfRange { index: to, len });
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
