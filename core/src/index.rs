//! Index arithmetic shared by string (char) and slice indexing.
//!
//! Nothing here panics: out-of-range positions resolve to `None` or clamp.

/// Resolve a signed index against a length.
///
/// With `wrap`, any index is taken modulo `len` (negative indexes wrap from the
/// end). Without it, negative indexes count from the end once and anything out
/// of range is `None`.
pub(crate) fn resolve(len: usize, index: isize, wrap: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let signed_len = isize::try_from(len).ok()?;
    if wrap {
        return usize::try_from(index.rem_euclid(signed_len)).ok();
    }
    let pos = if index < 0 { signed_len + index } else { index };
    if (0..signed_len).contains(&pos) {
        usize::try_from(pos).ok()
    } else {
        None
    }
}

/// Clamp a signed slice bound into `0..=len`. Negative bounds count from the end.
pub(crate) fn bound(len: usize, index: isize) -> usize {
    if index >= 0 {
        usize::try_from(index).map_or(len, |i| i.min(len))
    } else {
        len.saturating_sub(index.unsigned_abs())
    }
}

/// Insertion point for `add`-style operations.
///
/// `None` appends. Negative positions count from the end; positions past either
/// end clamp.
pub(crate) fn insertion(len: usize, index: Option<isize>) -> usize {
    index.map_or(len, |i| bound(len, i))
}

/// Byte offset of the char at `char_index`, or `s.len()` past the end.
pub(crate) fn byte_offset(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map_or(s.len(), |(offset, _)| offset)
}
