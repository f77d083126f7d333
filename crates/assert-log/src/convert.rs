//! Integer conversions that report when they lose bits, via
//! `checked_assert!`, instead of losing them silently.

use crate::checked_assert;

/// Convert from usize to u32. Overflow is asserted not to happen, but if it
/// does, returns `u32::MAX`.
#[must_use]
pub fn usize_to_u32(n: usize) -> u32 {
  match u32::try_from(n) {
    Ok(x) => x,
    Err(e) => {
      checked_assert!(false, "convert {n} to u32: {e}");
      u32::MAX
    }
  }
}

/// Convert from u32 to usize. Overflow is asserted not to happen, but if it
/// does, returns `usize::MAX`.
#[must_use]
pub fn u32_to_usize(n: u32) -> usize {
  match usize::try_from(n) {
    Ok(x) => x,
    Err(e) => {
      checked_assert!(false, "convert {n} to usize: {e}");
      usize::MAX
    }
  }
}
