// src/coords/hilbert.rs

//! Hilbert-curve lookup tables.
//!
//! Each table step converts 4 bits of `i` and 4 bits of `j` (plus the current
//! curve orientation) into 8 bits of curve position and the orientation of
//! the next step, or back.

use crate::constants::{INVERT_MASK, LOOKUP_BITS, SWAP_MASK};

/// `(i, j)` quadrant, encoded as `2 * i + j`, of each child position for
/// each orientation.
pub(crate) const POS_TO_IJ: [[usize; 4]; 4] = [
  [0, 1, 3, 2], // canonical order
  [0, 2, 3, 1], // axes swapped
  [3, 2, 0, 1], // bits inverted
  [3, 1, 0, 2], // swapped and inverted
];

/// Orientation change applied when descending into each child position.
pub(crate) const POS_TO_ORIENTATION: [u8; 4] = [SWAP_MASK, 0, 0, INVERT_MASK | SWAP_MASK];

const TABLE_SIZE: usize = 1 << (2 * LOOKUP_BITS + 2);

const fn build_tables() -> ([u16; TABLE_SIZE], [u16; TABLE_SIZE]) {
  let bits = LOOKUP_BITS as usize;
  let mut lookup_pos = [0u16; TABLE_SIZE];
  let mut lookup_ij = [0u16; TABLE_SIZE];
  let mut start = 0;
  while start < 4 {
    let mut pos = 0;
    while pos < (1 << (2 * bits)) {
      let mut orientation = start;
      let mut i = 0;
      let mut j = 0;
      let mut level = 0;
      while level < bits {
        let digit = (pos >> (2 * (bits - 1 - level))) & 3;
        let quadrant = POS_TO_IJ[orientation][digit];
        i = (i << 1) | (quadrant >> 1);
        j = (j << 1) | (quadrant & 1);
        orientation ^= POS_TO_ORIENTATION[digit] as usize;
        level += 1;
      }
      let ij = (i << bits) | j;
      lookup_pos[(ij << 2) | start] = ((pos << 2) | orientation) as u16;
      lookup_ij[(pos << 2) | start] = ((ij << 2) | orientation) as u16;
      pos += 1;
    }
    start += 1;
  }
  (lookup_pos, lookup_ij)
}

const TABLES: ([u16; TABLE_SIZE], [u16; TABLE_SIZE]) = build_tables();

/// Indexed by `(i_bits << 6) | (j_bits << 2) | orientation`; yields
/// `(pos_bits << 2) | orientation`.
pub(crate) static LOOKUP_POS: [u16; TABLE_SIZE] = TABLES.0;

/// Indexed by `(pos_bits << 2) | orientation`; yields
/// `(i_bits << 6) | (j_bits << 2) | orientation`.
pub(crate) static LOOKUP_IJ: [u16; TABLE_SIZE] = TABLES.1;
