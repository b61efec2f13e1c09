// src/cell_id/token.rs

//! Text forms of a [`CellId`].
//!
//! The path token spells out the route from the face to the cell: one face
//! digit `0`-`5`, then one child-position digit `0`-`3` per level. A parent's
//! token is therefore a strict prefix of every descendant's token.
//!
//! The hex token is the 16-digit hex form of the id with trailing zero
//! digits removed (`"X"` for the zero id).

use crate::constants::{MAX_LEVEL, NUM_FACES};
use crate::types::{CellId, S2Error};

impl CellId {
  /// Path token of the cell. Invalid ids produce an empty string.
  #[must_use]
  pub fn token(self) -> String {
    if !self.is_valid() {
      return String::new();
    }
    let level = self.level();
    let mut out = String::with_capacity(usize::from(level) + 1);
    out.push(char::from(b'0' + self.face()));
    for l in 1..=level {
      out.push(char::from(b'0' + self.child_position_unchecked(l)));
    }
    out
  }

  /// Parses a path token produced by [`CellId::token`].
  pub fn from_token(token: &str) -> Result<CellId, S2Error> {
    let bytes = token.as_bytes();
    let Some((&face, path)) = bytes.split_first() else {
      return Err(S2Error::TokenInvalid);
    };
    if path.len() > usize::from(MAX_LEVEL) || !(b'0'..b'0' + NUM_FACES).contains(&face) {
      return Err(S2Error::TokenInvalid);
    }
    let mut id = CellId::from_face(face - b'0')?;
    for &digit in path {
      if !(b'0'..=b'3').contains(&digit) {
        return Err(S2Error::TokenInvalid);
      }
      id = id.child_unchecked(digit - b'0');
    }
    Ok(id)
  }

  /// Hex token of the id.
  #[must_use]
  pub fn hex_token(self) -> String {
    if self.0 == 0 {
      return "X".to_string();
    }
    let hex = format!("{:016x}", self.0);
    hex.trim_end_matches('0').to_string()
  }

  /// Parses a hex token produced by [`CellId::hex_token`]. The result must be
  /// a valid cell.
  pub fn from_hex_token(token: &str) -> Result<CellId, S2Error> {
    if token.is_empty() || token.len() > 16 {
      return Err(S2Error::TokenInvalid);
    }
    let value = u64::from_str_radix(token, 16).map_err(|_| S2Error::TokenInvalid)?;
    let id = CellId(value << (4 * (16 - token.len())));
    if id.is_valid() {
      Ok(id)
    } else {
      Err(S2Error::TokenInvalid)
    }
  }
}
