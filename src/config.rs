// src/config.rs

//! Options for the region coverer and the shape index.

use crate::constants::{DEFAULT_MAX_CELLS, DEFAULT_MAX_EDGES_PER_CELL, MAX_LEVEL};
use crate::types::S2Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controls the granularity and cell count of coverings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CovererOptions {
  /// Coarsest level a covering cell may have (0-30).
  pub min_level: u8,

  /// Finest level a covering cell may have (0-30). Must be at least
  /// `min_level`.
  pub max_level: u8,

  /// Target number of cells. Coverings exceed it only when the region
  /// needs more than `max_cells` cells at `min_level`.
  pub max_cells: usize,
}

impl Default for CovererOptions {
  fn default() -> Self {
    Self {
      min_level: 0,
      max_level: MAX_LEVEL,
      max_cells: DEFAULT_MAX_CELLS,
    }
  }
}

impl CovererOptions {
  #[must_use]
  pub fn new(min_level: u8, max_level: u8, max_cells: usize) -> Self {
    Self {
      min_level,
      max_level,
      max_cells,
    }
  }

  #[must_use]
  pub fn with_min_level(mut self, level: u8) -> Self {
    self.min_level = level;
    self
  }

  #[must_use]
  pub fn with_max_level(mut self, level: u8) -> Self {
    self.max_level = level;
    self
  }

  #[must_use]
  pub fn with_max_cells(mut self, max_cells: usize) -> Self {
    self.max_cells = max_cells;
    self
  }

  /// Checks the level range and the cell budget.
  pub fn validate(&self) -> Result<(), S2Error> {
    if self.max_level > MAX_LEVEL || self.min_level > self.max_level {
      return Err(S2Error::LevelDomain);
    }
    if self.max_cells == 0 {
      return Err(S2Error::OptionInvalid);
    }
    Ok(())
  }
}

/// Controls how finely the shape index subdivides cells around edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexOptions {
  /// A cell holding more edges of one shape than this is subdivided.
  pub max_edges_per_cell: usize,

  /// Cells at this level are never subdivided, whatever their edge count.
  pub max_level: u8,
}

impl Default for IndexOptions {
  fn default() -> Self {
    Self {
      max_edges_per_cell: DEFAULT_MAX_EDGES_PER_CELL,
      max_level: MAX_LEVEL,
    }
  }
}

impl IndexOptions {
  #[must_use]
  pub fn with_max_edges_per_cell(mut self, max_edges: usize) -> Self {
    self.max_edges_per_cell = max_edges;
    self
  }

  #[must_use]
  pub fn with_max_level(mut self, level: u8) -> Self {
    self.max_level = level;
    self
  }

  pub fn validate(&self) -> Result<(), S2Error> {
    if self.max_level > MAX_LEVEL {
      return Err(S2Error::LevelDomain);
    }
    if self.max_edges_per_cell == 0 {
      return Err(S2Error::OptionInvalid);
    }
    Ok(())
  }
}
