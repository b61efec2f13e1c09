//! Core library constants.

use std::f64::consts;

// Mathematical constants
/// pi
pub const M_PI: f64 = consts::PI;
/// pi / 2.0
pub const M_PI_2: f64 = consts::FRAC_PI_2;
/// 2.0 * PI
pub const M_2PI: f64 = 2.0 * consts::PI;
/// pi / 180
pub const M_PI_180: f64 = consts::PI / 180.0;
/// 180 / pi
pub const M_180_PI: f64 = 180.0 / consts::PI;

/// Epsilon for floating point comparisons. ~0.1mm in degrees.
pub const EPSILON_DEG: f64 = 0.000_000_001;
/// Epsilon for floating point comparisons. ~0.1mm in radians.
pub const EPSILON_RAD: f64 = EPSILON_DEG * M_PI_180;

/// Earth radius in kilometers (mean radius).
pub const EARTH_RADIUS_KM: f64 = 6371.01;

/// Number of cube faces (level 0 cells).
pub const NUM_FACES: u8 = 6;

/// Maximum cell level. Leaf cells are at this level.
pub const MAX_LEVEL: u8 = 30;

/// Number of children of every non-leaf cell.
pub const NUM_CHILDREN: usize = 4;

/// Number of bits reserved for the face.
pub const FACE_BITS: u32 = 3;

/// Number of bits used to encode the position along the Hilbert curve
/// (two bits per level plus the trailing marker bit).
pub const POS_BITS: u32 = 64 - FACE_BITS;

/// Width of the (i, j) grid on each face at the leaf level.
pub const MAX_SIZE: u32 = 1 << MAX_LEVEL;

/// Number of (i, j) bits handled by one Hilbert lookup step.
pub(crate) const LOOKUP_BITS: u32 = 4;

/// Orientation bit: the i and j axes are swapped.
pub(crate) const SWAP_MASK: u8 = 0x01;
/// Orientation bit: both i and j are inverted.
pub(crate) const INVERT_MASK: u8 = 0x02;

/// Maximum error of the triage orientation test for unit-length inputs.
pub(crate) const MAX_DETERMINANT_ERROR: f64 = 1.8274 * f64::EPSILON;

/// Points within this angle of a loop edge are on the boundary of the loop.
pub const BOUNDARY_TOLERANCE_RADS: f64 = 1e-14;

/// Padding (in uv units) applied to cells when deciding which edges a cell
/// must keep in the shape index.
pub const CELL_PADDING_UV: f64 = 1e-12;

/// Slack applied to cap bounds so that boundary points are never pruned.
pub(crate) const CAP_SLACK_CHORD2: f64 = 1e-12;

/// Vertices of a valid loop must have squared norm within this of 1.
pub(crate) const UNIT_LENGTH_TOLERANCE: f64 = 5e-15;

/// Reference direction used as the start of every containment ray.
/// It lies close to the north pole but is unlikely to coincide with any
/// real vertex or edge.
pub(crate) const ORIGIN_XYZ: [f64; 3] = [-0.0099994664350250197, 0.0025924542609324121, 0.99994664350250195];

/// Default cap on the number of cells returned by the coverer.
pub const DEFAULT_MAX_CELLS: usize = 100;

/// Default number of edges a shape may keep in a single index cell before
/// that cell is subdivided.
pub const DEFAULT_MAX_EDGES_PER_CELL: usize = 10;

/// Working-set multiple of `max_cells` above which the coverer stops refining.
pub(crate) const REFINE_FACTOR: usize = 4;
