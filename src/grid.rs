/// Canvas geometry and the grid helpers shared by movement and collision.
///
/// Positions are continuous pixels on a 707×685 canvas.  Collision works on
/// 101px-wide columns and exact-pixel rows.

// ── Canvas ────────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 707.0;
pub const CANVAS_HEIGHT: f32 = 685.0;

/// Number of tile columns (and rows) on the board.
pub const COLUMNS: usize = 7;
pub const ROWS: usize = 7;

// ── Grid steps ────────────────────────────────────────────────────────────────

/// Width of one grid cell; also the horizontal player step.
pub const CELL_WIDTH: f32 = 101.0;
/// Drawn height of one tile.
pub const TILE_HEIGHT: f32 = 83.0;
/// Vertical player step.  Every lane, the gate row and the damsel row sit on
/// multiples of this from the player's spawn row.
pub const ROW_STEP: f32 = 81.0;

// ── Player bounds ─────────────────────────────────────────────────────────────

pub const MIN_X: f32 = 0.0;
pub const MAX_X: f32 = 606.0;
pub const MIN_Y: f32 = -30.0;
pub const MAX_Y: f32 = 456.0;

// ── Enemy lanes ───────────────────────────────────────────────────────────────

pub const FIRST_LANE_Y: f32 = 213.0;
pub const LANE_COUNT: u32 = 3;

/// Enemies past this x wrap back to `ENEMY_SPAWN_X`.
pub const ENEMY_WRAP_X: f32 = 808.0;
pub const ENEMY_SPAWN_X: f32 = -101.0;

/// Bound `value` to `[min, max]`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Column index of a pixel x coordinate.
pub fn cell_of(x: f32) -> i32 {
    (x / CELL_WIDTH).floor() as i32
}

/// Pixel y of lane `index` (0-based).
pub fn lane_y(index: u32) -> f32 {
    FIRST_LANE_Y + ROW_STEP * index as f32
}

/// Pixel x of column `index` (0-based).
pub fn column_x(index: u32) -> f32 {
    CELL_WIDTH * index as f32
}
