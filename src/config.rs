//! Configuration constants for the aim trainer.

// Wall
pub const DEFAULT_WALL_WIDTH: f64 = 20.0;
pub const DEFAULT_WALL_HEIGHT: f64 = 15.0;
pub const MIN_WALL_WIDTH: f64 = 3.0;
pub const MIN_WALL_HEIGHT: f64 = 3.0;
pub const MAX_WALL_WIDTH: f64 = 40.0;
pub const MAX_WALL_HEIGHT: f64 = 30.0;

pub const DEFAULT_WALL_DISTANCE: u32 = 20; // Distance from the player's eye to the wall
pub const MIN_WALL_DISTANCE: u32 = 15;
pub const MAX_WALL_DISTANCE: u32 = 50;

// Targets
pub const DEFAULT_TARGET_SIZE: f64 = 1.0; // Target diameter in wall units
pub const MIN_TARGET_SIZE: f64 = 0.1;
pub const MAX_TARGET_SIZE: f64 = 5.0;

pub const DEFAULT_TARGET_COUNT: usize = 10;
pub const MIN_TARGET_COUNT: usize = 1;
pub const MAX_TARGET_COUNT: usize = 30;

// Placement limits
pub const DEFAULT_MIN_DISTANCE: f64 = 2.0; // Center-to-center
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const MAX_MAX_ATTEMPTS: u32 = 30;

// Rendering configuration
pub const WINDOW_WIDTH: i32 = 1200;
pub const WINDOW_HEIGHT: i32 = 800;
pub const HUD_HEIGHT: i32 = 40; // Strip at the top for hits/misses
pub const WALL_MARGIN: f32 = 20.0; // Pixels around the wall
