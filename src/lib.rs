pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod placement;
pub mod render;
pub mod sensitivity;
pub mod spawner;
pub mod types;
