pub mod descriptions;
pub mod game;
pub mod overlay;
pub mod types;
