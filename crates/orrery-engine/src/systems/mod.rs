pub mod animation;
pub mod lighting;
pub mod picking;
pub mod render;
