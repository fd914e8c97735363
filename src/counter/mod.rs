pub mod animation;
pub mod frames;
