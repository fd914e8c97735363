pub mod geometry;
pub mod watcher;
