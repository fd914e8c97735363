pub mod parallax;
pub mod sections;
pub mod state;
