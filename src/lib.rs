pub mod cli;
pub mod scene;
pub mod stats;
