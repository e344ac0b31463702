//! Gridstream - infinite grid world streamer with pooled chunk slots

pub mod core;
pub mod world;
pub mod generation;
pub mod streaming;
