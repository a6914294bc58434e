// Domain layer - Clip semantics and playback rules

pub mod errors;
pub mod model;
pub mod rules;
