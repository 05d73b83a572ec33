pub mod config;

pub use config::{JobConfig, PlacementConfig, PolicyKind, RewardModelConfig, TrainerConfig};
