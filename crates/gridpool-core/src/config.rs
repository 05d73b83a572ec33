//! Job configuration parser (`gridpool.toml`).
//!
//! The layout follows the trainer config a job is launched with: a
//! `[trainer]` table describing the cluster, an optional `[placement]`
//! table selecting the policy, and an optional `[reward_model]` table.
//! Device and node counts are kept signed so that bad values reach the
//! placement validator instead of failing at parse time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub trainer: TrainerConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    pub reward_model: Option<RewardModelConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub nnodes: i64,
    pub n_gpus_per_node: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Every role shares one pool spanning the whole cluster.
    #[default]
    Colocated,
    /// Actor/rollout/reference on one half of each node, critic on the other.
    Split,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    pub global_pool: Option<String>,
    pub actor_pool: Option<String>,
    pub critic_pool: Option<String>,
    pub reward_pool: Option<String>,
    /// Role name → pool name, applied after the policy's own bindings.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardModelConfig {
    /// Whether the job runs a reward model at all.
    #[serde(default)]
    pub enable: bool,
    /// Give the reward model its own, independently provisioned pool.
    #[serde(default)]
    pub enable_resource_pool: bool,
    #[serde(default)]
    pub n_gpus_per_node: i64,
    #[serde(default)]
    pub nnodes: i64,
}

impl JobConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: JobConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Whether the reward model asks for a dedicated pool.
    pub fn reward_pool_enabled(&self) -> bool {
        self.reward_model
            .as_ref()
            .is_some_and(|rm| rm.enable_resource_pool)
    }

    /// Scaffold a starter config for a single 8-device node.
    pub fn scaffold(policy: PolicyKind) -> Self {
        JobConfig {
            trainer: TrainerConfig {
                nnodes: 1,
                n_gpus_per_node: 8,
            },
            placement: PlacementConfig {
                policy,
                ..PlacementConfig::default()
            },
            reward_model: Some(RewardModelConfig {
                enable: false,
                enable_resource_pool: false,
                n_gpus_per_node: 0,
                nnodes: 0,
            }),
        }
    }
}
