//! Type conversions from job configuration to placement types.
//!
//! Bridges `gridpool_core::JobConfig` to [`ClusterShape`],
//! [`PlacementPolicy`], [`PoolNames`] and role overrides.

use gridpool_core::{JobConfig, PolicyKind};

use crate::error::{PlacementError, PlacementResult};
use crate::manager::PlacementPlan;
use crate::placer::compute_placement_with_names;
use crate::types::{AuxiliaryPoolRequest, ClusterShape, PlacementPolicy, PoolNames, Role};

/// Read the primary cluster shape from `[trainer]`.
pub fn cluster_from_config(config: &JobConfig) -> PlacementResult<ClusterShape> {
    let nodes = positive(config.trainer.nnodes).ok_or_else(|| {
        PlacementError::InvalidClusterShape(format!(
            "trainer.nnodes must be greater than 0, got {}",
            config.trainer.nnodes
        ))
    })?;
    let devices = positive(config.trainer.n_gpus_per_node).ok_or_else(|| {
        PlacementError::InvalidClusterShape(format!(
            "trainer.n_gpus_per_node must be greater than 0, got {}",
            config.trainer.n_gpus_per_node
        ))
    })?;
    ClusterShape::new(nodes, devices)
}

/// Combine the policy kind with the optional dedicated reward pool.
pub fn policy_from_config(config: &JobConfig) -> PlacementResult<PlacementPolicy> {
    let auxiliary = match &config.reward_model {
        Some(rm) if config.reward_pool_enabled() => {
            let devices_per_node = positive(rm.n_gpus_per_node).ok_or_else(|| {
                PlacementError::InvalidAuxiliaryPool(format!(
                    "reward_model.n_gpus_per_node must be greater than 0, got {}",
                    rm.n_gpus_per_node
                ))
            })?;
            let nodes = positive(rm.nnodes).ok_or_else(|| {
                PlacementError::InvalidAuxiliaryPool(format!(
                    "reward_model.nnodes must be greater than 0, got {}",
                    rm.nnodes
                ))
            })?;
            Some(AuxiliaryPoolRequest {
                devices_per_node,
                nodes,
                bind_reward_model: rm.enable,
            })
        }
        _ => None,
    };

    Ok(match (config.placement.policy, auxiliary) {
        (PolicyKind::Colocated, None) => PlacementPolicy::Colocated,
        (PolicyKind::Colocated, Some(req)) => PlacementPolicy::ColocatedWithAuxiliary(req),
        (PolicyKind::Split, None) => PlacementPolicy::Split,
        (PolicyKind::Split, Some(req)) => PlacementPolicy::SplitWithAuxiliary(req),
    })
}

/// Pool names from `[placement]`, falling back to the defaults.
pub fn pool_names_from_config(config: &JobConfig) -> PoolNames {
    let defaults = PoolNames::default();
    let p = &config.placement;
    PoolNames {
        global: p.global_pool.clone().unwrap_or(defaults.global),
        actor_rollout_ref: p.actor_pool.clone().unwrap_or(defaults.actor_rollout_ref),
        critic: p.critic_pool.clone().unwrap_or(defaults.critic),
        reward: p.reward_pool.clone().unwrap_or(defaults.reward),
    }
}

/// Role bindings to apply on top of the policy's own.
///
/// An enabled reward model without a dedicated pool shares the actor
/// pool. Explicit `[placement.overrides]` entries come after that, so
/// they win.
pub fn overrides_from_config(
    config: &JobConfig,
    names: &PoolNames,
    policy: &PlacementPolicy,
) -> PlacementResult<Vec<(Role, String)>> {
    let mut overrides = Vec::new();

    let shared_reward_model = config
        .reward_model
        .as_ref()
        .is_some_and(|rm| rm.enable && !rm.enable_resource_pool);
    if shared_reward_model {
        overrides.push((Role::RewardModel, names.actor_pool_for(policy).to_string()));
    }

    for (role, pool) in &config.placement.overrides {
        overrides.push((role.parse::<Role>()?, pool.clone()));
    }
    Ok(overrides)
}

/// Compute the frozen plan a job configuration describes.
pub fn plan_from_config(config: &JobConfig) -> PlacementResult<PlacementPlan> {
    let cluster = cluster_from_config(config)?;
    let policy = policy_from_config(config)?;
    let names = pool_names_from_config(config);
    let overrides = overrides_from_config(config, &names, &policy)?;
    compute_placement_with_names(cluster, &policy, &names, &overrides)
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|&v| v > 0)
}
