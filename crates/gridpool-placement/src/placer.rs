//! Placement engine — composes builder, mapper and manager into a plan.
//!
//! Given a cluster shape and a policy, the placer:
//! 1. Declares the pools the policy calls for (builder)
//! 2. Binds the policy's roles to them (mapper)
//! 3. Applies caller overrides, in order
//! 4. Freezes the result (manager)

use tracing::debug;

use crate::builder::{add_auxiliary_pool, build_colocated, build_split};
use crate::error::PlacementResult;
use crate::manager::{PlacementPlan, ResourcePoolManager};
use crate::mapper::{map_colocated, map_split};
use crate::types::{ClusterShape, PlacementPolicy, PoolNames, Role};

/// Roles a colocated job runs without a dedicated reward pool.
const COLOCATED_ROLES: [Role; 3] = [Role::ActorRollout, Role::Critic, Role::Reference];

/// Compute a placement plan using the default pool names.
pub fn compute_placement(
    cluster: ClusterShape,
    policy: &PlacementPolicy,
    role_overrides: &[(Role, String)],
) -> PlacementResult<PlacementPlan> {
    compute_placement_with_names(cluster, policy, &PoolNames::default(), role_overrides)
}

/// Compute a placement plan with caller-chosen pool names.
pub fn compute_placement_with_names(
    cluster: ClusterShape,
    policy: &PlacementPolicy,
    names: &PoolNames,
    role_overrides: &[(Role, String)],
) -> PlacementResult<PlacementPlan> {
    let (spec, mut mapping) = if policy.is_split() {
        let spec = build_split(cluster, [names.actor_rollout_ref.as_str(), names.critic.as_str()])?;
        (spec, map_split(&names.actor_rollout_ref, &names.critic))
    } else {
        let spec = build_colocated(cluster, &names.global);
        (spec, map_colocated(&names.global, &COLOCATED_ROLES))
    };

    let spec = match policy.auxiliary() {
        Some(req) => {
            let spec = add_auxiliary_pool(spec, &names.reward, req.devices_per_node, req.nodes)?;
            if req.bind_reward_model {
                mapping = mapping.attach_role(&spec, Role::RewardModel, &names.reward)?;
            }
            spec
        }
        None => spec,
    };

    for (role, pool) in role_overrides {
        mapping = mapping.attach_role(&spec, *role, pool)?;
    }

    debug!(
        policy = ?policy,
        pools = spec.pools().len(),
        overrides = role_overrides.len(),
        "placement assembled"
    );
    ResourcePoolManager::create(spec, mapping)
}
