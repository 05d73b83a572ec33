//! End-to-end placement scenarios.
//!
//! Drives the public API the way the execution layer does: build a
//! cluster shape and policy, compute the plan, resolve roles.

use gridpool_core::JobConfig;
use gridpool_placement::builder::{add_auxiliary_pool, build_colocated, build_split};
use gridpool_placement::*;

fn shape(nodes: u32, d: u32) -> ClusterShape {
    ClusterShape::new(nodes, d).unwrap()
}

fn counts(plan: &PlacementPlan, pool: &str) -> Vec<u32> {
    plan.pool(pool).unwrap().per_node_device_counts.clone()
}

#[test]
fn two_nodes_four_devices_split_evenly() {
    let plan = compute_placement(shape(2, 4), &PlacementPolicy::Split, &[]).unwrap();

    assert_eq!(counts(&plan, "actor_rollout_ref_pool"), vec![2, 2]);
    assert_eq!(counts(&plan, "critic_pool"), vec![2, 2]);
    assert_eq!(plan.resolve(Role::ActorRollout).unwrap().name, "actor_rollout_ref_pool");
    assert_eq!(plan.resolve(Role::Reference).unwrap().name, "actor_rollout_ref_pool");
    assert_eq!(plan.resolve(Role::Critic).unwrap().name, "critic_pool");
}

#[test]
fn odd_device_goes_to_actor_pool() {
    let plan = compute_placement(shape(1, 3), &PlacementPolicy::Split, &[]).unwrap();

    assert_eq!(counts(&plan, "actor_rollout_ref_pool"), vec![2]);
    assert_eq!(counts(&plan, "critic_pool"), vec![1]);
}

#[test]
fn split_with_reward_pool() {
    let policy = PlacementPolicy::SplitWithAuxiliary(AuxiliaryPoolRequest {
        devices_per_node: 1,
        nodes: 1,
        bind_reward_model: true,
    });
    let plan = compute_placement(shape(2, 2), &policy, &[]).unwrap();

    assert_eq!(plan.pools().len(), 3);
    assert_eq!(counts(&plan, "actor_rollout_ref_pool"), vec![1, 1]);
    assert_eq!(counts(&plan, "critic_pool"), vec![1, 1]);
    assert_eq!(counts(&plan, "reward_pool"), vec![1]);
    assert_eq!(plan.pools()[2].name, "reward_pool");
    assert_eq!(plan.resolve(Role::RewardModel).unwrap().name, "reward_pool");
    assert!(plan.resolve(Role::RewardModel).unwrap().is_auxiliary());
}

#[test]
fn split_on_single_device_nodes_fails() {
    for nodes in 1..=4 {
        let err = compute_placement(shape(nodes, 1), &PlacementPolicy::Split, &[]).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidClusterShape(_)));
    }
}

#[test]
fn zero_device_reward_pool_fails() {
    let policy = PlacementPolicy::SplitWithAuxiliary(AuxiliaryPoolRequest {
        devices_per_node: 0,
        nodes: 1,
        bind_reward_model: true,
    });
    let err = compute_placement(shape(2, 2), &policy, &[]).unwrap_err();
    assert!(matches!(err, PlacementError::InvalidAuxiliaryPool(_)));
}

#[test]
fn mapping_to_missing_pool_fails() {
    // Through the manager directly.
    let spec = build_split(shape(1, 4), ["actor_rollout_ref_pool", "critic_pool"]).unwrap();
    let mapping = map_split("actor_rollout_ref_pool", "value_pool");
    let err = ResourcePoolManager::create(spec, mapping).unwrap_err();
    assert_eq!(
        err,
        PlacementError::UnknownPool {
            role: Role::Critic,
            pool: "value_pool".to_string(),
        }
    );

    // Through an override.
    let overrides = [(Role::RewardModel, "reward_pool".to_string())];
    let err = compute_placement(shape(1, 4), &PlacementPolicy::Split, &overrides).unwrap_err();
    assert!(matches!(err, PlacementError::UnknownPool { .. }));
}

#[test]
fn even_splits_are_uniform() {
    for nodes in 1..=4 {
        for d in (2..=16).step_by(2) {
            let spec = build_split(shape(nodes, d), ["a", "b"]).unwrap();
            for pool in spec.pools() {
                assert_eq!(pool.per_node_device_counts, vec![d / 2; nodes as usize]);
            }
        }
    }
}

#[test]
fn odd_splits_favour_first_pool() {
    for nodes in 1..=4 {
        for d in (3..=15).step_by(2) {
            let spec = build_split(shape(nodes, d), ["a", "b"]).unwrap();
            let first = spec.get("a").unwrap();
            let second = spec.get("b").unwrap();
            for (f, s) in first
                .per_node_device_counts
                .iter()
                .zip(&second.per_node_device_counts)
            {
                assert_eq!(*f, d.div_ceil(2));
                assert_eq!(*s, d / 2);
                assert_eq!(f + s, d);
            }
        }
    }
}

#[test]
fn builders_conserve_devices() {
    for nodes in 1..=4 {
        for d in 1..=9 {
            let cluster = shape(nodes, d);
            let colocated = build_colocated(cluster, "g");
            let mut specs = vec![colocated];
            if d >= 2 {
                specs.push(build_split(cluster, ["a", "b"]).unwrap());
            }
            for spec in specs {
                for node in 0..nodes as usize {
                    let sum: u32 = spec
                        .pools()
                        .iter()
                        .map(|p| p.per_node_device_counts[node])
                        .sum();
                    assert_eq!(sum, d);
                }
            }

            // Auxiliary pools never eat into the primary budget.
            let spec = add_auxiliary_pool(build_colocated(cluster, "g"), "r", 16, 8).unwrap();
            let plan = ResourcePoolManager::create(spec, RoleMapping::new()).unwrap();
            assert_eq!(plan.primary_devices(), cluster.total_devices());
        }
    }
}

#[test]
fn placement_is_idempotent() {
    let policy = PlacementPolicy::SplitWithAuxiliary(AuxiliaryPoolRequest {
        devices_per_node: 2,
        nodes: 3,
        bind_reward_model: true,
    });
    let overrides = [(Role::Reference, "critic_pool".to_string())];
    let first = compute_placement(shape(4, 7), &policy, &overrides).unwrap();
    let second = compute_placement(shape(4, 7), &policy, &overrides).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn plan_from_toml_config() {
    let config: JobConfig = toml::from_str(
        r#"
[trainer]
nnodes = 2
n_gpus_per_node = 2

[placement]
policy = "split"

[reward_model]
enable = true
enable_resource_pool = true
n_gpus_per_node = 1
nnodes = 1
"#,
    )
    .unwrap();

    let plan = plan_from_config(&config).unwrap();
    assert_eq!(counts(&plan, "actor_rollout_ref_pool"), vec![1, 1]);
    assert_eq!(counts(&plan, "reward_pool"), vec![1]);
    assert_eq!(plan.resolve(Role::RewardModel).unwrap().name, "reward_pool");
}

#[test]
fn zero_device_reward_pool_from_config_fails() {
    let config: JobConfig = toml::from_str(
        r#"
[trainer]
nnodes = 2
n_gpus_per_node = 2

[placement]
policy = "split"

[reward_model]
enable = true
enable_resource_pool = true
n_gpus_per_node = 0
nnodes = 1
"#,
    )
    .unwrap();

    assert!(matches!(
        plan_from_config(&config),
        Err(PlacementError::InvalidAuxiliaryPool(_))
    ));
}
