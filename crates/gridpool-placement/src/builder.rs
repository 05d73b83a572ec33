//! Pool spec builder — partitions each node's devices into named pools.
//!
//! Builders only declare pools. Cross-pool checks (duplicates, per-node
//! budgets) happen once, in [`ResourcePoolManager::create`].
//!
//! [`ResourcePoolManager::create`]: crate::manager::ResourcePoolManager::create

use tracing::debug;

use crate::error::{PlacementError, PlacementResult};
use crate::types::{ClusterShape, MAX_NODES, Pool, PoolSpec, Provisioning};

/// One pool holding every device on every node.
pub fn build_colocated(cluster: ClusterShape, name: &str) -> PoolSpec {
    debug!(
        pool = name,
        nodes = cluster.nodes(),
        devices_per_node = cluster.devices_per_node(),
        "built colocated pool"
    );
    PoolSpec::new(cluster).push(Pool::uniform(
        name,
        cluster.devices_per_node(),
        cluster.nodes(),
        Provisioning::Primary,
    ))
}

/// Split every node's devices between two pools.
///
/// Even counts split evenly. With an odd count the first pool gets
/// `ceil(d/2)` and the second `floor(d/2)`, identically on every node.
pub fn build_split(cluster: ClusterShape, names: [&str; 2]) -> PlacementResult<PoolSpec> {
    let d = cluster.devices_per_node();
    if d < 2 {
        return Err(PlacementError::InvalidClusterShape(format!(
            "split placement needs at least 2 devices per node, got {d}"
        )));
    }

    let first = d.div_ceil(2);
    let second = d / 2;
    let [first_name, second_name] = names;

    debug!(
        first = first_name,
        first_devices = first,
        second = second_name,
        second_devices = second,
        nodes = cluster.nodes(),
        "built split pools"
    );

    Ok(PoolSpec::new(cluster)
        .push(Pool::uniform(first_name, first, cluster.nodes(), Provisioning::Primary))
        .push(Pool::uniform(second_name, second, cluster.nodes(), Provisioning::Primary)))
}

/// Append a pool provisioned against its own node/device counts.
///
/// The pool does not consume the primary cluster's budget.
pub fn add_auxiliary_pool(
    spec: PoolSpec,
    name: &str,
    per_node_count: u32,
    nnodes: u32,
) -> PlacementResult<PoolSpec> {
    if per_node_count == 0 {
        return Err(PlacementError::InvalidAuxiliaryPool(format!(
            "pool {name}: devices per node must be greater than 0"
        )));
    }
    if nnodes == 0 {
        return Err(PlacementError::InvalidAuxiliaryPool(format!(
            "pool {name}: node count must be greater than 0"
        )));
    }
    if nnodes > MAX_NODES {
        return Err(PlacementError::InvalidAuxiliaryPool(format!(
            "pool {name}: node count {nnodes} exceeds the maximum of {MAX_NODES}"
        )));
    }

    debug!(
        pool = name,
        devices_per_node = per_node_count,
        nodes = nnodes,
        "added auxiliary pool"
    );
    Ok(spec.push(Pool::uniform(name, per_node_count, nnodes, Provisioning::Auxiliary)))
}
