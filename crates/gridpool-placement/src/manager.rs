//! Resource pool manager — validates and freezes placement plans.
//!
//! A [`PoolSpec`] and [`RoleMapping`] are freely assembled and carry no
//! guarantees. [`ResourcePoolManager::create`] is the only way to obtain a
//! [`PlacementPlan`]: it checks the whole input at once and either returns
//! a frozen plan or an error, never a partially built one.

use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use crate::error::{PlacementError, PlacementResult};
use crate::mapper::RoleMapping;
use crate::types::{ClusterShape, Pool, PoolSpec, Role};

/// Validated, immutable pool layout plus role bindings.
///
/// Handed to the execution layer, which acquires devices per pool and
/// starts the workers for the roles each pool hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementPlan {
    cluster: ClusterShape,
    pools: Vec<Pool>,
    mapping: RoleMapping,
}

impl PlacementPlan {
    pub fn cluster(&self) -> ClusterShape {
        self.cluster
    }

    /// Pools in declaration order.
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.name == name)
    }

    pub fn mapping(&self) -> &RoleMapping {
        &self.mapping
    }

    /// Pool hosting `role`.
    pub fn resolve(&self, role: Role) -> PlacementResult<&Pool> {
        let name = self
            .mapping
            .get(role)
            .ok_or(PlacementError::UnknownRole(role))?;
        self.pool(name).ok_or_else(|| PlacementError::UnknownPool {
            role,
            pool: name.to_string(),
        })
    }

    /// Each pool with the roles bound to it, in pool declaration order.
    /// Pools with no roles are included with an empty list.
    pub fn roles_by_pool(&self) -> Vec<(&Pool, Vec<Role>)> {
        self.pools
            .iter()
            .map(|pool| {
                let roles = self
                    .mapping
                    .iter()
                    .filter(|(_, name)| *name == pool.name)
                    .map(|(role, _)| role)
                    .collect();
                (pool, roles)
            })
            .collect()
    }

    /// Devices drawn from the primary cluster.
    pub fn primary_devices(&self) -> u64 {
        self.pools
            .iter()
            .filter(|p| !p.is_auxiliary())
            .map(Pool::total_devices)
            .sum()
    }

    /// Devices across all pools, auxiliary included.
    pub fn total_devices(&self) -> u64 {
        self.pools.iter().map(Pool::total_devices).sum()
    }
}

/// Facade owning plan validation.
pub struct ResourcePoolManager;

impl ResourcePoolManager {
    /// Validate `pool_spec` and `role_mapping` together and freeze them.
    ///
    /// Checks, in order: pool names are unique, every bound role names a
    /// declared pool, pool row counts match their declared node counts,
    /// and no node's primary pools exceed its device count.
    pub fn create(pool_spec: PoolSpec, role_mapping: RoleMapping) -> PlacementResult<PlacementPlan> {
        check_unique_names(&pool_spec)?;
        check_roles_resolve(&pool_spec, &role_mapping)?;
        check_pool_shapes(&pool_spec)?;
        check_node_budgets(&pool_spec)?;

        let (cluster, pools) = pool_spec.into_parts();
        let plan = PlacementPlan {
            cluster,
            pools,
            mapping: role_mapping,
        };

        info!(
            cluster = %plan.cluster,
            pools = %describe_pools(&plan.pools),
            roles = plan.mapping.len(),
            "placement plan frozen"
        );
        Ok(plan)
    }

    pub fn resolve(plan: &PlacementPlan, role: Role) -> PlacementResult<&Pool> {
        plan.resolve(role)
    }
}

fn check_unique_names(spec: &PoolSpec) -> PlacementResult<()> {
    let mut seen = HashSet::new();
    for pool in spec.pools() {
        if !seen.insert(pool.name.as_str()) {
            return Err(PlacementError::DuplicatePoolName(pool.name.clone()));
        }
    }
    Ok(())
}

fn check_roles_resolve(spec: &PoolSpec, mapping: &RoleMapping) -> PlacementResult<()> {
    for (role, pool) in mapping.iter() {
        if !spec.contains(pool) {
            return Err(PlacementError::UnknownPool {
                role,
                pool: pool.to_string(),
            });
        }
    }
    Ok(())
}

fn check_pool_shapes(spec: &PoolSpec) -> PlacementResult<()> {
    let nodes = spec.cluster().nodes() as usize;
    for pool in spec.pools() {
        if pool.is_auxiliary() {
            if pool.per_node_device_counts.is_empty()
                || pool.per_node_device_counts.contains(&0)
            {
                return Err(PlacementError::InvalidAuxiliaryPool(format!(
                    "pool {}: every node must hold at least one device",
                    pool.name
                )));
            }
        } else if pool.nodes() != nodes {
            return Err(PlacementError::PoolShapeMismatch {
                pool: pool.name.clone(),
                expected: nodes,
                actual: pool.nodes(),
            });
        }
    }
    Ok(())
}

fn check_node_budgets(spec: &PoolSpec) -> PlacementResult<()> {
    let cluster = spec.cluster();
    let available = cluster.devices_per_node();
    for node in 0..cluster.nodes() as usize {
        let requested: u64 = spec
            .pools()
            .iter()
            .filter(|p| !p.is_auxiliary())
            .map(|p| u64::from(p.per_node_device_counts[node]))
            .sum();
        if requested > u64::from(available) {
            return Err(PlacementError::OverAllocation {
                node,
                requested,
                available,
            });
        }
    }
    Ok(())
}

fn describe_pools(pools: &[Pool]) -> String {
    pools
        .iter()
        .map(|p| format!("{}={:?}", p.name, p.per_node_device_counts))
        .collect::<Vec<_>>()
        .join(" ")
}
