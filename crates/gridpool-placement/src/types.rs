//! Domain types for placement: cluster shape, roles, pools, policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, PlacementResult};

// ── Cluster ────────────────────────────────────────────────────────

/// Upper bound on nodes for any pool, primary or auxiliary.
pub const MAX_NODES: u32 = 65_536;

/// Physical shape of the primary cluster: `nodes` × `devices_per_node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClusterShape {
    nodes: u32,
    devices_per_node: u32,
}

impl ClusterShape {
    pub fn new(nodes: u32, devices_per_node: u32) -> PlacementResult<Self> {
        if nodes == 0 {
            return Err(PlacementError::InvalidClusterShape(
                "node count must be greater than 0".to_string(),
            ));
        }
        if nodes > MAX_NODES {
            return Err(PlacementError::InvalidClusterShape(format!(
                "node count {nodes} exceeds the maximum of {MAX_NODES}"
            )));
        }
        if devices_per_node == 0 {
            return Err(PlacementError::InvalidClusterShape(
                "devices per node must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            nodes,
            devices_per_node,
        })
    }

    pub fn nodes(&self) -> u32 {
        self.nodes
    }

    pub fn devices_per_node(&self) -> u32 {
        self.devices_per_node
    }

    pub fn total_devices(&self) -> u64 {
        u64::from(self.nodes) * u64::from(self.devices_per_node)
    }
}

impl fmt::Display for ClusterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.nodes, self.devices_per_node)
    }
}

// ── Roles ──────────────────────────────────────────────────────────

/// Logical function in a training job. Roles are bound to pools, never
/// to physical devices directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Actor training plus rollout generation.
    ActorRollout,
    Critic,
    RewardModel,
    /// Frozen reference policy.
    Reference,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::ActorRollout,
        Role::Critic,
        Role::RewardModel,
        Role::Reference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ActorRollout => "actor_rollout",
            Role::Critic => "critic",
            Role::RewardModel => "reward_model",
            Role::Reference => "reference",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| PlacementError::InvalidRoleName(s.to_string()))
    }
}

// ── Pools ──────────────────────────────────────────────────────────

/// Where a pool's devices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provisioning {
    /// Carved out of the primary cluster's per-node budget.
    Primary,
    /// Declared against its own node/device counts, outside the primary budget.
    Auxiliary,
}

/// A named allocation of devices: one count per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
    pub name: String,
    pub per_node_device_counts: Vec<u32>,
    pub provisioning: Provisioning,
}

impl Pool {
    /// `count` devices on each of `nodes` nodes.
    pub fn uniform(
        name: impl Into<String>,
        count: u32,
        nodes: u32,
        provisioning: Provisioning,
    ) -> Self {
        Self {
            name: name.into(),
            per_node_device_counts: vec![count; nodes as usize],
            provisioning,
        }
    }

    pub fn nodes(&self) -> usize {
        self.per_node_device_counts.len()
    }

    pub fn total_devices(&self) -> u64 {
        self.per_node_device_counts
            .iter()
            .map(|&c| u64::from(c))
            .sum()
    }

    pub fn is_auxiliary(&self) -> bool {
        self.provisioning == Provisioning::Auxiliary
    }
}

/// Ordered pool declarations for one cluster, not yet validated.
///
/// Declaration order is significant: for a split, the first pool is the
/// one that receives the odd device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSpec {
    cluster: ClusterShape,
    pools: Vec<Pool>,
}

impl PoolSpec {
    pub fn new(cluster: ClusterShape) -> Self {
        Self {
            cluster,
            pools: Vec::new(),
        }
    }

    /// Declare a pool drawn from the primary cluster budget.
    ///
    /// Nothing is checked here; the manager validates the whole spec
    /// when the plan is created.
    pub fn add_primary_pool(
        mut self,
        name: impl Into<String>,
        per_node_device_counts: Vec<u32>,
    ) -> Self {
        self.pools.push(Pool {
            name: name.into(),
            per_node_device_counts,
            provisioning: Provisioning::Primary,
        });
        self
    }

    pub(crate) fn push(mut self, pool: Pool) -> Self {
        self.pools.push(pool);
        self
    }

    pub fn cluster(&self) -> ClusterShape {
        self.cluster
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// First pool declared under `name`.
    pub fn get(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub(crate) fn into_parts(self) -> (ClusterShape, Vec<Pool>) {
        (self.cluster, self.pools)
    }
}

// ── Policies ───────────────────────────────────────────────────────

/// Independently provisioned pool, e.g. for a reward model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryPoolRequest {
    pub devices_per_node: u32,
    pub nodes: u32,
    /// Bind `RewardModel` to the pool. When false the pool is still
    /// provisioned but hosts no role unless an override targets it.
    pub bind_reward_model: bool,
}

/// How devices are divided among roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// One global pool hosts every role.
    Colocated,
    /// One global pool plus a dedicated reward-model pool.
    ColocatedWithAuxiliary(AuxiliaryPoolRequest),
    /// Actor/rollout/reference and critic on disjoint halves of each node.
    Split,
    /// Split, plus a dedicated reward-model pool.
    SplitWithAuxiliary(AuxiliaryPoolRequest),
}

impl PlacementPolicy {
    pub fn auxiliary(&self) -> Option<&AuxiliaryPoolRequest> {
        match self {
            Self::ColocatedWithAuxiliary(req) | Self::SplitWithAuxiliary(req) => Some(req),
            Self::Colocated | Self::Split => None,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Self::Split | Self::SplitWithAuxiliary(_))
    }
}

/// Pool identifiers used by the policy builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolNames {
    pub global: String,
    pub actor_rollout_ref: String,
    pub critic: String,
    pub reward: String,
}

impl Default for PoolNames {
    fn default() -> Self {
        Self {
            global: "global_pool".to_string(),
            actor_rollout_ref: "actor_rollout_ref_pool".to_string(),
            critic: "critic_pool".to_string(),
            reward: "reward_pool".to_string(),
        }
    }
}

impl PoolNames {
    /// Pool hosting the actor-family roles under `policy`.
    pub fn actor_pool_for(&self, policy: &PlacementPolicy) -> &str {
        if policy.is_split() {
            &self.actor_rollout_ref
        } else {
            &self.global
        }
    }
}
