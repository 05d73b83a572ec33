//! GridPool placement — device pools and role bindings for training jobs.
//!
//! This crate decides how a cluster's devices are divided into named
//! pools and which pool hosts each logical role (actor/rollout, critic,
//! reward model, reference). It only computes the plan; acquiring devices
//! and starting workers belongs to the execution layer that consumes it.
//!
//! # Components
//!
//! - **`builder`** — Pool spec builder (colocated, split, auxiliary pools)
//! - **`mapper`** — Role mapper (role → pool bindings)
//! - **`manager`** — Validation and the frozen `PlacementPlan`
//! - **`placer`** — `compute_placement` entry point
//! - **`convert`** — Job configuration → placement inputs
//! - **`report`** — Plan formatting

pub mod builder;
pub mod convert;
pub mod error;
pub mod manager;
pub mod mapper;
pub mod placer;
pub mod report;
pub mod types;

pub use convert::{cluster_from_config, overrides_from_config, plan_from_config, policy_from_config, pool_names_from_config};
pub use error::{PlacementError, PlacementResult};
pub use manager::{PlacementPlan, ResourcePoolManager};
pub use mapper::{RoleMapping, map_colocated, map_split};
pub use placer::{compute_placement, compute_placement_with_names};
pub use types::{AuxiliaryPoolRequest, ClusterShape, MAX_NODES, PlacementPolicy, Pool, PoolNames, PoolSpec, Provisioning, Role};
