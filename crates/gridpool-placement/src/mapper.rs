//! Role mapper — binds logical roles to pool names.
//!
//! Every operation takes a mapping by value and returns a new one; there
//! is no shared role table.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{PlacementError, PlacementResult};
use crate::types::{PoolSpec, Role};

/// Role → pool name bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleMapping {
    bindings: BTreeMap<Role, String>,
}

impl RoleMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `role` to `pool_name`, replacing any earlier binding.
    ///
    /// The pool must already be declared in `spec`.
    pub fn attach_role(
        mut self,
        spec: &PoolSpec,
        role: Role,
        pool_name: &str,
    ) -> PlacementResult<Self> {
        if !spec.contains(pool_name) {
            return Err(PlacementError::UnknownPool {
                role,
                pool: pool_name.to_string(),
            });
        }
        match self.bindings.insert(role, pool_name.to_string()) {
            Some(previous) if previous != pool_name => {
                warn!(%role, from = %previous, to = pool_name, "role binding overridden");
            }
            _ => debug!(%role, pool = pool_name, "role bound"),
        }
        Ok(self)
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        self.bindings.get(&role).map(String::as_str)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.bindings.contains_key(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.bindings.iter().map(|(role, pool)| (*role, pool.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn bind(mut self, role: Role, pool_name: &str) -> Self {
        self.bindings.insert(role, pool_name.to_string());
        self
    }
}

/// Every role in `roles` shares the single pool.
pub fn map_colocated(pool_name: &str, roles: &[Role]) -> RoleMapping {
    roles
        .iter()
        .fold(RoleMapping::new(), |mapping, &role| mapping.bind(role, pool_name))
}

/// Actor/rollout and reference on `actor_pool`, critic on `critic_pool`.
///
/// The reference policy rides with the actor because both serve the same
/// rollout batches.
pub fn map_split(actor_pool: &str, critic_pool: &str) -> RoleMapping {
    RoleMapping::new()
        .bind(Role::ActorRollout, actor_pool)
        .bind(Role::Reference, actor_pool)
        .bind(Role::Critic, critic_pool)
}
