//! Human-readable plan formatting.

use crate::manager::PlacementPlan;
use crate::types::Provisioning;

pub fn format_plan(plan: &PlacementPlan) -> String {
    let cluster = plan.cluster();
    let mut out = String::new();

    out.push_str(&format!(
        "Cluster: {} node(s) x {} device(s) = {} devices\n",
        cluster.nodes(),
        cluster.devices_per_node(),
        cluster.total_devices()
    ));
    out.push_str(&format!(
        "Allocated: {} primary, {} total\n\n",
        plan.primary_devices(),
        plan.total_devices()
    ));

    out.push_str(&format!("Pools ({}):\n", plan.pools().len()));
    for (pool, roles) in plan.roles_by_pool() {
        let kind = match pool.provisioning {
            Provisioning::Primary => "primary",
            Provisioning::Auxiliary => "auxiliary",
        };
        out.push_str(&format!(
            "  • {} [{kind}] {:?} ({} devices)\n",
            pool.name,
            pool.per_node_device_counts,
            pool.total_devices()
        ));
        if roles.is_empty() {
            out.push_str("      roles: (none)\n");
        } else {
            let roles: Vec<_> = roles.iter().map(|r| r.as_str()).collect();
            out.push_str(&format!("      roles: {}\n", roles.join(", ")));
        }
    }

    out
}
