use std::path::Path;

use anyhow::Context;
use gridpool_core::JobConfig;
use gridpool_placement::{PlacementPlan, Role, plan_from_config, report};
use tracing::debug;

pub fn plan(config: &str, format: &str) -> anyhow::Result<()> {
    println!("{}", render_plan(config, format)?);
    Ok(())
}

pub fn resolve(config: &str, role: &str) -> anyhow::Result<()> {
    println!("{}", render_resolve(config, role)?);
    Ok(())
}

fn load_plan(config: &str) -> anyhow::Result<PlacementPlan> {
    let path = Path::new(config);
    let job = JobConfig::from_file(path)
        .with_context(|| format!("failed to load job config {}", path.display()))?;
    debug!(config = %path.display(), "loaded job config");
    Ok(plan_from_config(&job)?)
}

fn render_plan(config: &str, format: &str) -> anyhow::Result<String> {
    let plan = load_plan(config)?;
    match format {
        "json" => Ok(serde_json::to_string_pretty(&plan)?),
        "text" => Ok(report::format_plan(&plan)),
        other => anyhow::bail!("unknown output format: {other} (expected text or json)"),
    }
}

fn render_resolve(config: &str, role: &str) -> anyhow::Result<String> {
    let role: Role = role.parse()?;
    let plan = load_plan(config)?;
    let pool = plan.resolve(role)?;
    Ok(format!(
        "{role} → {} {:?}",
        pool.name, pool.per_node_device_counts
    ))
}
