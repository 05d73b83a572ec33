use std::path::Path;

use gridpool_core::{JobConfig, PolicyKind};

pub fn init(path: &str, policy: &str, force: bool) -> anyhow::Result<()> {
    let output = Path::new(path);
    write_scaffold(output, policy, force)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

fn parse_policy(policy: &str) -> anyhow::Result<PolicyKind> {
    match policy {
        "colocated" => Ok(PolicyKind::Colocated),
        "split" => Ok(PolicyKind::Split),
        other => anyhow::bail!("unknown policy: {other} (expected colocated or split)"),
    }
}

fn write_scaffold(output: &Path, policy: &str, force: bool) -> anyhow::Result<()> {
    let policy = parse_policy(policy)?;
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }
    let config = JobConfig::scaffold(policy);
    std::fs::write(output, config.to_toml_string()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_round_trips_through_planner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gridpool.toml");
        write_scaffold(&path, "split", false).unwrap();

        let config = JobConfig::from_file(&path).unwrap();
        let plan = gridpool_placement::plan_from_config(&config).unwrap();
        assert_eq!(
            plan.pool("actor_rollout_ref_pool").unwrap().per_node_device_counts,
            vec![4]
        );
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gridpool.toml");
        std::fs::write(&path, "keep me").unwrap();

        assert!(write_scaffold(&path, "colocated", false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

        write_scaffold(&path, "colocated", true).unwrap();
        assert!(JobConfig::from_file(&path).is_ok());
    }

    #[test]
    fn rejects_unknown_policy() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_scaffold(&dir.path().join("x.toml"), "scatter", false).is_err());
    }
}
