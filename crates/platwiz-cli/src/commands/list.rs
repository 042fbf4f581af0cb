//! Implementation of the `platwiz list` command.

use serde_json::{Value, json};

use platwiz_core::{
    application::CleanupPolicy,
    domain::{HostKey, ParameterKey, ProjectGrouping, ScaffoldType, TargetFramework},
};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    match args.format {
        ListFormat::Json => output.json(&catalog())?,
        ListFormat::Table => {
            output.header("Host parameters")?;
            for key in HostKey::ALL {
                output.print(&format!("  {}", key.as_str()))?;
            }
            output.print("")?;

            output.header("Wizard parameters")?;
            for key in ParameterKey::ALL {
                output.print(&format!("  {}", key.host_key()))?;
            }
            output.print("")?;

            output.header("Option values")?;
            let groupings = joined(ProjectGrouping::ALL.iter().map(|g| g.as_str()));
            let scaffolds = joined(ScaffoldType::ALL.iter().map(|s| s.as_str()));
            let frameworks = joined(TargetFramework::ALL.iter().map(|f| f.as_str()));
            let policies = joined(CleanupPolicy::ALL.iter().map(|p| p.as_str()));
            output.table([
                ("grouping", groupings.as_str()),
                ("scaffold", scaffolds.as_str()),
                ("framework", frameworks.as_str()),
                ("cleanup-policy", policies.as_str()),
            ])?;
        }
    }
    Ok(())
}

fn joined<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

fn catalog() -> Value {
    json!({
        "host_parameters": HostKey::ALL.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
        "wizard_parameters": ParameterKey::ALL.iter().map(|k| k.host_key()).collect::<Vec<_>>(),
        "groupings": ProjectGrouping::ALL.iter().map(|g| g.as_str()).collect::<Vec<_>>(),
        "scaffolds": ScaffoldType::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        "target_frameworks": TargetFramework::ALL.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
        "cleanup_policies": CleanupPolicy::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
    })
}
