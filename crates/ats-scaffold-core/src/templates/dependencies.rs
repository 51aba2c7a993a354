//! One-shot template dependency overrides (`.template.dependencies.json`)

use crate::package::ManifestError;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// File a template may ship to request extra framework-pass packages
pub const TEMPLATE_DEPENDENCIES_FILE: &str = ".template.dependencies.json";

#[derive(Debug, Deserialize)]
struct TemplateDependencies {
    #[serde(default)]
    dependencies: Map<String, Value>,
}

/// Consume the override file in `app_path`, returning `name@range` install arguments.
///
/// The file is deleted once read. Returns an empty list when no file is present.
pub async fn take_template_dependencies(app_path: &Path) -> Result<Vec<String>> {
    let path = app_path.join(TEMPLATE_DEPENDENCIES_FILE);
    if !fs::try_exists(&path)
        .await
        .with_context(|| format!("Failed to check {}", path.display()))?
    {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed: TemplateDependencies = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut specs = Vec::with_capacity(parsed.dependencies.len());
    for (name, range) in parsed.dependencies {
        let range = match range {
            Value::String(range) => range,
            _ => {
                return Err(ManifestError::InvalidDependency {
                    path: path.clone(),
                    name,
                }
                .into())
            }
        };
        specs.push(format!("{}@{}", name, range));
    }

    fs::remove_file(&path)
        .await
        .with_context(|| format!("Failed to remove {}", path.display()))?;

    tracing::debug!(count = specs.len(), "consumed template dependency overrides");
    Ok(specs)
}
