//! `package.json` loading and rewriting

use super::defaults::{self, COVERAGE_GLOBS, COVERAGE_KEY, JEST_KEY};
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// File name of the package descriptor
pub const PACKAGE_JSON: &str = "package.json";

/// Shape problems in a package descriptor that parsed as valid JSON
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{} does not contain a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("`{field}` in {} must be a string", .path.display())]
    NotAString { path: PathBuf, field: &'static str },

    #[error("version range for `{name}` in {} must be a string", .path.display())]
    InvalidDependency { path: PathBuf, name: String },
}

/// A loaded `package.json`, kept as an ordered JSON object so unknown keys survive the rewrite
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl PackageJson {
    /// Load `package.json` from a directory
    pub async fn load(dir: &Path) -> Result<Self> {
        Self::load_file(&dir.join(PACKAGE_JSON)).await
    }

    /// Load a package descriptor from an explicit file path
    pub async fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        match value {
            Value::Object(doc) => Ok(Self {
                path: path.to_path_buf(),
                doc,
            }),
            _ => Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            }
            .into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The package `name` field
    pub fn name(&self) -> Result<&str> {
        self.doc
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ManifestError::NotAString {
                    path: self.path.clone(),
                    field: "name",
                }
                .into()
            })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// Whether `dependencies` declares every one of `packages`
    pub fn declares_all(&self, packages: &[&str]) -> bool {
        match self.doc.get("dependencies").and_then(Value::as_object) {
            Some(deps) => packages.iter().all(|p| deps.contains_key(*p)),
            None => false,
        }
    }

    /// Apply the fixed rewrite: ensure `dependencies`, replace `scripts` and the jest block
    pub fn apply_defaults<C: ProductConfig>(&mut self, config: &C) {
        if self.doc.get("dependencies").map_or(true, is_falsy) {
            self.doc
                .insert("dependencies".to_string(), Value::Object(Map::new()));
        }

        let scripts: Map<String, Value> = defaults::scripts(config)
            .into_iter()
            .map(|(key, command)| (key.to_string(), Value::String(command)))
            .collect();
        self.doc.insert("scripts".to_string(), Value::Object(scripts));

        let globs = COVERAGE_GLOBS
            .iter()
            .map(|g| Value::String((*g).to_string()))
            .collect();
        let mut jest = Map::new();
        jest.insert(COVERAGE_KEY.to_string(), Value::Array(globs));
        self.doc.insert(JEST_KEY.to_string(), Value::Object(jest));
    }

    /// Serialize with 2-space indentation, replacing the file on disk
    pub async fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.doc)
            .with_context(|| format!("Failed to serialize {}", self.path.display()))?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// JavaScript falsiness: `null`, `false`, `0`, and `""`
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Read the distribution name of the scripts package from its own `package.json`
pub async fn read_package_name(path: &Path) -> Result<String> {
    let package = PackageJson::load_file(path).await?;
    Ok(package.name()?.to_string())
}
