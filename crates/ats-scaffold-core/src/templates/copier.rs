//! Template tree copying and the dotfile fix-ups that follow it

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use walkdir::WalkDir;

/// Ignore file as shipped in templates (npm strips `.gitignore` from packages)
pub const TEMPLATE_GITIGNORE: &str = "gitignore";
pub const GITIGNORE: &str = ".gitignore";
pub const README: &str = "README.md";
pub const README_OLD: &str = "README.old.md";

/// How the template's ignore file ended up in the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitignoreMerge {
    /// No `.gitignore` existed; the template file was renamed
    Renamed,
    /// An existing `.gitignore` had the template content appended
    Appended,
}

/// Recursively copy `source` into `target`, overwriting colliding files.
///
/// Returns the copied file paths relative to `source`.
pub async fn copy_tree(source: &Path, target: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(target)
        .await
        .context("Failed to create target directory")?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry
            .with_context(|| format!("Failed to walk template {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{} escaped the template", entry.path().display()))?;
        let target_path = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .with_context(|| format!("Failed to create directory: {}", target_path.display()))?;
            continue;
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if entry.path_is_symlink() {
            copy_symlink(entry.path(), &target_path).await?;
        } else {
            fs::copy(entry.path(), &target_path)
                .await
                .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        }

        copied_files.push(relative.to_string_lossy().replace('\\', "/"));
    }

    Ok(copied_files)
}

/// Recreate a template symlink at `target`, replacing whatever is there.
///
/// Links keep their original (possibly relative) destination.
#[cfg(unix)]
async fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(source)
        .await
        .with_context(|| format!("Failed to read link {}", source.display()))?;

    match fs::symlink_metadata(target).await {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(target).await,
        Ok(_) => fs::remove_file(target).await,
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
    .with_context(|| format!("Failed to replace {}", target.display()))?;

    fs::symlink(&link, target)
        .await
        .with_context(|| format!("Failed to create link {}", target.display()))
}

/// Creating symlinks needs extra privileges on Windows; copy the link's target instead
#[cfg(not(unix))]
async fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    let meta = fs::metadata(source)
        .await
        .with_context(|| format!("Failed to resolve link {}", source.display()))?;
    if meta.is_dir() {
        Box::pin(copy_tree(source, target)).await?;
    } else {
        fs::copy(source, target)
            .await
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
    }
    Ok(())
}

/// Move an existing `README.md` aside to `README.old.md`.
///
/// Returns whether a readme was moved.
pub async fn preserve_readme(app_path: &Path) -> Result<bool> {
    let readme = app_path.join(README);
    if !fs::try_exists(&readme)
        .await
        .with_context(|| format!("Failed to check {}", readme.display()))?
    {
        return Ok(false);
    }

    let old = app_path.join(README_OLD);
    fs::rename(&readme, &old)
        .await
        .with_context(|| format!("Failed to rename {} to {}", readme.display(), old.display()))?;
    Ok(true)
}

/// Turn the template's `gitignore` into `.gitignore`, appending when one already exists
pub async fn merge_gitignore(app_path: &Path) -> Result<GitignoreMerge> {
    let source = app_path.join(TEMPLATE_GITIGNORE);
    let dest = app_path.join(GITIGNORE);

    // std::fs::rename silently replaces the destination on unix
    match fs::symlink_metadata(&dest).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::rename(&source, &dest).await.with_context(|| {
                format!("Failed to rename {} to {}", source.display(), dest.display())
            })?;
            return Ok(GitignoreMerge::Renamed);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to check {}", dest.display()));
        }
    }

    let data = fs::read(&source)
        .await
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&dest)
        .await
        .with_context(|| format!("Failed to open {}", dest.display()))?;
    file.write_all(&data)
        .await
        .with_context(|| format!("Failed to append to {}", dest.display()))?;
    file.flush().await?;
    fs::remove_file(&source)
        .await
        .with_context(|| format!("Failed to remove {}", source.display()))?;

    Ok(GitignoreMerge::Appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn template_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/App")).await.unwrap();
        fs::write(dir.path().join("src/App/App.tsx"), "export default 1;")
            .await
            .unwrap();
        fs::write(dir.path().join("src/index.tsx"), "render();")
            .await
            .unwrap();
        fs::write(dir.path().join(TEMPLATE_GITIGNORE), "node_modules\n")
            .await
            .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_copy_tree_copies_nested_files() {
        let template = template_fixture().await;
        let app = TempDir::new().unwrap();

        let mut copied = copy_tree(template.path(), app.path()).await.unwrap();
        copied.sort();

        assert_eq!(copied, ["gitignore", "src/App/App.tsx", "src/index.tsx"]);
        let app_tsx = fs::read_to_string(app.path().join("src/App/App.tsx"))
            .await
            .unwrap();
        assert_eq!(app_tsx, "export default 1;");
    }

    #[tokio::test]
    async fn test_copy_tree_overwrites_and_keeps_unrelated_files() {
        let template = template_fixture().await;
        let app = TempDir::new().unwrap();
        fs::create_dir_all(app.path().join("src")).await.unwrap();
        fs::write(app.path().join("src/index.tsx"), "old").await.unwrap();
        fs::write(app.path().join("package.json"), "{}").await.unwrap();

        copy_tree(template.path(), app.path()).await.unwrap();

        let index = fs::read_to_string(app.path().join("src/index.tsx"))
            .await
            .unwrap();
        assert_eq!(index, "render();");
        assert!(app.path().join("package.json").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_copy_tree_recreates_symlinks() {
        let template = template_fixture().await;
        fs::symlink("App/App.tsx", template.path().join("src/main.tsx"))
            .await
            .unwrap();
        fs::symlink("src/App", template.path().join("app"))
            .await
            .unwrap();
        let app = TempDir::new().unwrap();
        fs::write(app.path().join("app"), "stale").await.unwrap();

        let mut copied = copy_tree(template.path(), app.path()).await.unwrap();
        copied.sort();

        assert!(copied.contains(&"app".to_string()));
        assert!(copied.contains(&"src/main.tsx".to_string()));
        let file_link = fs::read_link(app.path().join("src/main.tsx")).await.unwrap();
        assert_eq!(file_link, Path::new("App/App.tsx"));
        let dir_link = fs::read_link(app.path().join("app")).await.unwrap();
        assert_eq!(dir_link, Path::new("src/App"));
        let through_link = fs::read_to_string(app.path().join("app/App.tsx"))
            .await
            .unwrap();
        assert_eq!(through_link, "export default 1;");
    }

    #[tokio::test]
    async fn test_gitignore_renamed_when_absent() {
        let app = TempDir::new().unwrap();
        fs::write(app.path().join(TEMPLATE_GITIGNORE), "build\n")
            .await
            .unwrap();

        let merge = merge_gitignore(app.path()).await.unwrap();

        assert_eq!(merge, GitignoreMerge::Renamed);
        assert!(!app.path().join(TEMPLATE_GITIGNORE).exists());
        let content = fs::read_to_string(app.path().join(GITIGNORE)).await.unwrap();
        assert_eq!(content, "build\n");
    }

    #[tokio::test]
    async fn test_gitignore_appended_when_present() {
        let app = TempDir::new().unwrap();
        fs::write(app.path().join(GITIGNORE), "*.log\n").await.unwrap();
        fs::write(app.path().join(TEMPLATE_GITIGNORE), "build\n")
            .await
            .unwrap();

        let merge = merge_gitignore(app.path()).await.unwrap();

        assert_eq!(merge, GitignoreMerge::Appended);
        assert!(!app.path().join(TEMPLATE_GITIGNORE).exists());
        let content = fs::read_to_string(app.path().join(GITIGNORE)).await.unwrap();
        assert_eq!(content, "*.log\nbuild\n");
    }

    #[tokio::test]
    async fn test_gitignore_missing_from_template_is_an_error() {
        let app = TempDir::new().unwrap();
        assert!(merge_gitignore(app.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_preserve_readme() {
        let app = TempDir::new().unwrap();
        assert!(!preserve_readme(app.path()).await.unwrap());

        fs::write(app.path().join(README), b"# my app\n").await.unwrap();
        assert!(preserve_readme(app.path()).await.unwrap());

        assert!(!app.path().join(README).exists());
        let old = fs::read(app.path().join(README_OLD)).await.unwrap();
        assert_eq!(old, b"# my app\n");
    }
}
