//! Success report printed after an app has been initialized

use crate::runtime::PackageManager;
use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Everything the closing report needs to know about the run
#[derive(Debug, Clone)]
pub struct Summary {
    pub app_name: String,
    pub app_path: PathBuf,
    /// What to show after `cd`
    pub cd_path: String,
    pub manager: PackageManager,
    /// A pre-existing README.md was moved to README.old.md
    pub readme_preserved: bool,
}

/// The shortest way to `cd` into the app: its bare name when it was created
/// directly under the user's starting directory, the full path otherwise
pub fn cd_path(app_name: &str, app_path: &Path, original_directory: Option<&Path>) -> String {
    match original_directory {
        Some(dir) if dir.join(app_name) == app_path => app_name.to_string(),
        _ => app_path.display().to_string(),
    }
}

impl Summary {
    /// Commands available in the new app, with one-line descriptions
    fn commands(&self) -> Vec<(String, Vec<&'static str>)> {
        let cmd = self.manager.display_name();
        let run = self.manager.run_prefix();
        vec![
            (format!("{} start", cmd), vec!["Starts the development server."]),
            (
                format!("{} {}build", cmd, run),
                vec!["Bundles the app into static files for production."],
            ),
            (format!("{} test", cmd), vec!["Starts the test runner."]),
            (
                format!("{} test --coverage", cmd),
                vec!["Starts the test runner with coverage reporter."],
            ),
            (format!("{} {}storybook", cmd, run), vec!["Starts storybook."]),
            (
                format!("{} {}eject", cmd, run),
                vec![
                    "Removes this tool and copies build dependencies, configuration files",
                    "and scripts into the app directory. If you do this, you can’t go back!",
                ],
            ),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "Success! Created {} at {}",
            self.app_name,
            self.app_path.display()
        )?;
        writeln!(f, "Inside that directory, you can run several commands:")?;
        writeln!(f)?;

        for (command, description) in self.commands() {
            writeln!(f, "{}", format!("  {}", command).cyan())?;
            for line in description {
                writeln!(f, "    {}", line)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "We suggest that you begin by typing:")?;
        writeln!(f)?;
        writeln!(f, "{} {}", "  cd".cyan(), self.cd_path)?;
        writeln!(
            f,
            "  {}",
            format!("{} start", self.manager.display_name()).cyan()
        )?;

        if self.readme_preserved {
            writeln!(f)?;
            writeln!(
                f,
                "{}",
                "You had a `README.md` file, we renamed it to `README.old.md`".yellow()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Happy hacking!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(manager: PackageManager, readme_preserved: bool) -> Summary {
        colored::control::set_override(false);
        Summary {
            app_name: "my-app".to_string(),
            app_path: PathBuf::from("/work/my-app"),
            cd_path: "my-app".to_string(),
            manager,
            readme_preserved,
        }
    }

    #[test]
    fn test_cd_path_prefers_app_name() {
        let app = Path::new("/work/my-app");
        assert_eq!(cd_path("my-app", app, Some(Path::new("/work"))), "my-app");
        assert_eq!(cd_path("my-app", app, Some(Path::new("/elsewhere"))), "/work/my-app");
        assert_eq!(cd_path("my-app", app, None), "/work/my-app");
    }

    #[test]
    fn test_npm_summary_uses_run_for_custom_scripts() {
        let text = summary(PackageManager::Npm, false).to_string();
        assert!(text.contains("Success! Created my-app at /work/my-app"));
        assert!(text.contains("  npm start\n"));
        assert!(text.contains("  npm run build\n"));
        assert!(text.contains("  npm test --coverage\n"));
        assert!(text.contains("  npm run storybook\n"));
        assert!(text.contains("  npm run eject\n"));
        assert!(text.contains("  cd my-app\n"));
        assert!(!text.contains("README.old.md"));
        assert!(text.ends_with("Happy hacking!\n"));
    }

    #[test]
    fn test_yarn_summary_and_readme_note() {
        let text = summary(PackageManager::Yarn, true).to_string();
        assert!(text.contains("  yarn build\n"));
        assert!(text.contains("  yarn storybook\n"));
        assert!(!text.contains("yarn run"));
        assert!(text.contains("we renamed it to `README.old.md`"));
    }
}
