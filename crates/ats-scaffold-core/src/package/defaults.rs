//! Fixed data written into every initialized app

use crate::product::ProductConfig;

/// Key of the test-tool configuration block in `package.json`
pub const JEST_KEY: &str = "jest";

/// Coverage setting inside the jest block
pub const COVERAGE_KEY: &str = "collectCoverageFrom";

/// Coverage include/exclude globs, in the order jest evaluates them
pub const COVERAGE_GLOBS: &[&str] = &[
    "src/**/*.ts?(x)",
    "!src/**/*.d.ts",
    "!src/**/*.stories.tsx",
    "!src/**/*.feature.impl.ts",
    "!src/**/*.feature.tools.tsx",
    "!src/store/**/index.ts",
    "!src/store/epic.ts",
    "!src/store/reducer.ts",
    "!src/index.tsx",
    "!src/registerServiceWorker.ts",
];

/// Runtime extras: state management, reactive streams, date utilities
pub const PLUS_DEPENDENCIES: &[&str] = &[
    "moment",
    "react-redux@5.0.7",
    "recompose@0.26.0",
    "redux@3.7.2",
    "redux-observable@0.18.0",
    "rxjs@5.5.9",
];

/// Type declarations, storybook and test-rendering tooling
pub const DEV_DEPENDENCIES: &[&str] = &[
    "@storybook/addon-actions@3.4.1",
    "@storybook/addon-knobs@3.4.1",
    "@storybook/addon-links@3.4.1",
    "@storybook/react@3.4.1",
    "@types/enzyme@3.1.9",
    "@types/enzyme-adapter-react-16@1.0.2",
    "@types/jest@22.2.3",
    "@types/node@9.6.4",
    "@types/react",
    "@types/react-dom",
    "@types/react-redux@5.0.16",
    "@types/react-test-renderer@16.0.1",
    "@types/recompose@0.24.7",
    "@types/redux@3.6.0",
    "@types/redux-mock-store@0.0.12",
    "@types/storybook__addon-knobs@3.3.1",
    "@types/storybook__react@3.0.7",
    "enzyme@3.3.0",
    "enzyme-adapter-react-16@1.1.1",
    "jest-enzyme@6.0.0",
    "react-test-renderer@16.3.1",
    "redux-mock-store@1.4.0",
];

/// The UI framework runtime
pub const CORE_DEPENDENCIES: &[&str] = &["react", "react-dom"];

/// The six `scripts` entries, in the order they are written
pub fn scripts<C: ProductConfig>(config: &C) -> [(&'static str, String); 6] {
    let bin = config.name();
    [
        ("start", format!("{} start", bin)),
        ("build", format!("{} build", bin)),
        ("test", format!("{} test --env=jsdom", bin)),
        ("eject", format!("{} eject", bin)),
        (
            "storybook",
            format!("start-storybook -p {}", config.storybook_port()),
        ),
        ("build-storybook", "build-storybook".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::test_support::TestProduct;

    #[test]
    fn test_scripts_use_product_binary() {
        let scripts = scripts(&TestProduct);
        let keys: Vec<_> = scripts.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["start", "build", "test", "eject", "storybook", "build-storybook"]
        );
        assert_eq!(scripts[0].1, "react-ats-scripts start");
        assert_eq!(scripts[2].1, "react-ats-scripts test --env=jsdom");
        assert_eq!(scripts[4].1, "start-storybook -p 6006");
    }

    #[test]
    fn test_coverage_starts_with_inclusion() {
        assert_eq!(COVERAGE_GLOBS[0], "src/**/*.ts?(x)");
        assert!(COVERAGE_GLOBS[1..].iter().all(|g| g.starts_with('!')));
    }

    #[test]
    fn test_core_dependencies_are_unpinned() {
        assert!(CORE_DEPENDENCIES.iter().all(|d| !d.contains('@')));
    }
}
