//! Property-based tests for formsmith-cli.
//!
//! Properties tested:
//! - CLI arguments override settings, unset arguments keep them
//! - Dry runs never touch the file system

use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use formsmith::Strictness;
use formsmith_cli::{
    config::{CliArgs, Config, ConfigManager},
    writer::FileWriter,
};

fn arb_dir() -> impl Strategy<Value = PathBuf> {
    "[a-z][a-z0-9_]{0,10}(/[a-z][a-z0-9_]{0,10}){0,2}".prop_map(PathBuf::from)
}

proptest! {
    #[test]
    fn prop_cli_args_take_precedence(
        file_dir in arb_dir(),
        file_support in any::<bool>(),
        arg_dir in proptest::option::of(arb_dir()),
        arg_support in proptest::option::of(any::<bool>()),
        arg_permissive in proptest::option::of(any::<bool>()),
    ) {
        let mut config = Config::default();
        config.output.dir = file_dir.clone();
        config.output.support = file_support;

        let merged = ConfigManager::merge_cli_args(
            config,
            &CliArgs {
                output: arg_dir.clone(),
                support: arg_support,
                permissive: arg_permissive,
            },
        );

        prop_assert_eq!(merged.output.dir, arg_dir.unwrap_or(file_dir));
        prop_assert_eq!(merged.output.support, arg_support.unwrap_or(file_support));
        let expected = match arg_permissive {
            Some(true) => Strictness::Permissive,
            _ => Strictness::Strict,
        };
        prop_assert_eq!(merged.load.strictness, expected);
    }

    #[test]
    fn prop_dry_run_writes_nothing(rel in arb_dir(), content in ".{0,200}") {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(&rel).join("schema.ts");

        let result = FileWriter::new(true).write(&path, &content).unwrap();

        prop_assert!(!result.was_written());
        prop_assert!(!path.exists());
        prop_assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
