//! Unit tests for the source aggregator.
//!
//! These exercise the real process environment, so every test takes the
//! shared environment guards and runs serially.

use anyhow::{Result, anyhow, ensure};
use serial_test::serial;
use test_helpers::env;

use super::EnvSource;
use crate::error::EnvmapError;
use crate::policy::EnvPolicy;

#[test]
#[serial]
fn build_mapping_snapshots_the_process_environment() -> Result<()> {
    let _guard = env::set_var("ENVMAP_SRC.ATTR-ONE", "1");
    let source = EnvSource::new(EnvPolicy::new().allow(["envmap_src.attr_one"]));
    let mapping = source.build_mapping()?;
    ensure!(
        mapping.get("envmap_src.attr_one") == Some("1"),
        "unexpected mapping {mapping:?}"
    );
    ensure!(mapping.len() == 1, "unexpected mapping {mapping:?}");
    Ok(())
}

#[test]
#[serial]
fn dotenv_entries_yield_to_the_environment() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("test.env");
    std::fs::write(
        &path,
        "ENVMAP_SRC.ATTR-ONE=2001\nENVMAP_SRC.ATTR-TWO=2002\n",
    )?;
    let _guard = env::set_var("ENVMAP_SRC.ATTR_ONE", "21");
    let source = EnvSource::new(
        EnvPolicy::new().allow(["envmap_src.attr_one", "envmap_src.attr_two"]),
    )
    .with_dotenv(&path);
    let mapping = source.build_mapping()?;
    ensure!(
        mapping.get("envmap_src.attr_one") == Some("21"),
        "the environment must win, got {mapping:?}"
    );
    ensure!(
        mapping.get("envmap_src.attr_two") == Some("2002"),
        "dotenv-only keys must survive, got {mapping:?}"
    );
    Ok(())
}

#[test]
#[serial]
fn a_missing_dotenv_file_degrades_to_no_file_source() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let _guard = env::set_var("ENVMAP_SRC.ATTR-ONE", "1");
    let source = EnvSource::new(EnvPolicy::new().allow(["envmap_src.attr_one"]))
        .with_dotenv(dir.path().join("absent.env"));
    let mapping = source.build_mapping()?;
    ensure!(
        mapping.get("envmap_src.attr_one") == Some("1"),
        "unexpected mapping {mapping:?}"
    );
    Ok(())
}

#[test]
fn a_malformed_policy_fails_fast() -> Result<()> {
    let source = EnvSource::new(EnvPolicy::allow_all().with_prefix(""));
    match source.build_mapping() {
        Err(EnvmapError::Policy { message }) => {
            ensure!(
                message.contains("prefix"),
                "unexpected policy message {message:?}"
            );
            Ok(())
        }
        other => Err(anyhow!("expected a policy error, got {other:?}")),
    }
}

#[test]
#[serial]
fn repeated_builds_are_identical_under_unchanged_inputs() -> Result<()> {
    let _guard = env::set_var("ENVMAP_SRC.ATTR-ONE", "1");
    let source = EnvSource::new(EnvPolicy::new().allow(["envmap_src.attr_one"]));
    let first = source.build_mapping()?;
    let second = source.build_mapping()?;
    ensure!(first == second, "expected identical mappings");
    Ok(())
}
