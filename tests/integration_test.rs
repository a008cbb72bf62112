//! Integration tests for hsfmt
//!
//! These tests verify that resolution, dispatch, and the layout engine
//! work together correctly on real fixture trees.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use hsfmt::dispatch::{dispatch_one, Outcome};
use hsfmt::format::format_bytes;
use hsfmt::resolve::{resolve_inputs, Input};
use hsfmt::{Config, Mode};

/// Build a fixture tree:
///   root/x.hs       (needs formatting)
///   root/y.txt      (not Haskell)
///   root/sub/z.hs   (already formatted)
fn fixture_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("x.hs"), "x = 1   \n\n\n\n\ny = 2\n").unwrap();
    fs::write(dir.path().join("y.txt"), "plain text   \n").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/z.hs"), "z = 3\n").unwrap();
    dir
}

#[test]
fn test_inplace_directory_formats_only_haskell_files() {
    let dir = fixture_tree();

    let inputs = resolve_inputs(Mode::InPlace, &[dir.path().to_path_buf()], &[]);
    assert_eq!(inputs.len(), 2);

    let config = Config::default();
    for input in &inputs {
        let outcome = dispatch_one(Mode::InPlace, &config, input).unwrap();
        assert_eq!(outcome, Outcome::Formatted);
    }

    assert_eq!(
        fs::read_to_string(dir.path().join("x.hs")).unwrap(),
        "x = 1\n\n\ny = 2\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("sub/z.hs")).unwrap(),
        "z = 3\n"
    );
    // Non-Haskell file untouched
    assert_eq!(
        fs::read_to_string(dir.path().join("y.txt")).unwrap(),
        "plain text   \n"
    );
}

#[test]
fn test_check_stops_at_first_mismatch_in_resolved_order() {
    let dir = fixture_tree();
    let config = Config::default();

    // Named explicitly: check mode takes paths as given
    let args = vec![dir.path().join("sub/z.hs"), dir.path().join("x.hs")];
    let inputs = resolve_inputs(Mode::Check, &args, &[]);
    assert_eq!(
        inputs,
        args.iter().cloned().map(Input::File).collect::<Vec<_>>()
    );

    let outcomes: Vec<Outcome> = inputs
        .iter()
        .map(|i| dispatch_one(Mode::Check, &config, i).unwrap())
        .collect();
    assert_eq!(
        outcomes,
        vec![Outcome::Formatted, Outcome::MismatchDetected]
    );

    // Neither file was modified
    assert_eq!(
        fs::read_to_string(dir.path().join("x.hs")).unwrap(),
        "x = 1   \n\n\n\n\ny = 2\n"
    );
}

#[test]
fn test_check_mode_does_not_expand_directories() {
    let dir = fixture_tree();

    let inputs = resolve_inputs(Mode::Check, &[dir.path().to_path_buf()], &[]);
    assert_eq!(inputs, vec![Input::File(dir.path().to_path_buf())]);

    // Dispatching the directory itself fails as an engine failure
    let err = dispatch_one(Mode::Check, &Config::default(), &inputs[0]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read"));
}

#[test]
fn test_stdout_mode_is_idempotent_per_file() {
    let dir = fixture_tree();
    let config = Config::default();
    let source = fs::read(dir.path().join("x.hs")).unwrap();

    let first = format_bytes(&config, &source).unwrap();
    let second = format_bytes(&config, &first).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_inplace_then_check_is_clean() {
    let dir = fixture_tree();
    let config = Config::default();
    let input = Input::File(dir.path().join("x.hs"));

    assert_eq!(
        dispatch_one(Mode::Check, &config, &input).unwrap(),
        Outcome::MismatchDetected
    );
    assert_eq!(
        dispatch_one(Mode::InPlace, &config, &input).unwrap(),
        Outcome::Formatted
    );
    assert_eq!(
        dispatch_one(Mode::Check, &config, &input).unwrap(),
        Outcome::Formatted
    );
}

#[test]
fn test_config_file_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("hsfmt.toml");
    fs::write(&config_path, "max_blank_lines = 0\n").unwrap();

    let config = Config::from_toml_file(&config_path).unwrap();
    assert_eq!(config.max_blank_lines, 0);

    let out = format_bytes(&config, b"a = 1\n\nb = 2\n").unwrap();
    assert_eq!(out, b"a = 1\nb = 2\n");
}

#[test]
fn test_resolution_order_is_stable_across_runs() {
    let dir = fixture_tree();
    let raw = vec![PathBuf::from(dir.path())];

    let first = resolve_inputs(Mode::InPlace, &raw, &[]);
    let second = resolve_inputs(Mode::InPlace, &raw, &[]);
    assert_eq!(first, second);
}
