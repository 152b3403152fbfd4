//! Shared JSON view fixtures for runtime integration tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    views: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

/// Raw JSON for a named view fixture.
pub fn view_json(name: &str) -> Result<String> {
    let rel = MANIFEST
        .views
        .get(name)
        .ok_or_else(|| anyhow!("no view fixture named '{name}'"))?;
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

/// Names of every registered view fixture.
pub fn view_names() -> Vec<String> {
    let mut names: Vec<String> = MANIFEST.views.keys().cloned().collect();
    names.sort();
    names
}
