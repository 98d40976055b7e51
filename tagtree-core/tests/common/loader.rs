//! Fixture loading from YAML files

use serde::Deserialize;
use std::path::Path;

use super::ElementSpec;

/// A single test case from a fixture file.
///
/// Exactly one of `tree` and `error` is expected; a case with neither only
/// checks that parsing succeeds.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub input: String,
    #[serde(default)]
    pub tree: Option<ElementSpec>,
    #[serde(default)]
    pub error: Option<ExpectedError>,
}

/// Expected failure: error name plus optional position details.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedError {
    /// `Unterminated`, `Source` or a `SyntaxErrorKind` variant name
    pub kind: String,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub byte: Option<char>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
