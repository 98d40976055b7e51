//! Test harness for running fixture cases with stochastic variations

use crate::common::{ElementSpec, Gen, TestCase};
use tagtree_core::{parse_with, ParseError, ParseOptions, Parser, Result};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: Vec<u8>,
    pub expected: String,
    pub actual: String,
    pub seed: u64,
    pub errors: Vec<String>,
}

impl TestResult {
    pub fn print_failure(&self, label: &str) {
        eprintln!("\n=== FAILED: {} (seed {}) ===", label, self.seed);
        eprintln!("input:    {:?}", String::from_utf8_lossy(&self.input));
        eprintln!("expected: {}", self.expected);
        eprintln!("actual:   {}", self.actual);
        for error in &self.errors {
            eprintln!("  - {}", error);
        }
    }
}

/// Stable name for an error, matching fixture `kind` strings.
pub fn error_name(err: &ParseError) -> String {
    match err {
        ParseError::Source(_) => "Source".to_string(),
        ParseError::Unterminated { .. } => "Unterminated".to_string(),
        ParseError::Syntax(e) => {
            let debug = format!("{:?}", e.kind);
            debug
                .split(|c: char| !c.is_alphanumeric())
                .next()
                .unwrap_or_default()
                .to_string()
        }
    }
}

/// Feed input in the given chunk sizes (the last size repeats).
fn parse_chunked(input: &[u8], sizes: &[usize]) -> Result<ElementSpec> {
    let mut parser = Parser::new();
    let mut pos = 0;
    let mut i = 0;
    while pos < input.len() {
        let size = sizes.get(i).or(sizes.last()).copied().unwrap_or(1).max(1);
        let end = (pos + size).min(input.len());
        let fed = parser.feed(&input[pos..end])?;
        pos = end;
        i += 1;
        if fed.complete {
            break;
        }
    }
    parser.finish().map(|doc| ElementSpec::from_document(&doc))
}

fn describe(result: &Result<ElementSpec>) -> String {
    match result {
        Ok(tree) => format!("{:?}", tree),
        Err(e) => format!("{} ({})", error_name(e), e),
    }
}

fn check(case: &TestCase, input: &[u8], result: Result<ElementSpec>, seed: u64) -> TestResult {
    let mut errors = Vec::new();

    match (&result, &case.error) {
        (Ok(_), Some(expected)) => {
            errors.push(format!("expected error {}, parse succeeded", expected.kind));
        }
        (Ok(tree), None) => {
            if let Some(expected) = &case.tree {
                if tree != expected {
                    errors.push("tree mismatch".to_string());
                }
            }
        }
        (Err(e), None) => {
            errors.push(format!("unexpected error: {}", e));
        }
        (Err(e), Some(expected)) => {
            let name = error_name(e);
            if name != expected.kind {
                errors.push(format!("error kind: expected {}, got {}", expected.kind, name));
            }
            if let ParseError::Syntax(syntax) = e {
                if let Some(offset) = expected.offset {
                    if syntax.offset != offset {
                        errors.push(format!("offset: expected {}, got {}", offset, syntax.offset));
                    }
                }
                if let Some(byte) = expected.byte {
                    if syntax.byte as char != byte {
                        errors.push(format!("byte: expected {:?}, got {:?}", byte, syntax.byte as char));
                    }
                }
                if let Some(tag) = &expected.tag {
                    if &syntax.tag != tag {
                        errors.push(format!("tag: expected {:?}, got {:?}", tag, syntax.tag));
                    }
                }
            } else if let Some(offset) = expected.offset {
                if e.offset() != Some(offset) {
                    errors.push(format!("offset: expected {}, got {:?}", offset, e.offset()));
                }
            }
        }
    }

    let expected = match (&case.tree, &case.error) {
        (_, Some(err)) => format!("error {:?}", err),
        (Some(tree), None) => format!("{:?}", tree),
        (None, None) => "success".to_string(),
    };

    TestResult {
        passed: errors.is_empty(),
        input: input.to_vec(),
        expected,
        actual: describe(&result),
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    let input = case.input.as_bytes();
    let result = parse_chunked(input, &[input.len()]);
    check(case, input, result, 0)
}

/// Run test with stochastic variations
///
/// Applies independent variations:
/// - Random chunk boundaries (geometric sizes)
/// - 40% chance of trailing garbage after a well-formed document
/// - 30% chance of reading through `parse_with` with a random buffer size
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let mut input = case.input.as_bytes().to_vec();

    // Trailing input is never inspected, so it must not change the outcome.
    if case.error.is_none() && gen.chance(0.4) {
        input.extend(gen.garbage());
    }

    let result = if gen.chance(0.3) {
        let options = ParseOptions::new().with_buffer_size(1 + gen.geometric(0.8));
        parse_with(input.as_slice(), &options).map(|doc| ElementSpec::from_document(&doc))
    } else {
        let sizes: Vec<usize> = (0..input.len()).map(|_| 1 + gen.geometric(0.7)).collect();
        parse_chunked(&input, &sizes)
    };

    check(case, &input, result, gen.seed)
}
