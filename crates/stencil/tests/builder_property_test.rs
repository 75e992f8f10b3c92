//! Property tests for the Diagram declaration API
//!
//! Any balanced sequence of declarations must finalize successfully, and
//! declaring the same sequence twice must produce byte-identical output.

use std::fs;
use std::path::Path;

use proptest::prelude::*;

use stencil::{Diagram, Edge, Error, NodeRef, RenderAttributes};

const CATEGORIES: &[&str] = &[
    "server",
    "database",
    "queue",
    "firewall",
    "loadbalancer",
    "user",
    "vault",
    "token",
    "pod",
];

/// One step of a balanced declaration sequence. Groups carry their own
/// nested steps, so every generated sequence is balanced by construction.
#[derive(Debug, Clone)]
enum Step {
    Node { category: usize, label: String },
    Group { name: String, body: Vec<Step> },
}

// ===================
// Strategies
// ===================

fn label_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let node = (0..CATEGORIES.len(), label_strategy())
        .prop_map(|(category, label)| Step::Node { category, label });

    node.prop_recursive(3, 12, 4, |inner| {
        ("[a-z]{1,8}", prop::collection::vec(inner, 0..4))
            .prop_map(|(name, body)| Step::Group { name, body })
    })
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step_strategy(), 1..6)
}

fn apply_steps(diagram: &mut Diagram, steps: &[Step]) -> Result<Vec<NodeRef>, Error> {
    let mut refs = Vec::new();
    for step in steps {
        match step {
            Step::Node { category, label } => {
                refs.push(diagram.node(CATEGORIES[*category], label.clone())?);
            }
            Step::Group { name, body } => {
                let mut nested = Vec::new();
                diagram.group(name.clone(), |d| {
                    nested = apply_steps(d, body)?;
                    Ok(())
                })?;
                refs.extend(nested);
            }
        }
    }
    Ok(refs)
}

fn declare(path: &Path, steps: &[Step]) -> Result<Vec<u8>, Error> {
    let mut diagram = Diagram::begin("property", path, RenderAttributes::default())?;
    let refs = apply_steps(&mut diagram, steps)?;
    for pair in refs.windows(2) {
        diagram.connect(pair[0], pair[1], Edge::default())?;
    }
    diagram.finalize()?;
    Ok(fs::read(path)?)
}

// ===================
// Property Test Functions
// ===================

fn check_balanced_sequence_finalizes(steps: &[Step]) -> Result<(), TestCaseError> {
    let dir = tempfile::tempdir().map_err(|err| TestCaseError::fail(err.to_string()))?;
    let path = dir.path().join("out.svg");

    let result = declare(&path, steps);
    prop_assert!(
        result.is_ok(),
        "Balanced declarations failed to finalize: {:?}",
        result.err()
    );
    prop_assert!(path.exists());
    Ok(())
}

fn check_declaration_is_deterministic(steps: &[Step]) -> Result<(), TestCaseError> {
    let dir = tempfile::tempdir().map_err(|err| TestCaseError::fail(err.to_string()))?;

    let first = declare(&dir.path().join("a.svg"), steps)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let second = declare(&dir.path().join("b.svg"), steps)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    prop_assert_eq!(first, second);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn balanced_sequence_finalizes(steps in sequence_strategy()) {
        check_balanced_sequence_finalizes(&steps)?;
    }

    #[test]
    fn declaration_is_deterministic(steps in sequence_strategy()) {
        check_declaration_is_deterministic(&steps)?;
    }
}
