//! Property-based tests for naming and compilation using proptest.

use ahash::AHashSet;
use proptest::prelude::*;
use serde_json::json;

use pipeforge::compiler::naming::{assign_unique, assign_unique_with_helpers, sanitize_identifier};
use pipeforge::components::options::{py_str, Quote};
use pipeforge::prelude::*;

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `n` csv readers with the given labels, each printed by its own console.
fn reader_pipeline(labels: &[String]) -> Pipeline {
    let mut pipeline = Pipeline::new();
    for (i, label) in labels.iter().enumerate() {
        pipeline = pipeline
            .with_node(
                PipelineNode::new(
                    &format!("in{}", i),
                    "csvFileInput",
                    json!({ "filePath": format!("f{}.csv", i) }),
                )
                .with_label(label),
            )
            .with_node(PipelineNode::new(&format!("out{}", i), "console", json!({})))
            .with_edge(&format!("in{}", i), &format!("out{}", i));
    }
    pipeline
}

// --- Naming properties ---

proptest! {
    #[test]
    fn sanitized_labels_are_identifiers(label in ".{0,24}") {
        let name = sanitize_identifier(&label);
        prop_assert!(is_identifier(&name), "not an identifier: {:?}", name);
    }

    #[test]
    fn sanitizing_is_idempotent_for_plain_names(label in "[A-Za-z][A-Za-z0-9]{0,12}") {
        let once = sanitize_identifier(&label);
        prop_assert_eq!(sanitize_identifier(&once), once.clone());
    }

    #[test]
    fn assigned_names_are_unique(bases in prop::collection::vec("[ab](_[12])?", 0..12)) {
        let names = assign_unique(&bases);
        prop_assert_eq!(names.len(), bases.len());
        let distinct: AHashSet<&String> = names.iter().collect();
        prop_assert_eq!(distinct.len(), names.len());
        for (name, base) in names.iter().zip(&bases) {
            prop_assert!(name.starts_with(base.as_str()));
        }
    }

    #[test]
    fn helper_names_never_shadow_variables(
        nodes in prop::collection::vec(("[ab](_[12])?(_Engine)?", any::<bool>()), 0..12),
    ) {
        const ENGINE: &[&str] = &["_Engine"];
        let bases: Vec<String> = nodes.iter().map(|(base, _)| base.clone()).collect();
        let helpers: Vec<&[&str]> = nodes
            .iter()
            .map(|&(_, engine)| if engine { ENGINE } else { &[] as &[&str] })
            .collect();
        let names = assign_unique_with_helpers(&bases, &helpers);

        let mut seen = AHashSet::new();
        for (name, suffixes) in names.iter().zip(&helpers) {
            prop_assert!(seen.insert(name.clone()), "duplicate name {:?}", name);
            for suffix in suffixes.iter() {
                let helper = format!("{}{}", name, suffix);
                prop_assert!(seen.insert(helper.clone()), "duplicate helper {:?}", helper);
            }
        }
    }
}

// --- Compilation properties ---

proptest! {
    #[test]
    fn compiled_variables_are_unique_and_wired(
        labels in prop::collection::vec("[A-Ca-c ]{0,3}", 1..8),
    ) {
        let registry = ComponentRegistry::with_defaults().unwrap();
        let script = Compiler::new(&registry)
            .compile(&reader_pipeline(&labels))
            .expect("reader pipelines always compile");

        let variables: AHashSet<&str> =
            script.bodies.iter().map(|b| b.variable.as_str()).collect();
        prop_assert_eq!(variables.len(), script.bodies.len());

        for i in 0..labels.len() {
            let source = script.body(&format!("in{}", i)).unwrap();
            let sink = script.body(&format!("out{}", i)).unwrap();
            prop_assert_eq!(&sink.code, &format!("print({})\n", source.variable));
        }
    }

    #[test]
    fn compilation_is_deterministic(
        labels in prop::collection::vec("[A-Za-z0-9 _]{0,6}", 1..6),
    ) {
        let registry = ComponentRegistry::with_defaults().unwrap();
        let compiler = Compiler::new(&registry);
        let pipeline = reader_pipeline(&labels);
        let first = compiler.compile(&pipeline).unwrap().render();
        let second = compiler.compile(&pipeline).unwrap().render();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn string_literals_stay_on_one_line(value in ".{0,32}") {
        let literal = py_str(&value, Quote::Single);
        prop_assert!(!literal.contains('\n'));
        prop_assert!(!literal.contains('\r'));
    }
}
