use std::fs;

use tempfile::tempdir;

use weft_cli::{Args, Backend, CliError};

const GRAMMAR: &str = r#"{
    "list": {
        "document": {
            "kind": "concrete",
            "attributes": [
                {"attr": "terminal", "symbol": "items:"},
                {
                    "attr": "container",
                    "orientation": "vertical",
                    "attributes": [
                        {"attr": "each", "category": "items"}
                    ],
                    "tags": ["indent"]
                }
            ]
        },
        "item": {
            "kind": "concrete",
            "attributes": [
                {"attr": "terminal", "symbol": "-", "tags": ["space-after"]},
                {"attr": "property", "name": "text"}
            ]
        }
    }
}"#;

const TREE: &str = r#"{
    "type": "list.document",
    "children": {
        "items": [
            {"type": "list.item", "properties": {"text": "first"}},
            {"type": "list.item", "properties": {"text": "second"}}
        ]
    }
}"#;

fn args(tree: &str, grammar: &str, output: &str, backend: Backend) -> Args {
    Args {
        tree: tree.to_string(),
        grammar: grammar.to_string(),
        output: Some(output.to_string()),
        backend,
        width: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_renders_both_backends() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let grammar_path = temp_dir.path().join("grammar.json");
    let tree_path = temp_dir.path().join("tree.json");
    fs::write(&grammar_path, GRAMMAR).unwrap();
    fs::write(&tree_path, TREE).unwrap();

    for backend in [Backend::Stream, Backend::Document] {
        let output_path = temp_dir.path().join("out.txt");
        let args = args(
            &tree_path.to_string_lossy(),
            &grammar_path.to_string_lossy(),
            &output_path.to_string_lossy(),
            backend,
        );

        weft_cli::run(&args).expect("rendering should succeed");

        let rendered = fs::read_to_string(&output_path).unwrap();
        assert_eq!(rendered, "items:\n  - first\n  - second");
    }
}

#[test]
fn e2e_honors_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let grammar_path = temp_dir.path().join("grammar.json");
    let tree_path = temp_dir.path().join("tree.json");
    let config_path = temp_dir.path().join("config.toml");
    let output_path = temp_dir.path().join("out.txt");
    fs::write(&grammar_path, GRAMMAR).unwrap();
    fs::write(&tree_path, TREE).unwrap();
    fs::write(&config_path, "[render]\ntab_width = 4\n").unwrap();

    let mut args = args(
        &tree_path.to_string_lossy(),
        &grammar_path.to_string_lossy(),
        &output_path.to_string_lossy(),
        Backend::Stream,
    );
    args.config = Some(config_path.to_string_lossy().to_string());

    weft_cli::run(&args).expect("rendering should succeed");

    let rendered = fs::read_to_string(&output_path).unwrap();
    assert_eq!(rendered, "items:\n    - first\n    - second");
}

#[test]
fn e2e_missing_tree_file_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let grammar_path = temp_dir.path().join("grammar.json");
    fs::write(&grammar_path, GRAMMAR).unwrap();

    let args = args(
        &temp_dir.path().join("missing.json").to_string_lossy(),
        &grammar_path.to_string_lossy(),
        &temp_dir.path().join("out.txt").to_string_lossy(),
        Backend::Stream,
    );

    assert!(matches!(weft_cli::run(&args), Err(CliError::Io(_))));
}

#[test]
fn e2e_nonconforming_tree_is_render_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let grammar_path = temp_dir.path().join("grammar.json");
    let tree_path = temp_dir.path().join("tree.json");
    fs::write(&grammar_path, GRAMMAR).unwrap();
    // The item is missing its `text` property
    fs::write(
        &tree_path,
        r#"{"type": "list.document", "children": {"items": [{"type": "list.item"}]}}"#,
    )
    .unwrap();

    let args = args(
        &tree_path.to_string_lossy(),
        &grammar_path.to_string_lossy(),
        &temp_dir.path().join("out.txt").to_string_lossy(),
        Backend::Stream,
    );

    assert!(matches!(weft_cli::run(&args), Err(CliError::Render(_))));
}
