//! Integration tests for Calltree
//!
//! These tests drive the library crates and the binary end to end over a
//! corpus written to a temporary directory.

use calltree_core::{EdgeStore, GraphError, Polarity, graph_sizes, traverse};
use calltree_indexer::{IndexError, IndexerConfig, build_edge_index, query};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_corpus(root: &Path, units: &[(&str, &str)]) {
    let code = root.join("code");
    fs::create_dir_all(&code).unwrap();
    for (name, body) in units {
        fs::write(code.join(name), body).unwrap();
    }
}

fn sample_corpus() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(
        temp_dir.path(),
        &[
            ("main.m", "function main()\n  cfg = load_config();\n  run_model(cfg);\nend\n"),
            ("load_config.m", "function c = load_config()\n  c = read_file('x');\nend\n"),
            ("read_file.m", "function t = read_file(p)\n  % fallback: load_config()\n  t = p;\nend\n"),
            ("run_model.m", "function run_model(c)\n  cellfun(@step, c);\n  log_result\nend\n"),
            ("step.m", "function s = step(x)\n  s = read_file(x);\nend\n"),
            ("log_result.m", "function log_result()\nend\n"),
        ],
    );
    temp_dir
}

fn calltree(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calltree"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run calltree")
}

/// Index, then query both polarities through the library API
#[test]
fn test_index_and_query() {
    let dir = sample_corpus();
    let config = IndexerConfig::load(dir.path()).unwrap();

    let summary = build_edge_index(&config, false).unwrap();
    assert_eq!(summary.indexed, 6);
    assert_eq!(summary.edges, 6);

    let root = query(&config, "main", Polarity::Root, None).unwrap();
    let layer_of = |name: &str| {
        root.nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.layer)
            .unwrap()
    };
    assert_eq!(layer_of("main"), 0);
    assert_eq!(layer_of("run_model"), 1);
    assert_eq!(layer_of("step"), 2);
    assert_eq!(layer_of("read_file"), 2);

    let leaf = query(&config, "read_file", Polarity::Leaf, None).unwrap();
    let names: Vec<&str> = leaf.nodes.iter().map(|n| n.name.as_str()).collect();
    assert!(!names.contains(&"log_result"));
    assert_eq!(names.last(), Some(&"read_file"));
    for edge in &leaf.edges {
        let from = leaf.nodes.iter().find(|n| n.name == edge.caller).unwrap();
        let to = leaf.nodes.iter().find(|n| n.name == edge.callee).unwrap();
        assert!(from.layer < to.layer);
    }
}

/// Pruning through the query path keeps only nodes within the bound
#[test]
fn test_query_depth_bound() {
    let dir = sample_corpus();
    let config = IndexerConfig::load(dir.path()).unwrap();
    build_edge_index(&config, false).unwrap();

    let shallow = query(&config, "main", Polarity::Root, Some(1)).unwrap();
    let names: Vec<&str> = shallow.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["main", "load_config", "run_model"]);
    assert!(shallow.nodes.iter().all(|n| n.layer <= 1));
}

/// Graph sizes come straight from the on-disk index
#[test]
fn test_graph_sizes_from_store() {
    let dir = sample_corpus();
    let config = IndexerConfig::load(dir.path()).unwrap();
    build_edge_index(&config, false).unwrap();

    let store = EdgeStore::at(dir.path(), "data");
    let sizes = graph_sizes(&store, &["main".to_string(), "read_file".to_string()]).unwrap();
    assert_eq!(sizes[0].as_root, 6);
    assert_eq!(sizes[0].as_leaf, 1);
    assert_eq!(sizes[1].as_root, 1);
    assert_eq!(sizes[1].as_leaf, 5);

    let graph = traverse(&store, "read_file", Polarity::Leaf).unwrap();
    assert_eq!(graph.node_count(), 5);
}

/// A custom configuration file changes where units are found and how they are scanned
#[test]
fn test_custom_config() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("entry.py"), "# driver\nhelper()\n").unwrap();
    fs::write(src.join("helper.py"), "# helper\n").unwrap();
    fs::write(
        dir.path().join("calltree.toml"),
        "source_dir = \"src\"\nindex_dir = \"idx\"\npatterns = [\"*.py\"]\ncomment_prefix = \"#\"\nheader_lines = 0\n",
    )
    .unwrap();

    let config = IndexerConfig::load(dir.path()).unwrap();
    build_edge_index(&config, false).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("idx").join("helper_in.txt")).unwrap(),
        "entry\n"
    );
}

#[test]
fn test_unknown_principal() {
    let dir = sample_corpus();
    let config = IndexerConfig::load(dir.path()).unwrap();
    build_edge_index(&config, false).unwrap();
    let err = query(&config, "no_such_fn", Polarity::Root, None).unwrap_err();
    assert!(matches!(
        err,
        IndexError::Graph(GraphError::UnknownPrincipal(_))
    ));
}

/// The binary prints layered text and JSON on stdout
#[test]
fn test_cli_index_and_graph() {
    let dir = sample_corpus();

    let output = calltree(dir.path(), &["index"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Indexed 6 symbols"));

    let output = calltree(dir.path(), &["graph", "main", "--polarity", "root", "--max-depth", "1"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "layer 0: main\nlayer 1: load_config run_model\nmain -> load_config\nmain -> run_model\n"
    );

    let output = calltree(dir.path(), &["graph", "step", "--max-depth", "-1", "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["principal"], "step");
    assert_eq!(value["polarity"], "leaf");
    assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_errors_exit_nonzero() {
    let dir = sample_corpus();
    assert!(calltree(dir.path(), &["index"]).status.success());

    let output = calltree(dir.path(), &["graph", "missing"]);
    assert!(!output.status.success());

    let output = calltree(dir.path(), &["graph", "main", "--polarity", "sideways"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_sizes_and_clear() {
    let dir = sample_corpus();
    let report = dir.path().join("sizes.txt");

    let output = calltree(dir.path(), &["sizes"]);
    assert!(!output.status.success());

    assert!(calltree(dir.path(), &["index"]).status.success());
    let output = calltree(
        dir.path(),
        &["sizes", "--sort-by", "leaf", "--output", report.to_str().unwrap()],
    );
    assert!(output.status.success());
    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("Sorted by size of the leaf graph"));
    assert!(text.lines().any(|line| line.contains(" read_file ")));

    assert!(calltree(dir.path(), &["clear"]).status.success());
    assert!(!dir.path().join("data").exists());
    assert!(dir.path().join("code").join("main.m").exists());
}
