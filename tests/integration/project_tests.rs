//! Project-level integration tests: dependency matrices and structure
//! metrics over the toy-language fixture.

use complexion::{
    analyze_project, process_results, Error, ModuleSource, ProjectOptions,
};

use crate::common::{require_module, Ast, ToyWalker};

fn source(path: &str, requires: &[&'static str]) -> ModuleSource<Ast> {
    ModuleSource {
        ast: require_module(requires),
        path: path.to_owned(),
    }
}

#[test]
fn test_two_modules_single_edge() {
    let modules = vec![source("a.js", &["./b"]), source("b.js", &[])];
    let analysis =
        analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default()).unwrap();

    assert_eq!(analysis.reports.len(), 2);
    assert_eq!(analysis.reports[0].path, "a.js");
    assert_eq!(analysis.reports[1].path, "b.js");

    assert_eq!(analysis.adjacency_matrix.row(0), &[0, 1]);
    assert_eq!(analysis.adjacency_matrix.row(1), &[0, 0]);
    assert_eq!(analysis.first_order_density, 25.0);
    assert_eq!(analysis.visibility_matrix, analysis.adjacency_matrix);
    assert_eq!(analysis.change_cost, 75.0);
}

#[test]
fn test_three_module_chain_core() {
    let modules = vec![
        source("a.js", &["./b"]),
        source("b.js", &["./c"]),
        source("c.js", &[]),
    ];
    let analysis =
        analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default()).unwrap();

    assert_eq!(analysis.visibility_matrix.row(0), &[0, 1, 1]);
    assert_eq!(analysis.visibility_matrix.row(1), &[0, 0, 1]);
    assert_eq!(analysis.visibility_matrix.row(2), &[0, 0, 0]);
    assert!((analysis.core_size - 100.0 / 3.0).abs() < 1e-9);
    assert!((analysis.change_cost - 600.0 / 9.0).abs() < 1e-9);
}

#[test]
fn test_non_relative_commonjs_produces_no_edge() {
    let modules = vec![source("a.js", &["lodash"]), source("lodash.js", &[])];
    let analysis =
        analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default()).unwrap();

    assert_eq!(analysis.adjacency_matrix.ones(), 0);
    assert_eq!(analysis.first_order_density, 0.0);
    assert_eq!(analysis.core_size, 0.0);
}

#[test]
fn test_index_file_resolution() {
    let modules = vec![source("a.js", &["./lib"]), source("lib/index.js", &[])];
    let analysis =
        analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default()).unwrap();

    // a.js sorts first (fewer path components).
    assert_eq!(analysis.reports[0].path, "a.js");
    assert_eq!(analysis.adjacency_matrix.get(0, 1), 1);
}

#[test]
fn test_reports_sorted_depth_then_lexicographic() {
    let modules = vec![
        source("src/parser/lex.js", &[]),
        source("src/b.js", &[]),
        source("main.js", &[]),
        source("src/a.js", &[]),
    ];
    let analysis =
        analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default()).unwrap();

    let paths: Vec<&str> = analysis.reports.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["main.js", "src/a.js", "src/b.js", "src/parser/lex.js"]);

    for i in 0..analysis.adjacency_matrix.size() {
        assert_eq!(analysis.adjacency_matrix.get(i, i), 0);
    }
}

#[test]
fn test_skip_calculation_defers_processing() {
    let modules = vec![source("b.js", &[]), source("a.js", &["./b"])];
    let options = ProjectOptions {
        skip_calculation: true,
        ..ProjectOptions::default()
    };
    let mut skipped = analyze_project(&modules, &ToyWalker::new(), &options).unwrap();

    // Unprocessed: insertion order, no matrices, zeroed metrics.
    assert_eq!(skipped.reports[0].path, "b.js");
    assert_eq!(skipped.adjacency_matrix.size(), 0);
    assert_eq!(skipped.maintainability, 0.0);

    // A later processing pass lands on the same result as a full run.
    process_results(&mut skipped, false);
    let full =
        analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default()).unwrap();
    assert_eq!(skipped, full);
}

#[test]
fn test_no_core_size_skips_visibility() {
    let modules = vec![source("a.js", &["./b"]), source("b.js", &[])];
    let options = ProjectOptions {
        no_core_size: true,
        ..ProjectOptions::default()
    };
    let analysis = analyze_project(&modules, &ToyWalker::new(), &options).unwrap();

    assert_eq!(analysis.first_order_density, 25.0);
    assert_eq!(analysis.visibility_matrix.size(), 0);
    assert_eq!(analysis.change_cost, 0.0);
    assert_eq!(analysis.core_size, 0.0);
}

#[test]
fn test_empty_module_path_is_rejected() {
    let modules = vec![source("", &[])];
    let result = analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default());

    match result {
        Err(Error::InvalidInput(message)) => assert!(message.contains("path")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_project_averages_over_modules() {
    let modules = vec![source("a.js", &["./b"]), source("b.js", &[])];
    let analysis =
        analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default()).unwrap();

    let expected: f64 = analysis
        .reports
        .iter()
        .map(|r| r.maintainability)
        .sum::<f64>()
        / 2.0;
    assert!((analysis.maintainability - expected).abs() < 1e-9);
    assert!(analysis.cyclomatic >= 1.0);
}

#[test]
fn test_analysis_serializes() {
    // Both modules have logical lines, keeping every density finite;
    // serde_json cannot round-trip infinities.
    let modules = vec![source("a.js", &["./b"]), source("b.js", &["fs"])];
    let analysis =
        analyze_project(&modules, &ToyWalker::new(), &ProjectOptions::default()).unwrap();

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["reports"][0]["path"], "a.js");
    assert_eq!(json["reports"][0]["dependencies"][0]["type"], "CommonJS");
    assert_eq!(json["first_order_density"], 25.0);

    let restored: complexion::ProjectAnalysis =
        serde_json::from_value(json).unwrap();
    assert_eq!(restored, analysis);
}
