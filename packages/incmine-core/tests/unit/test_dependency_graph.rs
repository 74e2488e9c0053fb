//! Dependency graph construction on real directory trees

#[path = "../common/mod.rs"]
mod common;

use common::*;
use incmine_core::{IncludeDirective, MinerConfig};
use pretty_assertions::assert_eq;
use std::path::Path;

#[test]
fn test_candidates_follow_sorted_insertion_order() {
    let repo = TempRepo::new()
        .with("main.c", &includes(&["util.h"]))
        .with("zlib/util.h", "")
        .with("app/util.h", "")
        .with("mid/util.h", "");
    let graph = repo.load();

    let groups = graph.graph().includes(&repo.file("main.c"));
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].candidates,
        vec![
            repo.file("app/util.h"),
            repo.file("mid/util.h"),
            repo.file("zlib/util.h"),
        ]
    );
    assert_eq!(graph.graph().ambiguous_directive_count(), 1);
}

#[test]
fn test_partial_path_narrows_candidates() {
    let repo = TempRepo::new()
        .with("main.c", &includes(&["net/buf.h"]))
        .with("net/buf.h", "")
        .with("disk/buf.h", "");
    let graph = repo.load();

    let groups = graph.graph().includes(&repo.file("main.c"));
    assert_eq!(groups[0].candidates, vec![repo.file("net/buf.h")]);
}

#[test]
fn test_relative_include_is_normalized() {
    let repo = TempRepo::new()
        .with("src/main.c", &includes(&["../inc/./api.h"]))
        .with("inc/api.h", "");
    let graph = repo.load();

    let groups = graph.graph().includes(&repo.file("src/main.c"));
    assert_eq!(groups[0].directive, IncludeDirective::user("inc/api.h"));
    assert_eq!(groups[0].candidates, vec![repo.file("inc/api.h")]);
}

#[test]
fn test_unmatched_and_repeated_directives() {
    let repo = TempRepo::new()
        .with(
            "main.c",
            "#include <stdio.h>\n#include \"a.h\"\n#include \"gone.h\"\n#include \"a.h\"\n",
        )
        .with("a.h", "");
    let graph = repo.load();

    let groups = graph.graph().includes(&repo.file("main.c"));
    assert_eq!(groups.len(), 1);
    assert_eq!(graph.graph().edge_count(), 1);
}

#[test]
fn test_directive_order_is_first_appearance() {
    let repo = TempRepo::new()
        .with("main.c", &includes(&["z.h", "a.h", "m.h"]))
        .with("a.h", "")
        .with("m.h", "")
        .with("z.h", "");
    let graph = repo.load();

    let order: Vec<String> = graph
        .graph()
        .includes(&repo.file("main.c"))
        .iter()
        .map(|e| e.directive.to_string())
        .collect();
    assert_eq!(order, vec!["\"z.h\"", "\"a.h\"", "\"m.h\""]);
}

#[test]
fn test_sources_and_hidden_directories() {
    let repo = TempRepo::new()
        .with("b.c", "")
        .with("a.c", "")
        .with("a.h", "")
        .with(".git/objects/x.c", "")
        .with("docs/readme.md", "#include \"a.h\"\n");
    let graph = repo.load();

    assert_eq!(graph.sources(), &[repo.file("a.c"), repo.file("b.c")]);
    assert_eq!(graph.graph().node_count(), 3);
}

#[test]
fn test_custom_extensions() {
    let repo = TempRepo::new()
        .with("main.cc", &includes(&["api.hpp"]))
        .with("api.hpp", "")
        .with("old.c", "");
    let config = MinerConfig {
        source_extensions: vec!["cc".to_string()],
        header_extensions: vec!["hpp".to_string()],
        ..Default::default()
    };
    let graph = repo.load_with(&config);

    assert_eq!(graph.sources(), &[repo.file("main.cc")]);
    assert_eq!(graph.graph().includes(&repo.file("main.cc")).len(), 1);
}

#[test]
fn test_cycles_reported() {
    let repo = TempRepo::new()
        .with("main.c", &includes(&["a.h"]))
        .with("a.h", &includes(&["b.h"]))
        .with("b.h", &includes(&["a.h"]));
    let graph = repo.load();

    assert_eq!(
        graph.graph().cycles(),
        vec![vec![repo.file("a.h"), repo.file("b.h")]]
    );
    assert_eq!(graph.root(), repo.root());
    assert!(graph.index().candidates(Path::new("a.h")).is_some());
}
