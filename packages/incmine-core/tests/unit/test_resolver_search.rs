//! Resolver search tests
//!
//! Every scenario runs against a real on-disk repository with a scripted
//! compile backend standing in for clang.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use incmine_core::{
    CompileRequest, FailureReason, ProcessOutput, Resolver, RunnerError,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::PathBuf;

/// `a.c` with two ambiguous directives whose candidates live in `one/` and
/// `two/`, so both traversal orders meet at the `{one, two}` set
fn diamond() -> TempRepo {
    TempRepo::new()
        .with("a.c", &includes(&["x.h", "y.h"]))
        .with("one/x.h", "")
        .with("two/x.h", "")
        .with("one/y.h", "")
        .with("two/y.h", "")
}

#[test]
fn test_unique_resolution_compiles_once() {
    let repo = TempRepo::new()
        .with("a.c", &includes(&["inc/list.h", "util.h"]))
        .with("inc/list.h", "")
        .with("src/util.h", "");
    let graph = repo.load();
    let backend = ScriptedBackend::accept_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert!(outcome.success);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(
        outcome.include_dirs,
        vec![repo.root().to_path_buf(), repo.path("src")]
    );
    assert_eq!(backend.dir_sets(), vec![outcome.include_dirs.clone()]);
}

#[test]
fn test_ambiguity_resolved_by_trial() {
    let repo = TempRepo::new()
        .with("a.c", &includes(&["util.h"]))
        .with("src/util.h", "")
        .with("vendor/util.h", "");
    let graph = repo.load();
    let src = repo.path("src");
    let backend = ScriptedBackend::accepting(move |r| has_dir(r, &src), "");

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert!(outcome.success);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(
        backend.dir_sets(),
        vec![vec![repo.path("vendor")], vec![repo.path("src")]]
    );
}

#[test]
fn test_choice_kept_when_candidate_reached_by_other_directive() {
    let repo = TempRepo::new()
        .with("a.c", &includes(&["first.h", "util.h"]))
        .with("first.h", &includes(&["src/util.h"]))
        .with("src/util.h", "")
        .with("vendor/util.h", "");
    let graph = repo.load();
    let backend = ScriptedBackend::reject_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert_eq!(outcome.failure, Some(FailureReason::SearchExhausted));
    assert_eq!(outcome.attempts, 2);
    let root = repo.root().to_path_buf();
    assert_eq!(
        backend.dir_sets(),
        vec![
            vec![root.clone(), repo.path("vendor")],
            vec![root, repo.path("src")],
        ]
    );
}

#[test]
fn test_revisited_header_contributes_its_directory() {
    let repo = TempRepo::new()
        .with("src/a.c", &includes(&["inc/x.h", "b.h"]))
        .with("inc/x.h", "")
        .with("lib/b.h", &includes(&["x.h"]));
    let graph = repo.load();
    let backend = ScriptedBackend::accept_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("src/a.c"), 10).run();

    assert!(outcome.success);
    assert_eq!(
        outcome.include_dirs,
        vec![
            repo.root().to_path_buf(),
            repo.path("inc"),
            repo.path("lib")
        ]
    );
}

#[test]
fn test_same_directory_set_compiled_once() {
    let repo = diamond();
    let graph = repo.load();
    let backend = ScriptedBackend::reject_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert!(!outcome.success);
    assert_eq!(outcome.failure, Some(FailureReason::SearchExhausted));
    assert_eq!(outcome.attempts, 3);

    let sets = backend.dir_sets();
    let distinct: HashSet<&Vec<PathBuf>> = sets.iter().collect();
    assert_eq!(distinct.len(), sets.len());
    assert_eq!(
        sets,
        vec![
            vec![repo.path("two")],
            vec![repo.path("one"), repo.path("two")],
            vec![repo.path("one")],
        ]
    );
}

#[test]
fn test_budget_counts_compiles_only() {
    let repo = diamond();
    let graph = repo.load();
    let backend = ScriptedBackend::reject_all();

    // Four rounds, one of them memoized: a budget of three is enough to
    // exhaust the search
    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 3).run();

    assert_eq!(outcome.failure, Some(FailureReason::SearchExhausted));
    assert_eq!(backend.call_count(), 3);
}

#[test]
fn test_bounded_search_stops_at_max_tries() {
    let repo = diamond();
    let graph = repo.load();
    let backend = ScriptedBackend::reject_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 2).run();

    assert!(!outcome.success);
    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.failure, Some(FailureReason::TriesExhausted));
    assert_eq!(outcome.attempts, 2);
    assert_eq!(backend.call_count(), 2);
}

#[test]
fn test_backtracking_drops_nested_choices() {
    let repo = TempRepo::new()
        .with("a.c", &includes(&["cfg.h"]))
        .with("one/cfg.h", "")
        .with("two/cfg.h", &includes(&["deep.h"]))
        .with("x/deep.h", "")
        .with("y/deep.h", "");
    let graph = repo.load();
    let one = repo.path("one");
    let backend = ScriptedBackend::accepting(move |r| has_dir(r, &one), "");

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert!(outcome.success);
    assert_eq!(
        backend.dir_sets(),
        vec![
            vec![repo.path("two"), repo.path("y")],
            vec![repo.path("two"), repo.path("x")],
            vec![repo.path("one")],
        ]
    );
}

#[test]
fn test_transitive_includes_contribute_directories() {
    let repo = TempRepo::new()
        .with("src/main.c", &includes(&["core/api.h"]))
        .with("lib/core/api.h", &includes(&["types.h"]))
        .with("lib/core/detail/types.h", "");
    let graph = repo.load();
    let backend = ScriptedBackend::accept_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("src/main.c"), 10).run();

    assert!(outcome.success);
    assert_eq!(
        outcome.include_dirs,
        vec![repo.path("lib"), repo.path("lib/core/detail")]
    );
}

#[test]
fn test_include_cycle_terminates() {
    let repo = TempRepo::new()
        .with("a.c", &includes(&["p.h"]))
        .with("p.h", &includes(&["q.h"]))
        .with("q.h", &includes(&["p.h", "a.c"]));
    let graph = repo.load();
    let backend = ScriptedBackend::reject_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert_eq!(outcome.failure, Some(FailureReason::SearchExhausted));
    assert_eq!(outcome.attempts, 1);
}

#[test]
fn test_system_include_adds_no_directory() {
    let repo = TempRepo::new()
        .with("a.c", "#include <util.h>\n")
        .with("src/util.h", "");
    let graph = repo.load();
    let backend = ScriptedBackend::accept_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert!(outcome.success);
    assert!(outcome.include_dirs.is_empty());
}

#[test]
fn test_remarks_parsed_from_successful_compile() {
    let repo = TempRepo::new().with("k.c", "");
    let graph = repo.load();
    let backend = ScriptedBackend::accepting(
        |_| true,
        "k.c:12:5: remark: vectorized loop (vectorization width: 4, interleaved count: 2)\n",
    );

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("k.c"), 10).run();

    assert!(outcome.success);
    let tuples: Vec<_> = outcome.matches.iter().map(|m| m.as_tuple()).collect();
    assert_eq!(tuples, vec![(12, 5, 4, 2, 0)]);
}

#[test]
fn test_timeouts_are_failed_attempts() {
    let repo = TempRepo::new()
        .with("a.c", &includes(&["util.h"]))
        .with("src/util.h", "")
        .with("vendor/util.h", "");
    let graph = repo.load();
    let backend = ScriptedBackend::time_out_all();

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert!(!outcome.success);
    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.timeouts, 2);
    assert_eq!(outcome.failure, Some(FailureReason::SearchExhausted));
}

#[test]
fn test_spawn_failure_keeps_backtracking() {
    let repo = TempRepo::new()
        .with("a.c", &includes(&["util.h"]))
        .with("src/util.h", "")
        .with("vendor/util.h", "");
    let graph = repo.load();
    let vendor = repo.path("vendor");
    let backend = ScriptedBackend::new(move |r: &CompileRequest| {
        if has_dir(r, &vendor) {
            Err(RunnerError::Spawn {
                program: "clang".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            })
        } else {
            Ok(ProcessOutput::new(incmine_core::ExitStatus::Exited(0), "", ""))
        }
    });

    let outcome = Resolver::new(graph.graph(), &backend, repo.file("a.c"), 10).run();

    assert!(outcome.success);
    assert_eq!(outcome.attempts, 2);
}
