//! Runs every sample report under conformance/ through the full pipeline.
//! Positive samples must parse; negative samples must fail with the message
//! stored next to them in `<name>.expected-error.txt`.

use std::path::{Path, PathBuf};

use fim_core::{parse, tokenize, TokenKind};

fn conformance_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../conformance")
}

fn collect_reports(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "fim"))
        .collect();
    paths.sort();
    paths
}

#[test]
fn positive_samples_parse() {
    let mut tested = 0usize;
    let mut failures = Vec::new();

    for path in collect_reports(&conformance_root().join("positive")) {
        let src = std::fs::read_to_string(&path).unwrap();
        if let Err(e) = parse(&src) {
            failures.push(format!("{}: {}", path.display(), e));
        }
        tested += 1;
    }

    assert!(tested > 0, "no positive samples found");
    assert!(
        failures.is_empty(),
        "{} of {} positive samples failed:\n{}",
        failures.len(),
        tested,
        failures.join("\n")
    );
}

#[test]
fn negative_samples_fail_with_expected_message() {
    let mut tested = 0usize;
    let mut failures = Vec::new();

    for path in collect_reports(&conformance_root().join("negative")) {
        let src = std::fs::read_to_string(&path).unwrap();
        let expected_path = path.with_extension("expected-error.txt");
        let expected = std::fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("missing {}: {}", expected_path.display(), e));
        let expected = expected.trim();

        match parse(&src) {
            Ok(_) => failures.push(format!("{}: parsed but should fail", path.display())),
            Err(e) if !e.message.contains(expected) => failures.push(format!(
                "{}: expected '{}', got '{}'",
                path.display(),
                expected,
                e.message
            )),
            Err(_) => {}
        }
        tested += 1;
    }

    assert!(tested > 0, "no negative samples found");
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn token_streams_are_well_formed() {
    for dir in ["positive", "negative"] {
        for path in collect_reports(&conformance_root().join(dir)) {
            let src = std::fs::read_to_string(&path).unwrap();
            let tokens = tokenize(&src);

            let eofs = tokens
                .iter()
                .filter(|t| t.kind == TokenKind::EndOfFile)
                .count();
            assert_eq!(eofs, 1, "{}", path.display());
            assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFile));

            for t in &tokens[..tokens.len() - 1] {
                assert!(t.start < src.len(), "{}: {:?}", path.display(), t);
                assert!(!t.kind.is_trivia(), "{}: {:?}", path.display(), t);
            }
        }
    }
}

#[test]
fn hello_world_shape() {
    let src = std::fs::read_to_string(conformance_root().join("positive/hello_world.fim")).unwrap();
    let report = parse(&src).unwrap();
    assert_eq!(report.title, "Hello World");
    assert_eq!(report.author, "Twilight Sparkle");

    let main = report.functions().next().unwrap();
    assert!(main.is_main);
    assert_eq!(main.name, "how to say hello world");
    assert_eq!(main.body.items.len(), 1);
}

#[test]
fn negative_error_positions_are_one_based() {
    let src =
        std::fs::read_to_string(conformance_root().join("negative/name_mismatch.fim")).unwrap();
    let err = parse(&src).unwrap_err();
    assert_eq!(err.line, 5);
    assert_eq!(err.column, 18);
    assert_eq!(
        err.to_string(),
        "[line 5:18] Mismatch method name. Expected 'flying', got 'swimming'"
    );
}
