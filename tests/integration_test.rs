// Integration tests for hjmatch
use hjmatch::prelude::*;
use hjmatch::{MatcherSettings, CacheStats};
use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn hair_matcher() -> PhraseMatcher {
    MatcherBuilder::new()
        .reference_file(fixture("hair_reference.txt"))
        .config_file(fixture("hair_config.json"))
        .build()
        .unwrap()
}

fn eye_matcher() -> PhraseMatcher {
    MatcherBuilder::new()
        .reference_file(fixture("eye_reference.txt"))
        .config_file(fixture("eye_config.json"))
        .build()
        .unwrap()
}

#[test]
fn test_hair_reference() {
    let matcher = hair_matcher();
    assert_eq!(matcher.config().metric, WordMetric::JaroWinkler);
    assert_eq!(matcher.find_best_match("long blond hair"), Some("blond"));
    assert_eq!(matcher.find_best_match("platinum hair"), Some("blond"));
    assert_eq!(matcher.find_best_match("auburn curls"), Some("red"));
    assert_eq!(matcher.find_best_match("jet black"), Some("black"));
}

#[test]
fn test_eye_reference() {
    let matcher = eye_matcher();
    assert_eq!(matcher.config().threshold, 0.85);
    assert_eq!(matcher.find_best_match("beautiful blue eyes"), Some("blue"));
    assert_eq!(matcher.find_best_match("eyes of green"), Some("green"));
    assert_eq!(matcher.find_best_match("striking violet"), None);
}

#[test]
fn test_synonym_resolves_to_label() {
    let catalog = ReferenceCatalog::from_lines(["blond : platinum, golden"]).unwrap();
    let matcher = PhraseMatcher::new(catalog, MatcherConfig::default()).unwrap();
    assert_eq!(matcher.find_best_match("platinum hair"), Some("blond"));
    assert_eq!(matcher.find_best_match("golden"), Some("blond"));
}

#[test]
fn test_label_without_synonyms_no_match() {
    let catalog = ReferenceCatalog::from_lines(["blue : "]).unwrap();
    let matcher = PhraseMatcher::new(catalog, MatcherConfig::new(0.8, WordMetric::JaroWinkler)).unwrap();
    assert_eq!(matcher.find_best_match("green"), None);
}

#[test]
fn test_rectangular_alignment_score() {
    let matcher = PhraseMatcher::with_catalog(ReferenceCatalog::new());
    let score = matcher.sim_measure(&["long", "blond", "hair"], &["blond"]);
    assert!((score - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_self_similarity_through_pipeline() {
    let matcher = hair_matcher();
    for entry in matcher.catalog() {
        assert_eq!(matcher.sim_measure(entry.words(), entry.words()), 1.0, "{}", entry.phrase());
    }
}

#[test]
fn test_every_reference_phrase_resolves_to_its_label() {
    let matcher = eye_matcher();
    for entry in matcher.catalog() {
        assert_eq!(matcher.find_best_match(&entry.phrase()), Some(entry.label()));
    }
}

#[test]
fn test_cached_matches_uncached() {
    let mut matcher = hair_matcher();
    let inputs = ["long blond hair", "purple", "silver streaks", "purple", "long blond hair"];
    for input in inputs {
        let expected = matcher.find_best_match(input).map(str::to_string);
        assert_eq!(matcher.find_best_match_cached(input).map(str::to_string), expected);
    }
    assert_eq!(matcher.cache_stats(), CacheStats { entries: 3, hits: 2, misses: 3 });
}

#[test]
fn test_instances_do_not_share_state() {
    let mut first = hair_matcher();
    let second = hair_matcher();
    first.find_best_match_cached("platinum hair");
    assert_eq!(first.cache_stats().entries, 1);
    assert_eq!(second.cache_stats().entries, 0);
}

#[test]
fn test_shared_matcher_agrees() {
    let matcher = hair_matcher();
    let expected: Vec<Option<String>> = ["long blond hair", "raven", "purple"]
        .iter()
        .map(|p| matcher.find_best_match(p).map(str::to_string))
        .collect();

    let shared = SharedMatcher::from(matcher);
    let actual: Vec<Option<String>> = ["long blond hair", "raven", "purple"]
        .iter()
        .map(|p| shared.find_best_match_cached(p))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_config_with_inline_and_file_references() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("extra.txt"), "violet: purple, lilac\n").unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"eyes": {
            "parameters": {"threshold": "0.8"},
            "partial_method": "jaro",
            "references": ["hazel: amber"],
            "references_files": ["extra.txt"]
        }}"#,
    )
    .unwrap();

    let matcher = MatcherBuilder::new()
        .config_file(&config)
        .section("eyes")
        .build()
        .unwrap();
    assert_eq!(matcher.catalog().labels(), vec!["hazel", "violet"]);
    assert_eq!(matcher.find_best_match("lilac eyes"), Some("violet"));

    let settings = MatcherSettings::from_file(&config, "eyes").unwrap();
    assert_eq!(settings.references_files, vec![dir.path().join("extra.txt")]);
}

#[test]
fn test_levenshtein_config() {
    let matcher = MatcherBuilder::new()
        .reference_file(fixture("hair_reference.txt"))
        .metric(WordMetric::Levenshtein)
        .build()
        .unwrap();
    assert_eq!(matcher.find_best_match("blnd hair"), Some("blond"));
}

#[test]
fn test_conflicting_references_rejected() {
    let result = MatcherBuilder::new()
        .reference_file(fixture("hair_reference.txt"))
        .reference_line("grey: platinum")
        .build();
    assert!(matches!(
        result,
        Err(hjmatch_loader::Error::Core(Error::ConflictingPhrase { .. }))
    ));
}

#[test]
fn test_malformed_threshold_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"method_type": {"parameters": {"threshold": "eighty"}}}"#).unwrap();
    let result = MatcherBuilder::new().config_file(&config).build();
    assert!(matches!(result, Err(hjmatch_loader::Error::InvalidConfig(_))));
}

#[test]
fn test_explain_reports_alignment() {
    let matcher = hair_matcher();
    let explanation = matcher.explain("long blond hair").unwrap();
    assert_eq!(explanation.label, "blond");
    assert_eq!(explanation.reference, "blond");
    assert_eq!(explanation.alignment.len(), 1);
    assert_eq!(explanation.alignment[0].reference_word, "blond");
}

#[test]
fn test_cli_extract_mode() {
    let output = Command::new(env!("CARGO_BIN_EXE_hjmatch"))
        .arg("--reference-file")
        .arg(fixture("eye_reference.txt"))
        .arg("--config-file")
        .arg(fixture("eye_config.json"))
        .arg("--input")
        .arg(fixture("sentences.txt"))
        .arg("--extract")
        .arg("--lowercase")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "1 <eyeColor> beautiful blue eyes => blue",
            "2 <eyeColor> eyes of green => green",
            "3 <eyeColor> striking violet => (NONE)",
            "4 <eyeColor> Hazel => hazel",
        ]
    );
}

#[test]
fn test_cli_rejects_unknown_method() {
    let output = Command::new(env!("CARGO_BIN_EXE_hjmatch"))
        .arg("--input")
        .arg(fixture("sentences.txt"))
        .arg("--method")
        .arg("soundex")
        .output()
        .unwrap();
    assert!(!output.status.success());
}
