//! Canonical name derivation properties

use toolbridge::naming::{NameCanonicalizer, NamingPolicy, DEFAULT_MAX_LENGTH};

#[test]
fn determinism_across_repeated_calls() {
    let canonicalizer = NameCanonicalizer::new();
    let inputs = [
        ("github", "GITHUB_CREATE_ISSUE"),
        ("gmail", "fetch_emails"),
        ("google-drive", "List-Files"),
        ("neo4j", "NEO4J_RUN_CYPHER_QUERY"),
    ];
    for (namespace, raw) in inputs {
        let first = canonicalizer.canonicalize(namespace, raw).unwrap();
        for _ in 0..10 {
            assert_eq!(canonicalizer.canonicalize(namespace, raw).unwrap(), first);
        }
    }
}

#[test]
fn length_bound_holds_for_long_inputs() {
    let canonicalizer = NameCanonicalizer::new();
    for action_len in [1usize, 20, 54, 55, 56, 80, 200] {
        let raw = "a".repeat(action_len);
        let name = canonicalizer.canonicalize("warehouse", &raw).unwrap();
        assert!(
            name.chars().count() <= DEFAULT_MAX_LENGTH,
            "length {} exceeded for input length {}",
            name.len(),
            action_len
        );
    }
}

#[test]
fn output_never_ends_with_separator() {
    let canonicalizer = NameCanonicalizer::new();
    // The 55-char truncation boundary lands exactly on an underscore.
    let raw = format!("{}_x", "a".repeat(44));
    let name = canonicalizer.canonicalize("warehouse", &raw).unwrap();
    assert!(!name.ends_with('_'));

    let name = canonicalizer.canonicalize("github", "create_").unwrap();
    assert!(!name.ends_with('_'));
}

#[test]
fn redundant_namespace_is_collapsed() {
    let canonicalizer = NameCanonicalizer::new();
    assert_eq!(
        canonicalizer
            .canonicalize("github", "github_create_issue")
            .unwrap(),
        canonicalizer.canonicalize("github", "create_issue").unwrap()
    );
    assert_eq!(
        canonicalizer.canonicalize("github", "create_issue").unwrap(),
        "github_issue"
    );
}

#[test]
fn prefix_stripping_is_first_match_only() {
    let canonicalizer = NameCanonicalizer::new();
    // "get_" is earlier in the list than "list_"; after stripping it the
    // scan stops, so "list_users" survives.
    assert_eq!(
        canonicalizer.canonicalize("admin", "get_list_users").unwrap(),
        "admin_list_users"
    );
}

#[test]
fn hyphens_and_case_normalize() {
    let canonicalizer = NameCanonicalizer::new();
    // "list_" is on the default noise list, so the normalized action
    // "list_files" loses its verb.
    assert_eq!(
        canonicalizer
            .canonicalize("Google-Drive", "List-Files")
            .unwrap(),
        "google_drive_files"
    );
    // With prefix stripping disabled the fully spelled name comes through.
    let keep_verbs = NameCanonicalizer::with_policy(NamingPolicy {
        noise_prefixes: Vec::new(),
        max_length: DEFAULT_MAX_LENGTH,
    });
    assert_eq!(
        keep_verbs.canonicalize("Google-Drive", "List-Files").unwrap(),
        "google_drive_list_files"
    );
}

#[test]
fn truncation_of_oversized_candidate() {
    let canonicalizer = NameCanonicalizer::new();
    // Candidate is 80 characters before the cap.
    let raw = "b".repeat(70);
    let name = canonicalizer.canonicalize("warehouse", &raw).unwrap();
    assert_eq!(name.chars().count(), DEFAULT_MAX_LENGTH);
    assert!(!name.ends_with('_'));
}

#[test]
fn namespace_collapse_is_not_recursive() {
    let canonicalizer = NameCanonicalizer::new();
    // One leading occurrence removed; the repeat stays.
    assert_eq!(
        canonicalizer
            .canonicalize("github", "github_github_issue")
            .unwrap(),
        "github_github_issue"
    );
}
