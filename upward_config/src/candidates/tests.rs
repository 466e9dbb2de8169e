//! Candidate precedence tests.

use std::path::{Path, PathBuf};

use rstest::rstest;

use super::*;

fn file_names(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .filter_map(|candidate| candidate.path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn default_candidates_follow_fixed_precedence() {
    let options = SearchOptions::builder("foo").build();
    let candidates = candidates_for(Path::new("/repo"), &options);
    assert_eq!(
        file_names(&candidates),
        ["package.json", ".foorc", "foo.config.js"]
    );
    assert_eq!(
        candidates.first().map(|candidate| &candidate.kind),
        Some(&CandidateKind::PackageJson {
            property: String::from("foo")
        })
    );
}

#[test]
fn rc_extensions_insert_between_rc_and_config_js() {
    let options = SearchOptions::builder("foo").rc_extensions(true).build();
    let candidates = candidates_for(Path::new("/repo"), &options);
    assert_eq!(
        file_names(&candidates),
        [
            "package.json",
            ".foorc",
            ".foorc.json",
            ".foorc.yaml",
            ".foorc.yml",
            ".foorc.js",
            "foo.config.js",
        ]
    );
    let kinds: Vec<_> = candidates.into_iter().map(|candidate| candidate.kind).collect();
    assert_eq!(
        kinds.get(2..6),
        Some(
            &[
                CandidateKind::RcJson,
                CandidateKind::RcYaml,
                CandidateKind::RcYaml,
                CandidateKind::RcJs,
            ][..]
        )
    );
}

#[test]
fn package_prop_and_strict_json_flow_into_kinds() {
    let options = SearchOptions::builder("foo")
        .package_prop("fooConfig")
        .rc_strict_json(true)
        .build();
    let candidates = candidates_for(Path::new("/repo"), &options);
    assert_eq!(
        candidates.first().map(|candidate| &candidate.kind),
        Some(&CandidateKind::PackageJson {
            property: String::from("fooConfig")
        })
    );
    assert_eq!(
        candidates.get(1).map(|candidate| &candidate.kind),
        Some(&CandidateKind::RcPlain { strict_json: true })
    );
}

#[test]
fn candidates_are_joined_onto_the_directory() {
    let options = SearchOptions::builder("bar").build();
    let candidates = candidates_for(Path::new("/a/b"), &options);
    assert!(
        candidates
            .iter()
            .all(|candidate| candidate.path.parent() == Some(Path::new("/a/b")))
    );
}

#[rstest]
#[case("conf.json", CandidateKind::RcJson)]
#[case("conf.JSON", CandidateKind::RcJson)]
#[case("conf.yaml", CandidateKind::RcYaml)]
#[case("conf.yml", CandidateKind::RcYaml)]
#[case("conf.js", CandidateKind::RcJs)]
#[case("conf.cjs", CandidateKind::RcJs)]
#[case(".foorc", CandidateKind::RcPlain { strict_json: false })]
#[case("conf.toml", CandidateKind::RcPlain { strict_json: false })]
fn explicit_paths_infer_kind_from_extension(#[case] name: &str, #[case] expected: CandidateKind) {
    let path = PathBuf::from("/cfg").join(name);
    let candidate = explicit_candidate(&path, None);
    assert_eq!(candidate.kind, expected);
    assert_eq!(candidate.path, path);
}

#[test]
fn explicit_format_overrides_extension() {
    let candidate = explicit_candidate(Path::new("/cfg/settings.conf"), Some(ConfigFormat::Json));
    assert_eq!(candidate.kind, CandidateKind::RcJson);
    let candidate = explicit_candidate(Path::new("/cfg/settings.json"), Some(ConfigFormat::Js));
    assert!(candidate.kind.is_module());
}
