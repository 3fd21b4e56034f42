mod helpers;

use std::io::Write;

use babel::config::{BabelConfig, LibraryMode};
use babel::server::AppState;
use helpers::TINY_VOCABULARY;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_settings_from_file() {
    let file = write_config(
        r#"
[server]
port = 9999
cors_origin = "http://babel.local"

[library]
base_seed = "tlön-1940"
earliest_year = 1900
latest_year = 1950

[search]
default_max_results = 4
max_results_ceiling = 8

[rate_limit]
max_requests = 10
"#,
    );
    let config = BabelConfig::load_from(file.path()).unwrap();
    assert_eq!(config.server.cors_origin, "http://babel.local");
    assert_eq!(config.library.base_seed, "tlön-1940");
    assert_eq!(config.year_span().earliest, 1900);
    assert_eq!(config.search.default_max_results, 4);
    assert_eq!(config.search.max_results_ceiling, 8);
    assert_eq!(config.rate_limit.max_requests, 10);
    assert_eq!(config.library.mode, LibraryMode::Educational);
}

#[test]
fn missing_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = BabelConfig::load_from(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.search.max_results_ceiling, 20);
    assert_eq!(config.enhanced.timeout_ms, 2000);
}

#[test]
fn malformed_toml_is_an_error() {
    let file = write_config("[server\nport = ");
    assert!(BabelConfig::load_from(file.path()).is_err());
}

#[test]
fn inconsistent_settings_are_rejected_at_load() {
    let file = write_config("[search]\ndefault_max_results = 30\nmax_results_ceiling = 20\n");
    let err = BabelConfig::load_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("default_max_results"));

    let file = write_config("[library]\nearliest_year = 2000\nlatest_year = 1990\n");
    assert!(BabelConfig::load_from(file.path()).is_err());

    let file = write_config("[library]\nmode = \"museum\"\n");
    assert!(BabelConfig::load_from(file.path()).is_err());
}

#[test]
fn custom_vocabulary_is_loaded_into_state() {
    let vocab_file = write_config(TINY_VOCABULARY);
    let mut config = BabelConfig::default();
    config.library.vocabulary_path = vocab_file.path().display().to_string();

    let state = AppState::new(config).unwrap();
    assert_eq!(state.library().vocabulary().concept_names(), vec!["gears"]);
}

#[test]
fn missing_vocabulary_file_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = BabelConfig::default();
    config.library.vocabulary_path = dir.path().join("nope.toml").display().to_string();
    let err = AppState::new(config).err().unwrap();
    assert!(format!("{err:#}").contains("vocabulary"));
}

#[test]
fn invalid_vocabulary_file_fails_startup() {
    let vocab_file = write_config(&TINY_VOCABULARY.replace("{concept}", "{planet}"));
    let mut config = BabelConfig::default();
    config.library.vocabulary_path = vocab_file.path().display().to_string();
    assert!(AppState::new(config).is_err());
}
