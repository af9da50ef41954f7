// tests/config_test.rs
use gitver::config::{load_config, Config, CONFIG_FILE_NAME};
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

struct CurrentDirGuard {
    original: std::path::PathBuf,
}

impl CurrentDirGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        CurrentDirGuard { original }
    }
}

impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
prefer_tags = true

[[branch]]
pattern = "main"
version_format = "${version}"

[[tag]]
pattern = "v.*"
prefix = "v"
version_format = "${tag}"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert!(config.prefer_tags);
    assert_eq!(config.branches[0].pattern, "main");
    assert_eq!(config.tags[0].prefix, "v");
    assert_eq!(config.commit.version_format, "${commit}");
}

#[test]
fn test_load_invalid_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[[branch]\nbroken").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Failed to parse configuration file"));
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[commit]\nversion_format = \"${commit.short}\"\n",
    )
    .unwrap();

    let _guard = CurrentDirGuard::enter(dir.path());
    let config = load_config(None).unwrap();
    assert_eq!(config.commit.version_format, "${commit.short}");
}

#[test]
#[serial]
fn test_working_directory_without_config() {
    let dir = TempDir::new().unwrap();
    let _guard = CurrentDirGuard::enter(dir.path());

    let config = load_config(None).unwrap();
    // a user level config may exist on the machine, so only check it parses
    let _ = config.compile().unwrap();
}

#[test]
fn test_default_config_compiles() {
    let selector = Config::default().compile().unwrap();
    assert!(selector.branch_descriptors().is_empty());
    assert!(selector.tag_descriptors().is_empty());
    assert_eq!(selector.commit_descriptor().format().as_str(), "${commit}");
    assert!(!selector.prefers_tags());
}
