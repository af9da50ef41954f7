use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{PatternMatcher, PropertyDescriptor, VersionDescriptor};
use crate::error::{GitVersionError, Result};
use crate::selector::DescriptorSelector;

/// Name of the configuration file looked up in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "gitver.toml";

/// Represents the complete configuration for gitver.
///
/// Contains the ordered tag and branch descriptors, the commit fallback, and
/// whether tags take priority over branches.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub prefer_tags: bool,

    #[serde(default, rename = "branch")]
    pub branches: Vec<RefDescriptorConfig>,

    #[serde(default, rename = "tag")]
    pub tags: Vec<RefDescriptorConfig>,

    #[serde(default)]
    pub commit: CommitDescriptorConfig,
}

/// Returns the pattern matching every name.
fn default_pattern() -> String {
    PatternMatcher::MATCH_ALL.to_string()
}

/// Returns the default commit version format.
fn default_commit_format() -> String {
    "${commit}".to_string()
}

/// Descriptor for a branch or tag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RefDescriptorConfig {
    #[serde(default = "default_pattern")]
    pub pattern: String,

    pub version_format: String,

    #[serde(default)]
    pub prefix: String,

    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyDescriptorConfig>,
}

/// Fallback descriptor used when no branch or tag descriptor applies.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommitDescriptorConfig {
    #[serde(default = "default_commit_format")]
    pub version_format: String,

    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyDescriptorConfig>,
}

impl Default for CommitDescriptorConfig {
    fn default() -> Self {
        CommitDescriptorConfig {
            version_format: default_commit_format(),
            properties: Vec::new(),
        }
    }
}

/// Rewrite rule for properties whose name and value match.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PropertyDescriptorConfig {
    pub name_pattern: String,

    #[serde(default = "default_pattern")]
    pub value_pattern: String,

    pub value_format: String,
}

impl Config {
    /// Compiles every pattern and format string into a selector.
    ///
    /// Errors name the offending descriptor, e.g. `branch[1].version_format`.
    pub fn compile(&self) -> Result<DescriptorSelector> {
        let tags = compile_ref_descriptors("tag", &self.tags)?;
        let branches = compile_ref_descriptors("branch", &self.branches)?;

        let commit = VersionDescriptor::commit(&self.commit.version_format)
            .map_err(|e| e.in_descriptor("commit.version_format"))?;
        let commit = with_properties(commit, "commit", &self.commit.properties)?;

        Ok(DescriptorSelector::new(tags, branches, commit).prefer_tags(self.prefer_tags))
    }
}

fn compile_ref_descriptors(
    kind: &str,
    descriptors: &[RefDescriptorConfig],
) -> Result<Vec<VersionDescriptor>> {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, config)| {
            let location = format!("{}[{}]", kind, index);

            let descriptor =
                VersionDescriptor::for_ref(Some(&config.pattern), &config.version_format)
                    .map_err(|e| {
                        let field = match e {
                            GitVersionError::Pattern { .. } => "pattern",
                            _ => "version_format",
                        };
                        e.in_descriptor(&format!("{}.{}", location, field))
                    })?
                    .with_prefix(config.prefix.as_str());

            with_properties(descriptor, &location, &config.properties)
        })
        .collect()
}

fn with_properties(
    mut descriptor: VersionDescriptor,
    location: &str,
    properties: &[PropertyDescriptorConfig],
) -> Result<VersionDescriptor> {
    for (index, property) in properties.iter().enumerate() {
        let location = format!("{}.property[{}]", location, index);

        let compiled = PropertyDescriptor::new(
            &property.name_pattern,
            Some(&property.value_pattern),
            &property.value_format,
        )
        .map_err(|e| {
            // name_pattern compiles first, so an identical value_pattern reports as name_pattern
            let field = match &e {
                GitVersionError::Pattern { pattern, .. } if *pattern == property.name_pattern => {
                    "name_pattern"
                }
                GitVersionError::Pattern { .. } => "value_pattern",
                _ => "value_format",
            };
            e.in_descriptor(&format!("{}.{}", location, field))
        })?;

        descriptor = descriptor.with_property(compiled);
    }

    Ok(descriptor)
}

/// Parses a configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Finds the configuration file to use, if any.
///
/// Looks in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `gitver.toml` in current directory
/// 3. `gitver.toml` in the user config directory
pub fn find_config(config_path: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = config_path {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(GitVersionError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file()))
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If the file cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    match find_config(config_path)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            parse_config(&fs::read_to_string(path)?)
        }
        None => Ok(Config::default()),
    }
}
