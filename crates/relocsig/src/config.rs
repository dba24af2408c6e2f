use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use relocator_reflect::{ClassRef, MethodReference, ReflectError, ReflectionMappings, StringRef};
use relocator_signature::{validate_internal_name, SignatureError};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "Relocsig.toml";

/// The parsed Relocsig.toml.
#[derive(Debug, Clone, Default)]
pub struct RelocsigConfig {
    pub output: OutputSection,
    /// Exact internal-name renames, old to new.
    pub rename: BTreeMap<String, String>,
    pub reflection: ReflectionSection,
    /// The file this was loaded from; `None` for the built-in default.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReflectionSection {
    #[serde(default)]
    pub class: Vec<ClassLookup>,
}

/// A method whose call returns the class named by one of its `String` arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassLookup {
    pub owner: String,
    pub name: String,
    pub descriptor: String,
    pub name_param: u16,
}

impl ClassLookup {
    fn register(&self, mappings: &mut ReflectionMappings) -> Result<(), ReflectError> {
        let reference = MethodReference::new(&self.owner, &self.name, &self.descriptor)?;
        let class = ClassRef::named(StringRef::param(i32::from(self.name_param))?);
        mappings.add_method_class(reference, class)
    }
}

impl RelocsigConfig {
    /// The JDK mappings plus every `[[reflection.class]]` entry.
    pub fn reflection_mappings(&self) -> Result<ReflectionMappings, ConfigError> {
        let mut mappings = ReflectionMappings::with_defaults().map_err(ConfigError::Defaults)?;
        for (index, lookup) in self.reflection.class.iter().enumerate() {
            lookup
                .register(&mut mappings)
                .map_err(|e| ConfigError::InvalidReflection(index, e))?;
        }
        Ok(mappings)
    }
}

/// Raw TOML structure for deserialization.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    output: OutputSection,
    #[serde(default)]
    rename: BTreeMap<String, String>,
    #[serde(default)]
    reflection: ReflectionSection,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no Relocsig.toml found (searched from {0})")]
    NotFound(String),
    #[error("failed to read Relocsig.toml: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid Relocsig.toml: {0}")]
    ParseError(String),
    #[error("invalid Relocsig.toml: [rename] entry '{0}': {1}")]
    InvalidRename(String, SignatureError),
    #[error("invalid Relocsig.toml: [[reflection.class]] entry #{0}: {1}")]
    InvalidReflection(usize, ReflectError),
    #[error("built-in reflection mappings are invalid: {0}")]
    Defaults(ReflectError),
}

/// Walk up from `start_dir` looking for `Relocsig.toml`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> Result<RelocsigConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    config.path = Some(path.to_path_buf());
    Ok(config)
}

/// Parse and validate Relocsig.toml content.
pub fn parse_config(content: &str) -> Result<RelocsigConfig, ConfigError> {
    let raw: RawConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    for (old, new) in &raw.rename {
        validate_internal_name(old).map_err(|e| ConfigError::InvalidRename(old.clone(), e))?;
        validate_internal_name(new).map_err(|e| ConfigError::InvalidRename(old.clone(), e))?;
    }

    let config = RelocsigConfig {
        output: raw.output,
        rename: raw.rename,
        reflection: raw.reflection,
        path: None,
    };
    // surface bad reflection entries at load time
    config.reflection_mappings()?;
    Ok(config)
}

/// Load `explicit` if given, otherwise the nearest Relocsig.toml above
/// `start_dir`, otherwise the defaults.
pub fn resolve_config(explicit: Option<&Path>, start_dir: &Path) -> Result<RelocsigConfig, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        return load_config(path);
    }
    match find_config(start_dir) {
        Some(path) => load_config(&path),
        None => {
            tracing::debug!(start = %start_dir.display(), "no Relocsig.toml found, using defaults");
            Ok(RelocsigConfig::default())
        }
    }
}
