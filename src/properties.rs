//! Key/value configuration sources.
//!
//! Configuration arrives as string values looked up by dotted keys
//! (`population.size`, `mutation.rate`, ...). [`ConfigSource`] abstracts the
//! lookup; [`Properties`] reads the `.properties` text format.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A source of string-typed configuration values.
pub trait ConfigSource {
    /// Returns the raw value for `key`, if present.
    fn get(&self, key: &str) -> Option<&str>;

    /// Returns the value for `key` parsed as `T`.
    ///
    /// Missing and unparseable values both yield `None`; the latter also
    /// logs a warning.
    fn parsed<T: FromStr>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let raw = self.get(key)?.trim();
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("could not parse {key} = {raw:?}");
                None
            }
        }
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

/// Failure to read a properties file.
#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parsed `.properties` content.
///
/// Supports `key=value` and `key: value` lines, `#` and `!` comments, and
/// blank lines. Keys and values are trimmed; a later key overrides an
/// earlier one. A line without a separator defines a key with an empty
/// value.
///
/// ```
/// use generic_ga::properties::{ConfigSource, Properties};
///
/// let props = Properties::parse("# GA\npopulation.size = 50\nselection.method: ranked\n");
/// assert_eq!(props.get("selection.method"), Some("ranked"));
/// assert_eq!(props.parsed::<usize>("population.size"), Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parses properties text.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = match line.find(['=', ':']) {
                Some(pos) => (&line[..pos], &line[pos + 1..]),
                None => (line, ""),
            };
            entries.insert(key.trim().to_string(), value.trim().to_string());
        }

        Self { entries }
    }

    /// Reads and parses a properties file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PropertiesError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PropertiesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded properties from {}", path.display());
        Ok(Self::parse(&text))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys were defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for Properties {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}
