//! Policy source loading.
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::{Browser, PolicyMap};
use crate::error::SourceError;

/// The parsed policy source: one policy map per browser.
#[derive(Debug, Clone, Default)]
pub struct PolicySource {
    policies: HashMap<Browser, PolicyMap>,
    unknown: Vec<String>,
}

impl PolicySource {
    /// Read and parse a YAML policy source file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read and
    /// [`SourceError::Parse`] if it is not a mapping of browser names to
    /// policy mappings.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a YAML policy document.
    ///
    /// Merge keys (`<<: *anchor`) are resolved first, so one anchored policy
    /// set can be shared between browsers. A browser key with no value means
    /// "no policies for this browser". Browser keys are matched exactly;
    /// anything else is kept aside for reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML, a merge key does
    /// not refer to a mapping, or a policy value is outside the supported
    /// shapes.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut document: serde_yaml::Value = serde_yaml::from_str(content)?;
        document.apply_merge()?;
        let raw: BTreeMap<String, Option<PolicyMap>> = serde_yaml::from_value(document)?;

        let mut source = Self::default();
        for (name, policies) in raw {
            match Browser::from_key(&name) {
                Some(browser) => {
                    if let Some(policies) = policies {
                        source.policies.insert(browser, policies);
                    }
                }
                None => source.unknown.push(name),
            }
        }
        Ok(source)
    }

    /// Build a source directly from policy maps.
    #[must_use]
    pub fn from_policies(policies: impl IntoIterator<Item = (Browser, PolicyMap)>) -> Self {
        Self {
            policies: policies.into_iter().collect(),
            unknown: Vec::new(),
        }
    }

    /// Policies defined for `browser`, if any.
    #[must_use]
    pub fn policies(&self, browser: Browser) -> Option<&PolicyMap> {
        self.policies.get(&browser)
    }

    /// Top-level keys that do not name a supported browser, sorted.
    #[must_use]
    pub fn unknown_browsers(&self) -> &[String] {
        &self.unknown
    }
}
