use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::data::DataFormat;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub data_format: DataFormat,
    /// Directory whose files replace the embedded reference tables.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("gigs").required(false))
            .add_source(
                config::Environment::with_prefix("GIGS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: HarnessConfig = config.try_deserialize()?;
        tracing::debug!(?settings, "Loaded harness configuration");
        Ok(settings)
    }
}

/// Names of the switches an implementation can turn off to declare a
/// property unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityKey {
    #[serde(rename = "isStandardNameSupported")]
    IsStandardNameSupported,
    #[serde(rename = "isStandardAliasSupported")]
    IsStandardAliasSupported,
    #[serde(rename = "isDependencyIdentificationSupported")]
    IsDependencyIdentificationSupported,
    #[serde(rename = "isDeprecatedObjectCreationSupported")]
    IsDeprecatedObjectCreationSupported,
    #[serde(rename = "isFactoryPreservingUserValues")]
    IsFactoryPreservingUserValues,
}

impl CapabilityKey {
    pub const ALL: [CapabilityKey; 5] = [
        CapabilityKey::IsStandardNameSupported,
        CapabilityKey::IsStandardAliasSupported,
        CapabilityKey::IsDependencyIdentificationSupported,
        CapabilityKey::IsDeprecatedObjectCreationSupported,
        CapabilityKey::IsFactoryPreservingUserValues,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityKey::IsStandardNameSupported => "isStandardNameSupported",
            CapabilityKey::IsStandardAliasSupported => "isStandardAliasSupported",
            CapabilityKey::IsDependencyIdentificationSupported => {
                "isDependencyIdentificationSupported"
            }
            CapabilityKey::IsDeprecatedObjectCreationSupported => {
                "isDeprecatedObjectCreationSupported"
            }
            CapabilityKey::IsFactoryPreservingUserValues => "isFactoryPreservingUserValues",
        }
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability flags, read once when a case is built and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Capabilities {
    #[serde(default = "enabled")]
    pub is_standard_name_supported: bool,
    #[serde(default = "enabled")]
    pub is_standard_alias_supported: bool,
    #[serde(default = "enabled")]
    pub is_dependency_identification_supported: bool,
    #[serde(default = "enabled")]
    pub is_deprecated_object_creation_supported: bool,
    #[serde(default = "enabled")]
    pub is_factory_preserving_user_values: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            is_standard_name_supported: true,
            is_standard_alias_supported: true,
            is_dependency_identification_supported: true,
            is_deprecated_object_creation_supported: true,
            is_factory_preserving_user_values: true,
        }
    }
}

impl Capabilities {
    pub fn is_enabled(&self, key: CapabilityKey) -> bool {
        match key {
            CapabilityKey::IsStandardNameSupported => self.is_standard_name_supported,
            CapabilityKey::IsStandardAliasSupported => self.is_standard_alias_supported,
            CapabilityKey::IsDependencyIdentificationSupported => {
                self.is_dependency_identification_supported
            }
            CapabilityKey::IsDeprecatedObjectCreationSupported => {
                self.is_deprecated_object_creation_supported
            }
            CapabilityKey::IsFactoryPreservingUserValues => self.is_factory_preserving_user_values,
        }
    }

    /// Returns a copy with `key` switched to `value`.
    pub fn with(mut self, key: CapabilityKey, value: bool) -> Self {
        let flag = match key {
            CapabilityKey::IsStandardNameSupported => &mut self.is_standard_name_supported,
            CapabilityKey::IsStandardAliasSupported => &mut self.is_standard_alias_supported,
            CapabilityKey::IsDependencyIdentificationSupported => {
                &mut self.is_dependency_identification_supported
            }
            CapabilityKey::IsDeprecatedObjectCreationSupported => {
                &mut self.is_deprecated_object_creation_supported
            }
            CapabilityKey::IsFactoryPreservingUserValues => {
                &mut self.is_factory_preserving_user_values
            }
        };
        *flag = value;
        self
    }

    /// The flags in effect, in declaration order, for reporting.
    pub fn entries(&self) -> IndexMap<CapabilityKey, bool> {
        CapabilityKey::ALL
            .iter()
            .map(|&key| (key, self.is_enabled(key)))
            .collect()
    }
}
