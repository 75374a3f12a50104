//! Build pool configuration types
//!
//! This module defines the hosted images a job can run on and the
//! mapping from the enumerated choice to the provider's identifier.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier used when a pool name cannot be mapped
pub const DEFAULT_POOL_IDENTIFIER: &str = "ubuntu-latest";

/// Hosted images available to pipeline jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildPool {
    /// Latest Ubuntu image
    #[default]
    #[serde(rename = "ubuntu-latest")]
    UbuntuLatest,
    /// Latest Windows image
    #[serde(rename = "windows-latest")]
    WindowsLatest,
    /// Latest macOS image
    #[serde(rename = "macos-latest")]
    MacOSLatest,
    /// Ubuntu 20.04
    #[serde(rename = "ubuntu-20.04")]
    Ubuntu2004,
    /// Ubuntu 22.04
    #[serde(rename = "ubuntu-22.04")]
    Ubuntu2204,
    /// Windows Server 2019
    #[serde(rename = "windows-2019")]
    Windows2019,
    /// Windows Server 2022
    #[serde(rename = "windows-2022")]
    Windows2022,
    /// macOS 11
    #[serde(rename = "macos-11")]
    MacOS11,
    /// macOS 12
    #[serde(rename = "macos-12")]
    MacOS12,
}

impl BuildPool {
    /// Every defined pool, in declaration order
    pub const ALL: [BuildPool; 9] = [
        Self::UbuntuLatest,
        Self::WindowsLatest,
        Self::MacOSLatest,
        Self::Ubuntu2004,
        Self::Ubuntu2204,
        Self::Windows2019,
        Self::Windows2022,
        Self::MacOS11,
        Self::MacOS12,
    ];

    /// Returns the provider's image identifier for this pool
    #[must_use]
    pub fn identifier(self) -> &'static str {
        match self {
            Self::UbuntuLatest => "ubuntu-latest",
            Self::WindowsLatest => "windows-latest",
            Self::MacOSLatest => "macos-latest",
            Self::Ubuntu2004 => "ubuntu-20.04",
            Self::Ubuntu2204 => "ubuntu-22.04",
            Self::Windows2019 => "windows-2019",
            Self::Windows2022 => "windows-2022",
            Self::MacOS11 => "macos-11",
            Self::MacOS12 => "macos-12",
        }
    }

    /// Returns the variant name (`Ubuntu2204`, `MacOSLatest`, ...)
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UbuntuLatest => "UbuntuLatest",
            Self::WindowsLatest => "WindowsLatest",
            Self::MacOSLatest => "MacOSLatest",
            Self::Ubuntu2004 => "Ubuntu2004",
            Self::Ubuntu2204 => "Ubuntu2204",
            Self::Windows2019 => "Windows2019",
            Self::Windows2022 => "Windows2022",
            Self::MacOS11 => "MacOS11",
            Self::MacOS12 => "MacOS12",
        }
    }

    /// Converts this pool to the hosted pool a job runs on
    #[must_use]
    pub fn hosted_pool(self) -> HostedPool {
        HostedPool::from(self)
    }

    /// Looks a pool up by variant name or identifier, case-insensitively.
    ///
    /// Unknown names resolve to [`BuildPool::UbuntuLatest`] instead of
    /// failing.
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(
                pool = name,
                fallback = DEFAULT_POOL_IDENTIFIER,
                "Unknown build pool, using default"
            );
            Self::default()
        })
    }

    /// Deserializes a pool name through [`BuildPool::from_name_or_default`].
    ///
    /// # Errors
    ///
    /// Fails only if the input is not a string.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name_or_default(&name))
    }
}

impl FromStr for BuildPool {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|pool| {
                pool.name().eq_ignore_ascii_case(needle)
                    || pool.identifier().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ValidationError::UnknownPool(s.to_string()))
    }
}

impl fmt::Display for BuildPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A provider-hosted image, serialized as `pool: { vmImage: ... }`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostedPool {
    /// Image identifier recognized by the provider
    #[serde(rename = "vmImage")]
    pub vm_image: String,
}

impl HostedPool {
    /// Creates a hosted pool from a raw identifier
    #[must_use]
    pub fn new(vm_image: impl Into<String>) -> Self {
        Self {
            vm_image: vm_image.into(),
        }
    }

    /// Resolves a pool name to a hosted pool, falling back to
    /// `ubuntu-latest` for names outside the defined set.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        BuildPool::from_name_or_default(name).hosted_pool()
    }

    /// Returns the image identifier
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.vm_image
    }
}

impl Default for HostedPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_IDENTIFIER)
    }
}

impl From<BuildPool> for HostedPool {
    fn from(pool: BuildPool) -> Self {
        Self::new(pool.identifier())
    }
}

impl fmt::Display for HostedPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vm_image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mapping_table() {
        let expected = [
            (BuildPool::UbuntuLatest, "ubuntu-latest"),
            (BuildPool::WindowsLatest, "windows-latest"),
            (BuildPool::MacOSLatest, "macos-latest"),
            (BuildPool::Ubuntu2004, "ubuntu-20.04"),
            (BuildPool::Ubuntu2204, "ubuntu-22.04"),
            (BuildPool::Windows2019, "windows-2019"),
            (BuildPool::Windows2022, "windows-2022"),
            (BuildPool::MacOS11, "macos-11"),
            (BuildPool::MacOS12, "macos-12"),
        ];

        for (pool, id) in expected {
            assert_eq!(pool.hosted_pool(), HostedPool::new(id));
        }
        assert_eq!(BuildPool::ALL.len(), expected.len());
    }

    #[test]
    fn test_unknown_name_falls_back_to_ubuntu_latest() {
        assert_eq!(HostedPool::for_name("solaris-10").identifier(), "ubuntu-latest");
        assert_eq!(HostedPool::for_name("").identifier(), "ubuntu-latest");
        assert_eq!(HostedPool::default().identifier(), "ubuntu-latest");
    }

    #[test]
    fn test_parse_by_name_and_identifier() {
        assert_eq!("Ubuntu2204".parse::<BuildPool>(), Ok(BuildPool::Ubuntu2204));
        assert_eq!("macos-12".parse::<BuildPool>(), Ok(BuildPool::MacOS12));
        assert_eq!("WINDOWS-LATEST".parse::<BuildPool>(), Ok(BuildPool::WindowsLatest));
        assert_eq!(
            "beos".parse::<BuildPool>(),
            Err(ValidationError::UnknownPool("beos".to_string()))
        );
    }

    #[test]
    fn test_hosted_pool_serializes_as_vm_image() {
        let yaml = serde_yaml::to_string(&BuildPool::Windows2022.hosted_pool()).unwrap();
        assert_eq!(yaml, "vmImage: windows-2022\n");
    }

    #[test]
    fn test_lenient_deserialize() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "BuildPool::deserialize_lenient")]
            pool: BuildPool,
        }

        let known: Holder = serde_yaml::from_str("pool: ubuntu-20.04").unwrap();
        assert_eq!(known.pool, BuildPool::Ubuntu2004);

        let unknown: Holder = serde_yaml::from_str("pool: plan9").unwrap();
        assert_eq!(unknown.pool, BuildPool::UbuntuLatest);
    }

    proptest! {
        #[test]
        fn prop_every_pool_has_a_non_empty_identifier(index in 0usize..9) {
            let pool = BuildPool::ALL[index];
            prop_assert!(!pool.hosted_pool().identifier().is_empty());
            prop_assert_eq!(pool.name().parse::<BuildPool>(), Ok(pool));
        }

        #[test]
        fn prop_unknown_names_map_to_default(name in "[a-z]{1,6}[0-9]{3}[a-z]{1,6}") {
            let pool = HostedPool::for_name(&name);
            prop_assert_eq!(pool.identifier(), DEFAULT_POOL_IDENTIFIER);
        }
    }
}
