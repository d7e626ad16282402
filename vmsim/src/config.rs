/*!
Run configuration.

A run can be configured from a [TOML](https://toml.io/) file, every key is optional
and falls back to [`MmuSpec::DEFAULT`]:

```toml
page_size = 256
address_space_size = 65536
tlb_entries = 16
backing_store = "BACKING_STORE.bin"
```
*/

use std::path::PathBuf;

use crate::error::Result;
use crate::mmu::MmuSpec;
use crate::types::umem;

#[cfg(feature = "configfiles")]
use crate::error::{Error, ErrorKind, ErrorOrigin};

/// Default location of the backing store file.
pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimConfig {
    pub page_size: Option<umem>,
    pub address_space_size: Option<umem>,
    pub tlb_entries: Option<usize>,
    pub backing_store: Option<PathBuf>,
}

impl SimConfig {
    /// Parses the configuration from the TOML file at `path`.
    #[cfg(feature = "configfiles")]
    pub fn open<P: AsRef<::std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = ::std::fs::read_to_string(path).map_err(|err| {
            Error(ErrorOrigin::Config, ErrorKind::UnableToReadFile)
                .log_error(format!("{}: {}", path.display(), err))
        })?;
        Self::from_toml_str(&contents)
    }

    #[cfg(feature = "configfiles")]
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        ::toml::from_str(contents).map_err(|err| {
            Error(ErrorOrigin::Config, ErrorKind::Configuration)
                .log_error(format!("unable to parse the configuration: {}", err))
        })
    }

    /// Overrides every value that is set in `other`.
    pub fn merge(mut self, other: SimConfig) -> Self {
        self.page_size = other.page_size.or(self.page_size);
        self.address_space_size = other.address_space_size.or(self.address_space_size);
        self.tlb_entries = other.tlb_entries.or(self.tlb_entries);
        self.backing_store = other.backing_store.or(self.backing_store);
        self
    }

    /// Returns the validated mmu spec of this configuration.
    pub fn mmu_spec(&self) -> Result<MmuSpec> {
        let mut spec = MmuSpec::DEFAULT;
        if let Some(page_size) = self.page_size {
            spec = spec.page_size(page_size);
        }
        if let Some(address_space_size) = self.address_space_size {
            spec = spec.address_space_size(address_space_size);
        }
        if let Some(tlb_entries) = self.tlb_entries {
            spec = spec.tlb_entries(tlb_entries);
        }
        spec.validate()?;
        Ok(spec)
    }

    pub fn backing_store(&self) -> PathBuf {
        self.backing_store
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKING_STORE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind, ErrorOrigin};

    #[test]
    fn defaults() {
        let config = SimConfig::default();
        assert_eq!(config.mmu_spec().unwrap(), MmuSpec::DEFAULT);
        assert_eq!(config.backing_store(), PathBuf::from("BACKING_STORE.bin"));
    }

    #[test]
    fn merge_overrides() {
        let file = SimConfig {
            page_size: Some(512),
            tlb_entries: Some(8),
            ..SimConfig::default()
        };
        let args = SimConfig {
            tlb_entries: Some(32),
            ..SimConfig::default()
        };

        let spec = file.merge(args).mmu_spec().unwrap();
        assert_eq!(spec.page_size, 512);
        assert_eq!(spec.tlb_entries, 32);
        assert_eq!(spec.address_space_size, 65536);
    }

    #[test]
    fn invalid_spec() {
        let config = SimConfig {
            page_size: Some(300),
            ..SimConfig::default()
        };
        assert_eq!(
            config.mmu_spec().unwrap_err(),
            Error(ErrorOrigin::Mmu, ErrorKind::InvalidPageSize)
        );
    }

    #[cfg(feature = "configfiles")]
    #[test]
    fn load_toml() {
        let config = SimConfig::from_toml_str(
            "
page_size = 1024
tlb_entries = 4
backing_store = \"store.bin\"",
        )
        .unwrap();

        assert_eq!(config.page_size, Some(1024));
        assert_eq!(config.address_space_size, None);
        assert_eq!(config.tlb_entries, Some(4));
        assert_eq!(config.backing_store(), PathBuf::from("store.bin"));
    }

    #[cfg(feature = "configfiles")]
    #[test]
    fn reject_unknown_keys() {
        assert_eq!(
            SimConfig::from_toml_str("frames = 12").unwrap_err(),
            Error(ErrorOrigin::Config, ErrorKind::Configuration)
        );
    }
}
