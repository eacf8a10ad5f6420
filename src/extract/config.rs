//! Per-call configuration of mapping ownership and diagnostics
//!
//! A scan over one file usually spans several calls. Whether a call opens the
//! file itself or reuses a mapping retained by an earlier call, and whether it
//! releases the mapping afterwards, is decided by its [`ExtractConfig`].
//!
//! | preset | acquires | releases | scans |
//! |---|---|---|---|
//! | [`single`](ExtractConfig::single) | yes | yes | yes |
//! | [`first`](ExtractConfig::first) | yes | no | yes |
//! | [`middle`](ExtractConfig::middle) | no | no | yes |
//! | [`last`](ExtractConfig::last) | no | yes | yes |
//! | [`map_only`](ExtractConfig::map_only) | yes | no | no |
//! | [`release_only`](ExtractConfig::release_only) | no | yes | no |
//!
//! A session that retains a mapping keeps the file open until a releasing
//! call is made or the session is dropped.

use crate::error::{ExtractError, Result};

/// Mapping ownership and diagnostics for one engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtractConfig {
    reuse_mapping: bool,
    retain_mapping: bool,
    map_only: bool,
    release_only: bool,
    suppress_diagnostics: bool,
}

impl ExtractConfig {
    /// Open, scan and release within one call
    pub fn single() -> Self {
        Self {
            reuse_mapping: false,
            retain_mapping: false,
            map_only: false,
            release_only: false,
            suppress_diagnostics: false,
        }
    }

    /// First call of a multi-call scan: open and retain
    pub fn first() -> Self {
        Self {
            retain_mapping: true,
            ..Self::single()
        }
    }

    /// Intermediate call: reuse and retain
    pub fn middle() -> Self {
        Self {
            reuse_mapping: true,
            retain_mapping: true,
            ..Self::single()
        }
    }

    /// Final call: reuse and release
    pub fn last() -> Self {
        Self {
            reuse_mapping: true,
            ..Self::single()
        }
    }

    /// Acquire and retain the mapping without scanning
    pub fn map_only() -> Self {
        Self {
            map_only: true,
            retain_mapping: true,
            ..Self::single()
        }
    }

    /// Release a retained mapping without scanning
    pub fn release_only() -> Self {
        Self {
            release_only: true,
            reuse_mapping: true,
            ..Self::single()
        }
    }

    /// Start a validated configuration from [`single`](Self::single)
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::default()
    }

    /// Same configuration with diagnostics suppressed or enabled
    pub fn with_suppressed_diagnostics(mut self, suppress: bool) -> Self {
        self.suppress_diagnostics = suppress;
        self
    }

    /// Use a mapping retained by an earlier call instead of opening the file
    pub fn reuse_mapping(&self) -> bool {
        self.reuse_mapping
    }

    /// Keep the mapping after this call
    pub fn retain_mapping(&self) -> bool {
        self.retain_mapping
    }

    /// Acquire only; no scan
    pub fn is_map_only(&self) -> bool {
        self.map_only
    }

    /// Release only; no scan
    pub fn is_release_only(&self) -> bool {
        self.release_only
    }

    /// Do not log failures
    pub fn suppress_diagnostics(&self) -> bool {
        self.suppress_diagnostics
    }

    /// `true` unless this is a map-only or release-only call
    pub fn scans(&self) -> bool {
        !self.map_only && !self.release_only
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::single()
    }
}

/// Builder for [`ExtractConfig`] that rejects contradictory options
///
/// # Example
///
/// ```
/// use fasta_extract::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .reuse_mapping(true)
///     .retain_mapping(true)
///     .suppress_diagnostics(true)
///     .build()?;
/// assert!(config.reuse_mapping());
///
/// assert!(ExtractConfig::builder().map_only(true).release_only(true).build().is_err());
/// # Ok::<(), fasta_extract::ExtractError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractConfigBuilder {
    reuse_mapping: bool,
    retain_mapping: bool,
    map_only: bool,
    release_only: bool,
    suppress_diagnostics: bool,
}

impl ExtractConfigBuilder {
    /// Reuse a retained mapping
    pub fn reuse_mapping(mut self, enabled: bool) -> Self {
        self.reuse_mapping = enabled;
        self
    }

    /// Retain the mapping after the call
    pub fn retain_mapping(mut self, enabled: bool) -> Self {
        self.retain_mapping = enabled;
        self
    }

    /// Acquire only (implies retention)
    pub fn map_only(mut self, enabled: bool) -> Self {
        self.map_only = enabled;
        self
    }

    /// Release only (implies reuse)
    pub fn release_only(mut self, enabled: bool) -> Self {
        self.release_only = enabled;
        self
    }

    /// Do not log failures
    pub fn suppress_diagnostics(mut self, enabled: bool) -> Self {
        self.suppress_diagnostics = enabled;
        self
    }

    /// Validate and build
    ///
    /// # Errors
    ///
    /// [`ExtractError::InvalidConfig`] when map-only is combined with
    /// release-only or reuse, or release-only with retention.
    pub fn build(self) -> Result<ExtractConfig> {
        if self.map_only && self.release_only {
            return Err(ExtractError::InvalidConfig(
                "map-only and release-only are mutually exclusive".to_string(),
            ));
        }
        if self.map_only && self.reuse_mapping {
            return Err(ExtractError::InvalidConfig(
                "map-only acquires a new mapping and cannot reuse one".to_string(),
            ));
        }
        if self.release_only && self.retain_mapping {
            return Err(ExtractError::InvalidConfig(
                "release-only cannot retain the mapping it releases".to_string(),
            ));
        }

        Ok(ExtractConfig {
            reuse_mapping: self.reuse_mapping || self.release_only,
            retain_mapping: self.retain_mapping || self.map_only,
            map_only: self.map_only,
            release_only: self.release_only,
            suppress_diagnostics: self.suppress_diagnostics,
        })
    }
}
