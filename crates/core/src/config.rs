//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services,
//! so nothing reads process-wide environment variables while a form is being edited.

use crate::constants::DEFAULT_RECORDS_DIR;
use crate::error::{FormError, FormResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    records_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Config` if `records_dir` is empty.
    pub fn new(records_dir: PathBuf) -> FormResult<Self> {
        if records_dir.as_os_str().is_empty() {
            return Err(FormError::Config("records_dir cannot be empty".into()));
        }

        Ok(Self { records_dir })
    }

    /// Directory under which each patient's clinical history is stored.
    pub fn records_dir(&self) -> &Path {
        &self.records_dir
    }
}

/// Resolve the records directory from, in order: an explicit override, an environment value,
/// the built-in default.
///
/// Blank values are treated as absent.
pub fn records_dir_from_values(
    override_dir: Option<PathBuf>,
    env_value: Option<String>,
) -> PathBuf {
    override_dir
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| {
            env_value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDS_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_records_dir() {
        let err = CoreConfig::new(PathBuf::new()).expect_err("empty path");
        assert!(matches!(err, FormError::Config(msg) if msg.contains("records_dir")));
    }

    #[test]
    fn keeps_records_dir() {
        let cfg = CoreConfig::new(PathBuf::from("/tmp/records")).unwrap();
        assert_eq!(cfg.records_dir(), Path::new("/tmp/records"));
    }

    #[test]
    fn override_wins_over_env_and_default() {
        let dir = records_dir_from_values(
            Some(PathBuf::from("/cli")),
            Some("/from-env".into()),
        );
        assert_eq!(dir, PathBuf::from("/cli"));
    }

    #[test]
    fn env_value_is_trimmed_and_blank_ignored() {
        assert_eq!(
            records_dir_from_values(None, Some("  /from-env ".into())),
            PathBuf::from("/from-env")
        );
        assert_eq!(
            records_dir_from_values(None, Some("   ".into())),
            PathBuf::from(DEFAULT_RECORDS_DIR)
        );
        assert_eq!(
            records_dir_from_values(None, None),
            PathBuf::from(DEFAULT_RECORDS_DIR)
        );
    }
}
