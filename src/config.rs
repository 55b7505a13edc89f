//! Immutable embedding parameters, injected into both pipelines instead of
//! living as process-wide state.

use crate::constants::{ALLOWED_SECRET_EXTENSIONS, DEFAULT_SIGNATURE};

/// Signature and extension policy shared by encoder and decoder.
/// Both sides must be built from the same configuration for recovery to
/// succeed.
#[derive(Debug, Clone)]
pub struct StegConfig {
    /// Marker embedded first, checked first on recovery.
    pub signature: String,
    /// Secret file extensions accepted for embedding, leading dot included.
    pub allowed_extensions: Vec<String>,
}

impl Default for StegConfig {
    fn default() -> Self {
        Self {
            signature: DEFAULT_SIGNATURE.to_string(),
            allowed_extensions: ALLOWED_SECRET_EXTENSIONS
                .iter()
                .map(|extension| extension.to_string())
                .collect(),
        }
    }
}

impl StegConfig {
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed == extension)
    }

    /// Longest extension this configuration can embed. Used to bound the
    /// extension length recovered from a carrier.
    pub fn max_extension_len(&self) -> usize {
        self.allowed_extensions
            .iter()
            .map(|extension| extension.len())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_the_supported_set() {
        let config = StegConfig::default();
        assert!(config.allows_extension(".c"));
        assert!(config.allows_extension(".txt"));
        assert!(config.allows_extension(".sh"));
        assert!(!config.allows_extension(".md"));
        assert!(!config.allows_extension("txt"));
        assert_eq!(config.max_extension_len(), 4);
    }
}
