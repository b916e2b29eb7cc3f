/// Configuration for storage operations
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Absolute max size allowed for a single object (safety guard)
    pub max_object_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_object_bytes: 5 * 1024 * 1024 * 1024, // 5GB
        }
    }
}

impl StorageConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max object size
    pub fn with_max_object_bytes(mut self, bytes: u64) -> Self {
        self.max_object_bytes = bytes;
        self
    }
}
