/// Default maximum body size: 256 KiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 256 * 1024;

/// Configuration for envelope serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeConfig {
    /// Maximum body size in bytes, checked on both serialize and deserialize.
    pub max_body_size: usize,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}
