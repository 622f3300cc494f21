use vellum_core::geometry::Size;

/// Construction-time settings for a [`SpriteBatch`](crate::SpriteBatch).
///
/// ```
/// use vellum_sprite::SpriteBatchConfig;
///
/// let config = SpriteBatchConfig::default()
///     .with_max_sprites_per_batch(1024)
///     .with_initial_capacity(256);
/// assert_eq!(config.max_sprites_per_batch, 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteBatchConfig {
    /// Ceiling on sprites per draw call. Values below 1 are raised to 1.
    pub max_sprites_per_batch: u32,
    /// Record slots reserved up front.
    pub initial_capacity: usize,
    /// Screen size used until [`set_screen_size`](crate::SpriteBatch::set_screen_size) is called.
    pub screen_size: Size<f32>,
}

impl SpriteBatchConfig {
    pub const DEFAULT_MAX_SPRITES_PER_BATCH: u32 = 4096;
    pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

    pub fn with_max_sprites_per_batch(mut self, max: u32) -> Self {
        self.max_sprites_per_batch = max;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_size = Size::new(width, height);
        self
    }

    /// Clamp out-of-range values, warning about each one.
    pub(crate) fn validated(mut self) -> Self {
        if self.max_sprites_per_batch == 0 {
            tracing::warn!("max_sprites_per_batch of 0 is invalid, using 1");
            self.max_sprites_per_batch = 1;
        }
        self
    }
}

impl Default for SpriteBatchConfig {
    fn default() -> Self {
        Self {
            max_sprites_per_batch: Self::DEFAULT_MAX_SPRITES_PER_BATCH,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            screen_size: Size::new(1280.0, 720.0),
        }
    }
}
