#[cfg(debug_assertions)]
pub fn get_content_url() -> &'static str {
    "http://localhost:3001"  // Content service when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_content_url() -> &'static str {
    ""  // Same origin in production
}

/// Tunables for the floating preview that follows the cursor over a content list.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewConfig {
    /// Distance kept between the cursor and the overlay's left edge.
    pub offset_x: f64,
    /// Distance kept between the cursor and the overlay's top edge.
    pub offset_y: f64,
    /// Horizontal room reserved at the right edge of the document.
    pub clearance_x: f64,
    /// Vertical room reserved above the bottom of the viewport.
    pub clearance_y: f64,
    pub follow_duration_ms: f64,
    /// Overshoot of the `back.out` curve used for position and rotation.
    pub follow_overshoot: f64,
    pub fade_duration_ms: f64,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub thumbnail_exposure: i32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            offset_x: 110.0,
            offset_y: 160.0,
            clearance_x: 250.0,
            clearance_y: 350.0,
            follow_duration_ms: 1300.0,
            follow_overshoot: 2.0,
            fade_duration_ms: 400.0,
            thumbnail_width: 320,
            thumbnail_height: 220,
            thumbnail_exposure: -10,
        }
    }
}

/// Tunables for the scroll-triggered entrance of list items.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// How far above the viewport's bottom edge an item's top must travel before it plays.
    pub trigger_margin_px: f64,
    pub initial_offset_y: f64,
    pub duration_ms: f64,
    /// Delay added per item when several items enter together.
    pub stagger_ms: f64,
    pub elastic_amplitude: f64,
    pub elastic_period: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            trigger_margin_px: 100.0,
            initial_offset_y: 20.0,
            duration_ms: 1300.0,
            stagger_ms: 200.0,
            elastic_amplitude: 1.0,
            elastic_period: 0.3,
        }
    }
}
