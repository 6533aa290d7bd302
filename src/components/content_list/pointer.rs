//! Cursor-following hover preview.
//!
//! The tracker is a two-state machine (`Idle` / `Tracking(index)`) plus the
//! last pointer sample. The overlay runs two animation groups fed by the same
//! pointer event: motion (x, y, rotation) and visibility (opacity). They are
//! retargeted independently so a fade never waits on position settling.

use crate::animation::easing::Easing;
use crate::animation::tween::Channel;
use crate::config::PreviewConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackerState {
    #[default]
    Idle,
    Tracking(usize),
}

/// Pointer position in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

/// Horizontal movement since the previous sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub speed: f64,
    /// `1.0` when moving right, `-1.0` otherwise.
    pub direction: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayTarget {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayFrame {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub opacity: f64,
}

impl OverlayFrame {
    pub fn transform(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.x, self.y, self.rotation
        )
    }

    /// Hidden once fully faded out.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Where the overlay should head for a pointer sample. The overlay stays
/// inside the document horizontally and above the usable bottom of the
/// current viewport.
pub fn overlay_target(
    sample: PointerSample,
    motion: Motion,
    viewport: Viewport,
    config: &PreviewConfig,
) -> OverlayTarget {
    let max_x = (viewport.width - config.clearance_x).max(0.0);
    let max_y = (viewport.scroll_y + viewport.height - config.clearance_y).max(0.0);
    OverlayTarget {
        x: (sample.x - config.offset_x).clamp(0.0, max_x),
        y: (sample.y - config.offset_y).clamp(0.0, max_y),
        rotation: motion.speed * motion.direction,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerTracker {
    state: TrackerState,
    last_sample: PointerSample,
}

impl PointerTracker {
    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn enter(&mut self, index: usize) {
        self.state = TrackerState::Tracking(index);
    }

    pub fn leave(&mut self) {
        self.state = TrackerState::Idle;
    }

    /// Drops back to `Idle` when the tracked index is no longer in a list of
    /// `len` items. Returns whether it did.
    pub fn revalidate(&mut self, len: usize) -> bool {
        match self.state {
            TrackerState::Tracking(index) if index >= len => {
                self.state = TrackerState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Records a new pointer position and reports the horizontal motion
    /// relative to the previous one.
    pub fn sample(&mut self, client_x: f64, client_y: f64, scroll_y: f64) -> (PointerSample, Motion) {
        let sample = PointerSample {
            x: client_x,
            y: client_y + scroll_y,
        };
        let previous = self.last_sample;
        let motion = Motion {
            speed: (sample.x - previous.x).abs(),
            direction: if sample.x > previous.x { 1.0 } else { -1.0 },
        };
        self.last_sample = sample;
        (sample, motion)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct MotionChannels {
    x: Channel,
    y: Channel,
    rotation: Channel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewOverlay {
    motion: MotionChannels,
    opacity: Channel,
    config: PreviewConfig,
}

impl PreviewOverlay {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            motion: MotionChannels {
                x: Channel::default(),
                y: Channel::default(),
                rotation: Channel::default(),
            },
            opacity: Channel::new(0.0),
            config,
        }
    }

    pub fn follow(&mut self, target: OverlayTarget, now_ms: f64) {
        let easing = Easing::BackOut {
            overshoot: self.config.follow_overshoot,
        };
        let duration = self.config.follow_duration_ms;
        self.motion.x.animate_to(target.x, now_ms, duration, easing);
        self.motion.y.animate_to(target.y, now_ms, duration, easing);
        self.motion
            .rotation
            .animate_to(target.rotation, now_ms, duration, easing);
    }

    /// Retargets opacity. A fade already heading to `opacity` keeps running
    /// untouched.
    pub fn fade_to(&mut self, opacity: f64, now_ms: f64) {
        if (self.opacity.target() - opacity).abs() < f64::EPSILON {
            return;
        }
        self.opacity
            .animate_to(opacity, now_ms, self.config.fade_duration_ms, Easing::Power3Out);
    }

    pub fn frame(&self, now_ms: f64) -> OverlayFrame {
        OverlayFrame {
            x: self.motion.x.value_at(now_ms),
            y: self.motion.y.value_at(now_ms),
            rotation: self.motion.rotation.value_at(now_ms),
            opacity: self.opacity.value_at(now_ms).clamp(0.0, 1.0),
        }
    }

    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.motion.x.is_animating(now_ms)
            || self.motion.y.is_animating(now_ms)
            || self.motion.rotation.is_animating(now_ms)
            || self.opacity.is_animating(now_ms)
    }

    pub fn settle(&mut self, now_ms: f64) {
        self.motion.x.settle(now_ms);
        self.motion.y.settle(now_ms);
        self.motion.rotation.settle(now_ms);
        self.opacity.settle(now_ms);
    }
}

/// Tracker and overlay wired together, one per mounted list.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverPreview {
    tracker: PointerTracker,
    overlay: PreviewOverlay,
    config: PreviewConfig,
}

impl HoverPreview {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            tracker: PointerTracker::default(),
            overlay: PreviewOverlay::new(config.clone()),
            config,
        }
    }

    /// The pointer entered the rendered item at `index`. Visibility follows on
    /// the next pointer move, which always accompanies an enter.
    pub fn enter(&mut self, index: usize) {
        self.tracker.enter(index);
    }

    /// Back to `Idle` with a hidden overlay at the origin.
    pub fn reset(&mut self) {
        self.tracker = PointerTracker::default();
        self.overlay = PreviewOverlay::new(self.config.clone());
    }

    /// The pointer left the whole list.
    pub fn leave(&mut self, now_ms: f64) {
        self.tracker.leave();
        self.overlay.fade_to(0.0, now_ms);
    }

    pub fn revalidate(&mut self, len: usize, now_ms: f64) -> bool {
        let reverted = self.tracker.revalidate(len);
        if reverted {
            self.overlay.fade_to(0.0, now_ms);
        }
        reverted
    }

    pub fn pointer_moved(
        &mut self,
        client_x: f64,
        client_y: f64,
        viewport: Viewport,
        len: usize,
        now_ms: f64,
    ) {
        self.revalidate(len, now_ms);
        let (sample, motion) = self.tracker.sample(client_x, client_y, viewport.scroll_y);
        match self.tracker.state() {
            TrackerState::Tracking(_) => {
                let target = overlay_target(sample, motion, viewport, &self.config);
                self.overlay.follow(target, now_ms);
                self.overlay.fade_to(1.0, now_ms);
            }
            TrackerState::Idle => self.overlay.fade_to(0.0, now_ms),
        }
    }

    pub fn frame(&self, now_ms: f64) -> OverlayFrame {
        self.overlay.frame(now_ms)
    }

    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.overlay.is_animating(now_ms)
    }

    pub fn settle(&mut self, now_ms: f64) {
        self.overlay.settle(now_ms);
    }
}

#[cfg(test)]
impl PointerTracker {
    pub fn last_sample(&self) -> PointerSample {
        self.last_sample
    }
}

#[cfg(test)]
impl PreviewOverlay {
    pub fn opacity_target(&self) -> f64 {
        self.opacity.target()
    }
}

#[cfg(test)]
impl HoverPreview {
    pub fn state(&self) -> TrackerState {
        self.tracker.state()
    }

    pub fn tracked(&self) -> Option<usize> {
        match self.tracker.state() {
            TrackerState::Idle => None,
            TrackerState::Tracking(index) => Some(index),
        }
    }

    pub fn last_sample(&self) -> PointerSample {
        self.tracker.last_sample()
    }

    pub fn overlay(&self) -> &PreviewOverlay {
        &self.overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
        scroll_y: 0.0,
    };

    fn preview() -> HoverPreview {
        HoverPreview::new(PreviewConfig::default())
    }

    #[test]
    fn starts_idle_at_origin() {
        let preview = preview();
        assert_eq!(preview.state(), TrackerState::Idle);
        assert_eq!(preview.last_sample(), PointerSample { x: 0.0, y: 0.0 });
        assert_eq!(preview.frame(0.0).opacity, 0.0);
    }

    #[test]
    fn sample_measures_horizontal_motion_only() {
        let mut tracker = PointerTracker::default();
        tracker.sample(100.0, 100.0, 0.0);

        let (sample, motion) = tracker.sample(70.0, 900.0, 250.0);
        assert_eq!(sample, PointerSample { x: 70.0, y: 1150.0 });
        assert_eq!(motion, Motion { speed: 30.0, direction: -1.0 });

        let (_, motion) = tracker.sample(75.0, 0.0, 0.0);
        assert_eq!(motion, Motion { speed: 5.0, direction: 1.0 });

        let (_, motion) = tracker.sample(75.0, 10.0, 0.0);
        assert_eq!(motion.speed, 0.0);
    }

    #[test]
    fn target_is_offset_from_cursor_and_clamped() {
        let config = PreviewConfig::default();
        let still = Motion { speed: 0.0, direction: 1.0 };

        let inside = overlay_target(PointerSample { x: 500.0, y: 400.0 }, still, VIEWPORT, &config);
        assert_eq!((inside.x, inside.y), (390.0, 240.0));

        let corner = overlay_target(PointerSample { x: 20.0, y: 20.0 }, still, VIEWPORT, &config);
        assert_eq!((corner.x, corner.y), (0.0, 0.0));

        let far = overlay_target(PointerSample { x: 5000.0, y: 5000.0 }, still, VIEWPORT, &config);
        assert_eq!((far.x, far.y), (1030.0, 450.0));

        let scrolled = Viewport { scroll_y: 2000.0, ..VIEWPORT };
        let low = overlay_target(PointerSample { x: 500.0, y: 5000.0 }, still, scrolled, &config);
        assert_eq!(low.y, 2450.0);
    }

    #[test]
    fn tiny_viewport_never_inverts_the_clamp() {
        let tiny = Viewport { width: 100.0, height: 100.0, scroll_y: 0.0 };
        let target = overlay_target(
            PointerSample { x: 300.0, y: 300.0 },
            Motion { speed: 0.0, direction: 1.0 },
            tiny,
            &PreviewConfig::default(),
        );
        assert_eq!((target.x, target.y), (0.0, 0.0));
    }

    #[test]
    fn rotation_follows_speed_and_direction() {
        let config = PreviewConfig::default();
        let sample = PointerSample { x: 500.0, y: 400.0 };
        let left = overlay_target(sample, Motion { speed: 12.0, direction: -1.0 }, VIEWPORT, &config);
        let right = overlay_target(sample, Motion { speed: 12.0, direction: 1.0 }, VIEWPORT, &config);
        assert_eq!(left.rotation, -12.0);
        assert_eq!(right.rotation, 12.0);
    }

    #[test]
    fn moving_while_idle_only_updates_the_sample() {
        let mut preview = preview();
        preview.pointer_moved(300.0, 200.0, VIEWPORT, 3, 0.0);
        assert_eq!(preview.last_sample(), PointerSample { x: 300.0, y: 200.0 });
        assert_eq!(preview.overlay().opacity_target(), 0.0);
        let frame = preview.frame(2000.0);
        assert_eq!((frame.x, frame.y, frame.opacity), (0.0, 0.0, 0.0));
    }

    #[test]
    fn tracking_fades_in_and_follows() {
        let mut preview = preview();
        preview.enter(1);
        preview.pointer_moved(500.0, 400.0, VIEWPORT, 3, 0.0);
        assert_eq!(preview.state(), TrackerState::Tracking(1));
        assert_eq!(preview.overlay().opacity_target(), 1.0);

        let settled = preview.frame(1300.0);
        assert_eq!((settled.x, settled.y, settled.opacity), (390.0, 240.0, 1.0));
        assert_eq!(settled.rotation, 500.0);
        assert!(!preview.is_animating(1300.0));
    }

    #[test]
    fn moving_between_items_never_fades_out() {
        let mut preview = preview();
        preview.enter(2);
        preview.pointer_moved(500.0, 400.0, VIEWPORT, 5, 0.0);

        let mut last_opacity = 0.0;
        let mut now = 0.0;
        for step in 0..40 {
            now += 16.0;
            if step == 10 {
                preview.enter(3);
            }
            preview.pointer_moved(500.0 + step as f64, 420.0 + step as f64, VIEWPORT, 5, now);
            assert_ne!(preview.state(), TrackerState::Idle);
            assert_eq!(preview.overlay().opacity_target(), 1.0);

            let opacity = preview.frame(now).opacity;
            assert!(opacity >= last_opacity, "opacity dropped at step {step}");
            last_opacity = opacity;
        }
        assert_eq!(preview.tracked(), Some(3));
    }

    #[test]
    fn leaving_the_list_fades_out_without_a_pointer_move() {
        let mut preview = preview();
        preview.enter(0);
        preview.pointer_moved(500.0, 400.0, VIEWPORT, 3, 0.0);
        preview.leave(1000.0);

        assert_eq!(preview.state(), TrackerState::Idle);
        assert_eq!(preview.overlay().opacity_target(), 0.0);
        assert!(!preview.frame(1400.0).is_visible());
    }

    #[test]
    fn fade_out_does_not_wait_for_motion() {
        let mut preview = preview();
        preview.enter(0);
        preview.pointer_moved(500.0, 400.0, VIEWPORT, 3, 0.0);
        preview.pointer_moved(900.0, 400.0, VIEWPORT, 3, 500.0);
        preview.leave(600.0);

        // Opacity is done well before the 1.3 s position tween.
        let frame = preview.frame(1000.0);
        assert_eq!(frame.opacity, 0.0);
        assert!(preview.is_animating(1000.0));
    }

    #[test]
    fn shrunk_collection_reverts_to_idle() {
        let mut preview = preview();
        preview.enter(4);
        preview.pointer_moved(500.0, 400.0, VIEWPORT, 5, 0.0);
        assert!(preview.revalidate(3, 100.0));
        assert_eq!(preview.state(), TrackerState::Idle);
        assert_eq!(preview.overlay().opacity_target(), 0.0);

        preview.enter(4);
        preview.pointer_moved(510.0, 400.0, VIEWPORT, 2, 200.0);
        assert_eq!(preview.state(), TrackerState::Idle);
        assert_eq!(preview.overlay().opacity_target(), 0.0);
    }

    #[test]
    fn overlay_transform_string() {
        let frame = OverlayFrame { x: 10.0, y: 20.5, rotation: -3.0, opacity: 1.0 };
        assert_eq!(frame.transform(), "translate(10px, 20.5px) rotate(-3deg)");
    }
}
