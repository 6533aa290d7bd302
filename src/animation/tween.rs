//! Retargetable scalar animation.
//!
//! Times are milliseconds on the same clock as `performance.now()`, which is
//! also the timestamp handed to `requestAnimationFrame` callbacks.

use super::easing::Easing;

/// A single interpolation from `from` to `to`, optionally delayed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(0.0),
            easing,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.end_ms()
    }

    pub fn sample(&self, now_ms: f64) -> f64 {
        if now_ms < self.start_ms {
            return self.from;
        }
        if self.duration_ms == 0.0 || self.is_finished(now_ms) {
            return self.to;
        }
        let progress = (now_ms - self.start_ms) / self.duration_ms;
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }
}

/// One independently animated value.
///
/// Starting a new animation overwrites the running one and picks up from the
/// value the channel shows at that instant, so retargeting never jumps.
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    resting: f64,
    tween: Option<Tween>,
}

impl Channel {
    pub fn new(value: f64) -> Self {
        Self {
            resting: value,
            tween: None,
        }
    }

    pub fn value_at(&self, now_ms: f64) -> f64 {
        match &self.tween {
            Some(tween) => tween.sample(now_ms),
            None => self.resting,
        }
    }

    /// The value the channel is heading to.
    pub fn target(&self) -> f64 {
        match &self.tween {
            Some(tween) => tween.target(),
            None => self.resting,
        }
    }

    pub fn animate_to(&mut self, target: f64, now_ms: f64, duration_ms: f64, easing: Easing) {
        self.animate_delayed(target, now_ms, 0.0, duration_ms, easing);
    }

    pub fn animate_delayed(
        &mut self,
        target: f64,
        now_ms: f64,
        delay_ms: f64,
        duration_ms: f64,
        easing: Easing,
    ) {
        let from = self.value_at(now_ms);
        self.tween = Some(Tween::new(
            from,
            target,
            now_ms + delay_ms.max(0.0),
            duration_ms,
            easing,
        ));
    }

    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.tween.map_or(false, |tween| !tween.is_finished(now_ms))
    }

    /// Folds a finished tween into the resting value.
    pub fn settle(&mut self, now_ms: f64) {
        if let Some(tween) = self.tween {
            if tween.is_finished(now_ms) {
                self.resting = tween.target();
                self.tween = None;
            }
        }
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_holds_start_value_during_delay() {
        let tween = Tween::new(0.0, 1.0, 500.0, 1000.0, Easing::Linear);
        assert_eq!(tween.sample(0.0), 0.0);
        assert_eq!(tween.sample(499.0), 0.0);
        assert_eq!(tween.sample(1000.0), 0.5);
        assert_eq!(tween.sample(1500.0), 1.0);
        assert!(tween.is_finished(1500.0));
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let tween = Tween::new(3.0, 7.0, 10.0, 0.0, Easing::Power3Out);
        assert_eq!(tween.sample(10.0), 7.0);
    }

    #[test]
    fn retargeting_starts_from_the_current_value() {
        let mut channel = Channel::new(0.0);
        channel.animate_to(100.0, 0.0, 1000.0, Easing::Linear);
        assert_eq!(channel.value_at(250.0), 25.0);

        channel.animate_to(0.0, 250.0, 1000.0, Easing::Linear);
        assert_eq!(channel.value_at(250.0), 25.0);
        assert_eq!(channel.target(), 0.0);
        assert_eq!(channel.value_at(1250.0), 0.0);
    }

    #[test]
    fn settle_folds_finished_tween() {
        let mut channel = Channel::default();
        channel.animate_to(1.0, 0.0, 400.0, Easing::Power3Out);
        assert!(channel.is_animating(200.0));

        channel.settle(200.0);
        assert!(channel.is_animating(200.0));

        channel.settle(400.0);
        assert!(!channel.is_animating(400.0));
        assert_eq!(channel.value_at(0.0), 1.0);
    }
}
