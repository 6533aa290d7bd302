//! Easing curves for the tween engine.
//!
//! Every curve maps progress `t` in `0.0..=1.0` to an eased progress that
//! starts at 0 and ends at 1. Overshooting curves may leave that range in
//! between.

use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Quartic deceleration.
    Power3Out,
    /// Overshoots the target by an amount controlled by `overshoot`, then settles.
    BackOut { overshoot: f64 },
    /// Springs past the target and oscillates with a decaying amplitude.
    ElasticOut { amplitude: f64, period: f64 },
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Easing::Linear => t,
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::BackOut { overshoot } => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
            Easing::ElasticOut { amplitude, period } => {
                let amplitude = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let phase = period / TAU * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * t) * ((t - phase) * TAU / period).sin() + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 4] = [
        Easing::Linear,
        Easing::Power3Out,
        Easing::BackOut { overshoot: 2.0 },
        Easing::ElasticOut { amplitude: 1.0, period: 0.3 },
    ];

    #[test]
    fn curves_are_pinned_at_both_ends() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
            assert_eq!(easing.apply(-0.5), 0.0, "{easing:?}");
            assert_eq!(easing.apply(3.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn power3_decelerates() {
        let early = Easing::Power3Out.apply(0.25);
        let late = Easing::Power3Out.apply(0.75) - Easing::Power3Out.apply(0.5);
        assert!(early > 0.25);
        assert!(late < 0.25);
    }

    #[test]
    fn back_out_overshoots_then_settles() {
        let easing = Easing::BackOut { overshoot: 2.0 };
        let peak = (1..100)
            .map(|step| easing.apply(step as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
        assert!((easing.apply(0.999) - 1.0).abs() < 0.01);
    }

    #[test]
    fn elastic_out_oscillates_around_target() {
        let easing = Easing::ElasticOut { amplitude: 1.0, period: 0.3 };
        let samples: Vec<f64> = (1..100).map(|step| easing.apply(step as f64 / 100.0)).collect();
        assert!(samples.iter().any(|v| *v > 1.0));
        assert!(samples.iter().skip(10).any(|v| *v < 1.0));
        assert!((easing.apply(0.95) - 1.0).abs() < 0.01);
    }
}
