//! Scroll-triggered entrance of list items.
//!
//! [`RevealRegistry`] holds the per-item animation state keyed by item uid, so
//! re-sorting never replays an entrance. [`RevealObserver`] is the browser
//! side: one `IntersectionObserver` per mounted list that reports each item
//! once and then stops watching it.

use std::collections::HashMap;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::animation::easing::Easing;
use crate::animation::tween::Channel;
use crate::config::RevealConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub offset_y: f64,
}

impl RevealStyle {
    pub const SHOWN: RevealStyle = RevealStyle {
        opacity: 1.0,
        offset_y: 0.0,
    };

    pub fn transform(&self) -> String {
        format!("translateY({}px)", self.offset_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    /// Waiting for the item to scroll into range.
    Pending,
    Playing,
    Revealed,
}

#[derive(Clone, Debug)]
struct RevealBinding {
    phase: RevealPhase,
    opacity: Channel,
    offset: Channel,
}

impl RevealBinding {
    fn hidden(config: &RevealConfig) -> Self {
        Self {
            phase: RevealPhase::Pending,
            opacity: Channel::new(0.0),
            offset: Channel::new(config.initial_offset_y),
        }
    }

    fn style(&self, now_ms: f64) -> RevealStyle {
        RevealStyle {
            opacity: self.opacity.value_at(now_ms),
            offset_y: self.offset.value_at(now_ms),
        }
    }
}

pub struct RevealRegistry {
    bindings: HashMap<String, RevealBinding>,
    config: RevealConfig,
}

impl RevealRegistry {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            bindings: HashMap::new(),
            config,
        }
    }

    /// Aligns the registry with the rendered uids. New uids start hidden,
    /// uids that are gone are dropped and returned.
    pub fn sync<'a, I>(&mut self, uids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut next = HashMap::new();
        for uid in uids {
            let binding = self
                .bindings
                .remove(uid)
                .unwrap_or_else(|| RevealBinding::hidden(&self.config));
            next.insert(uid.to_string(), binding);
        }
        let removed = self.bindings.drain().map(|(uid, _)| uid).collect();
        self.bindings = next;
        removed
    }

    pub fn phase(&self, uid: &str) -> Option<RevealPhase> {
        self.bindings.get(uid).map(|binding| binding.phase)
    }

    pub fn is_pending(&self, uid: &str) -> bool {
        self.phase(uid) == Some(RevealPhase::Pending)
    }

    /// Starts the entrance for every pending uid in `uids`, which must be in
    /// rendered order. Each started item waits one stagger step longer than
    /// the one before it. Returns how many entrances started.
    pub fn trigger(&mut self, uids: &[String], now_ms: f64) -> usize {
        let easing = Easing::ElasticOut {
            amplitude: self.config.elastic_amplitude,
            period: self.config.elastic_period,
        };
        let mut started = 0;
        for uid in uids {
            let Some(binding) = self.bindings.get_mut(uid.as_str()) else {
                continue;
            };
            if binding.phase != RevealPhase::Pending {
                continue;
            }
            let delay = started as f64 * self.config.stagger_ms;
            binding
                .opacity
                .animate_delayed(1.0, now_ms, delay, self.config.duration_ms, easing);
            binding
                .offset
                .animate_delayed(0.0, now_ms, delay, self.config.duration_ms, easing);
            binding.phase = RevealPhase::Playing;
            started += 1;
        }
        started
    }

    pub fn style(&self, uid: &str, now_ms: f64) -> Option<RevealStyle> {
        self.bindings.get(uid).map(|binding| binding.style(now_ms))
    }

    /// Styles for every playing item at `now_ms`. Items whose entrance ends
    /// are reported one last time and then marked revealed.
    pub fn advance(&mut self, now_ms: f64) -> Vec<(String, RevealStyle)> {
        let mut frames = Vec::new();
        for (uid, binding) in self.bindings.iter_mut() {
            if binding.phase != RevealPhase::Playing {
                continue;
            }
            let finished = !binding.opacity.is_animating(now_ms) && !binding.offset.is_animating(now_ms);
            if finished {
                binding.opacity.settle(now_ms);
                binding.offset.settle(now_ms);
                binding.phase = RevealPhase::Revealed;
            }
            frames.push((uid.clone(), binding.style(now_ms)));
        }
        frames
    }

    pub fn is_animating(&self) -> bool {
        self.bindings
            .values()
            .any(|binding| binding.phase == RevealPhase::Playing)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

/// Shrinks the observed viewport from the bottom so items fire once their top
/// edge is `trigger_margin_px` above the bottom of the screen.
pub fn root_margin(config: &RevealConfig) -> String {
    format!("0px 0px -{}px 0px", config.trigger_margin_px.max(0.0))
}

/// Whether an item whose top edge sits `top` px below the top of the viewport
/// has already crossed the trigger line, e.g. when the page mounts scrolled.
pub fn start_passed(top: f64, viewport_height: f64, config: &RevealConfig) -> bool {
    top < viewport_height - config.trigger_margin_px.max(0.0)
}

pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    /// `on_enter` receives the uids that crossed the threshold in one
    /// delivery, in rendered order. Elements are identified by their
    /// `data-uid` and ordered by `data-index`.
    pub fn new<F>(config: &RevealConfig, mut on_enter: F) -> Option<Self>
    where
        F: FnMut(Vec<String>) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let mut entered: Vec<(usize, String)> = Vec::new();
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    let Some(uid) = target.get_attribute("data-uid") else {
                        continue;
                    };
                    let rank = target
                        .get_attribute("data-index")
                        .and_then(|index| index.parse().ok())
                        .unwrap_or(usize::MAX);
                    entered.push((rank, uid));
                }
                if entered.is_empty() {
                    return;
                }
                entered.sort_by_key(|(rank, _)| *rank);
                on_enter(entered.into_iter().map(|(_, uid)| uid).collect());
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&root_margin(config));
        init.set_threshold(&JsValue::from_f64(0.0));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    pub fn unobserve(&self, element: &Element) {
        self.observer.unobserve(element);
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
