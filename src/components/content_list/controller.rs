//! Per-instance coordination of a mounted content list.
//!
//! [`ListController`] owns the hover preview and the reveal registry and
//! decides what to animate. Everything that touches the page goes through a
//! [`ListHost`]: attaching hands one over, detaching drops it, and with no
//! host attached every event is ignored.

use std::collections::HashMap;

use log::debug;

use super::pointer::{HoverPreview, OverlayFrame, Viewport};
use super::reveal::{start_passed, RevealRegistry, RevealStyle};
use crate::config::{PreviewConfig, RevealConfig};

/// Page-side resources of one mounted list. Dropping the host releases its
/// pointer listener, scroll observer and pending frame.
pub trait ListHost {
    type Element;

    fn viewport(&self) -> Option<Viewport>;
    /// Distance from the top of the viewport to the element's top edge.
    fn top_offset(&self, element: &Self::Element) -> Option<f64>;
    fn can_observe(&self) -> bool;
    fn observe(&self, element: &Self::Element);
    fn unobserve(&self, element: &Self::Element);
    fn apply_reveal(&self, element: &Self::Element, style: &RevealStyle);
    fn apply_overlay(&self, frame: &OverlayFrame);
    /// Makes sure a frame is scheduled.
    fn wake(&self);
}

pub struct ListController<H: ListHost> {
    preview: HoverPreview,
    reveal: RevealRegistry,
    reveal_config: RevealConfig,
    item_count: usize,
    elements: HashMap<String, H::Element>,
    host: Option<H>,
}

impl<H: ListHost> ListController<H> {
    pub fn new(preview_config: PreviewConfig, reveal_config: RevealConfig) -> Self {
        Self {
            preview: HoverPreview::new(preview_config),
            reveal: RevealRegistry::new(reveal_config.clone()),
            reveal_config,
            item_count: 0,
            elements: HashMap::new(),
            host: None,
        }
    }

    pub fn reveal_config(&self) -> &RevealConfig {
        &self.reveal_config
    }

    pub fn attach(&mut self, host: H) {
        self.host = Some(host);
    }

    pub fn detach(&mut self) {
        self.host = None;
        self.elements.clear();
        self.reveal.clear();
        self.preview.reset();
        debug!("Content list detached");
    }

    /// Rebinds reveal state to the items currently rendered, given as
    /// `(uid, element)` in rendered order. Items whose trigger line is already
    /// behind them start at once; the rest are handed to the observer.
    /// Returns whether a stale hover had to be dropped.
    pub fn bind_items<I>(&mut self, rendered: I, item_count: usize, now_ms: f64) -> bool
    where
        I: IntoIterator<Item = (String, H::Element)>,
    {
        self.item_count = item_count;
        let rendered: Vec<(String, H::Element)> = rendered.into_iter().collect();
        let removed = self.reveal.sync(rendered.iter().map(|(uid, _)| uid.as_str()));

        if let Some(host) = &self.host {
            for uid in &removed {
                if let Some(element) = self.elements.get(uid) {
                    host.unobserve(element);
                }
            }

            let viewport_height = host.viewport().map(|viewport| viewport.height);
            let mut passed = Vec::new();
            for (uid, element) in &rendered {
                if !self.reveal.is_pending(uid) {
                    if let Some(style) = self.reveal.style(uid, now_ms) {
                        host.apply_reveal(element, &style);
                    }
                    continue;
                }
                let already_passed = match (host.top_offset(element), viewport_height) {
                    (Some(top), Some(height)) => start_passed(top, height, &self.reveal_config),
                    _ => false,
                };
                if already_passed || !host.can_observe() {
                    passed.push(uid.clone());
                } else {
                    host.observe(element);
                }
            }
            self.reveal.trigger(&passed, now_ms);
        }

        self.elements = rendered.into_iter().collect();
        let reverted = self.preview.revalidate(item_count, now_ms);
        self.wake();
        reverted
    }

    pub fn enter(&mut self, position: usize) {
        if self.host.is_some() {
            self.preview.enter(position);
        }
    }

    /// The pointer left the whole list.
    pub fn leave(&mut self, now_ms: f64) {
        self.preview.leave(now_ms);
        self.wake();
    }

    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64, now_ms: f64) {
        let Some(viewport) = self.host.as_ref().and_then(|host| host.viewport()) else {
            return;
        };
        self.preview
            .pointer_moved(client_x, client_y, viewport, self.item_count, now_ms);
        self.wake();
    }

    /// Items that crossed the trigger line together, in rendered order.
    pub fn reveal_entered(&mut self, uids: &[String], now_ms: f64) {
        if self.host.is_some() && self.reveal.trigger(uids, now_ms) > 0 {
            self.wake();
        }
    }

    /// Writes one frame of every running animation. Returns whether another
    /// frame is needed.
    pub fn render_frame(&mut self, now_ms: f64) -> bool {
        let Some(host) = &self.host else {
            return false;
        };
        host.apply_overlay(&self.preview.frame(now_ms));
        self.preview.settle(now_ms);

        for (uid, style) in self.reveal.advance(now_ms) {
            if let Some(element) = self.elements.get(&uid) {
                host.apply_reveal(element, &style);
            }
        }

        self.preview.is_animating(now_ms) || self.reveal.is_animating()
    }

    fn wake(&self) {
        if let Some(host) = &self.host {
            host.wake();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::components::content_list::pointer::TrackerState;
    use crate::components::content_list::reveal::RevealPhase;

    #[derive(Debug, Default)]
    struct PageLog {
        observed: Vec<String>,
        unobserved: Vec<String>,
        overlay_frames: usize,
        reveal_frames: Vec<String>,
        wakes: usize,
        released: bool,
    }

    struct FakePage {
        log: Rc<RefCell<PageLog>>,
        tops: HashMap<String, f64>,
        observer: bool,
    }

    impl ListHost for FakePage {
        type Element = String;

        fn viewport(&self) -> Option<Viewport> {
            Some(Viewport {
                width: 1280.0,
                height: 800.0,
                scroll_y: 0.0,
            })
        }

        fn top_offset(&self, element: &String) -> Option<f64> {
            Some(self.tops.get(element).copied().unwrap_or(2000.0))
        }

        fn can_observe(&self) -> bool {
            self.observer
        }

        fn observe(&self, element: &String) {
            self.log.borrow_mut().observed.push(element.clone());
        }

        fn unobserve(&self, element: &String) {
            self.log.borrow_mut().unobserved.push(element.clone());
        }

        fn apply_reveal(&self, element: &String, _style: &RevealStyle) {
            self.log.borrow_mut().reveal_frames.push(element.clone());
        }

        fn apply_overlay(&self, _frame: &OverlayFrame) {
            self.log.borrow_mut().overlay_frames += 1;
        }

        fn wake(&self) {
            self.log.borrow_mut().wakes += 1;
        }
    }

    impl Drop for FakePage {
        fn drop(&mut self) {
            self.log.borrow_mut().released = true;
        }
    }

    fn page(tops: &[(&str, f64)]) -> (FakePage, Rc<RefCell<PageLog>>) {
        let log = Rc::new(RefCell::new(PageLog::default()));
        let page = FakePage {
            log: log.clone(),
            tops: tops.iter().map(|(uid, top)| (uid.to_string(), *top)).collect(),
            observer: true,
        };
        (page, log)
    }

    fn rendered(uids: &[&str]) -> Vec<(String, String)> {
        uids.iter().map(|uid| (uid.to_string(), uid.to_string())).collect()
    }

    fn controller() -> ListController<FakePage> {
        ListController::new(PreviewConfig::default(), RevealConfig::default())
    }

    #[test]
    fn detaching_while_tracking_releases_the_page_and_ignores_later_moves() {
        let mut list = controller();
        let (host, log) = page(&[]);
        list.attach(host);
        list.bind_items(rendered(&["a", "b", "c"]), 3, 0.0);
        list.enter(1);
        list.pointer_moved(400.0, 300.0, 10.0);
        assert_eq!(list.preview.state(), TrackerState::Tracking(1));

        list.detach();
        assert!(log.borrow().released);
        assert_eq!(list.preview.state(), TrackerState::Idle);

        let wakes = log.borrow().wakes;
        list.pointer_moved(900.0, 500.0, 20.0);
        list.enter(2);
        assert!(!list.render_frame(30.0));

        assert_eq!(list.preview.state(), TrackerState::Idle);
        assert_eq!(list.preview.overlay().opacity_target(), 0.0);
        assert_eq!(log.borrow().wakes, wakes);
        assert_eq!(log.borrow().overlay_frames, 0);
    }

    #[test]
    fn leaving_the_list_drops_the_hover_and_fades_out() {
        let mut list = controller();
        let (host, _log) = page(&[]);
        list.attach(host);
        list.bind_items(rendered(&["a", "b"]), 2, 0.0);

        list.enter(0);
        list.pointer_moved(300.0, 200.0, 0.0);
        list.enter(1);
        list.pointer_moved(310.0, 260.0, 50.0);
        assert_eq!(list.preview.tracked(), Some(1));
        assert_eq!(list.preview.overlay().opacity_target(), 1.0);

        list.leave(100.0);
        assert_eq!(list.preview.tracked(), None);
        assert_eq!(list.preview.overlay().opacity_target(), 0.0);
        assert!(list.render_frame(150.0));
    }

    #[test]
    fn shrinking_the_list_drops_a_stale_hover() {
        let mut list = controller();
        let (host, _log) = page(&[]);
        list.attach(host);
        list.bind_items(rendered(&["a", "b", "c", "d"]), 4, 0.0);
        list.enter(3);

        assert!(list.bind_items(rendered(&["a", "b"]), 2, 10.0));
        assert_eq!(list.preview.state(), TrackerState::Idle);
        assert!(!list.bind_items(rendered(&["a", "b"]), 2, 20.0));
    }

    #[test]
    fn items_below_the_trigger_line_wait_for_the_observer() {
        let mut list = controller();
        let (host, log) = page(&[]);
        list.attach(host);
        list.bind_items(rendered(&["a", "b"]), 2, 0.0);

        assert_eq!(log.borrow().observed, ["a", "b"]);
        assert!(list.reveal.is_pending("a"));

        list.reveal_entered(&["b".to_string(), "a".to_string()], 100.0);
        assert_eq!(list.reveal.phase("a"), Some(RevealPhase::Playing));
        assert_eq!(list.reveal.phase("b"), Some(RevealPhase::Playing));
    }

    #[test]
    fn items_already_scrolled_past_play_on_mount() {
        let mut list = controller();
        let (host, log) = page(&[("top", -600.0), ("visible", 200.0), ("below", 750.0)]);
        list.attach(host);
        list.bind_items(rendered(&["top", "visible", "below"]), 3, 0.0);

        assert_eq!(list.reveal.phase("top"), Some(RevealPhase::Playing));
        assert_eq!(list.reveal.phase("visible"), Some(RevealPhase::Playing));
        assert!(list.reveal.is_pending("below"));
        assert_eq!(log.borrow().observed, ["below"]);

        // The second item starts one stagger step after the first.
        let first = list.reveal.style("top", 100.0).map(|style| style.opacity);
        let second = list.reveal.style("visible", 100.0).map(|style| style.opacity);
        assert!(first > Some(0.0));
        assert_eq!(second, Some(0.0));
    }

    #[test]
    fn resorting_keeps_reveal_progress_and_unobserves_removed_items() {
        let mut list = controller();
        let (host, log) = page(&[("a", 100.0)]);
        list.attach(host);
        list.bind_items(rendered(&["a", "b", "c"]), 3, 0.0);
        while list.render_frame(5000.0) {}
        assert_eq!(list.reveal.phase("a"), Some(RevealPhase::Revealed));

        list.bind_items(rendered(&["c", "a"]), 2, 6000.0);
        assert_eq!(list.reveal.phase("a"), Some(RevealPhase::Revealed));
        assert_eq!(log.borrow().unobserved, ["b"]);
        assert!(log.borrow().reveal_frames.iter().any(|uid| uid == "a"));
    }

    #[test]
    fn without_an_observer_every_item_plays_at_once() {
        let mut list = controller();
        let (mut host, log) = page(&[]);
        host.observer = false;
        list.attach(host);
        list.bind_items(rendered(&["a", "b"]), 2, 0.0);

        assert!(log.borrow().observed.is_empty());
        assert!(!list.reveal.is_pending("a"));
        assert!(!list.reveal.is_pending("b"));
    }
}
