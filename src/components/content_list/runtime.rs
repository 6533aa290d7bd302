use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlElement, MouseEvent};
use yew::NodeRef;

use super::controller::{ListController, ListHost};
use super::pointer::{OverlayFrame, Viewport};
use super::reveal::{RevealObserver, RevealStyle};
use crate::animation::frame::{now_ms, FrameLoop};

/// A `window` event listener that unregisters itself when dropped.
pub struct WindowListener {
    event: &'static str,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl WindowListener {
    pub fn new<F>(event: &'static str, handler: F) -> Option<Self>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        let win = window()?;
        let callback = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        win.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { event, callback })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

fn viewport() -> Option<Viewport> {
    let win = window()?;
    Some(Viewport {
        width: win.inner_width().ok()?.as_f64()?,
        height: win.inner_height().ok()?.as_f64()?,
        scroll_y: win.scroll_y().ok()?,
    })
}

fn apply_overlay(element: &HtmlElement, frame: &OverlayFrame) {
    let style = element.style();
    let _ = style.set_property("transform", &frame.transform());
    let _ = style.set_property("opacity", &frame.opacity.to_string());
    let visibility = if frame.is_visible() { "visible" } else { "hidden" };
    let _ = style.set_property("visibility", visibility);
}

fn apply_reveal(element: &HtmlElement, reveal: &RevealStyle) {
    let style = element.style();
    let _ = style.set_property("opacity", &reveal.opacity.clamp(0.0, 1.0).to_string());
    let _ = style.set_property("transform", &reveal.transform());
}

/// Browser resources of one mounted list: the overlay element, the scroll
/// observer, the frame loop and the `mousemove` listener. All of them are
/// released when the host is dropped.
pub struct DomHost {
    overlay: NodeRef,
    observer: Option<RevealObserver>,
    frames: FrameLoop,
    _pointer: Option<WindowListener>,
}

impl ListHost for DomHost {
    type Element = HtmlElement;

    fn viewport(&self) -> Option<Viewport> {
        viewport()
    }

    fn top_offset(&self, element: &HtmlElement) -> Option<f64> {
        Some(element.get_bounding_client_rect().top())
    }

    fn can_observe(&self) -> bool {
        self.observer.is_some()
    }

    fn observe(&self, element: &HtmlElement) {
        if let Some(observer) = &self.observer {
            observer.observe(element);
        }
    }

    fn unobserve(&self, element: &HtmlElement) {
        if let Some(observer) = &self.observer {
            observer.unobserve(element);
        }
    }

    fn apply_reveal(&self, element: &HtmlElement, style: &RevealStyle) {
        apply_reveal(element, style);
    }

    fn apply_overlay(&self, frame: &OverlayFrame) {
        if let Some(element) = self.overlay.cast::<HtmlElement>() {
            apply_overlay(&element, frame);
        }
    }

    fn wake(&self) {
        self.frames.wake();
    }
}

pub type ListRuntime = ListController<DomHost>;

/// Starts the frame loop, the scroll observer and the pointer listener. The
/// callbacks only hold weak references back into `runtime`.
pub fn attach_to_page(runtime: &Rc<RefCell<ListRuntime>>, overlay: NodeRef) {
    let frames = {
        let weak = Rc::downgrade(runtime);
        FrameLoop::new(move |timestamp| tick(&weak, timestamp))
    };

    let reveal_config = runtime.borrow().reveal_config().clone();
    let observer = {
        let weak = Rc::downgrade(runtime);
        RevealObserver::new(&reveal_config, move |uids| {
            if let Some(runtime) = weak.upgrade() {
                if let Ok(mut runtime) = runtime.try_borrow_mut() {
                    runtime.reveal_entered(&uids, now_ms());
                }
            }
        })
    };
    if observer.is_none() {
        warn!("IntersectionObserver unavailable, list items will appear without waiting for scroll");
    }

    let pointer = {
        let weak = Rc::downgrade(runtime);
        WindowListener::new("mousemove", move |event: MouseEvent| {
            if let Some(runtime) = weak.upgrade() {
                if let Ok(mut runtime) = runtime.try_borrow_mut() {
                    runtime.pointer_moved(
                        f64::from(event.client_x()),
                        f64::from(event.client_y()),
                        now_ms(),
                    );
                }
            }
        })
    };

    runtime.borrow_mut().attach(DomHost {
        overlay,
        observer,
        frames,
        _pointer: pointer,
    });
    debug!("Content list attached");
}

/// Item elements of `list` in rendered order, keyed by their `data-uid`.
pub fn rendered_items(list: &Element) -> Vec<(String, HtmlElement)> {
    let children = list.children();
    (0..children.length())
        .filter_map(|position| children.item(position))
        .filter_map(|child| {
            let uid = child.get_attribute("data-uid")?;
            child.dyn_into::<HtmlElement>().ok().map(|element| (uid, element))
        })
        .collect()
}

fn tick(runtime: &Weak<RefCell<ListRuntime>>, timestamp: f64) -> bool {
    let Some(runtime) = runtime.upgrade() else {
        return false;
    };
    let Ok(mut runtime) = runtime.try_borrow_mut() else {
        // Busy with an event handler; try again next frame.
        return true;
    };
    runtime.render_frame(timestamp)
}
