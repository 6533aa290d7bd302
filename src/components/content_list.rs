use std::rc::Rc;

use log::debug;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

use crate::animation::frame::now_ms;
use crate::config::{PreviewConfig, RevealConfig};
use crate::content::{ContentItem, ContentType, ImageField};
use crate::utils::dates::long_format_date;

mod controller;
mod pointer;
mod preload;
mod reveal;
mod runtime;
mod sort;

use preload::{resolve_preview_urls, warm_image_cache};
use runtime::{attach_to_page, rendered_items, ListRuntime};
use sort::{sorted_indices, SortOrder};

#[derive(Properties, PartialEq)]
pub struct ContentListProps {
    pub items: Rc<Vec<ContentItem>>,
    pub content_type: ContentType,
    #[prop_or_default]
    pub fallback_item_image: ImageField,
    #[prop_or(AttrValue::Static("Read More"))]
    pub view_more_text: AttrValue,
    /// Read once on mount.
    #[prop_or_default]
    pub preview_config: PreviewConfig,
    /// Read once on mount.
    #[prop_or_default]
    pub reveal_config: RevealConfig,
}

#[function_component(ContentList)]
pub fn content_list(props: &ContentListProps) -> Html {
    let sort_order = use_state(SortOrder::default);
    let hovered = use_state(|| None::<usize>);
    let list_ref = use_node_ref();
    let overlay_ref = use_node_ref();

    let runtime = {
        let preview_config = props.preview_config.clone();
        let reveal_config = props.reveal_config.clone();
        use_mut_ref(move || ListRuntime::new(preview_config, reveal_config))
    };

    // Display position -> index into `props.items`.
    let order = use_memo(
        |(items, order): &(Rc<Vec<ContentItem>>, SortOrder)| {
            sorted_indices(items.as_slice(), *order)
        },
        (props.items.clone(), *sort_order),
    );

    let preview_urls = use_memo(
        |(items, fallback, config): &(Rc<Vec<ContentItem>>, ImageField, PreviewConfig)| {
            resolve_preview_urls(items.as_slice(), fallback, config)
        },
        (
            props.items.clone(),
            props.fallback_item_image.clone(),
            props.preview_config.clone(),
        ),
    );

    {
        let runtime = runtime.clone();
        let overlay_ref = overlay_ref.clone();
        use_effect_with_deps(
            move |_| {
                attach_to_page(&runtime, overlay_ref);
                move || {
                    if let Ok(mut runtime) = runtime.try_borrow_mut() {
                        runtime.detach();
                    }
                }
            },
            (),
        );
    }

    {
        let runtime = runtime.clone();
        let list_ref = list_ref.clone();
        let hovered = hovered.clone();
        let item_count = props.items.len();
        use_effect_with_deps(
            move |_| {
                if let Some(list) = list_ref.cast::<Element>() {
                    let reverted = match runtime.try_borrow_mut() {
                        Ok(mut runtime) => {
                            runtime.bind_items(rendered_items(&list), item_count, now_ms())
                        }
                        Err(_) => false,
                    };
                    if reverted {
                        debug!("Dropping hover on an item that is gone");
                        hovered.set(None);
                    }
                }
                || ()
            },
            (order.clone(), props.items.clone()),
        );
    }

    use_effect_with_deps(
        |urls: &Rc<Vec<Option<String>>>| {
            warm_image_cache(urls.as_slice());
            || ()
        },
        preview_urls.clone(),
    );

    let on_toggle_order = {
        let sort_order = sort_order.clone();
        Callback::from(move |_: MouseEvent| sort_order.set(sort_order.toggled()))
    };

    let on_leave_list = {
        let runtime = runtime.clone();
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| {
            if let Ok(mut runtime) = runtime.try_borrow_mut() {
                runtime.leave(now_ms());
            }
            hovered.set(None);
        })
    };

    let tracked = (*hovered).filter(|position| *position < order.len());
    let overlay_background = tracked
        .and_then(|position| order.get(position))
        .and_then(|&index| preview_urls.get(index).cloned().flatten())
        .map(|url| format!("background-image: url(\"{}\")", url))
        .unwrap_or_default();

    let prefix = props.content_type.url_prefix();
    let items = order
        .iter()
        .enumerate()
        .filter_map(|(position, &index)| props.items.get(index).map(|item| (position, item)))
        .map(|(position, item)| {
            let on_enter = {
                let runtime = runtime.clone();
                let hovered = hovered.clone();
                Callback::from(move |_: MouseEvent| {
                    if let Ok(mut runtime) = runtime.try_borrow_mut() {
                        runtime.enter(position);
                    }
                    if *hovered != Some(position) {
                        hovered.set(Some(position));
                    }
                })
            };
            let date = item.date.as_deref().and_then(long_format_date);

            html! {
                <li
                    key={item.uid.clone()}
                    data-uid={item.uid.clone()}
                    data-index={position.to_string()}
                    class="list-item"
                    onmouseenter={on_enter}
                >
                    <a
                        href={format!("{}/{}", prefix, item.uid)}
                        class="list-item-link"
                        aria-label={item.title.clone()}
                    >
                        <div class="list-item-heading">
                            <span class="list-item-title">{ item.title.clone() }</span>
                            <div class="list-item-tags">
                                { for item.tags.iter().map(|tag| html! {
                                    <span class="list-item-tag">{ format!("#{}", tag) }</span>
                                }) }
                            </div>
                        </div>
                        <div class="list-item-meta">
                            <span class="list-item-more">{ props.view_more_text.to_string() }{ " ↗" }</span>
                            if let Some(date) = date {
                                <span class="list-item-date">{ date }</span>
                            }
                        </div>
                    </a>
                </li>
            }
        })
        .collect::<Html>();

    html! {
        <>
            <div class="content-list-toolbar">
                <button class="content-list-sort" onclick={on_toggle_order}>
                    <span class="content-list-sort-icon">
                        { if *sort_order == SortOrder::Ascending { "↑" } else { "↓" } }
                    </span>
                    { "Date" }
                </button>
            </div>
            <ul ref={list_ref} class="content-list" onmouseleave={on_leave_list}>
                { items }
                <div class="hover-reveal" ref={overlay_ref}>
                    <div class="hover-reveal-image" style={overlay_background}></div>
                </div>
            </ul>
            <style>
                {r#"
                .content-list-toolbar {
                    display: flex;
                    justify-content: flex-end;
                    padding: 0 1rem;
                }
                .content-list-sort {
                    display: flex;
                    align-items: center;
                    gap: 0.5rem;
                    padding: 0.5rem 0;
                    background: none;
                    border: none;
                    color: #e2e8f0;
                    font-size: 1.25rem;
                    cursor: pointer;
                }
                .content-list {
                    display: grid;
                    list-style: none;
                    margin: 0;
                    padding: 0;
                    border-bottom: 1px solid #f1f5f9;
                }
                .list-item {
                    opacity: 0;
                    transform: translateY(20px);
                }
                .list-item-link {
                    display: flex;
                    flex-wrap: wrap;
                    justify-content: space-between;
                    gap: 1rem;
                    padding: 2.5rem 0;
                    border-top: 1px solid #f1f5f9;
                    color: #e2e8f0;
                    text-decoration: none;
                }
                .list-item-heading {
                    display: flex;
                    flex-direction: column;
                }
                .list-item-title {
                    font-size: 1.875rem;
                    font-weight: 700;
                }
                .list-item-tags {
                    display: flex;
                    flex-wrap: wrap;
                    gap: 0.75rem;
                    color: #facc15;
                    opacity: 0.7;
                    font-weight: 700;
                }
                .list-item-meta {
                    display: flex;
                    flex-direction: column;
                    font-size: 1.25rem;
                }
                .list-item-date {
                    color: #64748b;
                }
                .hover-reveal {
                    position: absolute;
                    left: 0;
                    top: 0;
                    z-index: -10;
                    width: 320px;
                    height: 220px;
                    pointer-events: none;
                    opacity: 0;
                    visibility: hidden;
                }
                .hover-reveal-image {
                    width: 100%;
                    height: 100%;
                    border-radius: 0.5rem;
                    background-size: cover;
                    background-position: center;
                    transition: background 0.3s;
                }
                "#}
            </style>
        </>
    }
}
