use log::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::content_list::ContentList;
use crate::content::{fetch_index, ContentIndex as IndexData, ContentType};

#[derive(Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready(IndexData),
    Failed(String),
}

#[derive(Properties, PartialEq)]
pub struct ContentIndexProps {
    pub content_type: ContentType,
}

/// A content index slice: heading, optional blurb, and the interactive list.
#[function_component(ContentIndex)]
pub fn content_index(props: &ContentIndexProps) -> Html {
    let state = use_state(|| LoadState::Loading);

    {
        let state = state.clone();
        use_effect_with_deps(
            move |content_type: &ContentType| {
                let content_type = *content_type;
                state.set(LoadState::Loading);
                spawn_local(async move {
                    match fetch_index(content_type).await {
                        Ok(index) => state.set(LoadState::Ready(index)),
                        Err(e) => {
                            warn!("Failed to load {:?} index: {}", content_type, e);
                            state.set(LoadState::Failed(e.to_string()));
                        }
                    }
                });
                || ()
            },
            props.content_type,
        );
    }

    let body = match &*state {
        LoadState::Loading => html! {
            <p class="content-index-status">{"Loading..."}</p>
        },
        LoadState::Failed(message) => html! {
            <p class="content-index-status content-index-error">{ message.clone() }</p>
        },
        LoadState::Ready(index) => {
            let view_more_text = index
                .view_more_text
                .clone()
                .map(AttrValue::from)
                .unwrap_or(AttrValue::Static("Read More"));
            html! {
                <>
                    <h2 class="heading">{ index.heading.clone() }</h2>
                    if let Some(description) = index.description.clone() {
                        <div class="content-index-description">{ description }</div>
                    }
                    <ContentList
                        items={index.items.clone()}
                        content_type={props.content_type}
                        fallback_item_image={index.fallback_item_image.clone()}
                        view_more_text={view_more_text}
                    />
                </>
            }
        }
    };

    html! {
        <section class="content-index">
            { body }
        </section>
    }
}
