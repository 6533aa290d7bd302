use yew::prelude::*;
use log::{info, Level};

mod config;
mod content;
mod animation {
    pub mod easing;
    pub mod frame;
    pub mod tween;
}
mod utils {
    pub mod dates;
}
mod components {
    pub mod content_list;
}
mod pages {
    pub mod content_index;
}

use content::ContentType;
use pages::content_index::ContentIndex;


#[function_component]
fn App() -> Html {
    html! {
        <main class="portfolio">
            <ContentIndex content_type={ContentType::Projects} />
            <ContentIndex content_type={ContentType::Blogs} />
            <style>
                {r#"
                body {
                    margin: 0;
                    background: #0f172a;
                    color: #e2e8f0;
                    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                }
                .portfolio {
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 4rem 1rem;
                }
                .content-index {
                    margin-bottom: 6rem;
                }
                .heading {
                    margin: 0;
                    font-size: 4.5rem;
                    font-weight: 700;
                    line-height: 1.1;
                    color: #cbd5e1;
                }
                .content-index-description {
                    max-width: 40rem;
                    margin: 1.5rem 0 2.5rem;
                    font-size: 1.25rem;
                }
                .content-index-status {
                    color: #94a3b8;
                }
                .content-index-error {
                    color: #f87171;
                }
                "#}
            </style>
        </main>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    let _ = console_log::init_with_level(level);

    info!("Starting portfolio");
    yew::Renderer::<App>::new().render();
}
