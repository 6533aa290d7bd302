use std::rc::Rc;

use gloo_net::http::Request;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::config;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum ContentType {
    Blogs,
    Projects,
}

impl ContentType {
    /// Path prefix for links to a single document of this type.
    pub fn url_prefix(self) -> &'static str {
        match self {
            ContentType::Blogs => "/blog",
            ContentType::Projects => "/project",
        }
    }

    fn api_segment(self) -> &'static str {
        match self {
            ContentType::Blogs => "blogs",
            ContentType::Projects => "projects",
        }
    }
}

/// Image reference as the content service ships it. The URL may be missing or blank.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ImageField {
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageField {
    pub fn is_filled(&self) -> bool {
        self.url.as_deref().map_or(false, |url| !url.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContentItem {
    pub uid: String,
    pub title: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub preview_image: Option<ImageField>,
}

#[derive(Debug, Deserialize)]
struct DocumentData {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    image: Option<ImageField>,
}

#[derive(Debug, Deserialize)]
struct Document {
    uid: String,
    #[serde(default)]
    tags: Vec<String>,
    data: DocumentData,
}

impl From<Document> for ContentItem {
    fn from(document: Document) -> Self {
        Self {
            uid: document.uid,
            title: document.data.title.unwrap_or_default(),
            date: document.data.date,
            tags: document.tags,
            preview_image: document.data.image,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IndexDocument {
    #[serde(default)]
    heading: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fallback_item_image: ImageField,
    #[serde(default)]
    view_more_text: Option<String>,
    #[serde(default)]
    items: Vec<Document>,
}

/// Everything a content index slice needs to render one list.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentIndex {
    pub heading: String,
    pub description: Option<String>,
    pub fallback_item_image: ImageField,
    pub view_more_text: Option<String>,
    pub items: Rc<Vec<ContentItem>>,
}

impl From<IndexDocument> for ContentIndex {
    fn from(document: IndexDocument) -> Self {
        Self {
            heading: document.heading.unwrap_or_default(),
            description: document.description.filter(|text| !text.trim().is_empty()),
            fallback_item_image: document.fallback_item_image,
            view_more_text: document.view_more_text.filter(|text| !text.trim().is_empty()),
            items: Rc::new(document.items.into_iter().map(ContentItem::from).collect()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("request to the content service failed: {0}")]
    Request(String),
    #[error("content service answered with status {0}")]
    Status(u16),
    #[error("could not decode the content index: {0}")]
    Decode(String),
}

pub fn parse_index(body: &str) -> Result<ContentIndex, ContentError> {
    serde_json::from_str::<IndexDocument>(body)
        .map(ContentIndex::from)
        .map_err(|e| ContentError::Decode(e.to_string()))
}

pub async fn fetch_index(content_type: ContentType) -> Result<ContentIndex, ContentError> {
    let url = format!(
        "{}/api/content-index/{}",
        config::get_content_url(),
        content_type.api_segment()
    );
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ContentError::Request(e.to_string()))?;

    if !response.ok() {
        return Err(ContentError::Status(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ContentError::Request(e.to_string()))?;
    let index = parse_index(&body)?;
    info!("Loaded {} {:?} items", index.items.len(), content_type);
    Ok(index)
}

#[cfg(test)]
impl ImageField {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}
