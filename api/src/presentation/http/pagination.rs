use axum::http::Uri;
use serde::{Deserialize, Serialize};

use crate::application::dto::pagination::{Page, PageRequest};
use crate::bootstrap::config::Config;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageParams {
    pub fn request(&self, cfg: &Config) -> Result<PageRequest, ApiError> {
        Ok(PageRequest::parse(
            self.page.as_deref(),
            self.page_size.as_deref(),
            cfg.page_size,
            cfg.max_page_size,
        )?)
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn from_page<U>(page: Page<U>, uri: &Uri, map: impl FnMut(U) -> T) -> Self {
        Self {
            count: page.total,
            next: page.next_page().map(|p| page_link(uri, p)),
            previous: page.previous_page().map(|p| page_link(uri, p)),
            results: page.items.into_iter().map(map).collect(),
        }
    }
}

/// Same path and query with `page` replaced; the first page drops the
/// parameter entirely.
fn page_link(uri: &Uri, page: u32) -> String {
    let page_pair = format!("page={page}");
    let mut pairs: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some("page"))
        .collect();
    if page > 1 {
        pairs.push(&page_pair);
    }
    if pairs.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), pairs.join("&"))
    }
}
