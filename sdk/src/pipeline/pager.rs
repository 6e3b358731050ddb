//! Paginated list responses and the stream that walks them.

use crate::common::{SdkError, SdkResult, Validate};
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::task::{Context, Poll};

/// One page of a list operation.
///
/// ARM services send `value`/`nextLink`; App Configuration sends
/// `items`/`@nextLink`. Both deserialize into this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(alias = "items", default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(
        rename = "nextLink",
        alias = "@nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    pub fn new(value: Vec<T>, next_link: Option<String>) -> Self {
        Self { value, next_link }
    }

    pub fn items(&self) -> &[T] {
        &self.value
    }

    pub fn into_items(self) -> Vec<T> {
        self.value
    }

    /// A continuation link that is present and non-blank.
    pub fn continuation(&self) -> Option<&str> {
        self.next_link.as_deref().filter(|link| !link.trim().is_empty())
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            value: self.value.into_iter().map(f).collect(),
            next_link: self.next_link,
        }
    }
}

impl<T: Validate> Validate for Page<T> {
    fn validate(&self) -> SdkResult<()> {
        self.value.validate()
    }
}

/// Stream of pages, produced by [`Pipeline::pager`](super::Pipeline::pager).
pub struct Pager<T> {
    pages: BoxStream<'static, SdkResult<Page<T>>>,
}

impl<T: Send + 'static> Pager<T> {
    pub fn new(pages: BoxStream<'static, SdkResult<Page<T>>>) -> Self {
        Self { pages }
    }

    /// A pager over pages that are already in memory.
    pub fn from_pages(pages: Vec<Page<T>>) -> Self {
        Self::new(stream::iter(pages.into_iter().map(Ok::<Page<T>, SdkError>)).boxed())
    }

    /// Flatten the pages into a stream of items.
    pub fn items(self) -> BoxStream<'static, SdkResult<T>> {
        self.pages
            .map_ok(|page| stream::iter(page.value.into_iter().map(Ok::<T, SdkError>)))
            .try_flatten()
            .boxed()
    }

    /// Map each item, keeping page boundaries.
    pub fn map_items<U: Send + 'static>(
        self,
        f: impl FnMut(T) -> U + Send + Clone + 'static,
    ) -> Pager<U> {
        Pager::new(self.pages.map_ok(move |page| page.map(f.clone())).boxed())
    }

    /// Gather every item from every page.
    pub async fn collect_all(self) -> SdkResult<Vec<T>> {
        self.items().try_collect().await
    }

    /// Only the first page.
    pub async fn first_page(mut self) -> SdkResult<Option<Page<T>>> {
        self.pages.next().await.transpose()
    }
}

impl<T: Validate + Send + 'static> Pager<T> {
    /// Run [`Validate`] on every page as it arrives.
    pub fn validated(self) -> Self {
        Self::new(
            self.pages
                .and_then(|page| async move { page.validate().map(|_| page) })
                .boxed(),
        )
    }
}

impl<T> Stream for Pager<T> {
    type Item = SdkResult<Page<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.pages.as_mut().poll_next(cx)
    }
}
