//! [`PageSource`] adapters binding list endpoints to a [`PaginatedList`].
//!
//! [`PaginatedList`]: crate::pagination::PaginatedList

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{Page, PageRequest, Post};
use crate::pagination::PageSource;
use crate::traits::{HttpClient, SecureStore};

use super::client::ApiClient;

/// The global post list, optionally filtered by category.
pub struct PostsSource<'a, H, S> {
    client: &'a ApiClient<H, S>,
    filter: Option<String>,
}

/// A user's home feed.
pub struct FeedSource<'a, H, S> {
    client: &'a ApiClient<H, S>,
    user_id: i64,
}

/// A user's saved posts.
pub struct SavedSource<'a, H, S> {
    client: &'a ApiClient<H, S>,
    user_id: i64,
}

impl<H: HttpClient, S: SecureStore> ApiClient<H, S> {
    pub fn posts_source(&self, filter: Option<&str>) -> PostsSource<'_, H, S> {
        PostsSource {
            client: self,
            filter: filter.map(str::to_string),
        }
    }

    pub fn feed_source(&self, user_id: i64) -> FeedSource<'_, H, S> {
        FeedSource {
            client: self,
            user_id,
        }
    }

    pub fn saved_source(&self, user_id: i64) -> SavedSource<'_, H, S> {
        SavedSource {
            client: self,
            user_id,
        }
    }
}

impl<H, S> PostsSource<'_, H, S> {
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

#[async_trait]
impl<'a, H: HttpClient, S: SecureStore> PageSource<Post> for PostsSource<'a, H, S> {
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Page<Post>> {
        self.client.posts_page(self.filter.as_deref(), &request).await
    }
}

#[async_trait]
impl<'a, H: HttpClient, S: SecureStore> PageSource<Post> for FeedSource<'a, H, S> {
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Page<Post>> {
        self.client.feed_page(self.user_id, &request).await
    }
}

#[async_trait]
impl<'a, H: HttpClient, S: SecureStore> PageSource<Post> for SavedSource<'a, H, S> {
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Page<Post>> {
        self.client.saved_page(self.user_id, &request).await
    }
}
