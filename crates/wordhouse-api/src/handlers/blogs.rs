//! Blog handlers.
//!
//! Fetching a post by id is not a pure read: the caller's network address is
//! added to the post's deduplicated visitor set before the post is returned.

use crate::{
    extract::ClientAddr,
    response::{Created, MessageResponse},
    state::AppState,
    ApiResult,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
use wordhouse_core::{Blog, BlogId, Patch};

/// Create blog request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogRequest {
    /// Post title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Category label.
    pub category: Option<String>,
    /// Header image URL.
    pub image: Option<String>,
    /// Post body.
    pub body: Option<String>,
    /// Author name.
    pub author: Option<String>,
    /// Publication date; defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Update blog request.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    /// Post title; cannot be cleared.
    #[serde(default)]
    pub title: Patch<String>,
    /// Category label.
    #[serde(default)]
    pub category: Patch<String>,
    /// Header image URL.
    #[serde(default)]
    pub image: Patch<String>,
    /// Post body.
    #[serde(default)]
    pub body: Patch<String>,
    /// Author name.
    #[serde(default)]
    pub author: Patch<String>,
    /// Publication date.
    #[serde(default)]
    pub date: Patch<DateTime<Utc>>,
}

/// A blog post with its unique-visitor count.
#[derive(Debug, Serialize)]
pub struct BlogViewResponse {
    /// The post, visitor set included.
    pub blog: Blog,
    /// Number of distinct caller addresses seen.
    pub unique_ip_count: usize,
}

/// Just the unique-visitor count.
#[derive(Debug, Serialize)]
pub struct ViewCountResponse {
    /// Number of distinct caller addresses seen.
    pub unique_ip_count: usize,
}

/// Creates a blog post.
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBlogRequest>,
) -> ApiResult<Created<Blog>> {
    request.validate()?;

    let blog = Blog {
        id: BlogId::new(),
        title: request.title,
        category: request.category,
        image: request.image,
        body: request.body,
        author: request.author,
        date: request.date.unwrap_or_else(Utc::now),
        unique_ips: Vec::new(),
    };

    Ok(Created(state.content.blogs.insert(blog)))
}

/// Lists blog posts, newest first.
pub async fn list_blogs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Blog>>> {
    Ok(Json(
        state.content.blogs.sorted_by(|a, b| b.date.cmp(&a.date)),
    ))
}

/// Fetches one post, recording the caller as a viewer.
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BlogId>,
    ClientAddr(addr): ClientAddr,
) -> ApiResult<Json<BlogViewResponse>> {
    let blog = state.content.blogs.update(&id, |blog| {
        blog.record_view(&addr);
    })?;

    let unique_ip_count = blog.view_count();
    Ok(Json(BlogViewResponse {
        blog,
        unique_ip_count,
    }))
}

/// Returns a post's unique-visitor count without recording a view.
pub async fn get_blog_views(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BlogId>,
) -> ApiResult<Json<ViewCountResponse>> {
    let blog = state.content.blogs.get(&id)?;
    Ok(Json(ViewCountResponse {
        unique_ip_count: blog.view_count(),
    }))
}

/// Updates a post with partial-field semantics.
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BlogId>,
    Json(request): Json<UpdateBlogRequest>,
) -> ApiResult<Json<Blog>> {
    crate::validation::Validator::new()
        .not_cleared("title", &request.title)
        .finish()?;

    let updated = state.content.blogs.update(&id, |blog| {
        request.title.apply_to_required(&mut blog.title);
        request.category.apply_to(&mut blog.category);
        request.image.apply_to(&mut blog.image);
        request.body.apply_to(&mut blog.body);
        request.author.apply_to(&mut blog.author);
        request.date.apply_to_required(&mut blog.date);
    })?;

    Ok(Json(updated))
}

/// Deletes a post.
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BlogId>,
) -> ApiResult<MessageResponse> {
    state.content.blogs.remove(&id)?;
    Ok(MessageResponse::new("Blog deleted successfully"))
}

/// Lists the distinct categories.
pub async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.content.blogs.distinct(|b| b.category.clone())))
}

/// Lists the distinct authors.
pub async fn list_authors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.content.blogs.distinct(|b| b.author.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_state;

    async fn seed(state: Arc<AppState>) -> Blog {
        let Created(blog) = create_blog(
            State(state),
            Json(CreateBlogRequest {
                title: "Walking in Faith".to_string(),
                category: Some("Teaching".to_string()),
                image: None,
                body: Some("...".to_string()),
                author: Some("E. Udo".to_string()),
                date: None,
            }),
        )
        .await
        .unwrap();
        blog
    }

    #[tokio::test]
    async fn repeat_views_from_one_address_count_once() {
        let harness = test_state();
        let blog = seed(harness.state.clone()).await;

        for _ in 0..3 {
            get_blog(
                State(harness.state.clone()),
                Path(blog.id),
                ClientAddr("203.0.113.9".to_string()),
            )
            .await
            .unwrap();
        }

        let Json(views) = get_blog_views(State(harness.state.clone()), Path(blog.id))
            .await
            .unwrap();
        assert_eq!(views.unique_ip_count, 1);
    }

    #[tokio::test]
    async fn distinct_addresses_each_count() {
        let harness = test_state();
        let blog = seed(harness.state.clone()).await;

        for i in 0..4 {
            get_blog(
                State(harness.state.clone()),
                Path(blog.id),
                ClientAddr(format!("203.0.113.{i}")),
            )
            .await
            .unwrap();
        }

        let Json(views) = get_blog_views(State(harness.state.clone()), Path(blog.id))
            .await
            .unwrap();
        assert_eq!(views.unique_ip_count, 4);
    }

    #[tokio::test]
    async fn views_endpoint_does_not_record() {
        let harness = test_state();
        let blog = seed(harness.state.clone()).await;

        get_blog_views(State(harness.state.clone()), Path(blog.id))
            .await
            .unwrap();
        let Json(views) = get_blog_views(State(harness.state.clone()), Path(blog.id))
            .await
            .unwrap();
        assert_eq!(views.unique_ip_count, 0);
    }

    #[tokio::test]
    async fn category_and_author_listings() {
        let harness = test_state();
        seed(harness.state.clone()).await;
        seed(harness.state.clone()).await;

        let Json(categories) = list_categories(State(harness.state.clone())).await.unwrap();
        assert_eq!(categories, vec!["Teaching".to_string()]);

        let Json(authors) = list_authors(State(harness.state.clone())).await.unwrap();
        assert_eq!(authors, vec!["E. Udo".to_string()]);
    }
}
