//! Read-only JSON API over the post listing, plus the sitemap

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{Post, PostMeta};
use crate::generator::sitemap;
use crate::helpers::{body_reading_minutes, filter_posts, reading_minutes, tag_counts};
use crate::Folio;

type AppState = Arc<Folio>;

/// Unexpected failure while serving a request
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub tag: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub token: Option<String>,
}

#[derive(Serialize)]
struct PostSummary<'a> {
    #[serde(flatten)]
    meta: &'a PostMeta,
    reading_minutes: usize,
}

#[derive(Serialize)]
struct PostDocument {
    #[serde(flatten)]
    post: Post,
    reading_minutes: usize,
}

impl From<Post> for PostDocument {
    fn from(post: Post) -> Self {
        let reading_minutes = body_reading_minutes(&post.content);
        Self {
            post,
            reading_minutes,
        }
    }
}

/// Build the application router
pub fn router(folio: Arc<Folio>) -> Router {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(show_post))
        .route("/api/preview/:slug", get(preview_post))
        .route("/api/tags", get(list_tags))
        .route("/sitemap.xml", get(sitemap_xml))
        .layer(TraceLayer::new_for_http())
        .with_state(folio)
}

/// Start the API server
pub async fn start(folio: Folio, ip: &str, port: u16) -> Result<()> {
    if !folio.previews().is_configured() {
        tracing::warn!(
            "{} is not set; every preview link will be refused",
            folio.config.preview.secret_env
        );
    }

    let app = router(Arc::new(folio));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_posts(
    State(folio): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let posts = folio.list_posts(false)?;
    let summaries: Vec<PostSummary> = filter_posts(&posts, query.tag.as_deref(), query.q.as_deref())
        .into_iter()
        .map(|meta| PostSummary {
            meta,
            reading_minutes: reading_minutes(meta.summary.as_deref()),
        })
        .collect();

    Ok(Json(summaries).into_response())
}

async fn show_post(
    State(folio): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    match folio.published_post(&slug)? {
        Some(post) => Ok(Json(PostDocument::from(post)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Refused tokens answer 404, never 403, so drafts cannot be probed
async fn preview_post(
    State(folio): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, ApiError> {
    match folio.preview_post(&slug, query.token.as_deref())? {
        Some(post) => Ok(Json(PostDocument::from(post)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

async fn list_tags(State(folio): State<AppState>) -> Result<Response, ApiError> {
    let posts = folio.list_posts(false)?;
    Ok(Json(tag_counts(&posts)).into_response())
}

async fn sitemap_xml(State(folio): State<AppState>) -> Result<Response, ApiError> {
    let posts = folio.list_posts(false)?;
    let entries = sitemap::build_entries(&folio.config, &posts, chrono::Utc::now());
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap::render(&entries),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{site, token_for, FAR_FUTURE};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn state() -> (tempfile::TempDir, AppState) {
        let (tmp, folio) = site();
        (tmp, Arc::new(folio))
    }

    #[tokio::test]
    async fn test_list_posts_published_only() {
        let (_tmp, folio) = state();
        let response = list_posts(State(folio), Query(ListQuery::default()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let slugs: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(slugs, vec!["threat-hunting", "hello-world", "undated"]);
        assert_eq!(json[0]["reading_minutes"], 1);
        assert!(json[0].get("content").is_none());
    }

    #[tokio::test]
    async fn test_list_posts_filtered() {
        let (_tmp, folio) = state();
        let query = ListQuery {
            tag: Some("intro".to_string()),
            q: Some("first".to_string()),
        };
        let response = list_posts(State(folio), Query(query))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["slug"], "hello-world");
    }

    #[tokio::test]
    async fn test_show_post() {
        let (_tmp, folio) = state();
        let response = show_post(State(folio.clone()), Path("hello-world".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["title"], "Hello World");
        assert_eq!(json["content"], "Hello.\n");

        let draft = show_post(State(folio), Path("secret-draft".to_string()))
            .await
            .unwrap();
        assert_eq!(draft.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_preview_post() {
        let (_tmp, folio) = state();

        let token = token_for("secret-draft", FAR_FUTURE);
        let ok = preview_post(
            State(folio.clone()),
            Path("secret-draft".to_string()),
            Query(PreviewQuery { token: Some(token) }),
        )
        .await
        .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(body_json(ok).await["status"], "pending-review");

        for token in [None, Some(token_for("secret-draft", "1")), Some("junk".to_string())] {
            let denied = preview_post(
                State(folio.clone()),
                Path("secret-draft".to_string()),
                Query(PreviewQuery { token }),
            )
            .await
            .unwrap();
            assert_eq!(denied.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_list_tags() {
        let (_tmp, folio) = state();
        let response = list_tags(State(folio))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["intro"], 2);
        assert_eq!(json["hunting"], 1);
    }

    #[tokio::test]
    async fn test_sitemap_excludes_drafts() {
        let (_tmp, folio) = state();
        let response = sitemap_xml(State(folio))
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/xml; charset=utf-8"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let xml = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(xml.contains("https://example.com/blog/hello-world"));
        assert!(!xml.contains("secret-draft"));
    }

    #[test]
    fn test_router_builds() {
        let (_tmp, folio) = state();
        let _router = router(folio);
    }
}
