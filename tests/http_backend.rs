//! HTTP backend tests
//!
//! Runs `HttpBookApi` against an in-process axum server speaking the books
//! service contract.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde_json::{Value, json};

use libris::backends::HttpBookApi;
use libris::config::ConfigBuilder;
use libris::prelude::*;
use libris::{Error, Operation};

#[derive(Default)]
struct Server {
    wishlist: Vec<Value>,
    next_id: u64,
    /// Serve the wishlist as an object instead of an array
    wishlist_not_array: bool,
    /// Every decoded title received on DELETE
    deleted: Vec<String>,
    /// Every `q` received on search
    queries: Vec<String>,
}

type Shared = Arc<Mutex<Server>>;

fn volume(title: &str, authors: &[&str], thumbnail: Option<&str>) -> Value {
    let mut info = json!({ "title": title, "authors": authors, "averageRating": 4.5, "ratingsCount": 7 });
    if let Some(url) = thumbnail {
        info["imageLinks"] = json!({ "thumbnail": url });
    }
    json!({ "id": title.to_lowercase(), "volumeInfo": info })
}

async fn list_books(
    State(server): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    let q = params.get("q").cloned().unwrap_or_default();
    server.lock().unwrap().queries.push(q.clone());

    match q.as_str() {
        "explode" => Err(StatusCode::INTERNAL_SERVER_ERROR),
        // no `items` key at all
        "nothing" => Ok(Json(json!({ "kind": "books#volumes", "totalItems": 0 }))),
        _ => Ok(Json(json!({
            "items": [
                volume("Dune", &["Frank Herbert"], Some("http://books.example/dune.jpg")),
                volume("Dune Messiah", &[], None),
                "not a book",
            ]
        }))),
    }
}

async fn reset_wishlist(State(server): State<Shared>) -> StatusCode {
    server.lock().unwrap().wishlist.clear();
    StatusCode::OK
}

async fn get_wishlist(State(server): State<Shared>) -> Json<Value> {
    let server = server.lock().unwrap();
    if server.wishlist_not_array {
        return Json(json!({ "error": "temporarily unavailable" }));
    }
    Json(Value::Array(server.wishlist.clone()))
}

async fn add_to_wishlist(State(server): State<Shared>, Json(mut item): Json<Value>) -> StatusCode {
    let mut server = server.lock().unwrap();
    let title = item["title"].clone();
    if server.wishlist.iter().any(|i| i["title"] == title) {
        return StatusCode::CONFLICT;
    }
    server.next_id += 1;
    item["_id"] = json!(format!("obj{}", server.next_id));
    server.wishlist.push(item);
    StatusCode::CREATED
}

async fn remove_from_wishlist(State(server): State<Shared>, Path(title): Path<String>) -> StatusCode {
    let mut server = server.lock().unwrap();
    server.deleted.push(title.clone());
    server.wishlist.retain(|i| i["title"] != Value::String(title.clone()));
    StatusCode::OK
}

async fn spawn_server(server: Shared) -> String {
    let app = Router::new()
        .route("/books/list", get(list_books))
        .route("/books/reset-wishlist", post(reset_wishlist))
        .route("/books/wishlist", get(get_wishlist).post(add_to_wishlist))
        .route("/books/wishlist/:title", delete(remove_from_wishlist))
        .with_state(server);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn setup() -> (Shared, HttpBookApi) {
    let server: Shared = Arc::default();
    let base = spawn_server(Arc::clone(&server)).await;
    let config = ConfigBuilder::default().api_base_url(base).build().unwrap();
    (server, HttpBookApi::from_config(&config).unwrap())
}

#[cfg(test)]
mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_search_decodes_items_and_skips_malformed() {
        let (server, api) = setup().await;

        let books = api.search("dune & more").await.unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].volume_info.title, "Dune");
        assert_eq!(books[0].volume_info.average_rating, Some(4.5));
        assert_eq!(server.lock().unwrap().queries, vec!["dune & more"]);
    }

    #[tokio::test]
    async fn test_search_without_items_is_empty() {
        let (_server, api) = setup().await;
        assert!(api.search("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let (_server, api) = setup().await;
        let result = api.search("explode").await;
        assert!(matches!(result, Err(Error::Http { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_non_array_wishlist_is_empty() {
        let (server, api) = setup().await;
        server.lock().unwrap().wishlist_not_array = true;

        assert!(api.get_wishlist().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_posts_flat_record() {
        let (server, api) = setup().await;
        let books = api.search("dune").await.unwrap();
        let item = DisplayBook::from(&books[0]).to_wishlist_item();

        api.add_to_wishlist(&item).await.unwrap();

        let stored = server.lock().unwrap().wishlist[0].clone();
        assert_eq!(stored["title"], "Dune");
        assert_eq!(stored["authors"], "Frank Herbert");
        assert_eq!(stored["thumbnail"], "https://books.example/dune.jpg");
        assert_eq!(stored["rating"], 4.5);
        assert_eq!(stored["ratingsCount"], 7);

        let fetched = api.get_wishlist().await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, Some(json!("obj1")));
    }

    #[tokio::test]
    async fn test_duplicate_add_is_rejected() {
        let (_server, api) = setup().await;
        let books = api.search("dune").await.unwrap();
        let item = DisplayBook::from(&books[0]).to_wishlist_item();

        api.add_to_wishlist(&item).await.unwrap();
        let again = api.add_to_wishlist(&item).await;
        assert!(matches!(again, Err(Error::Http { status: 409, .. })));
    }

    #[tokio::test]
    async fn test_delete_encodes_title_as_one_segment() {
        let (server, api) = setup().await;

        api.remove_from_wishlist("Tom & Jerry / Reloaded?").await.unwrap();

        assert_eq!(server.lock().unwrap().deleted, vec!["Tom & Jerry / Reloaded?"]);
    }

    #[tokio::test]
    async fn test_dot_titles_are_never_sent() {
        let (server, api) = setup().await;
        server.lock().unwrap().wishlist.push(json!({ "title": ".." }));

        for title in [".", ".."] {
            let result = api.remove_from_wishlist(title).await;
            assert!(matches!(result, Err(Error::Parse(_))));
        }

        let server = server.lock().unwrap();
        assert!(server.deleted.is_empty());
        assert_eq!(server.wishlist.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let config = ConfigBuilder::default()
            .api_base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        let api = HttpBookApi::from_config(&config).unwrap();

        assert!(matches!(api.reset_wishlist().await, Err(Error::Network(_))));
    }

    #[tokio::test]
    async fn test_full_session_over_http() {
        let (server, api) = setup().await;
        server.lock().unwrap().wishlist.push(json!({ "title": "Leftover" }));

        let mut client = BookSearchClient::new(api);
        client.start().await;
        assert!(server.lock().unwrap().wishlist.is_empty());

        client.search("dune").await;
        assert_eq!(client.state().books().len(), 2);

        // the second result has no cover and no authors
        let messiah = DisplayBook::from(&client.state().books()[1]);
        assert_eq!(messiah.thumbnail_url, None);
        assert_eq!(messiah.authors_text, "");

        let first = client.state().books()[0].clone();
        client.toggle(first.into()).await;
        assert_eq!(client.state().wishlist().len(), 1);

        client.select_tab(Tab::Wishlist).await;
        let stored = client.state().wishlist()[0].clone();
        client.toggle(stored.into()).await;

        assert!(client.state().wishlist().is_empty());
        assert!(server.lock().unwrap().wishlist.is_empty());
        assert!(client.state().banner().is_none());
    }

    #[tokio::test]
    async fn test_failed_search_over_http_sets_banner() {
        let (_server, api) = setup().await;
        let mut client = BookSearchClient::new(api);

        client.search("explode").await;

        assert_eq!(client.state().error(), Some(Operation::Search.failure_message()));
        assert!(!client.state().is_loading());
    }
}
