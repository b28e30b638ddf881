use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppResult,
    models::{AddForm, EditForm, NewMovie, rank_by_rating, release_year},
    templates,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/edit", get(edit).post(update))
        .route("/delete", get(delete))
        .route("/add", get(add).post(search))
        .route("/select", get(select))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    id: i64,
}

pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.store.list_by_rating().await?;
    let ranked = rank_by_rating(movies);
    Ok(Html(templates::index_page(&ranked)))
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(q.id).await?;
    Ok(Html(templates::edit_page(&movie, &[])))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = state.store.get(q.id).await?;
    match form.validate() {
        Ok(update) => {
            state.store.update_review(movie.id, update.rating, update.review).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => Ok(Html(templates::edit_page(&movie, &errors)).into_response()),
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    tracing::debug!(id = q.id, "movie deleted");
    Ok(Redirect::to("/"))
}

pub async fn add() -> Html<String> {
    Html(templates::add_page(None))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddForm>,
) -> AppResult<Html<String>> {
    let title = form.title.trim();
    if title.is_empty() {
        return Ok(Html(templates::add_page(Some("Movie title is required."))));
    }

    let candidates = state.tmdb.search_movie(title).await?;
    Ok(Html(templates::select_page(&candidates)))
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SelectQuery>,
) -> AppResult<Redirect> {
    let details = state.tmdb.movie_details(q.id).await?;

    let new_movie = NewMovie {
        year: release_year(&details.release_date),
        img_url: state.tmdb.poster_url(details.poster_path.as_deref()),
        title: details.title,
        description: details.overview,
    };

    let movie = state.store.create(new_movie).await?;
    tracing::info!(id = movie.id, title = %movie.title, "movie added");
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{store::MovieStore, tmdb::TmdbClient};

    async fn test_app(tmdb_base: &str) -> (tempfile::TempDir, Arc<AppState>, Router) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}/movies.db?mode=rwc", dir.path().display());
        let db = crate::db::connect_and_migrate(&url).await.unwrap();

        let tmdb = TmdbClient::new(
            reqwest::Client::new(),
            "test-key".to_string(),
            tmdb_base.to_string(),
            "https://image.tmdb.org/t/p/w500".to_string(),
        );

        let state = Arc::new(AppState { store: MovieStore::new(db), tmdb: Arc::new(tmdb) });
        (dir, state.clone(), router(state))
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let resp = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response_parts(resp).await
    }

    async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Option<String>, String) {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        response_parts(resp).await
    }

    async fn response_parts(resp: Response) -> (StatusCode, Option<String>, String) {
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8(body.to_vec()).unwrap())
    }

    fn mount_inception(server: &MockServer) -> (Mock, Mock) {
        let search = Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("query", "Inception"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "id": 27205,
                    "title": "Inception",
                    "release_date": "2010-07-16",
                    "overview": "A thief steals corporate secrets through dreams.",
                    "poster_path": "/inception.jpg"
                }]
            })));

        let details = Mock::given(method("GET"))
            .and(path("/movie/27205"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 27205,
                "title": "Inception",
                "release_date": "2010-07-16",
                "overview": "A thief steals corporate secrets through dreams.",
                "poster_path": "/inception.jpg"
            })));

        (search, details)
    }

    #[tokio::test]
    async fn home_starts_empty() {
        let server = MockServer::start().await;
        let (_dir, _state, app) = test_app(&server.uri()).await;

        let (status, _, body) = get(&app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No movies yet"));
    }

    #[tokio::test]
    async fn add_search_select_edit_delete_flow() {
        let server = MockServer::start().await;
        let (search, details) = mount_inception(&server);
        search.mount(&server).await;
        details.mount(&server).await;
        let (_dir, state, app) = test_app(&server.uri()).await;

        // Search renders the candidate list.
        let (status, _, body) = post_form(&app, "/add", "title=Inception").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Inception"));
        assert!(body.contains("/select?id=27205"));

        // Selecting creates the movie and hands off to the edit form.
        let (status, location, _) = get(&app, "/select?id=27205").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/edit?id=1"));

        let created = state.store.get(1).await.unwrap();
        assert_eq!(created.title, "Inception");
        assert_eq!(created.year, "2010");
        assert_eq!(created.rating, None);
        assert_eq!(created.img_url, "https://image.tmdb.org/t/p/w500/inception.jpg");

        // The edit form is pre-filled from the record.
        let (status, _, body) = get(&app, "/edit?id=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Inception"));

        // Submitting a rating and review lands back on the list.
        let (status, location, _) = post_form(&app, "/edit?id=1", "rating=8.5&review=Great").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/"));

        let (status, _, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("8.5"));
        assert!(body.contains("Great"));
        assert!(body.contains("#1"));

        // Delete clears the list again.
        let (status, location, _) = get(&app, "/delete?id=1").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/"));

        let (_, _, body) = get(&app, "/").await;
        assert!(body.contains("No movies yet"));
    }

    #[tokio::test]
    async fn invalid_rating_rerenders_the_form_with_errors() {
        let server = MockServer::start().await;
        let (_dir, state, app) = test_app(&server.uri()).await;
        state
            .store
            .create(NewMovie {
                title: "Phone Booth".to_string(),
                year: "2002".to_string(),
                description: "A sniper pins a publicist in a booth.".to_string(),
                img_url: String::new(),
            })
            .await
            .unwrap();

        let (status, _, body) = post_form(&app, "/edit?id=1", "rating=eleven&review=").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Rating must be a number"));
        assert!(body.contains("Review is required."));
        assert_eq!(state.store.get(1).await.unwrap().rating, None);
    }

    #[tokio::test]
    async fn editing_an_unknown_movie_is_not_found() {
        let server = MockServer::start().await;
        let (_dir, _state, app) = test_app(&server.uri()).await;

        let (status, _, body) = get(&app, "/edit?id=42").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("movie 42 not found"));
    }

    #[tokio::test]
    async fn deleting_an_unknown_movie_is_not_found() {
        let server = MockServer::start().await;
        let (_dir, _state, app) = test_app(&server.uri()).await;

        let (status, _, body) = get(&app, "/delete?id=42").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("movie 42 not found"));
    }

    #[tokio::test]
    async fn requests_without_an_id_are_rejected() {
        let server = MockServer::start().await;
        let (_dir, _state, app) = test_app(&server.uri()).await;

        let (status, _, _) = get(&app, "/delete").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = get(&app, "/select").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn selecting_a_duplicate_title_is_a_conflict() {
        let server = MockServer::start().await;
        let (_search, details) = mount_inception(&server);
        details.mount(&server).await;
        let (_dir, state, app) = test_app(&server.uri()).await;

        let (status, _, _) = get(&app, "/select?id=27205").await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (status, _, body) = get(&app, "/select?id=27205").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("already in the list"));
        assert_eq!(state.store.list_by_rating().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn catalog_failure_surfaces_as_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let (_dir, _state, app) = test_app(&server.uri()).await;

        let (status, _, body) = post_form(&app, "/add", "title=Inception").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("catalog"));
    }

    #[tokio::test]
    async fn blank_search_rerenders_the_add_form() {
        let server = MockServer::start().await;
        let (_dir, _state, app) = test_app(&server.uri()).await;

        let (status, _, body) = post_form(&app, "/add", "title=++").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Movie title is required."));
    }
}
