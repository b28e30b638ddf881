use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        Self { client, api_key, base_url, image_base_url }
    }

    /// Keyword search against the catalog. Returns the first page of raw
    /// candidates, unfiltered.
    pub async fn search_movie(&self, query: &str) -> AppResult<Vec<SearchMovie>> {
        let resp: SearchResponse = self.get_json("search/movie", &[("query", query)]).await?;
        Ok(resp.results)
    }

    pub async fn movie_details(&self, id: i64) -> AppResult<MovieDetails> {
        self.get_json(&format!("movie/{id}"), &[]).await
    }

    /// Full image URL for a poster path; empty when the catalog has none.
    pub fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path {
            Some(path) => format!(
                "{}/{}",
                self.image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => String::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        tracing::debug!(%url, "catalog request");

        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!("catalog returned HTTP {status} for {path}")));
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            AppError::Upstream(format!("malformed catalog payload for {path}: {err}"))
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchMovie>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
}
