use serde::Deserialize;

use crate::entities::movie;

pub struct RankedMovie {
    pub rank: usize,
    pub movie: movie::Model,
}

/// Assigns ranks to a list already sorted ascending by rating: the
/// highest-rated movie gets rank 1, the lowest gets rank `len`. Ranks are
/// derived at listing time and never persisted.
pub fn rank_by_rating(movies: Vec<movie::Model>) -> Vec<RankedMovie> {
    let count = movies.len();
    movies
        .into_iter()
        .enumerate()
        .map(|(position, movie)| RankedMovie { rank: count - position, movie })
        .collect()
}

/// Fields for a freshly selected movie. Rating and review stay unset until
/// the first edit.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: String,
    pub description: String,
    pub img_url: String,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub rating: String,
    pub review: String,
}

#[derive(Debug)]
pub struct ReviewUpdate {
    pub rating: f64,
    pub review: String,
}

impl EditForm {
    pub fn validate(&self) -> Result<ReviewUpdate, Vec<String>> {
        let mut errors = Vec::new();

        let rating = match self.rating.trim().parse::<f64>() {
            Ok(value) if (0.0..=10.0).contains(&value) => Some(value),
            Ok(_) => {
                errors.push("Rating must be between 0 and 10.".to_string());
                None
            }
            Err(_) => {
                errors.push("Rating must be a number, e.g. 7.5.".to_string());
                None
            }
        };

        let review = self.review.trim();
        if review.is_empty() {
            errors.push("Review is required.".to_string());
        }

        match rating {
            Some(rating) if errors.is_empty() => {
                Ok(ReviewUpdate { rating, review: review.to_string() })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub title: String,
}

/// Year shown for a movie: the release-date prefix before the first dash,
/// so "2010-07-16" becomes "2010".
pub fn release_year(release_date: &str) -> String {
    release_date.split('-').next().unwrap_or_default().to_string()
}
