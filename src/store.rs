use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, SqlErr};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies, lowest rating first. Unrated movies sort before rated
    /// ones, ties fall back to insertion order.
    pub async fn list_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by_asc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound(id))
    }

    /// Inserts a movie with rating and review unset. Titles are unique.
    pub async fn create(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            title: Set(new.title.clone()),
            year: Set(new.year),
            description: Set(new.description),
            img_url: Set(new.img_url),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(movie) => Ok(movie),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::DuplicateTitle(new.title))
                }
                _ => Err(err.into()),
            },
        }
    }

    pub async fn update_review(&self, id: i32, rating: f64, review: String) -> AppResult<()> {
        let movie = self.get(id).await?;
        let mut movie: movie::ActiveModel = movie.into();
        movie.rating = Set(Some(rating));
        movie.review = Set(Some(review));
        movie.update(&self.db).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }
}
