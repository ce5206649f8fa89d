//! Image repository for database operations.
//!
//! Implements the image metadata table using SeaORM.

use sea_orm::sea_query::{LikeExpr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter,
    QuerySelect, Set,
};

use crate::entities::images;
use picvault_core::image::{
    ImageFilter, ImageRecord, ImageRepository as ImageRepoTrait, RepositoryError,
};

/// Image repository implementation.
#[derive(Debug, Clone)]
pub struct ImageRepository {
    db: DatabaseConnection,
}

impl ImageRepository {
    /// Create a new image repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ImageRepoTrait for ImageRepository {
    async fn get(&self, image_id: &str) -> Result<Option<ImageRecord>, RepositoryError> {
        let model = images::Entity::find_by_id(image_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::new(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn put(&self, record: ImageRecord) -> Result<(), RepositoryError> {
        let active_model = images::ActiveModel {
            image_id: Set(record.image_id),
            title: Set(record.title),
            description: Set(record.description),
            storage_url: Set(record.storage_url),
        };

        images::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(images::Column::ImageId)
                    .update_columns([
                        images::Column::Title,
                        images::Column::Description,
                        images::Column::StorageUrl,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RepositoryError::new(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, image_id: &str) -> Result<bool, RepositoryError> {
        let result = images::Entity::delete_by_id(image_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::new(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn scan(&self, filter: &ImageFilter) -> Result<Vec<ImageRecord>, RepositoryError> {
        let mut query = images::Entity::find();
        if let Some(title) = &filter.title {
            query = query.filter(images::Column::Title.like(contains_pattern(title)));
        }
        if let Some(description) = &filter.description {
            query = query.filter(images::Column::Description.like(contains_pattern(description)));
        }
        if sql_limit_applies(self.db.get_database_backend(), filter) {
            query = query.limit(filter.limit);
        }

        let models = query
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::new(e.to_string()))?;

        Ok(models
            .into_iter()
            .map(to_domain)
            .filter(|record| filter.matches(record))
            .take(filter.limit_usize())
            .collect())
    }
}

/// Whether `LIMIT` can go into the SQL without dropping matches.
///
/// `LIKE` is case-insensitive on SQLite and MySQL, so filtered scans there are
/// re-checked in Rust and limited afterwards.
fn sql_limit_applies(backend: DbBackend, filter: &ImageFilter) -> bool {
    filter.is_unfiltered() || backend == DbBackend::Postgres
}

/// `LIKE` pattern matching `needle` anywhere, with wildcards escaped.
fn contains_pattern(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

/// Convert database model to domain model.
fn to_domain(model: images::Model) -> ImageRecord {
    ImageRecord {
        image_id: model.image_id,
        title: model.title,
        description: model.description,
        storage_url: model.storage_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_limit_applies() {
        let filtered = ImageFilter::default().with_title("Sun");
        let unfiltered = ImageFilter::default();

        assert!(sql_limit_applies(DbBackend::Postgres, &filtered));
        assert!(sql_limit_applies(DbBackend::Sqlite, &unfiltered));
        assert!(!sql_limit_applies(DbBackend::Sqlite, &filtered));
        assert!(!sql_limit_applies(DbBackend::MySql, &filtered));
    }
}
