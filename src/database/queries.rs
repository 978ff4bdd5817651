use std::{marker::PhantomData, sync::Arc};

use sea_orm::{DatabaseConnection, EntityName, EntityTrait, IntoActiveModel, PrimaryKeyTrait};

use super::error::RepositoryError;

/// Thin SeaORM-backed store for a single entity keyed by a string primary key.
pub struct SeaOrmStore<E> {
    db: Arc<DatabaseConnection>,
    _entity: PhantomData<E>,
}

impl<E> SeaOrmStore<E> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<E> SeaOrmStore<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: Send + 'static,
    String: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    fn table() -> String {
        E::default().table_name().to_owned()
    }

    /// Inserts a new row. Fails if the primary key is already taken.
    pub async fn insert_one(&self, entity: E::Model) -> Result<(), RepositoryError> {
        E::insert(entity.into_active_model())
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(table = %Self::table(), "Failed to insert row: {e:?}");
                RepositoryError::InsertError
            })?;
        Ok(())
    }

    pub async fn find_one_by(&self, id: String) -> Result<Option<E::Model>, RepositoryError> {
        E::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(table = %Self::table(), "Failed to fetch row: {e:?}");
                RepositoryError::FetchError
            })
    }

    /// Deletes the row with the given key, returning whether a row was removed.
    pub async fn delete_by(&self, id: String) -> Result<bool, RepositoryError> {
        let result = E::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(table = %Self::table(), "Failed to delete row: {e:?}");
                RepositoryError::DeleteError
            })?;
        Ok(result.rows_affected > 0)
    }
}
