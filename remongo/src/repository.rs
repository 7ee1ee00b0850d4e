use crate::{
    Filter, Model, Result,
    pipeline::{aggregate_options, find_pipeline},
};
use futures_util::{FutureExt, TryStreamExt, future::BoxFuture};
use mongodb::{
    Collection, Database,
    bson::{self, Bson, Document},
    options::{
        AggregateOptions, DeleteOptions, FindOneOptions, FindOptions, InsertManyOptions,
        InsertOneOptions, ReplaceOptions, UpdateModifications, UpdateOptions,
    },
};
use std::fmt;
use tracing::debug;

/// Data access for documents of type `M`.
///
/// Filters are normalized with [`Filter::to_document`] before they reach the database, so a
/// [`Document`](mongodb::bson::Document), a map or a struct deriving [`Filter`] can be
/// passed interchangeably.
pub trait Repository<M: Model>: Send + Sync {
    /// The database handle the repository was created with.
    fn get_db(&self) -> &Database;

    /// Writes the first document matching `filter` into `model`.
    ///
    /// Returns `false` and leaves `model` untouched when nothing matches.
    fn find_one<'a>(
        &'a self,
        model: &'a mut M,
        filter: impl Filter + 'a,
        options: impl Into<Option<FindOneOptions>>,
    ) -> BoxFuture<'a, Result<bool>>;

    /// Replaces the contents of `models` with the documents matching `filter`.
    ///
    /// When `pipeline` is given, the matched documents are run through its stages and the
    /// pipeline output is what ends up in `models`. Sort, skip, limit and projection from
    /// `options` are applied after the pipeline. On error `models` is left untouched.
    fn find<'a>(
        &'a self,
        models: &'a mut Vec<M>,
        filter: impl Filter + 'a,
        pipeline: Option<Vec<Document>>,
        options: impl Into<Option<FindOptions>>,
    ) -> BoxFuture<'a, Result<()>>;

    /// Inserts `model` and returns the `_id` it was stored under.
    fn insert_one<'a>(
        &'a self,
        model: &'a M,
        options: impl Into<Option<InsertOneOptions>>,
    ) -> BoxFuture<'a, Result<Bson>>;

    /// Inserts `models` and returns their `_id`s in input order.
    fn insert_many<'a>(
        &'a self,
        models: &'a [M],
        options: impl Into<Option<InsertManyOptions>>,
    ) -> BoxFuture<'a, Result<Vec<Bson>>>;

    /// Returns the number of modified documents (0 or 1).
    fn replace_one<'a>(
        &'a self,
        filter: impl Filter + 'a,
        model: &'a M,
        options: impl Into<Option<ReplaceOptions>>,
    ) -> BoxFuture<'a, Result<u64>>;

    /// Returns the number of modified documents (0 or 1).
    fn update_one<'a>(
        &'a self,
        filter: impl Filter + 'a,
        update: impl Into<UpdateModifications>,
        options: impl Into<Option<UpdateOptions>>,
    ) -> BoxFuture<'a, Result<u64>>;

    /// Returns the number of modified documents.
    fn update_many<'a>(
        &'a self,
        filter: impl Filter + 'a,
        update: impl Into<UpdateModifications>,
        options: impl Into<Option<UpdateOptions>>,
    ) -> BoxFuture<'a, Result<u64>>;

    /// Returns the number of deleted documents (0 or 1).
    fn delete_one<'a>(
        &'a self,
        filter: impl Filter + 'a,
        options: impl Into<Option<DeleteOptions>>,
    ) -> BoxFuture<'a, Result<u64>>;

    /// Returns the number of deleted documents.
    fn delete_many<'a>(
        &'a self,
        filter: impl Filter + 'a,
        options: impl Into<Option<DeleteOptions>>,
    ) -> BoxFuture<'a, Result<u64>>;

    fn aggregate(
        &self,
        pipeline: Vec<Document>,
        options: impl Into<Option<AggregateOptions>>,
    ) -> BoxFuture<'_, Result<Vec<Document>>>;

    fn count<'a>(&'a self, filter: impl Filter + 'a) -> BoxFuture<'a, Result<u64>>;

    fn exists<'a>(&'a self, filter: impl Filter + 'a) -> BoxFuture<'a, Result<bool>> {
        let count = self.count(filter);

        async move { Ok(count.await? > 0) }.boxed()
    }
}

/// [`Repository`] backed by a `MongoDB` collection.
///
/// The collection is resolved from [`Model::collection`] once, when the repository is
/// created. Cloning is cheap; clones share the underlying client.
pub struct MongoRepository<M: Model> {
    database: Database,
    collection: Collection<M>,
}

impl<M: Model> MongoRepository<M> {
    /// Creates a repository for the collection `model` lives in.
    ///
    /// `model` is only asked for its collection name.
    pub fn new(database: &Database, model: &M) -> Self {
        let collection = database.collection(model.collection());

        debug!(
            database = database.name(),
            collection = collection.name(),
            "created repository"
        );

        Self {
            database: database.clone(),
            collection,
        }
    }

    pub fn for_model(database: &Database) -> Self
    where
        M: Default,
    {
        Self::new(database, &M::default())
    }

    pub fn collection(&self) -> &Collection<M> {
        &self.collection
    }

    fn name(&self) -> &str {
        self.collection.name()
    }
}

impl<M: Model> Clone for MongoRepository<M> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            collection: self.collection.clone(),
        }
    }
}

impl<M: Model> fmt::Debug for MongoRepository<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoRepository")
            .field("database", &self.database.name())
            .field("collection", &self.collection.name())
            .finish()
    }
}

impl<M: Model> Repository<M> for MongoRepository<M> {
    fn get_db(&self) -> &Database {
        &self.database
    }

    fn find_one<'a>(
        &'a self,
        model: &'a mut M,
        filter: impl Filter + 'a,
        options: impl Into<Option<FindOneOptions>>,
    ) -> BoxFuture<'a, Result<bool>> {
        let options = options.into();

        async move {
            let filter = filter.to_document()?;

            let found = self
                .collection
                .find_one(filter)
                .with_options(options)
                .await?;

            debug!(collection = self.name(), found = found.is_some(), "find_one");

            match found {
                Some(found) => {
                    *model = found;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        .boxed()
    }

    fn find<'a>(
        &'a self,
        models: &'a mut Vec<M>,
        filter: impl Filter + 'a,
        pipeline: Option<Vec<Document>>,
        options: impl Into<Option<FindOptions>>,
    ) -> BoxFuture<'a, Result<()>> {
        let options = options.into();

        async move {
            let filter = filter.to_document()?;

            let found: Vec<M> = match pipeline {
                Some(stages) => {
                    let pipeline = find_pipeline(filter, stages, options.as_ref());

                    let documents: Vec<Document> = self
                        .collection
                        .aggregate(pipeline)
                        .with_options(aggregate_options(options.as_ref()))
                        .await?
                        .try_collect()
                        .await?;

                    documents
                        .into_iter()
                        .map(bson::from_document)
                        .collect::<std::result::Result<_, _>>()?
                }
                None => {
                    self.collection
                        .find(filter)
                        .with_options(options)
                        .await?
                        .try_collect()
                        .await?
                }
            };

            debug!(collection = self.name(), count = found.len(), "find");

            *models = found;

            Ok(())
        }
        .boxed()
    }

    fn insert_one<'a>(
        &'a self,
        model: &'a M,
        options: impl Into<Option<InsertOneOptions>>,
    ) -> BoxFuture<'a, Result<Bson>> {
        let options = options.into();

        async move {
            let result = self
                .collection
                .insert_one(model)
                .with_options(options)
                .await?;

            debug!(collection = self.name(), id = %result.inserted_id, "insert_one");

            Ok(result.inserted_id)
        }
        .boxed()
    }

    fn insert_many<'a>(
        &'a self,
        models: &'a [M],
        options: impl Into<Option<InsertManyOptions>>,
    ) -> BoxFuture<'a, Result<Vec<Bson>>> {
        let options = options.into();

        async move {
            // The driver rejects empty batches.
            if models.is_empty() {
                return Ok(Vec::new());
            }

            let result = self
                .collection
                .insert_many(models)
                .with_options(options)
                .await?;

            let mut ids: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
            ids.sort_unstable_by_key(|(index, _)| *index);

            debug!(collection = self.name(), count = ids.len(), "insert_many");

            Ok(ids.into_iter().map(|(_, id)| id).collect())
        }
        .boxed()
    }

    fn replace_one<'a>(
        &'a self,
        filter: impl Filter + 'a,
        model: &'a M,
        options: impl Into<Option<ReplaceOptions>>,
    ) -> BoxFuture<'a, Result<u64>> {
        let options = options.into();

        async move {
            let filter = filter.to_document()?;

            let result = self
                .collection
                .replace_one(filter, model)
                .with_options(options)
                .await?;

            debug!(
                collection = self.name(),
                matched = result.matched_count,
                modified = result.modified_count,
                "replace_one"
            );

            Ok(result.modified_count)
        }
        .boxed()
    }

    fn update_one<'a>(
        &'a self,
        filter: impl Filter + 'a,
        update: impl Into<UpdateModifications>,
        options: impl Into<Option<UpdateOptions>>,
    ) -> BoxFuture<'a, Result<u64>> {
        let update = update.into();
        let options = options.into();

        async move {
            let filter = filter.to_document()?;

            let result = self
                .collection
                .update_one(filter, update)
                .with_options(options)
                .await?;

            debug!(
                collection = self.name(),
                matched = result.matched_count,
                modified = result.modified_count,
                "update_one"
            );

            Ok(result.modified_count)
        }
        .boxed()
    }

    fn update_many<'a>(
        &'a self,
        filter: impl Filter + 'a,
        update: impl Into<UpdateModifications>,
        options: impl Into<Option<UpdateOptions>>,
    ) -> BoxFuture<'a, Result<u64>> {
        let update = update.into();
        let options = options.into();

        async move {
            let filter = filter.to_document()?;

            let result = self
                .collection
                .update_many(filter, update)
                .with_options(options)
                .await?;

            debug!(
                collection = self.name(),
                matched = result.matched_count,
                modified = result.modified_count,
                "update_many"
            );

            Ok(result.modified_count)
        }
        .boxed()
    }

    fn delete_one<'a>(
        &'a self,
        filter: impl Filter + 'a,
        options: impl Into<Option<DeleteOptions>>,
    ) -> BoxFuture<'a, Result<u64>> {
        let options = options.into();

        async move {
            let filter = filter.to_document()?;

            let result = self
                .collection
                .delete_one(filter)
                .with_options(options)
                .await?;

            debug!(collection = self.name(), deleted = result.deleted_count, "delete_one");

            Ok(result.deleted_count)
        }
        .boxed()
    }

    fn delete_many<'a>(
        &'a self,
        filter: impl Filter + 'a,
        options: impl Into<Option<DeleteOptions>>,
    ) -> BoxFuture<'a, Result<u64>> {
        let options = options.into();

        async move {
            let filter = filter.to_document()?;

            let result = self
                .collection
                .delete_many(filter)
                .with_options(options)
                .await?;

            debug!(collection = self.name(), deleted = result.deleted_count, "delete_many");

            Ok(result.deleted_count)
        }
        .boxed()
    }

    fn aggregate(
        &self,
        pipeline: Vec<Document>,
        options: impl Into<Option<AggregateOptions>>,
    ) -> BoxFuture<'_, Result<Vec<Document>>> {
        let options = options.into();

        async move {
            let documents: Vec<Document> = self
                .collection
                .aggregate(pipeline)
                .with_options(options)
                .await?
                .try_collect()
                .await?;

            debug!(collection = self.name(), count = documents.len(), "aggregate");

            Ok(documents)
        }
        .boxed()
    }

    fn count<'a>(&'a self, filter: impl Filter + 'a) -> BoxFuture<'a, Result<u64>> {
        async move {
            let filter = filter.to_document()?;

            let count = self.collection.count_documents(filter).await?;

            debug!(collection = self.name(), count, "count");

            Ok(count)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize, crate::Model)]
    struct AuditLogModel {
        action: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize, crate::Model)]
    #[model(collection = "people")]
    struct Person {
        name: String,
    }

    // The driver connects lazily, so no server is needed to build a repository.
    async fn database() -> Database {
        Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap()
            .database("remongo_unit")
    }

    #[tokio::test]
    async fn collection_comes_from_model() {
        let db = database().await;

        let repository = MongoRepository::new(&db, &Person::default());

        assert_eq!(repository.collection().name(), "people");
        assert_eq!(repository.get_db().name(), "remongo_unit");
    }

    #[tokio::test]
    async fn for_model_uses_default_instance() {
        let db = database().await;

        let repository = MongoRepository::<AuditLogModel>::for_model(&db);

        assert_eq!(repository.collection().name(), "audit_log");
    }

    #[tokio::test]
    async fn clones_target_the_same_collection() {
        let db = database().await;

        let repository = MongoRepository::<Person>::for_model(&db);
        let clone = repository.clone();

        assert_eq!(clone.collection().name(), repository.collection().name());
        assert_eq!(
            format!("{clone:?}"),
            r#"MongoRepository { database: "remongo_unit", collection: "people" }"#
        );
    }

    #[tokio::test]
    async fn empty_insert_many_skips_the_server() {
        let db = database().await;

        let repository = MongoRepository::<Person>::for_model(&db);

        let ids = repository.insert_many(&[], None).await.unwrap();

        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn invalid_filter_fails_before_the_server() {
        let db = database().await;
        let repository = MongoRepository::<Person>::for_model(&db);

        let filter = std::collections::BTreeMap::from([("count", u64::MAX)]);
        let mut person = Person {
            name: "unchanged".into(),
        };

        let err = repository
            .find_one(&mut person, filter, None)
            .await
            .unwrap_err();

        assert!(matches!(err, crate::Error::Serialization(_)), "{err:?}");
        assert_eq!(person.name, "unchanged");
    }
}
