/// ## Getting started
///
/// The [`Model`](crate::Model) trait maps a Rust type to a `MongoDB` collection. A
/// [`MongoRepository`](crate::MongoRepository) bound to that type then exposes the usual
/// CRUD operations through the [`Repository`](crate::Repository) trait.
///
/// A type that derives [`Model`](crate::Model) must:
/// - be a struct with named fields
/// - implement [`Serialize`](serde::Serialize) and [`Deserialize`](serde::Deserialize)
///
/// By default the collection name is the `snake_case` form of the struct name, without a
/// trailing `_model` (`UserProfile` → `user_profile`, `AuditLogModel` → `audit_log`).
/// Override it with `#[model(collection = "custom_name")]`.
///
/// ### Example
///
/// ```ignore
/// use remongo::{Model, MongoRepository, Repository};
/// use remongo::mongodb::bson::oid::ObjectId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize, Model)]
/// #[model(collection = "users")]
/// struct User {
///   #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
///   id: Option<ObjectId>,
///   name: String,
/// }
///
/// let config = remongo::MongoConfig::from_env()?;
/// let db = config.connect().await?;
///
/// let users = MongoRepository::<User>::for_model(&db);
/// ```
///
/// Code that only needs data access should depend on `impl Repository<User>` rather than
/// on [`MongoRepository`](crate::MongoRepository) directly.
///
/// ### Method overview
///
/// | Method          | Returns                | Corresponding `MongoDB` query                 |
/// |-----------------|------------------------|-----------------------------------------------|
/// | `find_one`      | `bool` (found)         | `db.users.findOne(filter)`                    |
/// | `find`          | `()` (fills a `Vec`)   | `db.users.find(filter)` or `aggregate(...)`   |
/// | `insert_one`    | inserted `_id`         | `db.users.insertOne(doc)`                     |
/// | `insert_many`   | inserted `_id`s        | `db.users.insertMany(docs)`                   |
/// | `replace_one`   | modified count         | `db.users.replaceOne(filter, doc)`            |
/// | `update_one`    | modified count         | `db.users.updateOne(filter, update)`          |
/// | `update_many`   | modified count         | `db.users.updateMany(filter, update)`         |
/// | `delete_one`    | deleted count          | `db.users.deleteOne(filter)`                  |
/// | `delete_many`   | deleted count          | `db.users.deleteMany(filter)`                 |
/// | `aggregate`     | raw documents          | `db.users.aggregate(pipeline)`                |
/// | `count`         | matching count         | `db.users.countDocuments(filter)`             |
/// | `exists`        | `count > 0`            | `db.users.countDocuments(filter)`             |
///
/// Every method takes an optional options struct from [`mongodb::options`] as its last
/// argument; pass `None` for the defaults.
pub mod getting_started {}

/// Any type implementing [`Filter`](crate::Filter) is accepted where a filter is expected:
///
/// - a [`Document`](mongodb::bson::Document), used as is
/// - a `BTreeMap` or `HashMap` with string keys
/// - [`by_id`](crate::by_id), matching on `_id`
/// - a struct deriving [`Filter`](crate::Filter)
///
/// Everything but a document goes through [`normalize`](crate::filter::normalize): the value
/// is encoded to BSON and decoded back, so `serde` attributes apply.
///
/// ```ignore
/// #[derive(Serialize, Filter)]
/// struct ByName<'a> {
///   name: &'a str,
///   #[serde(skip_serializing_if = "Option::is_none")]
///   age: Option<i32>,
/// }
///
/// let mut user = User::default();
/// users.find_one(&mut user, ByName { name: "a", age: None }, None).await?;
/// ```
///
/// A filter that cannot be encoded as a document fails with
/// [`Error::Serialization`](crate::Error::Serialization) before anything is sent.
pub mod filters {}

/// ### Output slots
///
/// `find_one` and `find` write into storage owned by the caller. The slot is only written
/// when the operation succeeds; a `find_one` without a match returns `Ok(false)` and leaves
/// the slot as it was.
///
/// ### Find with a pipeline
///
/// Passing stages to `find` runs an aggregation instead of a plain query: the filter
/// becomes a leading `$match`, the stages follow, and the sort, skip, limit and projection
/// of the [`FindOptions`](mongodb::options::FindOptions) are appended. The pipeline output
/// is decoded into the model type, so stages must keep the documents compatible with it.
///
/// ```ignore
/// let mut adults = Vec::new();
/// users
///   .find(
///     &mut adults,
///     doc! { "age": { "$gte": 18 } },
///     Some(vec![doc! { "$set": { "name": { "$toUpper": "$name" } } }]),
///     FindOptions::builder().sort(sort([("name", Order::Asc)])).build(),
///   )
///   .await?;
/// ```
///
/// Use [`find_pipeline`](crate::pipeline::find_pipeline) to inspect the pipeline that
/// would be sent.
pub mod reading {}
