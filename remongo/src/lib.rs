//! Remongo is a generic repository over `MongoDB` collections.
//!
//! ## Example
//!
//! ```ignore
//! // Define a model
//! #[derive(Debug, Default, Serialize, Deserialize, Model)]
//! #[model(collection = "users")]
//! struct User {
//!   #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
//!   id: Option<ObjectId>,
//!   name: String,
//!   email: String,
//! }
//!
//! // Bind a repository to the database
//! let users = MongoRepository::<User>::for_model(&db);
//!
//! // Insert a model
//! let id = users.insert_one(&User { id: None, name: "a".into(), email: "a@example.com".into() }, None).await?;
//!
//! // Load it back into an output slot
//! let mut user = User::default();
//! let found = users.find_one(&mut user, by_id(id), None).await?;
//!
//! // Filter by any map, struct or document
//! let modified = users
//!   .update_many(doc! { "name": "a" }, doc! { "$set": { "email": "new@example.com" } }, None)
//!   .await?;
//!
//! // Delete it
//! let deleted = users.delete_one(doc! { "name": "a" }, None).await?;
//! ```
//!
//! See [`guides`] module to learn more!

#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

use serde::{Serialize, de::DeserializeOwned};

pub use mongodb;
pub use remongo_macros::{Filter, Model};

mod error;
pub mod filter;
pub mod guides;
mod options;
pub mod pipeline;
mod repository;
pub mod settings;

pub use error::{Error, Result, SerializationError};
pub use filter::{Filter, FilterById, by_id};
pub use options::{Order, sort};
pub use repository::{MongoRepository, Repository};
pub use settings::MongoConfig;

/// A document type stored in a named collection.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Name of the collection documents of this type are stored in.
    fn collection(&self) -> &str;
}
