//! Normalization of query filters into [`Document`]s.
//!
//! The driver only accepts filters as documents, while callers tend to have maps, small
//! structs or ready-made documents at hand. Everything implementing [`Filter`] can be handed
//! to a [`Repository`](crate::Repository) interchangeably.

use crate::{Result, error::SerializationError};
use mongodb::bson::{self, Bson, Document, doc};
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// Encodes `value` to BSON and decodes it back as an ordered [`Document`].
///
/// Field order of structs and ordered maps is preserved. Values that do not encode to a
/// document at the top level (strings, numbers, sequences) are rejected. Both halves of the
/// round trip fail with [`Error::Serialization`](crate::Error::Serialization).
pub fn normalize<T: Serialize>(value: &T) -> Result<Document> {
    let bytes = bson::to_vec(value).map_err(SerializationError::Encode)?;
    let document: Document = bson::from_slice(&bytes).map_err(SerializationError::Decode)?;

    Ok(document)
}

pub trait Filter: Send + Sync {
    fn to_document(&self) -> Result<Document>;
}

impl Filter for Document {
    fn to_document(&self) -> Result<Document> {
        Ok(self.clone())
    }
}

impl<T: Filter + ?Sized> Filter for &T {
    fn to_document(&self) -> Result<Document> {
        (**self).to_document()
    }
}

impl<K, V> Filter for BTreeMap<K, V>
where
    K: Serialize + Send + Sync,
    V: Serialize + Send + Sync,
{
    fn to_document(&self) -> Result<Document> {
        normalize(self)
    }
}

impl<K, V, S> Filter for HashMap<K, V, S>
where
    K: Serialize + Send + Sync,
    V: Serialize + Send + Sync,
    S: BuildHasher + Send + Sync,
{
    fn to_document(&self) -> Result<Document> {
        normalize(self)
    }
}

/// Matches the document whose `_id` equals the wrapped value.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterById(Bson);

pub fn by_id(id: impl Into<Bson>) -> FilterById {
    FilterById(id.into())
}

impl Filter for FilterById {
    fn to_document(&self) -> Result<Document> {
        Ok(doc! { "_id": self.0.clone() })
    }
}
