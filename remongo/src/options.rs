use mongodb::bson::{Bson, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl From<Order> for Bson {
    fn from(value: Order) -> Self {
        match value {
            Order::Asc => Bson::Int32(1),
            Order::Desc => Bson::Int32(-1),
        }
    }
}

/// Builds a sort document, keeping the order in which fields are given.
///
/// ```
/// use remongo::{Order, sort};
/// use remongo::mongodb::bson::doc;
///
/// let order = sort([("created_at", Order::Desc), ("name", Order::Asc)]);
/// assert_eq!(order, doc! { "created_at": -1, "name": 1 });
/// ```
pub fn sort<K: Into<String>>(fields: impl IntoIterator<Item = (K, Order)>) -> Document {
    fields
        .into_iter()
        .map(|(field, order)| (field.into(), Bson::from(order)))
        .collect()
}
