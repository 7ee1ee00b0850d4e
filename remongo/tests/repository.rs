//! Integration tests against a live server.
//!
//! Ignored by default. Run them with
//! `REMONGO_TEST_URI=mongodb://localhost:27017 cargo test -- --ignored`; each test works in a
//! throwaway database that is dropped at the end.

use remongo::{
    Filter, Model, MongoConfig, MongoRepository, Order, Repository, by_id,
    mongodb::{
        Database,
        bson::{doc, oid::ObjectId},
        options::{FindOptions, UpdateOptions},
    },
    sort,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Model)]
#[model(collection = "users")]
struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    age: i32,
}

impl User {
    fn new(name: &str, age: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
        }
    }
}

#[derive(Serialize, Filter)]
struct ByName<'a> {
    name: &'a str,
}

async fn database() -> Database {
    let uri = std::env::var("REMONGO_TEST_URI")
        .expect("REMONGO_TEST_URI must point at a MongoDB server");

    let name = format!("remongo_test_{}", ObjectId::new());

    MongoConfig::new(uri, name).connect().await.unwrap()
}

async fn users() -> MongoRepository<User> {
    MongoRepository::for_model(&database().await)
}

async fn cleanup(users: MongoRepository<User>) {
    users.get_db().drop().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn insert_find_delete_round() {
    let users = users().await;

    users.insert_one(&User::new("a", 30), None).await.unwrap();

    let mut found = User::default();
    assert!(users.find_one(&mut found, ByName { name: "a" }, None).await.unwrap());
    assert_eq!(found.name, "a");
    assert_eq!(found.age, 30);

    let deleted = users.delete_one(ByName { name: "a" }, None).await.unwrap();
    assert_eq!(deleted, 1);

    let mut after = User::new("sentinel", 0);
    assert!(!users.find_one(&mut after, ByName { name: "a" }, None).await.unwrap());
    assert_eq!(after, User::new("sentinel", 0));

    cleanup(users).await;
}

#[tokio::test]
#[ignore]
async fn inserted_id_finds_the_same_document() {
    let users = users().await;

    let user = User::new("b", 41);
    let id = users.insert_one(&user, None).await.unwrap();
    assert!(id.as_object_id().is_some());

    let mut found = User::default();
    assert!(users.find_one(&mut found, by_id(id.clone()), None).await.unwrap());
    assert_eq!(found.id, id.as_object_id());
    assert_eq!(found.name, user.name);
    assert_eq!(found.age, user.age);

    cleanup(users).await;
}

#[tokio::test]
#[ignore]
async fn insert_many_returns_an_id_per_model() {
    let users = users().await;

    let ids = users
        .insert_many(
            &[User::new("c", 1), User::new("d", 2), User::new("e", 3)],
            None,
        )
        .await
        .unwrap();
    assert_eq!(ids.len(), 3);

    let mut found = User::default();
    users.find_one(&mut found, by_id(ids[1].clone()), None).await.unwrap();
    assert_eq!(found.name, "d");

    assert_eq!(users.count(doc! {}).await.unwrap(), 3);

    cleanup(users).await;
}

#[tokio::test]
#[ignore]
async fn writes_on_missing_documents_report_zero() {
    let users = users().await;

    let filter = doc! { "name": "nobody" };
    let update = doc! { "$set": { "age": 1 } };

    assert_eq!(users.update_one(&filter, update.clone(), None).await.unwrap(), 0);
    assert_eq!(users.update_many(&filter, update, None).await.unwrap(), 0);
    assert_eq!(users.delete_one(&filter, None).await.unwrap(), 0);
    assert_eq!(users.delete_many(&filter, None).await.unwrap(), 0);
    assert!(!users.exists(&filter).await.unwrap());

    cleanup(users).await;
}

#[tokio::test]
#[ignore]
async fn update_many_forwards_options() {
    let users = users().await;

    let options = UpdateOptions::builder().upsert(true).build();

    let modified = users
        .update_many(doc! { "name": "f" }, doc! { "$set": { "age": 7 } }, options)
        .await
        .unwrap();

    // Upserts insert rather than modify.
    assert_eq!(modified, 0);
    assert!(users.exists(doc! { "name": "f", "age": 7 }).await.unwrap());

    cleanup(users).await;
}

#[tokio::test]
#[ignore]
async fn replace_and_update_report_modified_counts() {
    let users = users().await;

    users
        .insert_many(&[User::new("g", 10), User::new("h", 10)], None)
        .await
        .unwrap();

    let replaced = users
        .replace_one(ByName { name: "g" }, &User::new("g", 11), None)
        .await
        .unwrap();
    assert_eq!(replaced, 1);

    let modified = users
        .update_many(doc! { "age": 10 }, doc! { "$inc": { "age": 5 } }, None)
        .await
        .unwrap();
    assert_eq!(modified, 1);

    let deleted = users.delete_many(doc! {}, None).await.unwrap();
    assert_eq!(deleted, 2);

    cleanup(users).await;
}

#[tokio::test]
#[ignore]
async fn find_replaces_destination_contents() {
    let users = users().await;

    users
        .insert_many(
            &[User::new("i", 20), User::new("j", 30), User::new("k", 40)],
            None,
        )
        .await
        .unwrap();

    let mut found = vec![User::new("stale", 0)];
    let options = FindOptions::builder()
        .sort(sort([("age", Order::Desc)]))
        .build();

    users
        .find(&mut found, doc! { "age": { "$gte": 30 } }, None, options)
        .await
        .unwrap();

    let names: Vec<_> = found.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, vec!["k", "j"]);

    cleanup(users).await;
}

#[tokio::test]
#[ignore]
async fn find_with_pipeline_returns_pipeline_output() {
    let users = users().await;

    users
        .insert_many(
            &[User::new("l", 20), User::new("m", 30), User::new("n", 40)],
            None,
        )
        .await
        .unwrap();

    let mut found = Vec::new();
    let options = FindOptions::builder()
        .sort(sort([("age", Order::Asc)]))
        .limit(2_i64)
        .build();

    users
        .find(
            &mut found,
            doc! { "age": { "$gt": 20 } },
            Some(vec![doc! { "$set": { "age": { "$multiply": ["$age", 2] } } }]),
            options,
        )
        .await
        .unwrap();

    let ages: Vec<_> = found.iter().map(|user| user.age).collect();
    assert_eq!(ages, vec![60, 80]);

    cleanup(users).await;
}

#[tokio::test]
#[ignore]
async fn aggregate_returns_raw_documents() {
    let users = users().await;

    users
        .insert_many(&[User::new("o", 1), User::new("p", 2)], None)
        .await
        .unwrap();

    let totals = users
        .aggregate(
            vec![doc! { "$group": { "_id": null, "total": { "$sum": "$age" } } }],
            None,
        )
        .await
        .unwrap();

    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].get_i32("total").unwrap(), 3);

    cleanup(users).await;
}
