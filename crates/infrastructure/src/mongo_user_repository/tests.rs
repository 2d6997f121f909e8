use mongodb::Client;
use trailhead_application::UserRepository;
use trailhead_core::{AppError, NonEmptyString};
use trailhead_domain::{EmailAddress, User};
use uuid::Uuid;

use super::{MongoUserRepository, UserDocument};

fn sample_user(name: &str, email: &str) -> User {
    let name = NonEmptyString::new(name).unwrap_or_else(|_| unreachable!());
    let email = EmailAddress::new(email).unwrap_or_else(|_| unreachable!());
    User::new(name, email, Some("Boulder".to_owned()), Some("CO".to_owned()))
}

#[test]
fn document_mapping_round_trips() {
    let user = sample_user("Alice", "alice@x.com");

    let document = UserDocument::from(&user);
    assert_eq!(document.id, user.id().to_string());
    assert_eq!(document.email, "alice@x.com");

    let restored = User::try_from(document);
    assert!(restored.is_ok());
    assert_eq!(restored.ok(), Some(user));
}

#[test]
fn malformed_document_surfaces_internal_error() {
    let document = UserDocument {
        id: "u1".to_owned(),
        name: "Alice".to_owned(),
        email: "alice@x.com".to_owned(),
        city: None,
        state: None,
        friends: Vec::new(),
        created_at: "2024-05-01T10:00:00Z".to_owned(),
    };

    let restored = User::try_from(document);
    assert!(matches!(restored, Err(AppError::Internal(_))));
}

// Live-store tests run only when MONGODB_TEST_URI points at a reachable
// MongoDB instance; each test works in a throwaway database and drops it.
async fn test_repository() -> Option<(mongodb::Database, MongoUserRepository)> {
    let Ok(uri) = std::env::var("MONGODB_TEST_URI") else {
        return None;
    };

    let client = match Client::with_uri_str(uri.as_str()).await {
        Ok(client) => client,
        Err(error) => panic!("failed to connect to MONGODB_TEST_URI in test: {error}"),
    };

    let database = client.database(&format!("trailhead_test_{}", Uuid::new_v4().simple()));
    let repository = MongoUserRepository::new(&database);

    if let Err(error) = repository.ensure_indexes().await {
        panic!("failed to create indexes for mongo user repository tests: {error}");
    }

    Some((database, repository))
}

#[tokio::test]
async fn find_by_email_on_empty_collection_returns_absent() {
    let Some((database, repository)) = test_repository().await else {
        return;
    };

    let found = repository.find_by_email("nobody@x.com").await;
    assert!(found.is_ok());
    assert!(found.unwrap_or_else(|_| unreachable!()).is_none());

    assert!(database.drop().await.is_ok());
}

#[tokio::test]
async fn insert_then_find_by_email_round_trips() {
    let Some((database, repository)) = test_repository().await else {
        return;
    };

    let user = sample_user("Alice", "alice@x.com");
    let inserted = repository.insert(&user).await;
    assert!(inserted.is_ok());

    let found = repository.find_by_email("alice@x.com").await;
    assert!(found.is_ok());
    assert_eq!(found.unwrap_or_else(|_| unreachable!()), Some(user));

    assert!(database.drop().await.is_ok());
}

// MongoDB's default binary collation makes the email filter an exact
// string match; a differently-cased query must miss.
#[tokio::test]
async fn find_by_email_is_case_sensitive() {
    let Some((database, repository)) = test_repository().await else {
        return;
    };

    let inserted = repository.insert(&sample_user("Alice", "a@example.com")).await;
    assert!(inserted.is_ok());

    let found = repository.find_by_email("A@example.com").await;
    assert!(found.is_ok());
    assert!(found.unwrap_or_else(|_| unreachable!()).is_none());

    assert!(database.drop().await.is_ok());
}

#[tokio::test]
async fn duplicate_email_insert_is_a_conflict() {
    let Some((database, repository)) = test_repository().await else {
        return;
    };

    let inserted = repository.insert(&sample_user("Alice", "alice@x.com")).await;
    assert!(inserted.is_ok());

    let duplicate = repository.insert(&sample_user("Alicia", "alice@x.com")).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    assert!(database.drop().await.is_ok());
}

#[tokio::test]
async fn update_and_delete_report_missing_users() {
    let Some((database, repository)) = test_repository().await else {
        return;
    };

    let ghost = sample_user("Ghost", "ghost@x.com");
    let updated = repository.update(&ghost).await;
    assert!(matches!(updated, Err(AppError::NotFound(_))));

    let deleted = repository.delete(ghost.id()).await;
    assert!(matches!(deleted, Err(AppError::NotFound(_))));

    assert!(database.drop().await.is_ok());
}

#[tokio::test]
async fn crud_cycle_persists_follow_state() {
    let Some((database, repository)) = test_repository().await else {
        return;
    };

    let mut alice = sample_user("Alice", "alice@x.com");
    let bob = sample_user("Bob", "bob@x.com");
    assert!(repository.insert(&alice).await.is_ok());
    assert!(repository.insert(&bob).await.is_ok());

    alice.add_friend(bob.name());
    assert!(repository.update(&alice).await.is_ok());

    let reloaded = repository.find_by_id(alice.id()).await;
    assert!(reloaded.is_ok());
    let reloaded = reloaded.unwrap_or_else(|_| unreachable!());
    assert_eq!(
        reloaded.as_ref().map(User::friends),
        Some(["Bob".to_owned()].as_slice())
    );

    assert!(repository.delete(bob.id()).await.is_ok());
    let listed = repository.list_all().await;
    assert!(listed.is_ok());
    assert_eq!(listed.unwrap_or_else(|_| unreachable!()).len(), 1);

    assert!(database.drop().await.is_ok());
}
