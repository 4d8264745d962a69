use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};

use minigram_core::domain::{NewUser, Post};
use minigram_core::error::RepoError;
use minigram_core::ports::{LikeRepository, PostRepository, UserRepository};

use crate::database::entity::{like, post};
use crate::database::postgres_repo::{
    PostgresLikeRepository, PostgresPostRepository, PostgresUserRepository,
};

fn post_model(id: i64, author_id: i64) -> post::Model {
    post::Model {
        id,
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        author_id,
        created_at: chrono::Utc::now().into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_to_domain() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(1, 7)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(1).await.unwrap();

    let found = result.unwrap();
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.author_id, 7);
}

#[tokio::test]
async fn create_user_returns_inserted_row() {
    let now = chrono::Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![crate::database::entity::user::Model {
            id: 1,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            username: "ada".to_owned(),
            password_hash: "argon2-hash".to_owned(),
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo
        .create(NewUser {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            username: "ada".to_owned(),
            password_hash: "argon2-hash".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.email, "ada@example.com");
}

#[tokio::test]
async fn duplicate_email_maps_to_constraint_violation() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![DbErr::Custom(
            "duplicate key value violates unique constraint \"users_email_key\"".to_owned(),
        )])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let err = repo
        .create(NewUser {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            username: "ada".to_owned(),
            password_hash: "argon2-hash".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn conditional_delete_reports_affected_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.delete_by_id_and_author(1, 7).await.unwrap());
    assert!(!repo.delete_by_id_and_author(1, 8).await.unwrap());
}

#[tokio::test]
async fn count_by_post_reads_the_aggregate() {
    let row: BTreeMap<&str, Value> = [("num_items", Value::BigInt(Some(3)))]
        .into_iter()
        .collect();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresLikeRepository::new(db);

    assert_eq!(repo.count_by_post(1).await.unwrap(), 3);
}

#[tokio::test]
async fn list_by_post_maps_rows_to_domain() {
    let now = chrono::Utc::now();
    let rows = vec![
        like::Model {
            id: 2,
            user_id: 5,
            post_id: 1,
            created_at: now.into(),
        },
        like::Model {
            id: 1,
            user_id: 4,
            post_id: 1,
            created_at: now.into(),
        },
    ];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![rows])
        .into_connection();

    let repo = PostgresLikeRepository::new(db);

    let likes = repo.list_by_post(1).await.unwrap();

    assert_eq!(likes.len(), 2);
    assert_eq!(likes[0].id, 2);
    assert_eq!(likes[1].user_id, 4);
}
