//! In-memory port implementations backing the service unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Activity, Like, NewActivity, NewPost, NewUser, Post, User};
use crate::error::RepoError;
use crate::ports::{
    ActivityRepository, AuthError, JokeError, JokeProvider, LikeRepository, PasswordService,
    PostRepository, TokenClaims, TokenService, UserRepository,
};

fn injected_failure() -> RepoError {
    RepoError::Query("injected failure".to_string())
}

pub struct MemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl MemoryUsers {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        let created = User {
            id: rows.len() as i64 + 1,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }
}

#[derive(Default)]
struct PostStore {
    rows: Vec<Post>,
    next_id: i64,
}

pub struct MemoryPosts {
    store: Mutex<PostStore>,
}

impl MemoryPosts {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(PostStore::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let created = Post {
            id: store.next_id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_at: Utc::now(),
        };
        store.rows.push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.rows.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn delete_by_id_and_author(&self, id: i64, author_id: i64) -> Result<bool, RepoError> {
        let mut store = self.store.lock().unwrap();
        let before = store.rows.len();
        store
            .rows
            .retain(|p| !(p.id == id && p.author_id == author_id));
        Ok(store.rows.len() < before)
    }
}

#[derive(Default)]
struct LikeStore {
    rows: Vec<Like>,
    next_id: i64,
}

pub struct MemoryLikes {
    store: Mutex<LikeStore>,
    fail_reads: AtomicBool,
}

impl MemoryLikes {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(LikeStore::default()),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().rows.len()
    }

    /// Make `list_by_post` and `count_by_post` fail from now on.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LikeRepository for MemoryLikes {
    async fn create(&self, user_id: i64, post_id: i64) -> Result<Like, RepoError> {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let created = Like {
            id: store.next_id,
            user_id,
            post_id,
            created_at: Utc::now(),
        };
        store.rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Like>, RepoError> {
        let store = self.store.lock().unwrap();
        Ok(store.rows.iter().find(|l| l.id == id).cloned())
    }

    async fn delete_by_id_and_user(&self, id: i64, user_id: i64) -> Result<bool, RepoError> {
        let mut store = self.store.lock().unwrap();
        let before = store.rows.len();
        store.rows.retain(|l| !(l.id == id && l.user_id == user_id));
        Ok(store.rows.len() < before)
    }

    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Like>, RepoError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        let store = self.store.lock().unwrap();
        Ok(store
            .rows
            .iter()
            .filter(|l| l.post_id == post_id)
            .rev()
            .cloned()
            .collect())
    }

    async fn count_by_post(&self, post_id: i64) -> Result<i64, RepoError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        let store = self.store.lock().unwrap();
        Ok(store.rows.iter().filter(|l| l.post_id == post_id).count() as i64)
    }
}

pub struct MemoryActivities {
    rows: Mutex<Vec<Activity>>,
    fail_writes: AtomicBool,
}

impl MemoryActivities {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn all(&self) -> Vec<Activity> {
        self.rows.lock().unwrap().clone()
    }

    /// Make `record` fail from now on.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ActivityRepository for MemoryActivities {
    async fn record(&self, activity: NewActivity) -> Result<(), RepoError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        let mut rows = self.rows.lock().unwrap();
        let entry = Activity {
            id: rows.len() as i64 + 1,
            user_id: activity.user_id,
            action: activity.action.as_str().to_string(),
            description: activity.description,
            created_at: Utc::now(),
        };
        rows.push(entry);
        Ok(())
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Activity>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|a| a.user_id == user_id)
            .rev()
            .cloned()
            .collect())
    }
}

pub struct StaticJokes {
    joke: Option<String>,
}

impl StaticJokes {
    pub fn telling(joke: &str) -> Self {
        Self {
            joke: Some(joke.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { joke: None }
    }
}

#[async_trait]
impl JokeProvider for StaticJokes {
    async fn fetch_joke(&self) -> Result<String, JokeError> {
        self.joke.clone().ok_or(JokeError::Empty)
    }
}

pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        Ok(format!("token-for-{user_id}"))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let user_id = token
            .strip_prefix("token-for-")
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| AuthError::InvalidToken("unexpected fake token".to_string()))?;
        Ok(TokenClaims { user_id, exp: 0 })
    }
}

pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed::{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("hashed::{password}"))
    }
}
