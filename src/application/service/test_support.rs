//! Recording port doubles shared by the orchestrator tests.
//!
//! Every mock writes to one [`CallLog`] so tests can assert the exact port
//! sequence a use case produced, including that none happened at all.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::{Adapters, MenfessService, RegistrationMode};
use crate::domain::foundation::{
    DomainError, ErrorCode, Page, PageInfo, PostId, UserId,
};
use crate::domain::post::{NewPost, Post};
use crate::domain::user::{Account, FollowStatus, NewUser, Profile, User, UserKind};
use crate::ports::{
    AuthService, ErrorLog, Notifier, PostQuery, PostRepository, UserRepository,
};

// ════════════════════════════════════════════════════════════════════════════
// Shared plumbing
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }
}

/// Methods scripted to fail with an infrastructure error.
#[derive(Default)]
struct Failures(Mutex<HashSet<&'static str>>);

impl Failures {
    fn set(&self, method: &'static str) {
        self.0.lock().unwrap().insert(method);
    }

    fn check(&self, method: &'static str, code: ErrorCode) -> Result<(), DomainError> {
        if self.0.lock().unwrap().contains(method) {
            return Err(DomainError::new(code, format!("simulated {} failure", method)));
        }
        Ok(())
    }
}

pub fn uid(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn pid(id: &str) -> PostId {
    PostId::new(id).unwrap()
}

pub fn user_with_password(id: &str, email: &str, hash: &str) -> User {
    User::new(
        uid(id),
        Some(Account::new(email, hash)),
        Profile::new(format!("name-{}", id), "avatar.png", ""),
        UserKind::Regular,
    )
}

pub fn anonymous_user(id: &str) -> User {
    User::new(uid(id), None, Profile::new(format!("name-{}", id), "", ""), UserKind::Regular)
}

pub fn post_owned_by(id: &str, owner: &User, is_liked: bool) -> Post {
    Post {
        id: pid(id),
        body: format!("body of {}", id),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        parent_id: None,
        author: owner.summary(),
        user: owner.summary(),
        likes_count: u64::from(is_liked),
        replies_count: 0,
        is_liked,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// User repository
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockUserRepository {
    calls: CallLog,
    users: Mutex<HashMap<UserId, User>>,
    menfess: Mutex<Vec<User>>,
    followed: Mutex<Vec<UserId>>,
    inserted: Mutex<Vec<NewUser>>,
    saved: Mutex<Vec<User>>,
    follow_updates: Mutex<Vec<(UserId, UserId, FollowStatus)>>,
    failures: Failures,
}

impl MockUserRepository {
    pub fn with_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }

    pub fn with_menfess(&self, user: User) {
        self.menfess.lock().unwrap().push(user);
    }

    pub fn with_followed(&self, ids: &[&str]) {
        *self.followed.lock().unwrap() = ids.iter().map(|id| uid(id)).collect();
    }

    pub fn fail(&self, method: &'static str) {
        self.failures.set(method);
    }

    pub fn inserted(&self) -> Vec<NewUser> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<User> {
        self.saved.lock().unwrap().clone()
    }

    pub fn follow_updates(&self) -> Vec<(UserId, UserId, FollowStatus)> {
        self.follow_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<User, DomainError> {
        self.calls.push("users.find_by_id");
        self.failures.check("find_by_id", ErrorCode::DatabaseError)?;
        self.users
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.calls.push("users.find_by_email");
        self.failures.check("find_by_email", ErrorCode::DatabaseError)?;
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.account.as_ref().is_some_and(|a| a.email == email))
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(email))
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, DomainError> {
        self.calls.push("users.insert");
        self.failures.check("insert", ErrorCode::DatabaseError)?;
        self.inserted.lock().unwrap().push(user);
        Ok(uid("new-user"))
    }

    async fn save_profile(&self, user: &User) -> Result<(), DomainError> {
        self.calls.push("users.save_profile");
        self.failures.check("save_profile", ErrorCode::DatabaseError)?;
        self.saved.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_menfess_list(&self) -> Result<Vec<User>, DomainError> {
        self.calls.push("users.find_menfess_list");
        self.failures.check("find_menfess_list", ErrorCode::DatabaseError)?;
        Ok(self.menfess.lock().unwrap().clone())
    }

    async fn get_followed_ids(&self, _user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        self.calls.push("users.get_followed_ids");
        self.failures.check("get_followed_ids", ErrorCode::DatabaseError)?;
        Ok(self.followed.lock().unwrap().clone())
    }

    async fn update_follow_status(
        &self,
        follower: &UserId,
        followed: &UserId,
        status: FollowStatus,
    ) -> Result<(), DomainError> {
        self.calls.push("users.update_follow_status");
        self.failures.check("update_follow_status", ErrorCode::DatabaseError)?;
        self.follow_updates
            .lock()
            .unwrap()
            .push((follower.clone(), followed.clone(), status));
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Post repository
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockPostRepository {
    calls: CallLog,
    posts: Mutex<HashMap<PostId, Post>>,
    inserted: Mutex<Vec<NewPost>>,
    queries: Mutex<Vec<PostQuery>>,
    failures: Failures,
}

impl MockPostRepository {
    pub fn with_post(&self, post: Post) {
        self.posts.lock().unwrap().insert(post.id.clone(), post);
    }

    pub fn fail(&self, method: &'static str) {
        self.failures.set(method);
    }

    pub fn inserted(&self) -> Vec<NewPost> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<PostQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostRepository for MockPostRepository {
    async fn find_by_id(&self, id: &PostId, _viewer: Option<&UserId>) -> Result<Post, DomainError> {
        self.calls.push("posts.find_by_id");
        self.failures.check("find_by_id", ErrorCode::DatabaseError)?;
        self.posts
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    async fn find_list(&self, query: &PostQuery) -> Result<Page<Post>, DomainError> {
        self.calls.push("posts.find_list");
        self.failures.check("find_list", ErrorCode::DatabaseError)?;
        self.queries.lock().unwrap().push(query.clone());

        let mut items: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        items.truncate(query.page.limit());
        let page_info = PageInfo::from_page(
            items.len(),
            query.page.limit(),
            items.last().map(|p| p.id.as_str()),
        );
        Ok(Page { items, page_info })
    }

    async fn insert(&self, post: NewPost) -> Result<PostId, DomainError> {
        self.calls.push("posts.insert");
        self.failures.check("insert", ErrorCode::DatabaseError)?;
        self.inserted.lock().unwrap().push(post);
        Ok(pid("new-post"))
    }

    async fn like(&self, _post_id: &PostId, _user_id: &UserId) -> Result<(), DomainError> {
        self.calls.push("posts.like");
        self.failures.check("like", ErrorCode::DatabaseError)
    }

    async fn unlike(&self, _post_id: &PostId, _user_id: &UserId) -> Result<(), DomainError> {
        self.calls.push("posts.unlike");
        self.failures.check("unlike", ErrorCode::DatabaseError)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Auth
// ════════════════════════════════════════════════════════════════════════════

pub struct MockAuthService {
    calls: CallLog,
    password_matches: Mutex<bool>,
    failures: Failures,
}

impl MockAuthService {
    fn new(calls: CallLog) -> Self {
        Self {
            calls,
            password_matches: Mutex::new(true),
            failures: Failures::default(),
        }
    }

    pub fn reject_passwords(&self) {
        *self.password_matches.lock().unwrap() = false;
    }

    pub fn fail(&self, method: &'static str) {
        self.failures.set(method);
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn generate_token(&self, user: &User) -> Result<String, DomainError> {
        self.calls.push("auth.generate_token");
        self.failures.check("generate_token", ErrorCode::AuthError)?;
        Ok(format!("token-for-{}", user.id))
    }

    async fn verify_password(&self, _hash: &str, _password: &str) -> Result<bool, DomainError> {
        self.calls.push("auth.verify_password");
        self.failures.check("verify_password", ErrorCode::AuthError)?;
        Ok(*self.password_matches.lock().unwrap())
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        self.calls.push("auth.hash_password");
        self.failures.check("hash_password", ErrorCode::AuthError)?;
        Ok(format!("hashed:{}", password))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Notifier
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Like { liker: UserId, post: PostId },
    Comment { comment: PostId, parent: PostId, parent_owner: UserId },
    Broadcast { post: PostId },
}

#[derive(Default)]
pub struct MockNotifier {
    calls: CallLog,
    tokens: Mutex<Vec<(UserId, String)>>,
    sent: Mutex<Vec<Sent>>,
    posts: Mutex<Vec<Post>>,
    unknown_on_remove: Mutex<bool>,
    failures: Failures,
}

impl MockNotifier {
    pub fn tokens(&self) -> Vec<(UserId, String)> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Posts handed to comment and broadcast notifications, in order.
    pub fn notified_posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    /// `remove_push_token` reports the user as unknown.
    pub fn without_token_records(&self) {
        *self.unknown_on_remove.lock().unwrap() = true;
    }

    pub fn fail(&self, method: &'static str) {
        self.failures.set(method);
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn add_push_token(&self, user_id: &UserId, token: &str) -> Result<(), DomainError> {
        self.calls.push("notifier.add_push_token");
        self.failures.check("add_push_token", ErrorCode::NotificationError)?;
        self.tokens.lock().unwrap().push((user_id.clone(), token.to_string()));
        Ok(())
    }

    async fn remove_push_token(&self, user_id: &UserId, token: &str) -> Result<(), DomainError> {
        self.calls.push("notifier.remove_push_token");
        self.failures.check("remove_push_token", ErrorCode::NotificationError)?;
        if *self.unknown_on_remove.lock().unwrap() {
            return Err(DomainError::user_not_found(user_id));
        }
        self.tokens
            .lock()
            .unwrap()
            .retain(|(u, t)| !(u == user_id && t == token));
        Ok(())
    }

    async fn send_like_notification(&self, liker: &User, post: &Post) -> Result<(), DomainError> {
        self.calls.push("notifier.send_like_notification");
        self.failures.check("send_like_notification", ErrorCode::NotificationError)?;
        self.sent.lock().unwrap().push(Sent::Like {
            liker: liker.id.clone(),
            post: post.id.clone(),
        });
        Ok(())
    }

    async fn send_comment_notification(
        &self,
        comment: &Post,
        parent: &Post,
    ) -> Result<(), DomainError> {
        self.calls.push("notifier.send_comment_notification");
        self.failures.check("send_comment_notification", ErrorCode::NotificationError)?;
        self.sent.lock().unwrap().push(Sent::Comment {
            comment: comment.id.clone(),
            parent: parent.id.clone(),
            parent_owner: parent.owner_id().clone(),
        });
        self.posts.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn broadcast_new_post_notification(&self, post: &Post) -> Result<(), DomainError> {
        self.calls.push("notifier.broadcast_new_post_notification");
        self.failures
            .check("broadcast_new_post_notification", ErrorCode::NotificationError)?;
        self.sent.lock().unwrap().push(Sent::Broadcast {
            post: post.id.clone(),
        });
        self.posts.lock().unwrap().push(post.clone());
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error log
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub code: ErrorCode,
    pub message: String,
    pub payload: String,
    pub context: String,
}

#[derive(Default)]
pub struct RecordingErrorLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingErrorLog {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl ErrorLog for RecordingErrorLog {
    fn record(&self, error: &DomainError, payload: &dyn fmt::Debug, context: &str) {
        self.entries.lock().unwrap().push(LogEntry {
            code: error.code,
            message: error.message.clone(),
            payload: format!("{:?}", payload),
            context: context.to_string(),
        });
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Environment
// ════════════════════════════════════════════════════════════════════════════

pub struct TestEnv {
    pub calls: CallLog,
    pub users: Arc<MockUserRepository>,
    pub posts: Arc<MockPostRepository>,
    pub auth: Arc<MockAuthService>,
    pub notifier: Arc<MockNotifier>,
    pub log: Arc<RecordingErrorLog>,
}

impl TestEnv {
    pub fn new() -> Self {
        let calls = CallLog::default();
        Self {
            users: Arc::new(MockUserRepository {
                calls: calls.clone(),
                ..Default::default()
            }),
            posts: Arc::new(MockPostRepository {
                calls: calls.clone(),
                ..Default::default()
            }),
            auth: Arc::new(MockAuthService::new(calls.clone())),
            notifier: Arc::new(MockNotifier {
                calls: calls.clone(),
                ..Default::default()
            }),
            log: Arc::new(RecordingErrorLog::default()),
            calls,
        }
    }

    pub fn service(&self) -> MenfessService {
        self.service_with_mode(RegistrationMode::Anonymous)
    }

    pub fn service_with_mode(&self, mode: RegistrationMode) -> MenfessService {
        MenfessService::new(
            Adapters {
                users: self.users.clone(),
                posts: self.posts.clone(),
                auth: self.auth.clone(),
                notifier: self.notifier.clone(),
                log: self.log.clone(),
            },
            mode,
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.calls()
    }
}
