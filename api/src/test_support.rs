//! In-memory implementations of every repository port plus a small seeded
//! marketplace shared by the unit and router tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::dto::ads::{AdFields, AdFilter};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::dto::proposals::NewProposal;
use crate::application::ports::ad_repository::AdRepository;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::proposal_repository::ProposalRepository;
use crate::application::ports::user_repository::{Credentials, User, UserRepository};
use crate::bootstrap::app_context::{AppContext, AppServices};
use crate::bootstrap::config::Config;
use crate::domain::ads::ad::{Ad, AdAuthor, Category, Condition};
use crate::domain::proposals::proposal::{ExchangeProposal, ProposalStatus};

#[derive(Clone)]
struct AdRow {
    id: i64,
    author_id: Uuid,
    fields: AdFields,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
struct ProposalRow {
    id: i64,
    sender_id: i64,
    receiver_id: i64,
    comment: String,
    status: ProposalStatus,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    users: Vec<Credentials>,
    categories: Vec<Category>,
    ads: Vec<AdRow>,
    proposals: Vec<ProposalRow>,
    ticks: i64,
}

impl State {
    fn tick(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        DateTime::from_timestamp(1_700_000_000 + self.ticks, 0).unwrap()
    }

    fn hydrate_ad(&self, row: &AdRow) -> Ad {
        let username = self
            .users
            .iter()
            .find(|u| u.user.id == row.author_id)
            .map(|u| u.user.username.clone())
            .unwrap_or_default();
        let category = row
            .fields
            .category_id
            .and_then(|cid| self.categories.iter().find(|c| c.id == cid).cloned());
        Ad {
            id: row.id,
            author: AdAuthor {
                id: row.author_id,
                username,
            },
            title: row.fields.title.clone(),
            description: row.fields.description.clone(),
            image_url: row.fields.image_url.clone(),
            category,
            condition: row.fields.condition,
            is_active: row.fields.is_active,
            created_at: row.created_at,
        }
    }

    fn ad(&self, id: i64) -> Option<Ad> {
        self.ads.iter().find(|a| a.id == id).map(|r| self.hydrate_ad(r))
    }

    fn hydrate_proposal(&self, row: &ProposalRow) -> Option<ExchangeProposal> {
        Some(ExchangeProposal {
            id: row.id,
            sender: self.ad(row.sender_id)?,
            receiver: self.ad(row.receiver_id)?,
            comment: row.comment.clone(),
            status: row.status,
            created_at: row.created_at,
        })
    }
}

fn paginate<T>(mut items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as i64;
    let start = (page.offset() as usize).min(items.len());
    let end = (start + page.limit() as usize).min(items.len());
    let items = items.drain(start..end).collect();
    Page {
        items,
        total,
        request: page,
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_user(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().users.push(Credentials {
            user: User {
                id,
                username: username.to_string(),
            },
            password_hash: None,
        });
        id
    }

    pub fn add_category(&self, title: &str) -> i64 {
        let mut state = self.lock();
        let id = state.categories.len() as i64 + 1;
        state.categories.push(Category {
            id,
            title: title.to_string(),
        });
        id
    }

    pub fn add_ad(
        &self,
        author_id: Uuid,
        title: &str,
        description: &str,
        category_id: Option<i64>,
        condition: Condition,
    ) -> i64 {
        let mut state = self.lock();
        let id = state.ads.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let created_at = state.tick();
        state.ads.push(AdRow {
            id,
            author_id,
            fields: AdFields {
                title: title.to_string(),
                description: description.to_string(),
                image_url: String::new(),
                category_id,
                condition,
                is_active: true,
            },
            created_at,
        });
        id
    }

    pub fn set_active(&self, ad_id: i64, active: bool) {
        let mut state = self.lock();
        if let Some(row) = state.ads.iter_mut().find(|a| a.id == ad_id) {
            row.fields.is_active = active;
        }
    }

    pub fn ad_count(&self) -> usize {
        self.lock().ads.len()
    }

    pub fn proposal_count(&self) -> usize {
        self.lock().proposals.len()
    }

    pub fn proposal_exists(&self, id: i64) -> bool {
        self.lock().proposals.iter().any(|p| p.id == id)
    }
}

#[async_trait]
impl AdRepository for MemoryStore {
    async fn list_active(&self, filter: &AdFilter, page: PageRequest) -> anyhow::Result<Page<Ad>> {
        let state = self.lock();
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut rows: Vec<&AdRow> = state
            .ads
            .iter()
            .filter(|r| r.fields.is_active)
            .filter(|r| filter.category_id.is_none() || r.fields.category_id == filter.category_id)
            .filter(|r| filter.condition.is_none_or(|c| r.fields.condition == c))
            .filter(|r| {
                needle.as_ref().is_none_or(|n| {
                    r.fields.title.to_lowercase().contains(n)
                        || r.fields.description.to_lowercase().contains(n)
                })
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let ads = rows.into_iter().map(|r| state.hydrate_ad(r)).collect();
        Ok(paginate(ads, page))
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Ad>> {
        Ok(self.lock().ad(id))
    }

    async fn create(&self, author_id: Uuid, fields: &AdFields) -> anyhow::Result<Ad> {
        let mut state = self.lock();
        let id = state.ads.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let created_at = state.tick();
        let row = AdRow {
            id,
            author_id,
            fields: fields.clone(),
            created_at,
        };
        state.ads.push(row.clone());
        Ok(state.hydrate_ad(&row))
    }

    async fn update(&self, id: i64, fields: &AdFields) -> anyhow::Result<Option<Ad>> {
        let mut state = self.lock();
        let Some(row) = state.ads.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        row.fields = fields.clone();
        let row = row.clone();
        Ok(Some(state.hydrate_ad(&row)))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut state = self.lock();
        let before = state.ads.len();
        state.ads.retain(|a| a.id != id);
        state
            .proposals
            .retain(|p| p.sender_id != id && p.receiver_id != id);
        Ok(state.ads.len() != before)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<Category>> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl ProposalRepository for MemoryStore {
    async fn list_for_participant(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<Page<ExchangeProposal>> {
        let state = self.lock();
        let mut proposals: Vec<ExchangeProposal> = state
            .proposals
            .iter()
            .filter_map(|p| state.hydrate_proposal(p))
            .filter(|p| p.involves(user_id))
            .collect();
        proposals.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(proposals, page))
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<ExchangeProposal>> {
        let state = self.lock();
        Ok(state
            .proposals
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| state.hydrate_proposal(p)))
    }

    async fn create(&self, proposal: &NewProposal) -> anyhow::Result<ExchangeProposal> {
        let mut state = self.lock();
        let id = state.proposals.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let created_at = state.tick();
        let row = ProposalRow {
            id,
            sender_id: proposal.sender_id,
            receiver_id: proposal.receiver_id,
            comment: proposal.comment.clone(),
            status: ProposalStatus::Pending,
            created_at,
        };
        state.proposals.push(row.clone());
        state
            .hydrate_proposal(&row)
            .ok_or_else(|| anyhow::anyhow!("proposal references a missing ad"))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut state = self.lock();
        let before = state.proposals.len();
        state.proposals.retain(|p| p.id != id);
        Ok(state.proposals.len() != before)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.user.username == username) {
            anyhow::bail!("duplicate username");
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
        };
        state.users.push(Credentials {
            user: user.clone(),
            password_hash: Some(password_hash.to_string()),
        });
        Ok(user)
    }

    async fn credentials_for(&self, username: &str) -> anyhow::Result<Option<Credentials>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }
}

/// Ids of the seeded rows.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub user1: Uuid,
    pub user2: Uuid,
    pub electronics: i64,
    pub clothing: i64,
    pub smartphone: i64,
    pub tshirt: i64,
    pub laptop: i64,
    pub proposal: i64,
}

/// Two users, two categories, three active ads (created smartphone, t-shirt,
/// laptop in that order) and one pending smartphone -> t-shirt proposal.
pub fn seeded() -> (Arc<MemoryStore>, Fixture) {
    let store = MemoryStore::new();
    let user1 = store.add_user("user1");
    let user2 = store.add_user("user2");
    let electronics = store.add_category("Electronics");
    let clothing = store.add_category("Clothing");
    let smartphone = store.add_ad(
        user1,
        "Smartphone",
        "Brand new, sealed",
        Some(electronics),
        Condition::New,
    );
    let tshirt = store.add_ad(user2, "T-shirt", "Lightly worn", Some(clothing), Condition::Used);
    let laptop = store.add_ad(user1, "Laptop", "Works fine", Some(electronics), Condition::Used);

    let proposal = {
        let mut state = store.lock();
        let created_at = state.tick();
        state.proposals.push(ProposalRow {
            id: 1,
            sender_id: smartphone,
            receiver_id: tshirt,
            comment: "Swap?".into(),
            status: ProposalStatus::Pending,
            created_at,
        });
        1
    };

    let fixture = Fixture {
        user1,
        user2,
        electronics,
        clothing,
        smartphone,
        tshirt,
        laptop,
        proposal,
    };
    (Arc::new(store), fixture)
}

/// A detached ad, for policy checks that never touch a store.
pub fn ad_by(author: Uuid, id: i64) -> Ad {
    Ad {
        id,
        author: AdAuthor {
            id: author,
            username: "author".into(),
        },
        title: format!("Ad {id}"),
        description: "Something to swap".into(),
        image_url: String::new(),
        category: None,
        condition: Condition::Used,
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn proposal_between(proposer: Uuid, addressee: Uuid) -> ExchangeProposal {
    ExchangeProposal {
        id: 1,
        sender: ad_by(proposer, 1),
        receiver: ad_by(addressee, 2),
        comment: "Swap?".into(),
        status: ProposalStatus::Pending,
        created_at: Utc::now(),
    }
}

pub fn test_config() -> Config {
    Config {
        api_port: 0,
        frontend_url: None,
        database_url: String::new(),
        db_max_connections: 1,
        jwt_secret: "test-secret-for-router-tests".into(),
        jwt_expires_secs: 3600,
        page_size: 10,
        max_page_size: 100,
        is_production: false,
    }
}

pub fn test_context(store: Arc<MemoryStore>) -> AppContext {
    let services = AppServices::new(store.clone(), store.clone(), store.clone(), store);
    AppContext::new(test_config(), services)
}

pub fn token_for(user_id: Uuid) -> String {
    crate::presentation::http::auth::issue_token(&test_config(), user_id).unwrap()
}

/// Drives one request through `app`; an empty response body becomes `Null`.
pub async fn call(
    app: &axum::Router,
    method: axum::http::Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
