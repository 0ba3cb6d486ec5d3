//! Scripted in-memory marketplace for command-level tests

use async_trait::async_trait;
use bazaar::error::ApiError;
use bazaar::marketplace::{
    AgentRecord, CreatedAgent, IssuedApiKey, MarketplaceClient, ServerAgent, SessionToken,
};
use bazaar::search::SearchParams;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// How a scripted call should fail.
#[derive(Debug, Clone)]
pub enum Failure {
    NotLoggedIn,
    Auth(String),
    Request(String),
    Rejected(u16, String),
}

impl Failure {
    fn to_error(&self) -> ApiError {
        match self {
            Failure::NotLoggedIn => ApiError::NotLoggedIn,
            Failure::Auth(msg) => ApiError::RemoteAuthFailed(msg.clone()),
            Failure::Request(msg) => ApiError::RemoteRequestFailed(msg.clone()),
            Failure::Rejected(status, body) => ApiError::RemoteRejected {
                status: *status,
                body: body.clone(),
            },
        }
    }
}

type Scripted<T> = Mutex<Result<T, Failure>>;

/// Marketplace double with one scripted answer per operation and a counter of
/// every remote call made.
pub struct MockMarketplace {
    session: Scripted<()>,
    agents: Scripted<Vec<ServerAgent>>,
    created: Scripted<CreatedAgent>,
    issued_key: Scripted<Option<String>>,
    search_results: Scripted<Vec<AgentRecord>>,
    calls: AtomicUsize,
    last_search: Mutex<Option<SearchParams>>,
    last_wallet: Mutex<Option<String>>,
}

impl Default for MockMarketplace {
    fn default() -> Self {
        Self {
            session: Mutex::new(Ok(())),
            agents: Mutex::new(Ok(Vec::new())),
            created: Mutex::new(Err(Failure::Request("create not scripted".to_string()))),
            issued_key: Mutex::new(Err(Failure::Request("api key not scripted".to_string()))),
            search_results: Mutex::new(Ok(Vec::new())),
            calls: AtomicUsize::new(0),
            last_search: Mutex::new(None),
            last_wallet: Mutex::new(None),
        }
    }
}

impl MockMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logged_out(self) -> Self {
        *self.session.lock().unwrap() = Err(Failure::NotLoggedIn);
        self
    }

    pub fn with_agents(self, agents: Vec<ServerAgent>) -> Self {
        *self.agents.lock().unwrap() = Ok(agents);
        self
    }

    pub fn failing_agents(self, failure: Failure) -> Self {
        *self.agents.lock().unwrap() = Err(failure);
        self
    }

    pub fn with_created(self, created: CreatedAgent) -> Self {
        *self.created.lock().unwrap() = Ok(created);
        self
    }

    pub fn with_issued_key(self, key: Option<&str>) -> Self {
        *self.issued_key.lock().unwrap() = Ok(key.map(str::to_string));
        self
    }

    pub fn with_search_results(self, records: Vec<AgentRecord>) -> Self {
        *self.search_results.lock().unwrap() = Ok(records);
        self
    }

    pub fn failing_search(self, failure: Failure) -> Self {
        *self.search_results.lock().unwrap() = Err(failure);
        self
    }

    /// Number of remote calls made so far, of any kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_search(&self) -> Option<SearchParams> {
        self.last_search.lock().unwrap().clone()
    }

    pub fn last_wallet(&self) -> Option<String> {
        self.last_wallet.lock().unwrap().clone()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn answer<T: Clone>(scripted: &Scripted<T>) -> Result<T, ApiError> {
    scripted.lock().unwrap().clone().map_err(|f| f.to_error())
}

#[async_trait]
impl MarketplaceClient for MockMarketplace {
    async fn ensure_session(&self) -> Result<SessionToken, ApiError> {
        self.record_call();
        answer(&self.session).map(|_| SessionToken::new("test-session"))
    }

    async fn fetch_agents(&self, _session: &SessionToken) -> Result<Vec<ServerAgent>, ApiError> {
        self.record_call();
        answer(&self.agents)
    }

    async fn create_agent(
        &self,
        _session: &SessionToken,
        name: &str,
    ) -> Result<CreatedAgent, ApiError> {
        self.record_call();
        answer(&self.created).map(|mut created| {
            if created.name.is_empty() {
                created.name = name.to_string();
            }
            created
        })
    }

    async fn regenerate_api_key(
        &self,
        _session: &SessionToken,
        wallet_address: &str,
    ) -> Result<IssuedApiKey, ApiError> {
        self.record_call();
        *self.last_wallet.lock().unwrap() = Some(wallet_address.to_string());
        answer(&self.issued_key).map(|api_key| IssuedApiKey { api_key })
    }

    async fn search(&self, params: &SearchParams) -> Result<Vec<AgentRecord>, ApiError> {
        self.record_call();
        *self.last_search.lock().unwrap() = Some(params.clone());
        answer(&self.search_results)
    }
}
