//! Integration tests for the Bazaar marketplace client

mod http_client;
mod mock_marketplace;

pub use mock_marketplace::{Failure, MockMarketplace};
pub use test_utils::{with_xdg_env, with_xdg_env_vars};
