//! HTTP client tests against a local mock marketplace server

use bazaar::cli::{Cli, RunContext};
use bazaar::config::{ApiConfig, BazaarConfig, SessionConfig, StorageConfig};
use bazaar::error::ApiError;
use bazaar::marketplace::{HttpMarketplaceClient, MarketplaceClient, SessionToken};
use bazaar::search::{build_params, SearchOptions, SearchService};
use clap::Parser;
use mockito::{Matcher, Server};
use tempfile::TempDir;

fn client_for(url: String, token: Option<&str>) -> HttpMarketplaceClient {
    let api = ApiConfig {
        base_url: url,
        timeout_secs: 5,
    };
    let session = SessionConfig {
        token: token.map(str::to_string),
    };
    HttpMarketplaceClient::new(&api, &session).unwrap()
}

#[tokio::test]
async fn test_search_sends_query_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/agents/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "nft artist".into()),
            Matcher::UrlEncoded("searchMode".into(), "dense".into()),
            Matcher::UrlEncoded("isOnline".into(), "true".into()),
            Matcher::UrlEncoded("hasGraduated".into(), "false".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":[{"id":3,"name":"Pixel","category":null,"successRate":75.0,"successfulJobCount":8,"uniqueBuyerCount":2,"isOnline":true,"cluster":"art"}]}"#,
        )
        .create_async()
        .await;

    let client = client_for(server.url(), None);
    let options = SearchOptions {
        mode: Some("vector".to_string()),
        graduated: Some(false),
        ..SearchOptions::default()
    };
    let params = build_params("nft artist", &options).unwrap();
    let records = client.search(&params).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 3);
    assert_eq!(records[0].success_rate, Some(75.0));
    assert_eq!(records[0].extra.get("cluster").unwrap(), "art");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_error_status_carries_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/agents/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("SQL error: syntax error at or near \"AND\"")
        .create_async()
        .await;

    let client = client_for(server.url(), None);
    let params = build_params("x", &SearchOptions::default()).unwrap();
    let err = client.search(&params).await.unwrap_err();
    match err {
        ApiError::RemoteRejected { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("SQL error"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_fatal_even_for_sql_queries() {
    // Nothing listens on the discard port
    let client = client_for("http://127.0.0.1:9".to_string(), None);
    let options = SearchOptions::default();

    let result = SearchService::run(&client, "postgres sql tuning", &options).await;
    match result {
        Err(ApiError::RemoteRequestFailed(msg)) => {
            assert!(!msg.contains("postgres"), "error text must not echo the query: {}", msg);
        }
        other => panic!("expected a transport failure, got {:?}", other.map(|o| o.agents)),
    }
}

#[tokio::test]
async fn test_fetch_agents_sends_bearer_token_and_accepts_bare_array() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/me/agents")
        .match_header("authorization", "Bearer session-abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":1,"name":"alpha","walletAddress":"0xa"},{"id":"2","name":"beta"}]"#)
        .create_async()
        .await;

    let client = client_for(server.url(), Some("session-abc"));
    let session = client.ensure_session().await.unwrap();
    let agents = client.fetch_agents(&session).await.unwrap();

    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].id, "1");
    assert_eq!(agents[0].wallet_address, "0xa");
    assert_eq!(agents[1].id, "2");
    assert_eq!(agents[1].wallet_address, "");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_agents_accepts_data_envelope() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/me/agents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[{"id":5,"name":"gamma","walletAddress":"0xg","description":"d"}]}"#)
        .create_async()
        .await;

    let client = client_for(server.url(), Some("session-abc"));
    let agents = client
        .fetch_agents(&SessionToken::new("session-abc"))
        .await
        .unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].description.as_deref(), Some("d"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/me/agents")
        .with_status(401)
        .with_body("session expired")
        .create_async()
        .await;

    let client = client_for(server.url(), Some("stale"));
    let err = client
        .fetch_agents(&SessionToken::new("stale"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RemoteAuthFailed(ref msg) if msg.contains("session expired")));
}

#[tokio::test]
async fn test_create_agent_posts_name() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/me/agents")
        .match_header("authorization", "Bearer session-abc")
        .match_body(Matcher::Json(serde_json::json!({ "name": "scout" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":7,"name":"scout","walletAddress":"0x7","apiKey":"sk_scout_first_7777"}"#)
        .create_async()
        .await;

    let client = client_for(server.url(), Some("session-abc"));
    let created = client
        .create_agent(&SessionToken::new("session-abc"), "scout")
        .await
        .unwrap();
    assert_eq!(created.id, "7");
    assert_eq!(created.api_key.as_deref(), Some("sk_scout_first_7777"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_regenerate_api_key_posts_wallet_address() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/me/agents/api-key")
        .match_body(Matcher::Json(serde_json::json!({ "walletAddress": "0x7" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"apiKey":"sk_fresh_0000_7777"}"#)
        .create_async()
        .await;

    let client = client_for(server.url(), Some("session-abc"));
    let issued = client
        .regenerate_api_key(&SessionToken::new("session-abc"), "0x7")
        .await
        .unwrap();
    assert_eq!(issued.api_key.as_deref(), Some("sk_fresh_0000_7777"));
    mock.assert_async().await;
}

#[test]
fn test_search_command_over_http_absorbs_sql_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/agents/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("SQL error: syntax error at or near \"AND\"")
        .create();

    let test_dir = TempDir::new().unwrap();
    let config = BazaarConfig {
        api: ApiConfig {
            base_url: server.url(),
            timeout_secs: 5,
        },
        storage: StorageConfig {
            agents_file: Some(test_dir.path().join("agents.toml")),
        },
        ..BazaarConfig::default()
    };
    let ctx = RunContext::from_config(&config).unwrap();
    let cli = Cli::try_parse_from(["bazaar", "search", "translator", "--high-risk"]).unwrap();
    let output = ctx.execute(&cli.command).unwrap();
    assert!(output.ends_with("No agents found for query \"translator\""));
}
