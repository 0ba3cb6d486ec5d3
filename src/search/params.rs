//! Search request builder.
//!
//! Only `isOnline` and `hasGraduated` are always sent; every other filter and
//! reranking field is sent only when the caller set it, so server-side defaults
//! stay in charge.

use crate::error::ApiError;
use serde::Serialize;
use std::fmt;

/// Search mode as the user names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Hybrid,
    Vector,
    Keyword,
}

impl SearchMode {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Ok(SearchMode::Hybrid),
            "vector" => Ok(SearchMode::Vector),
            "keyword" => Ok(SearchMode::Keyword),
            _ => Err(ApiError::Usage(format!(
                "Invalid search mode: {}. Must be hybrid, vector, or keyword",
                value
            ))),
        }
    }

    /// Value of the `searchMode` query parameter.
    pub fn api_value(self) -> &'static str {
        match self {
            SearchMode::Hybrid => "hybrid",
            SearchMode::Vector => "dense",
            SearchMode::Keyword => "sparse",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::Hybrid => "hybrid",
            SearchMode::Vector => "vector",
            SearchMode::Keyword => "keyword",
        })
    }
}

/// How `contains` keywords combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    All,
    Any,
}

impl MatchMode {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(MatchMode::All),
            "any" => Ok(MatchMode::Any),
            _ => Err(ApiError::Usage(format!(
                "Invalid match mode: {}. Must be all or any",
                value
            ))),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchMode::All => "all",
            MatchMode::Any => "any",
        })
    }
}

/// Caller-supplied search options. `None` means "not specified".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub mode: Option<String>,
    pub online: Option<bool>,
    pub graduated: Option<bool>,
    pub high_risk: Option<bool>,
    pub cluster: Option<String>,
    pub contains: Option<String>,
    pub match_mode: Option<String>,
    pub rerank: Option<bool>,
    pub performance_weight: Option<f64>,
    pub similarity_cutoff: Option<f64>,
    pub sparse_cutoff: Option<f64>,
}

/// Ordered query-string pairs for the search endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams(Vec<(String, String)>);

impl SearchParams {
    fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Effective settings for the summary line and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSettings {
    pub mode: SearchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerank: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_cutoff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse_cutoff: Option<f64>,
    pub online: bool,
    pub graduated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_risk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<MatchMode>,
}

impl SearchSettings {
    pub fn rerank_enabled(&self) -> bool {
        self.rerank.unwrap_or(false)
    }
}

/// A validated search: the exact parameters to send plus the settings they encode.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub params: SearchParams,
    pub settings: SearchSettings,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate `query` and `options` and build the request. Nothing here touches
/// the network; every usage error surfaces before a request exists.
pub fn prepare(query: &str, options: &SearchOptions) -> Result<SearchRequest, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::Usage("Search query cannot be empty".to_string()));
    }

    let mode = options.mode.as_deref().map(SearchMode::parse).transpose()?;
    let cluster = non_blank(&options.cluster);
    let contains = non_blank(&options.contains);
    let match_mode = options.match_mode.as_deref().map(MatchMode::parse).transpose()?;
    if match_mode.is_some() && contains.is_none() {
        return Err(ApiError::Usage(
            "--match requires --contains (nothing to match against)".to_string(),
        ));
    }

    let online = options.online.unwrap_or(true);
    let graduated = options.graduated.unwrap_or(true);

    let mut params = SearchParams::default();
    params.push("query", query);
    if let Some(mode) = mode {
        params.push("searchMode", mode.api_value());
    }
    params.push("isOnline", online);
    params.push("hasGraduated", graduated);
    if let Some(high_risk) = options.high_risk {
        params.push("isHighRisk", high_risk);
    }
    if let Some(cluster) = &cluster {
        params.push("cluster", cluster);
    }
    if let Some(contains) = &contains {
        params.push("fullTextFilter", contains);
    }
    if let Some(match_mode) = match_mode {
        params.push("fullTextFilterMode", match_mode);
    }
    if let Some(rerank) = options.rerank {
        params.push("rerank", rerank);
    }
    if let Some(weight) = options.performance_weight {
        params.push("performanceWeight", weight);
    }
    if let Some(cutoff) = options.similarity_cutoff {
        params.push("similarityCutoff", cutoff);
    }
    if let Some(cutoff) = options.sparse_cutoff {
        params.push("sparseCutoff", cutoff);
    }

    let settings = SearchSettings {
        mode: mode.unwrap_or_default(),
        rerank: options.rerank,
        performance_weight: options.performance_weight,
        similarity_cutoff: options.similarity_cutoff,
        sparse_cutoff: options.sparse_cutoff,
        online,
        graduated,
        high_risk: options.high_risk,
        cluster,
        contains,
        match_mode,
    };

    Ok(SearchRequest {
        query: query.to_string(),
        params,
        settings,
    })
}

/// Query parameters for `query` and `options`.
pub fn build_params(query: &str, options: &SearchOptions) -> Result<SearchParams, ApiError> {
    prepare(query, options).map(|request| request.params)
}
