//! Search presentation: settings summary, result table, JSON.

use super::shared::{or_placeholder, to_pretty_json, truncate_chars, PLACEHOLDER};
use crate::error::ApiError;
use crate::marketplace::AgentRecord;
use crate::search::{SearchOutcome, SearchSettings};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

/// Longest agent name shown in the table, ellipsis included.
pub const NAME_COLUMN_WIDTH: usize = 28;

/// `87.5%`, or the placeholder for null and non-finite rates.
pub fn format_success_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r.is_finite() => format!("{:.1}%", r),
        _ => PLACEHOLDER.to_string(),
    }
}

/// One-line summary of the effective search settings.
pub fn format_search_settings(settings: &SearchSettings) -> String {
    let rerank = if settings.rerank_enabled() {
        match settings.performance_weight {
            Some(weight) => format!("on (weight {})", weight),
            None => "on (server weight)".to_string(),
        }
    } else {
        "off".to_string()
    };

    let mut filters = vec![
        format!("online={}", settings.online),
        format!("graduated={}", settings.graduated),
    ];
    if let Some(high_risk) = settings.high_risk {
        filters.push(format!("high-risk={}", high_risk));
    }
    if let Some(cluster) = &settings.cluster {
        filters.push(format!("cluster={}", cluster));
    }
    if let Some(contains) = &settings.contains {
        match settings.match_mode {
            Some(mode) => filters.push(format!("contains=\"{}\" (match: {})", contains, mode)),
            None => filters.push(format!("contains=\"{}\"", contains)),
        }
    }

    format!(
        "Mode: {} | Rerank: {} | Filters: {}",
        settings.mode,
        rerank,
        filters.join(", ")
    )
}

fn record_row(rank: usize, record: &AgentRecord) -> Vec<String> {
    vec![
        rank.to_string(),
        truncate_chars(&record.name, NAME_COLUMN_WIDTH),
        record.id.to_string(),
        or_placeholder(record.category.as_deref().filter(|c| !c.trim().is_empty())),
        format_success_rate(record.success_rate),
        or_placeholder(record.successful_job_count),
        or_placeholder(record.unique_buyer_count),
        if record.is_online { "yes" } else { "no" }.to_string(),
    ]
}

pub fn format_search_result_text(outcome: &SearchOutcome) -> String {
    let summary = format_search_settings(&outcome.settings);
    if outcome.agents.is_empty() {
        return format!("{}\n\nNo agents found for query \"{}\"", summary, outcome.query);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "#", "Name", "ID", "Category", "Success", "Jobs", "Buyers", "Online",
    ]);
    for (index, record) in outcome.agents.iter().enumerate() {
        table.add_row(record_row(index + 1, record));
    }

    format!(
        "{}\n\n{}\n\n{} agent(s) found for query \"{}\"",
        summary,
        table,
        outcome.agents.len(),
        outcome.query
    )
}

pub fn format_search_result_json(outcome: &SearchOutcome) -> Result<String, ApiError> {
    let out = json!({
        "query": outcome.query,
        "settings": outcome.settings,
        "agents": outcome.agents,
        "total": outcome.agents.len(),
    });
    to_pretty_json(&out)
}
