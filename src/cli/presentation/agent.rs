//! Agent command presentation: list, switch, create, current text/json.

use super::shared::{to_pretty_json, PLACEHOLDER};
use crate::agent::{
    AgentCreateResult, AgentCurrentResult, AgentEntry, AgentListResult, AgentSwitchResult,
};
use crate::error::ApiError;
use crate::marketplace::mask_secret;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

fn entry_json(entry: &AgentEntry) -> Value {
    json!({
        "id": entry.id,
        "name": entry.name,
        "wallet_address": entry.wallet_address,
        "active": entry.active,
        "has_api_key": entry.api_key.is_some(),
    })
}

fn masked_key(entry: &AgentEntry) -> String {
    entry
        .api_key
        .as_deref()
        .map(mask_secret)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_agent_list_result_text(result: &AgentListResult) -> String {
    let mut output = String::new();
    if let Some(warning) = &result.warning {
        output.push_str(&format!("{} {}\n\n", "Warning:".yellow(), warning));
    }
    if result.agents.is_empty() {
        output.push_str("No agents found.\n\nCreate one with `bazaar agent create <name>`.");
        return output;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Active", "Name", "ID", "Wallet", "Description"]);
    for item in &result.agents {
        let description = item
            .server
            .as_ref()
            .and_then(|s| s.description.clone())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        table.add_row(vec![
            if item.entry.active { "*" } else { "" }.to_string(),
            item.entry.name.clone(),
            item.entry.id.clone(),
            item.entry.wallet_address.clone(),
            description,
        ]);
    }
    output.push_str(&table.to_string());
    output.push_str(&format!("\n\nTotal: {} agent(s)", result.agents.len()));
    if !result.agents.iter().any(|a| a.entry.active) {
        output.push_str("\nNo active agent. Select one with `bazaar agent switch <name>`.");
    }
    output
}

pub fn format_agent_list_result_json(result: &AgentListResult) -> Result<String, ApiError> {
    let agents: Vec<Value> = result
        .agents
        .iter()
        .map(|item| {
            let mut out = entry_json(&item.entry);
            if let Some(server) = &item.server {
                out["server"] = json!(server);
            }
            out
        })
        .collect();
    let mut out = json!({ "agents": agents, "total": result.agents.len() });
    if let Some(warning) = &result.warning {
        out["warning"] = json!(warning);
    }
    to_pretty_json(&out)
}

pub fn format_agent_switch_result_text(result: &AgentSwitchResult) -> String {
    format!(
        "{} Switched to agent {} ({})\nAPI key: {}\nSaved to {}",
        "✓".green(),
        result.agent.name,
        result.agent.id,
        masked_key(&result.agent),
        result.config_path.display()
    )
}

pub fn format_agent_switch_result_json(result: &AgentSwitchResult) -> Result<String, ApiError> {
    let out = json!({
        "agent": entry_json(&result.agent),
        "config_path": result.config_path.display().to_string(),
    });
    to_pretty_json(&out)
}

pub fn format_agent_create_result_text(result: &AgentCreateResult) -> String {
    format!(
        "{} Created agent {} ({})\nWallet: {}\nAPI key: {} (now active)\nSaved to {}",
        "✓".green(),
        result.agent.name,
        result.agent.id,
        result.agent.wallet_address,
        masked_key(&result.agent),
        result.config_path.display()
    )
}

pub fn format_agent_create_result_json(result: &AgentCreateResult) -> Result<String, ApiError> {
    let out = json!({
        "agent": entry_json(&result.agent),
        "config_path": result.config_path.display().to_string(),
    });
    to_pretty_json(&out)
}

pub fn format_agent_current_result_text(result: &AgentCurrentResult) -> String {
    match &result.agent {
        Some(agent) => format!(
            "Active agent: {} ({})\nWallet: {}\nAPI key: {}",
            agent.name,
            agent.id,
            agent.wallet_address,
            masked_key(agent)
        ),
        None => "No active agent. Select one with `bazaar agent switch <name>`.".to_string(),
    }
}

pub fn format_agent_current_result_json(result: &AgentCurrentResult) -> Result<String, ApiError> {
    let out = json!({
        "agent": result.agent.as_ref().map(entry_json),
        "config_path": result.config_path.display().to_string(),
    });
    to_pretty_json(&out)
}
