//! CLI presentation: text and json formatters per command family.

mod agent;
mod search;
mod shared;

pub use agent::{
    format_agent_create_result_json, format_agent_create_result_text,
    format_agent_current_result_json, format_agent_current_result_text,
    format_agent_list_result_json, format_agent_list_result_text,
    format_agent_switch_result_json, format_agent_switch_result_text,
};
pub use search::{
    format_search_result_json, format_search_result_text, format_search_settings,
    format_success_rate, NAME_COLUMN_WIDTH,
};
pub use shared::{truncate_chars, PLACEHOLDER};
