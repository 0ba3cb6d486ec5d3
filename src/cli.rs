//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error, EXIT_FAILURE, EXIT_USAGE};
pub use parse::{AgentCommands, Cli, Commands, SearchArgs};
pub use presentation::{
    format_agent_create_result_json, format_agent_create_result_text,
    format_agent_current_result_json, format_agent_current_result_text,
    format_agent_list_result_json, format_agent_list_result_text,
    format_agent_switch_result_json, format_agent_switch_result_text,
    format_search_result_json, format_search_result_text, format_search_settings,
    format_success_rate, truncate_chars, NAME_COLUMN_WIDTH, PLACEHOLDER,
};
pub use route::RunContext;
