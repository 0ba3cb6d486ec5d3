//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::agent::{AgentCommandService, AgentStorage, XdgAgentStorage};
use crate::cli::parse::{AgentCommands, Commands, SearchArgs};
use crate::cli::presentation::{
    format_agent_create_result_json, format_agent_create_result_text,
    format_agent_current_result_json, format_agent_current_result_text,
    format_agent_list_result_json, format_agent_list_result_text,
    format_agent_switch_result_json, format_agent_switch_result_text,
    format_search_result_json, format_search_result_text,
};
use crate::config::{BazaarConfig, ConfigLoader};
use crate::error::ApiError;
use crate::marketplace::{HttpMarketplaceClient, MarketplaceClient};
use crate::search::SearchService;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

/// Output mode requested with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self, ApiError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::Usage(format!(
                "Invalid format: {}. Must be text or json",
                other
            ))),
        }
    }
}

/// Runtime context for CLI execution: marketplace client, agent storage, and
/// the single-threaded runtime remote calls are driven on.
pub struct RunContext {
    client: Arc<dyn MarketplaceClient>,
    storage: Arc<dyn AgentStorage>,
    runtime: Runtime,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::from_config(&config)
    }

    /// Build the HTTP client and file storage described by `config`.
    pub fn from_config(config: &BazaarConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let client = HttpMarketplaceClient::new(&config.api, &config.session)?;
        let agents_file = config.storage.resolve_agents_file()?;
        debug!(base_url = %client.base_url(), agents_file = %agents_file.display(), "Run context ready");
        Self::with_services(Arc::new(client), Arc::new(XdgAgentStorage::at(agents_file)))
    }

    /// Run context over explicit services.
    pub fn with_services(
        client: Arc<dyn MarketplaceClient>,
        storage: Arc<dyn AgentStorage>,
    ) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start async runtime: {}", e)))?;
        Ok(Self {
            client,
            storage,
            runtime,
        })
    }

    pub fn storage(&self) -> &dyn AgentStorage {
        self.storage.as_ref()
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Search(args) => self.handle_search(args),
            Commands::Agent { command } => self.handle_agent_command(command),
        }
    }

    fn handle_search(&self, args: &SearchArgs) -> Result<String, ApiError> {
        let format = OutputFormat::parse(&args.format)?;
        let options = args.options();
        let outcome = self.runtime.block_on(SearchService::run(
            self.client.as_ref(),
            &args.query,
            &options,
        ))?;
        match format {
            OutputFormat::Json => format_search_result_json(&outcome),
            OutputFormat::Text => Ok(format_search_result_text(&outcome)),
        }
    }

    fn handle_agent_command(&self, command: &AgentCommands) -> Result<String, ApiError> {
        let client = self.client.as_ref();
        let storage = self.storage.as_ref();
        match command {
            AgentCommands::List { format } => {
                let format = OutputFormat::parse(format)?;
                let result = self
                    .runtime
                    .block_on(AgentCommandService::list(client, storage))?;
                match format {
                    OutputFormat::Json => format_agent_list_result_json(&result),
                    OutputFormat::Text => Ok(format_agent_list_result_text(&result)),
                }
            }
            AgentCommands::Switch { name, format } => {
                let format = OutputFormat::parse(format)?;
                let name = match name {
                    Some(name) => name.clone(),
                    None => self.prompt_for_agent()?,
                };
                let result = self
                    .runtime
                    .block_on(AgentCommandService::switch(client, storage, &name))?;
                match format {
                    OutputFormat::Json => format_agent_switch_result_json(&result),
                    OutputFormat::Text => Ok(format_agent_switch_result_text(&result)),
                }
            }
            AgentCommands::Create { name, format } => {
                let format = OutputFormat::parse(format)?;
                let result = self
                    .runtime
                    .block_on(AgentCommandService::create(client, storage, name))?;
                match format {
                    OutputFormat::Json => format_agent_create_result_json(&result),
                    OutputFormat::Text => Ok(format_agent_create_result_text(&result)),
                }
            }
            AgentCommands::Current { format } => {
                let format = OutputFormat::parse(format)?;
                let result = AgentCommandService::current(storage)?;
                match format {
                    OutputFormat::Json => format_agent_current_result_json(&result),
                    OutputFormat::Text => Ok(format_agent_current_result_text(&result)),
                }
            }
        }
    }

    /// Interactive pick among stored agents for `agent switch` without a name.
    fn prompt_for_agent(&self) -> Result<String, ApiError> {
        if !std::io::stdin().is_terminal() {
            return Err(ApiError::Usage(
                "Agent name required: bazaar agent switch <name>".to_string(),
            ));
        }
        let names = AgentCommandService::stored_names(self.storage.as_ref())?;
        if names.is_empty() {
            return Err(ApiError::Usage(
                "No saved agents; run `bazaar agent list` or `bazaar agent create <name>` first"
                    .to_string(),
            ));
        }

        use dialoguer::Select;
        let index = Select::new()
            .with_prompt("Switch to agent")
            .items(&names)
            .default(0)
            .interact()
            .map_err(|e| ApiError::Usage(format!("Agent selection cancelled: {}", e)))?;
        Ok(names[index].clone())
    }
}
