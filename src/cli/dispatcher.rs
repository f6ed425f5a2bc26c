use std::path::PathBuf;

use crate::api::client::OrgClient;
use crate::cli::command_handlers::{
    ListContext, handle_agents, handle_auth, handle_lead_groups, handle_overview, handle_routines,
    handle_users, handle_voices,
};
use crate::cli::main_types::{Commands, ConfigCommands};
use crate::error::{AppError, CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::{AuthMode, Credentials};
use crate::utils::validation::validate_url;

const DEFAULT_PAGE_SIZE: usize = 10;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    credentials: Credentials,
    api_token: Option<String>,
    verbose: bool,
}

impl Dispatcher {
    // Static helper function for verbose logging (used before self exists)
    fn print_verbose(verbose: bool, msg: &str) {
        if verbose {
            println!("Verbose: {}", msg);
        }
    }

    fn log_verbose(&self, msg: &str) {
        Self::print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        profile_name: String,
        mut credentials: Credentials,
        api_token: Option<String>,
        verbose: bool,
    ) -> Self {
        // Token restoration: skip when a token comes from the environment or
        // the command line (it has priority over the keyring).
        if api_token.is_none() && matches!(credentials.get_auth_mode(), AuthMode::StoredToken) {
            Self::print_verbose(verbose, "Checking for saved API token...");

            match Credentials::load(&profile_name) {
                Ok(loaded_creds) => {
                    credentials = loaded_creds;
                    Self::print_verbose(
                        verbose,
                        &format!("Credentials loaded for profile: {}", profile_name),
                    );
                }
                Err(_) => {
                    Self::print_verbose(
                        verbose,
                        &format!("No saved API token found for profile: {}", profile_name),
                    );
                }
            }
        } else {
            Self::print_verbose(verbose, "API token provided, skipping keyring lookup");
        }

        Self {
            config,
            config_path,
            profile_name,
            credentials,
            api_token,
            verbose,
        }
    }

    fn profile(&self) -> Result<&Profile, AppError> {
        self.config
            .get_profile(&self.profile_name)
            .ok_or_else(|| {
                ConfigError::UnknownProfile {
                    name: self.profile_name.clone(),
                }
                .into()
            })
    }

    fn base_client(&self) -> Result<OrgClient, AppError> {
        let profile = self.profile()?;
        validate_url(&profile.api_url)?;

        let mut client = match &self.api_token {
            Some(token) => OrgClient::with_api_token(profile.api_url.clone(), token.clone())?,
            None => OrgClient::new(profile.api_url.clone())?,
        };
        if client.api_token.is_none() {
            if let Some(token) = self.credentials.get_api_token() {
                client.set_session_token(token);
            }
        }
        Ok(client)
    }

    fn authed_client(&self) -> Result<OrgClient, AppError> {
        let client = self.base_client()?;
        if !client.is_authenticated() {
            return Err(CliError::AuthRequired {
                message: "No API token available".to_string(),
                hint: "'dialdesk auth login' or set DIALDESK_API_TOKEN".to_string(),
            }
            .into());
        }
        Ok(client)
    }

    fn list_context(&self) -> Result<ListContext, AppError> {
        let default_page_size = self
            .profile()?
            .page_size
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Ok(ListContext {
            default_page_size,
            verbose: self.verbose,
        })
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Auth { command } => {
                let profile = self.profile()?.clone();
                handle_auth(
                    command,
                    &profile,
                    &self.profile_name,
                    &self.credentials,
                    self.api_token.as_deref(),
                    self.verbose,
                )
                .await
            }
            Commands::Config { command } => self.handle_config_command(command),
            Commands::Agents { command } => {
                self.log_verbose("Dispatching agents command");
                handle_agents(command, self.authed_client()?, &self.list_context()?).await
            }
            Commands::Routines { command } => {
                self.log_verbose("Dispatching routines command");
                handle_routines(command, self.authed_client()?, &self.list_context()?).await
            }
            Commands::Users { command } => {
                self.log_verbose("Dispatching users command");
                handle_users(command, self.authed_client()?, &self.list_context()?).await
            }
            Commands::LeadGroups { command } => {
                self.log_verbose("Dispatching lead-groups command");
                handle_lead_groups(command, self.authed_client()?, &self.list_context()?).await
            }
            Commands::Voices { command } => {
                self.log_verbose("Dispatching voices command");
                handle_voices(command, self.authed_client()?, &self.list_context()?).await
            }
            Commands::Overview => handle_overview(self.authed_client()?, self.verbose).await,
        }
    }

    fn handle_config_command(&mut self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                println!(
                    "Default profile: {}",
                    self.config.default_profile.as_deref().unwrap_or("(none)")
                );
                let mut names: Vec<&String> = self.config.profiles.keys().collect();
                names.sort();
                for name in names {
                    let profile = &self.config.profiles[name];
                    let marker = if *name == self.profile_name { "*" } else { " " };
                    println!("{} [{}]", marker, name);
                    println!("    api_url = {}", profile.api_url);
                    if let Some(timeout) = profile.timeout_seconds {
                        println!("    timeout_seconds = {}", timeout);
                    }
                    if let Some(page_size) = profile.page_size {
                        println!("    page_size = {}", page_size);
                    }
                }
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.set_config_value(&key, &value)?;
                println!("✅ Set {} = {} (profile '{}')", key, value, self.profile_name);
                Ok(())
            }
        }
    }

    fn set_config_value(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let profile = self
            .config
            .profiles
            .get_mut(&self.profile_name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: self.profile_name.clone(),
            })?;

        match key {
            "api_url" => {
                validate_url(value)?;
                profile.api_url = value.to_string();
            }
            "page_size" => {
                let size = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&size| size > 0)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        field: "page_size".to_string(),
                        value: value.to_string(),
                        reason: "expected a positive integer".to_string(),
                    })?;
                profile.page_size = Some(size);
            }
            "timeout_seconds" => {
                let timeout =
                    value
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue {
                            field: "timeout_seconds".to_string(),
                            value: value.to_string(),
                            reason: "expected an integer".to_string(),
                        })?;
                profile.timeout_seconds = Some(timeout);
            }
            other => {
                return Err(ConfigError::InvalidValue {
                    field: other.to_string(),
                    value: value.to_string(),
                    reason: "unknown key (expected api_url, page_size, or timeout_seconds)"
                        .to_string(),
                }
                .into());
            }
        }

        self.config.save(self.config_path.clone())?;
        Ok(())
    }
}
