//! ICS CLI - manage Ingenuity Cloud Services bare metal servers.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ics::api::{
    ApiClient, ApiError, ConsoleKind, CredentialProvider, PowerAction, StaticToken,
    ValidationError, API_BASE_URL,
};
use ics::config::Config;
use ics::detail::{self, DetailOptions};
use ics::display;
use ics::inventory::{self, InventoryFilter};
use ics::order::{self, OrderDraft, OrderOptions, OrderOutcome};
use ics::resolve::{parse_service_id, resolve_server, resolve_ssh_key};
use ics::sshkey;

/// ICS CLI - manage Ingenuity Cloud Services bare metal servers.
#[derive(Parser)]
#[command(name = "ics-cli", version)]
#[command(about = "Manage Ingenuity Cloud Services bare metal servers")]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default is $HOME/.ics-cli.yaml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API key; overrides the key saved by `auth login`.
    #[arg(long, env = "ICS_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// API base URL.
    #[arg(long, env = "ICS_API_URL", global = true, default_value = API_BASE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authentication with the ICS API.
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Manage bare metal servers.
    Baremetal {
        #[command(subcommand)]
        command: BaremetalCommand,
    },

    /// Manage SSH keys.
    Sshkeys {
        #[command(subcommand)]
        command: SshKeyCommand,
    },

    /// Print the CLI version.
    Version,
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Log in with an API key.
    Login {
        /// API key (prompted for when omitted).
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Remove the saved API key.
    Logout,

    /// Check the connection to the API.
    Check,
}

#[derive(Subcommand)]
enum BaremetalCommand {
    /// List servers in the account.
    #[command(visible_alias = "ls")]
    List {
        /// Group servers by datacenter.
        #[arg(short, long)]
        display: bool,

        /// Only show servers whose datacenter contains this text.
        #[arg(short, long, default_value = "")]
        site: String,
    },

    /// Show server details.
    #[command(visible_alias = "status")]
    Get {
        service_id: String,

        /// Show the root password.
        #[arg(short, long)]
        password: bool,

        /// Skip the power status lookup.
        #[arg(short = 's', long = "no-power")]
        no_power: bool,
    },

    /// Power on a server.
    Poweron {
        service_id: String,

        /// Don't prompt for confirmation.
        #[arg(short, long)]
        dont: bool,
    },

    /// Power off a server.
    Poweroff {
        service_id: String,

        /// Don't prompt for confirmation.
        #[arg(short, long)]
        dont: bool,
    },

    /// Reboot a server.
    Reboot {
        service_id: String,

        /// Don't prompt for confirmation.
        #[arg(short, long)]
        dont: bool,
    },

    /// Reinstall the operating system. Erases all data on the server.
    Reinstall {
        service_id: String,

        /// Operating system image ID (see `oslist`).
        #[arg(short, long)]
        os: String,

        /// Reason for the reinstall.
        #[arg(short, long, default_value = "")]
        reason: String,

        /// Don't prompt for confirmation.
        #[arg(short, long)]
        dont: bool,
    },

    /// List operating systems installable on a server.
    Oslist { service_id: String },

    /// Get a Serial-over-LAN console link.
    Sol {
        service_id: String,

        /// Don't open the link in a browser.
        #[arg(short = 'd', long = "no-browser")]
        no_browser: bool,
    },

    /// Get an iKVM console link.
    Ikvm {
        service_id: String,

        /// Don't open the link in a browser.
        #[arg(short = 'd', long = "no-browser")]
        no_browser: bool,
    },

    /// Boot a server from a custom iPXE script.
    #[command(visible_alias = "pxe")]
    Custompxe {
        service_id: String,

        /// iPXE script URL.
        #[arg(short, long)]
        url: String,
    },

    /// Set the friendly name of a server.
    Friendlyname {
        service_id: String,

        /// New friendly name.
        #[arg(short, long)]
        name: String,
    },

    /// Browse inventory and order servers.
    Deploy {
        #[command(subcommand)]
        command: DeployCommand,
    },
}

#[derive(Subcommand)]
enum DeployCommand {
    /// List available inventory grouped by datacenter and server type.
    ListInventory {
        /// Only this datacenter (e.g. NYC1).
        #[arg(long, default_value = "")]
        datacenter: String,

        /// Only this server type (e.g. c1.small).
        #[arg(long, default_value = "")]
        sku: String,

        /// Minimum monthly price.
        #[arg(long)]
        min_price: Option<String>,

        /// Maximum monthly price.
        #[arg(long)]
        max_price: Option<String>,
    },

    /// List add-ons available for a server type in a datacenter.
    ListAddons {
        /// Server type.
        #[arg(long)]
        sku: String,

        /// Datacenter.
        #[arg(long)]
        datacenter: String,
    },

    /// Order new servers.
    Create {
        /// Server type (e.g. c1.small).
        #[arg(long, default_value = "")]
        sku: String,

        /// Datacenter (e.g. NYC1).
        #[arg(long, default_value = "")]
        datacenter: String,

        /// Operating system product code (e.g. DEBIAN_12).
        #[arg(long, default_value = "")]
        os: String,

        /// Number of servers.
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// License product code.
        #[arg(long, default_value = "")]
        license: String,

        /// Additional bandwidth in TB.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        bandwidth: i64,

        /// Support level product code.
        #[arg(long, default_value = "")]
        support: String,

        /// Comma-separated SSH key names.
        #[arg(long, value_delimiter = ',')]
        ssh_keys: Vec<String>,
    },
}

#[derive(Subcommand)]
enum SshKeyCommand {
    /// List SSH keys.
    #[command(visible_alias = "ls")]
    List,

    /// Show an SSH key.
    Get { name: String },

    /// Add an SSH key.
    Add {
        /// Name of the key.
        #[arg(short, long)]
        name: String,

        /// Public key.
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        key: Option<String>,

        /// File containing the public key.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete an SSH key.
    Delete { name: String },

    /// Rename an SSH key.
    Rename {
        name: String,

        /// New name.
        #[arg(short, long = "name", id = "new_name")]
        new_name: String,
    },

    /// Assign an SSH key to a server.
    Assign {
        name: String,

        /// Service ID of the server.
        #[arg(short, long)]
        server: String,
    },

    /// Remove an SSH key from a server.
    Unassign {
        name: String,

        /// Service ID of the server.
        #[arg(short, long)]
        server: String,
    },
}

/// Per-invocation settings shared by all handlers.
struct Session {
    config_path: PathBuf,
    config: Config,
    api_key: Option<String>,
    api_url: String,
}

impl Session {
    fn load(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::default_path()?,
        };
        let config = Config::load(&config_path)?;

        Ok(Self {
            config_path,
            config,
            api_key: cli.api_key.clone().filter(|k| !k.trim().is_empty()),
            api_url: cli.api_url.clone(),
        })
    }

    /// Client authenticated with the flag/env key, falling back to the config file.
    fn client(&self) -> Result<ApiClient> {
        let credentials: Arc<dyn CredentialProvider> = match &self.api_key {
            Some(key) => Arc::new(StaticToken::new(key.clone())),
            None => Arc::new(self.config.clone()),
        };
        self.client_with(credentials)
    }

    fn client_with(&self, credentials: impl CredentialProvider + 'static) -> Result<ApiClient> {
        ApiClient::with_base_url(self.api_url.clone(), credentials)
            .context("Failed to create API client")
    }
}

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Read one line from the user; `None` if nothing could be read.
///
/// Uses a dialoguer prompt on a terminal. Otherwise the prompt goes to stderr and
/// the answer is read from stdin, so piped answers work.
fn prompt_line(prompt: &str) -> Option<String> {
    if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
        return Input::<String>::with_theme(&theme())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .ok();
    }

    eprint!("{prompt}: ");
    let _ = std::io::stderr().flush();
    read_answer(&mut std::io::stdin().lock())
}

/// One line from `reader` without its line ending; `None` on EOF or read failure.
fn read_answer(reader: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            debug!(error = %e, "Failed to read answer");
            None
        }
    }
}

fn confirm(prompt: &str) -> bool {
    is_yes(prompt_line(&format!("{prompt} (y/N)")))
}

fn is_yes(answer: Option<String>) -> bool {
    answer.as_deref().is_some_and(order::is_affirmative)
}

async fn resolve(client: &ApiClient, service_id: &str) -> Result<String> {
    let service_id = parse_service_id(service_id)?;
    Ok(resolve_server(client, service_id).await?)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut session = Session::load(&cli)?;
    debug!(config = %session.config_path.display(), api_url = %session.api_url, "Session loaded");

    match cli.command {
        Commands::Auth { command } => run_auth(&mut session, command).await,
        Commands::Baremetal { command } => run_baremetal(&session, command).await,
        Commands::Sshkeys { command } => run_sshkeys(&session, command).await,
        Commands::Version => {
            println!("ics-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

// ============================================================================
// auth
// ============================================================================

async fn run_auth(session: &mut Session, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login { key } => {
            let key = match key {
                Some(key) => key,
                None => Password::with_theme(&theme())
                    .with_prompt("Enter your Ingenuity Cloud Services API key")
                    .interact()
                    .context("Failed to read API key")?,
            };
            let key = key.trim().to_string();
            if key.is_empty() {
                return Err(ValidationError::InvalidArgument("API key must not be empty".into()).into());
            }

            println!("Verifying API key...");
            let client = session.client_with(StaticToken::new(key.clone()))?;
            let user = match client.user_details().await {
                Ok(user) => user,
                Err(ApiError::InvalidCredentials) => {
                    anyhow::bail!("Invalid API key. Authentication failed.")
                }
                Err(e) => return Err(e.into()),
            };

            session.config.api_key = key;
            session
                .config
                .save(&session.config_path)
                .context("Error saving API key to config")?;

            let username = user.user_profile.username;
            if username.is_empty() {
                display::print_success("Successfully logged in to Ingenuity Cloud Services!");
            } else {
                display::print_success(&format!("Successfully logged in as {username}"));
            }
        }

        AuthCommand::Logout => {
            if session.config.logout() {
                session
                    .config
                    .save(&session.config_path)
                    .context("Error removing API key from configuration")?;
                display::print_success("Successfully logged out from Ingenuity Cloud Services API");
            } else {
                display::print_info("You are not currently logged in");
            }
        }

        AuthCommand::Check => {
            println!("Checking connection to Ingenuity Cloud Services API...");
            match session.client()?.user_details().await {
                Ok(user) => display::print_success(&format!(
                    "Connected as {}",
                    user.user_profile.username
                )),
                Err(ApiError::Unauthenticated) => {
                    display::print_warning("Not logged in. Please run 'ics-cli auth login' to authenticate.");
                }
                Err(ApiError::InvalidCredentials) => display::print_warning(
                    "API key is invalid or expired. Please run 'ics-cli auth login' to authenticate.",
                ),
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

// ============================================================================
// baremetal
// ============================================================================

async fn run_baremetal(session: &Session, command: BaremetalCommand) -> Result<()> {
    let client = session.client()?;

    match command {
        BaremetalCommand::List {
            display: by_datacenter,
            site,
        } => {
            let servers = client.list_servers().await?;
            if servers.is_empty() {
                println!("No servers found in your account.");
                return Ok(());
            }

            let servers = display::servers_at_site(&servers, &site);
            if by_datacenter {
                display::print_servers_by_datacenter(&servers);
            } else {
                display::print_servers(&servers);
            }
        }

        BaremetalCommand::Get {
            service_id,
            password,
            no_power,
        } => {
            let resource_id = resolve(&client, &service_id).await?;
            let options = DetailOptions {
                show_password: password,
                show_power: !no_power,
            };
            let view = detail::compose(&client, &resource_id, options).await?;
            display::print_server_detail(&view);
        }

        BaremetalCommand::Poweron { service_id, dont } => {
            power(&client, &service_id, PowerAction::On, dont).await?;
        }
        BaremetalCommand::Poweroff { service_id, dont } => {
            power(&client, &service_id, PowerAction::Off, dont).await?;
        }
        BaremetalCommand::Reboot { service_id, dont } => {
            power(&client, &service_id, PowerAction::Reboot, dont).await?;
        }

        BaremetalCommand::Reinstall {
            service_id,
            os,
            reason,
            dont,
        } => {
            let resource_id = resolve(&client, &service_id).await?;

            if !dont {
                let typed = prompt_line(
                    "Are you sure you want to perform an OS reinstall on the server? Re-enter the Service ID to confirm",
                );
                if typed.as_deref().map(str::trim) != Some(service_id.trim()) {
                    println!("Service ID does not match. Aborting.");
                    return Ok(());
                }
                if !confirm("This action is irreversible and will erase all data on the target server. Are you sure?") {
                    println!("No user confirmation. Aborting.");
                    return Ok(());
                }
            }

            if client.reinstall(&resource_id, &os, &reason).await? {
                display::print_success(
                    "Successfully started a reinstall on the server. Please allow 10-15 minutes for the server to be reinstalled.",
                );
            } else {
                display::print_warning("Failed to reinstall the server. Please try again.");
            }
        }

        BaremetalCommand::Oslist { service_id } => {
            let resource_id = resolve(&client, &service_id).await?;
            let systems = client.os_list(&resource_id).await?;
            if systems.is_empty() {
                println!("No available Operating Systems found.");
            } else {
                display::print_os_list(&systems);
            }
        }

        BaremetalCommand::Sol {
            service_id,
            no_browser,
        } => console(&client, &service_id, ConsoleKind::Sol, no_browser).await?,
        BaremetalCommand::Ikvm {
            service_id,
            no_browser,
        } => console(&client, &service_id, ConsoleKind::Ikvm, no_browser).await?,

        BaremetalCommand::Custompxe { service_id, url } => {
            let resource_id = resolve(&client, &service_id).await?;
            client.set_pxe_url(&resource_id, &url).await?;
            display::print_success(
                "Successfully updated the server with custom PXE URL and requested a reboot",
            );
        }

        BaremetalCommand::Friendlyname { service_id, name } => {
            let resource_id = resolve(&client, &service_id).await?;
            client.set_friendly_name(&resource_id, &name).await?;
            display::print_success("Successfully updated the friendly name of the server.");
        }

        BaremetalCommand::Deploy { command } => run_deploy(&client, command).await?,
    }
    Ok(())
}

async fn power(client: &ApiClient, service_id: &str, action: PowerAction, dont: bool) -> Result<()> {
    let resource_id = resolve(client, service_id).await?;

    if !dont && !confirm(&format!("Are you sure you want to {action} the server?")) {
        println!("Aborting.");
        return Ok(());
    }

    if client.power(&resource_id, action).await? {
        display::print_success(&format!("Successfully sent {action} to the server."));
    } else {
        display::print_warning(&format!("Failed to {action} the server. Please try again."));
    }
    Ok(())
}

async fn console(client: &ApiClient, service_id: &str, kind: ConsoleKind, no_browser: bool) -> Result<()> {
    let resource_id = resolve(client, service_id).await?;
    let link = client.remote_console(&resource_id, kind).await?;
    println!("{} {link}", format!("{kind} Access Link:").blue().bold());

    if !no_browser {
        println!("Opening {kind} access link in your default browser...");
        if let Err(e) = open::that(&link) {
            display::print_warning(&format!("Error opening browser: {e}"));
        }
    }
    Ok(())
}

fn parse_price_flag(flag: &str, value: Option<&str>) -> Result<Option<f64>, ValidationError> {
    value
        .map(|raw| {
            inventory::parse_price(raw)
                .ok_or_else(|| ValidationError::InvalidArgument(format!("Invalid {flag} value: {raw}")))
        })
        .transpose()
}

async fn run_deploy(client: &ApiClient, command: DeployCommand) -> Result<()> {
    match command {
        DeployCommand::ListInventory {
            datacenter,
            sku,
            min_price,
            max_price,
        } => {
            let filter = InventoryFilter {
                location: datacenter,
                sku,
                min_price: parse_price_flag("min-price", min_price.as_deref())?,
                max_price: parse_price_flag("max-price", max_price.as_deref())?,
            };

            let units = client.fetch_inventory().await?;
            let groups = inventory::aggregate(&units, &filter);
            if groups.is_empty() {
                println!("No inventory available.");
            } else {
                display::print_inventory(&groups);
            }
        }

        DeployCommand::ListAddons { sku, datacenter } => {
            let catalog = client.list_addons(&sku, &datacenter).await?;
            display::print_addons(&catalog);
        }

        DeployCommand::Create {
            sku,
            datacenter,
            os,
            quantity,
            license,
            bandwidth,
            support,
            ssh_keys,
        } => {
            let options = OrderOptions {
                sku,
                location: datacenter,
                os_code: os,
                quantity,
                license,
                bandwidth_tb: bandwidth,
                support,
                ssh_key_labels: ssh_keys,
            };
            let draft = order::build_draft(client, &options).await?;

            let mut confirmation = |draft: &OrderDraft| {
                display::print_order_draft(draft);
                println!();
                prompt_line("Are you sure you want to place this order? (y/N)")
            };
            match order::submit(client, draft, &mut confirmation).await? {
                OrderOutcome::Placed(service_ids) => {
                    display::print_success("Order placed successfully");
                    println!("Service IDs: {service_ids:?}");
                    println!("Services in this order will be provisioned within 60 minutes.");
                }
                OrderOutcome::Cancelled => {
                    println!("{}", "Order cancelled, you have not been charged.".red());
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// sshkeys
// ============================================================================

async fn run_sshkeys(session: &Session, command: SshKeyCommand) -> Result<()> {
    let client = session.client()?;

    match command {
        SshKeyCommand::List => {
            let keys = client.list_ssh_keys().await?;
            if keys.is_empty() {
                println!("No SSH Keys found in your account.");
            } else {
                display::print_ssh_keys(&keys);
            }
        }

        SshKeyCommand::Get { name } => {
            let key = resolve_ssh_key(&client, &name).await?;
            display::print_ssh_key(&key);
        }

        SshKeyCommand::Add { name, key, file } => {
            let raw = match (key, file) {
                (Some(key), _) => key,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Error reading SSH key file {}", path.display()))?,
                (None, None) => {
                    return Err(ValidationError::InvalidArgument(
                        "Either SSH key (--key) or key file (--file) is required".into(),
                    )
                    .into())
                }
            };

            let id = client.add_ssh_key(&name, &sshkey::clean_public_key(&raw)).await?;
            debug!(id, "SSH key created");
            display::print_success("Successfully added SSH Key");
        }

        SshKeyCommand::Delete { name } => {
            let key = resolve_ssh_key(&client, &name).await?;
            client.delete_ssh_key(key.id).await?;
            display::print_success("Successfully deleted SSH Key");
        }

        SshKeyCommand::Rename { name, new_name } => {
            let key = resolve_ssh_key(&client, &name).await?;
            client.rename_ssh_key(key.id, &new_name).await?;
            display::print_success("Successfully renamed SSH Key");
        }

        SshKeyCommand::Assign { name, server } => {
            let resource_id = resolve(&client, &server).await?;
            let key = resolve_ssh_key(&client, &name).await?;
            if sshkey::assign_key(&client, &resource_id, key.id).await? {
                display::print_success(
                    "Successfully assigned SSH Key to server. The SSH Key will be available after the next reinstall.",
                );
            } else {
                display::print_warning("The API did not confirm the SSH Key assignment.");
            }
        }

        SshKeyCommand::Unassign { name, server } => {
            let resource_id = resolve(&client, &server).await?;
            let key = resolve_ssh_key(&client, &name).await?;
            client.unassign_ssh_keys(&resource_id, &[key.id]).await?;
            display::print_success(
                "Successfully unassigned SSH Key from server. The SSH Key will be removed after the next reinstall.",
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_key_list() {
        let cli = Cli::try_parse_from([
            "ics-cli",
            "baremetal",
            "deploy",
            "create",
            "--sku",
            "c1.small",
            "--datacenter",
            "NYC1",
            "--os",
            "DEBIAN_12",
            "--ssh-keys",
            "laptop,ci",
        ])
        .unwrap();

        match cli.command {
            Commands::Baremetal {
                command: BaremetalCommand::Deploy {
                    command: DeployCommand::Create { ssh_keys, quantity, .. },
                },
            } => {
                assert_eq!(ssh_keys, vec!["laptop", "ci"]);
                assert_eq!(quantity, 1);
            }
            _ => panic!("expected deploy create"),
        }
    }

    #[test]
    fn test_parse_get_flags() {
        let cli = Cli::try_parse_from(["ics-cli", "baremetal", "get", "123456", "-p", "-s"]).unwrap();
        match cli.command {
            Commands::Baremetal {
                command:
                    BaremetalCommand::Get {
                        service_id,
                        password,
                        no_power,
                    },
            } => {
                assert_eq!(service_id, "123456");
                assert!(password);
                assert!(no_power);
            }
            _ => panic!("expected baremetal get"),
        }
    }

    #[test]
    fn test_piped_answer_is_read_from_first_line() {
        let mut input = std::io::Cursor::new("y\nignored\n");
        let answer = read_answer(&mut input);
        assert_eq!(answer.as_deref(), Some("y"));
        assert!(is_yes(answer));

        let mut input = std::io::Cursor::new("YES\r\n");
        assert!(is_yes(read_answer(&mut input)));
    }

    #[test]
    fn test_piped_refusals_and_eof_decline() {
        for raw in ["n\n", "\n", "nope\n"] {
            let mut input = std::io::Cursor::new(raw);
            assert!(!is_yes(read_answer(&mut input)), "{raw:?}");
        }

        let mut empty = std::io::Cursor::new("");
        assert_eq!(read_answer(&mut empty), None);
        assert!(!is_yes(None));
    }

    #[test]
    fn test_parse_price_flag() {
        assert_eq!(parse_price_flag("min-price", None), Ok(None));
        assert_eq!(parse_price_flag("min-price", Some("100")), Ok(Some(100.0)));
        assert!(matches!(
            parse_price_flag("max-price", Some("cheap")),
            Err(ValidationError::InvalidArgument(_))
        ));
    }
}
