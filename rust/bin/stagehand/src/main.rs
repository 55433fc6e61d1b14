//! `stagehand`: the page scaffolding CLI.
//!
//! Suggests table fields, renders DDL, keeps schema drafts and generates
//! pages either locally or through a stagehandd instance.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::generate::{GenerateArgs, Target};

/// Page scaffolding CLI.
#[derive(Parser, Debug)]
#[command(name = "stagehand", about = "Page scaffolding CLI")]
struct Cli {
    /// Path to client config file (default: ~/.stagehand/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Suggest fields, indexes and constraints for a table name.
    Suggest {
        /// Table name (e.g. produtos, usuarios).
        table: String,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the CREATE TABLE statement for a schema file.
    Sql {
        /// Schema JSON file.
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
    },

    /// Generate the page, components and API route for a schema file.
    Generate {
        /// Schema JSON file.
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
        /// Directory the page is created under.
        #[arg(long = "base-path")]
        base_path: String,
        /// stagehandd base URL (overrides the config file).
        #[arg(long, conflicts_with = "local_root")]
        server: Option<String>,
        /// Write into this local directory instead of a server.
        #[arg(long = "local-root")]
        local_root: Option<String>,
        /// Replace files that already exist.
        #[arg(long)]
        overwrite: bool,
    },

    /// Schema drafts.
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Edit a draft's fields.
    Fields {
        #[command(subcommand)]
        action: FieldsAction,
    },

    /// Show or change the client config.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective config.
    Show,
    /// Set config values.
    Set {
        #[arg(long)]
        server: Option<String>,
        #[arg(long = "timeout-secs")]
        timeout_secs: Option<u64>,
        #[arg(long = "assistant-url")]
        assistant_url: Option<String>,
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DraftAction {
    /// Save a schema file as a draft.
    Save {
        name: String,
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
    },
    /// Print a draft as JSON.
    Load { name: String },
    /// List drafts.
    List,
    /// Delete a draft.
    Rm { name: String },
}

#[derive(Subcommand, Debug)]
enum FieldsAction {
    /// Remove every field of a draft.
    Clear {
        name: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Ask the field assistant to fill a draft's fields.
    Generate {
        name: String,
        /// What the table holds, in plain words.
        #[arg(long)]
        context: String,
    },
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{} [y/N]: ", prompt);
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().eq_ignore_ascii_case("y"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let client_config = config::ClientConfig::load(&config_path)?;
    let db_path = client_config.to_service_config(None).resolve_db_path();

    match cli.command {
        Commands::Suggest { table, json } => {
            commands::schema::suggest(&table, json)?;
        }

        Commands::Sql { file } => {
            commands::schema::sql(&file)?;
        }

        Commands::Generate {
            file,
            base_path,
            server,
            local_root,
            overwrite,
        } => {
            let service = client_config.to_service_config(local_root.as_deref());
            let target = if local_root.is_some() {
                Target::Local
            } else {
                let server = server.as_deref().unwrap_or(&client_config.server);
                if server.is_empty() {
                    anyhow::bail!("No server configured. Pass --server <url> or --local-root <dir>.");
                }
                Target::Server(server)
            };
            let args = GenerateArgs {
                file: &file,
                base_path: &base_path,
                overwrite,
                target,
            };
            commands::generate::run(args, &service).await?;
        }

        Commands::Draft { action } => match action {
            DraftAction::Save { name, file } => commands::draft::save(&db_path, &name, &file)?,
            DraftAction::Load { name } => commands::draft::load(&db_path, &name)?,
            DraftAction::List => commands::draft::list(&db_path)?,
            DraftAction::Rm { name } => commands::draft::remove(&db_path, &name)?,
        },

        Commands::Fields { action } => match action {
            FieldsAction::Clear { name, yes } => {
                let mut prompt_error = None;
                commands::fields::clear(&db_path, &name, |count| {
                    if yes {
                        return true;
                    }
                    match confirm(&format!("Remove all {} fields of \"{}\"?", count, name)) {
                        Ok(answer) => answer,
                        Err(e) => {
                            prompt_error = Some(e);
                            false
                        }
                    }
                })?;
                if let Some(e) = prompt_error {
                    return Err(e);
                }
            }
            FieldsAction::Generate { name, context } => {
                commands::fields::generate(
                    &db_path,
                    &name,
                    &context,
                    &client_config.assistant_url,
                    client_config.timeout(),
                )
                .await?;
            }
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&client_config)?);
            }
            ConfigAction::Set {
                server,
                timeout_secs,
                assistant_url,
                data_dir,
            } => {
                let mut updated = client_config;
                if let Some(server) = server {
                    updated.server = server;
                }
                if let Some(secs) = timeout_secs {
                    if secs == 0 {
                        anyhow::bail!("timeout-secs must be greater than zero.");
                    }
                    updated.timeout_secs = secs;
                }
                if let Some(url) = assistant_url {
                    updated.assistant_url = url;
                }
                if let Some(dir) = data_dir {
                    updated.data_dir = dir;
                }
                updated.save(&config_path)?;
                println!("Config saved to {}", config_path.display());
            }
        },

        Commands::Version => {
            println!("stagehand cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
