// CLI module for administrative operations requiring database access

pub mod users;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Site user registration and authentication service
#[derive(Parser, Debug)]
#[command(name = "siteuser-auth")]
#[command(about = "Site user registration and authentication service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Register a new user
    Register {
        #[arg(long)]
        username: String,

        /// Prompted for on stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Grant a role to an existing user
    GrantRole {
        #[arg(long)]
        username: String,

        #[arg(long)]
        role: String,
    },

    /// List every registered user with roles and status flags
    ListUsers,
}

/// Execute an administrative CLI command
///
/// `Serve` is handled by main and is a no-op here.
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => {}
        Commands::Register { username, password } => {
            let password = match password {
                Some(password) => password,
                None => users::prompt_password()?,
            };
            users::register_user(&app_data.auth_service, &username, &password).await?;
        }
        Commands::GrantRole { username, role } => {
            users::grant_role(&app_data.auth_service, &username, &role).await?;
        }
        Commands::ListUsers => {
            users::list_users(&app_data.auth_service).await?;
        }
    }

    Ok(())
}
