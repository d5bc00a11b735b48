use anyhow::Result;
use clap::Subcommand;
use serde_json::json;
use std::str::FromStr;
use tracing::info;

use chatsend::{BrowserType, ProfileManager};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Create a new profile
    Create {
        /// Profile name
        name: String,

        /// Browser type (chrome or firefox)
        #[arg(short, long, default_value = "chrome")]
        browser: String,
    },

    /// Delete a profile and its stored login
    Delete {
        /// Profile name
        name: String,
    },

    /// List all profiles, most recently used first
    List,
}

pub async fn handle_profile(command: ProfileCommands) -> Result<()> {
    let manager = ProfileManager::new()?;

    match command {
        ProfileCommands::Create { name, browser } => {
            info!("Creating profile: {} for {}", name, browser);
            let browser_type = BrowserType::from_str(&browser)?;
            let browser_name = format!("{browser_type:?}").to_lowercase();

            let path = manager.create_profile(&name, &browser_name)?;
            println!(
                "{}",
                json!({ "name": name, "browser": browser_name, "path": path })
            );
        }
        ProfileCommands::Delete { name } => {
            manager.delete_profile(&name)?;
            println!("{}", json!({ "name": name, "deleted": true }));
        }
        ProfileCommands::List => {
            let profiles = manager.list_profiles()?;
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
    }

    Ok(())
}
