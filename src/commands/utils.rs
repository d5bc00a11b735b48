use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chatsend::config::{DEFAULT_TARGET_URL, SessionConfig};
use chatsend::{BrowserType, ProfileManager};

/// Browser options shared by the commands that open the chat application
#[derive(Args, Debug, Clone)]
pub struct BrowserArgs {
    /// Named profile under ~/.chatsend/profiles (created on first use)
    #[arg(short, long, conflicts_with = "user_data_dir")]
    pub profile: Option<String>,

    /// Browser user data directory to use as-is
    #[arg(long)]
    pub user_data_dir: Option<PathBuf>,

    /// Chrome profile directory inside the user data directory (e.g. "Default")
    #[arg(long)]
    pub profile_directory: Option<String>,

    /// Browser to use
    #[arg(short, long, default_value = "chrome")]
    pub browser: String,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Connect to a running WebDriver instead of starting one
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Chat application URL
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    pub url: String,

    /// Seconds to wait for the chat list after opening the page
    #[arg(long, default_value = "60")]
    pub ready_timeout: u64,
}

impl BrowserArgs {
    /// Map CLI flags onto a session configuration, resolving named profiles
    pub fn session_config(&self) -> Result<SessionConfig> {
        let browser = BrowserType::from_str(&self.browser)?;

        let user_data_dir = match (&self.profile, &self.user_data_dir) {
            (Some(name), _) => {
                let browser_name = format!("{browser:?}").to_lowercase();
                Some(ProfileManager::new()?.get_or_create_profile_path(name, &browser_name)?)
            }
            (None, dir) => dir.clone(),
        };

        let mut config = SessionConfig {
            browser,
            user_data_dir,
            profile_directory: self.profile_directory.clone(),
            headless: self.headless,
            webdriver_url: self.webdriver_url.clone(),
            target_url: self.url.clone(),
            ..SessionConfig::default()
        };
        config.timeouts.app_shell = Duration::from_secs(self.ready_timeout);
        config.validate()?;

        Ok(config)
    }
}
