//! Named browser profiles that keep the chat login between runs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Metadata about a browser profile
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileMetadata {
    /// Profile name
    pub name: String,
    /// Browser type (firefox, chrome)
    pub browser: String,
    /// When the profile was created
    pub created_at: DateTime<Utc>,
    /// When the profile was last used
    pub last_used: DateTime<Utc>,
}

/// Manages browser profiles for session persistence
pub struct ProfileManager {
    profiles_dir: PathBuf,
}

impl ProfileManager {
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Unable to determine home directory")?;
        Self::with_root(home_dir.join(".chatsend").join("profiles"))
    }

    pub fn with_root(profiles_dir: impl Into<PathBuf>) -> Result<Self> {
        let profiles_dir = profiles_dir.into();
        fs::create_dir_all(&profiles_dir).with_context(|| {
            format!("Failed to create profiles directory {}", profiles_dir.display())
        })?;
        Ok(ProfileManager { profiles_dir })
    }

    pub fn create_profile(&self, name: &str, browser: &str) -> Result<PathBuf> {
        Self::validate_name(name)?;
        let profile_path = self.profiles_dir.join(name);

        if profile_path.exists() {
            anyhow::bail!("Profile '{}' already exists", name);
        }

        fs::create_dir_all(&profile_path)?;

        let metadata = ProfileMetadata {
            name: name.to_string(),
            browser: browser.to_string(),
            created_at: Utc::now(),
            last_used: Utc::now(),
        };
        Self::write_metadata(&profile_path, &metadata)?;

        info!("Created profile '{}' for {}", name, browser);
        Ok(profile_path)
    }

    pub fn delete_profile(&self, name: &str) -> Result<()> {
        Self::validate_name(name)?;
        let profile_path = self.profiles_dir.join(name);

        if !profile_path.exists() {
            anyhow::bail!("Profile '{}' does not exist", name);
        }

        fs::remove_dir_all(&profile_path)?;
        info!("Deleted profile '{}'", name);
        Ok(())
    }

    pub fn list_profiles(&self) -> Result<Vec<ProfileMetadata>> {
        let mut profiles = Vec::new();

        for entry in fs::read_dir(&self.profiles_dir)? {
            let path = entry?.path();
            let metadata_path = path.join("metadata.json");

            if path.is_dir() && metadata_path.exists() {
                let metadata_json = fs::read_to_string(metadata_path)?;
                let metadata: ProfileMetadata = serde_json::from_str(&metadata_json)?;
                profiles.push(metadata);
            }
        }

        profiles.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        Ok(profiles)
    }

    /// Path of an existing profile; marks it as used
    pub fn get_profile_path(&self, name: &str) -> Result<PathBuf> {
        Self::validate_name(name)?;
        let profile_path = self.profiles_dir.join(name);

        if !profile_path.exists() {
            anyhow::bail!("Profile '{}' does not exist", name);
        }

        let metadata_path = profile_path.join("metadata.json");
        if metadata_path.exists() {
            let metadata_json = fs::read_to_string(&metadata_path)?;
            let mut metadata: ProfileMetadata = serde_json::from_str(&metadata_json)?;
            metadata.last_used = Utc::now();
            Self::write_metadata(&profile_path, &metadata)?;
        }

        Ok(profile_path)
    }

    /// Path of the profile, creating it on first use
    pub fn get_or_create_profile_path(&self, name: &str, browser: &str) -> Result<PathBuf> {
        if self.profiles_dir.join(name).exists() {
            self.get_profile_path(name)
        } else {
            debug!("Profile '{}' not found, creating it", name);
            self.create_profile(name, browser)
        }
    }

    fn write_metadata(profile_path: &Path, metadata: &ProfileMetadata) -> Result<()> {
        let metadata_json = serde_json::to_string_pretty(metadata)?;
        fs::write(profile_path.join("metadata.json"), metadata_json)?;
        Ok(())
    }

    /// Profile names become directory names
    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
        {
            anyhow::bail!("Invalid profile name: '{}'", name);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;
