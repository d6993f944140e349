use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use inquire::Text;
use serde::{Deserialize, Serialize};

use crate::error::{InvoiceError, Result};

pub const DEFAULT_DATA_ROOT: &str = "~/Documents/Invoices";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub data_root: String,
    /// Payment instructions appended to the preview's note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_info: Option<String>,
    /// Line printed under the company name in the preview header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_root: DEFAULT_DATA_ROOT.to_string(),
            payment_info: None,
            tagline: Some("INNOVATE WITH DATA".to_string()),
        }
    }
}

impl AppSettings {
    pub fn root(&self) -> PathBuf {
        PathBuf::from(expand_home_dir(&self.data_root))
    }

    /// Where the snapshot lives.
    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("output")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root().join("templates")
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "invoice-generator", "app") {
        return proj_dirs.config_dir().join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

/// Reads settings from `path`, falling back to defaults when the file is absent.
pub fn load_settings(path: &Path) -> Result<AppSettings> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let content = fs::read_to_string(path).map_err(|e| InvoiceError::io(path, e))?;
    Ok(toml::from_str(&content)?)
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| InvoiceError::io(dir, e))?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    fs::write(path, toml_str).map_err(|e| InvoiceError::io(path, e))
}

pub fn setup_config_wizard(path: &Path) -> Result<AppSettings> {
    println!("\n⚙️  --- Configuration Setup ---");
    let current = load_settings(path)?;

    let data_root = Text::new("Root Data Directory:")
        .with_default(&current.data_root)
        .prompt()?;

    let info_default = current.payment_info.clone().unwrap_or_default();
    let payment_info =
        Text::new("Payment instructions for the note (use '\\n' for new lines, empty to skip):")
            .with_default(&info_default)
            .prompt()?;

    let settings = AppSettings {
        data_root,
        payment_info: if payment_info.trim().is_empty() {
            None
        } else {
            Some(payment_info.replace("\\n", "\n"))
        },
        tagline: current.tagline,
    };

    save_settings(path, &settings)?;
    println!("✅ Settings saved to {}", path.display());
    Ok(settings)
}

pub fn expand_home_dir(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen('~', &home, 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = AppSettings {
            data_root: "/srv/invoices".into(),
            payment_info: Some("Bank: Example\nAccount: 123".into()),
            tagline: None,
        };
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
        assert_eq!(settings.data_dir(), PathBuf::from("/srv/invoices/data"));
    }

    #[test]
    fn absolute_paths_are_not_expanded() {
        assert_eq!(expand_home_dir("/tmp/x"), "/tmp/x");
    }
}
