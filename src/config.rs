//! Configuration management for oustdom.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Settings shared by all categories
    pub global: GlobalSettings,

    /// Blocklist categories, processed in order
    pub categories: Vec<CategoryConfig>,
}

/// Settings shared by all categories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Directory the per-category blocklist files are written to
    pub output_directory: String,

    /// Directory the statistics JSON files are written to
    pub stats_directory: String,

    /// HTTP timeout per source fetch, in seconds
    pub timeout_secs: u64,

    /// UTC offset (hours) used when formatting timestamps for display
    pub utc_offset_hours: i32,

    /// Title line of the header comment block written at the top of every
    /// blocklist file
    pub header_title: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            output_directory: "blocklist".to_string(),
            stats_directory: "blocklist/stats".to_string(),
            timeout_secs: 15,
            utc_offset_hours: 7,
            header_title: "oustdom - cumulative domain blocklists".to_string(),
        }
    }
}

/// One blocklist category: plain data, no behavior of its own
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CategoryConfig {
    /// Stable identifier (also the stats filename stem)
    pub id: String,

    /// Human-readable display name
    pub name: String,

    /// Short description used in stats and README output
    pub description: String,

    /// Output filename; empty means `<id>.txt`
    pub output_file: String,

    /// Substrings that tag a domain as priority (informational only)
    pub priority_keywords: Vec<String>,

    /// Sources to fetch, in order
    pub sources: Vec<SourceConfig>,
}

impl CategoryConfig {
    /// Resolved output filename for this category.
    pub fn output_file(&self) -> String {
        if self.output_file.is_empty() {
            format!("{}.txt", self.id)
        } else {
            self.output_file.clone()
        }
    }

    /// Sources that are currently enabled.
    pub fn enabled_sources(&self) -> Vec<&SourceConfig> {
        self.sources.iter().filter(|s| s.enabled).collect()
    }
}

/// One raw blocklist source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from YAML file, falling back to the built-in
    /// defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            info!("Config file {:?} not found, using defaults", path.as_ref());
            Ok(Self::default_with_categories())
        }
    }

    /// Built-in configuration with the default category set.
    ///
    /// `Config::default()` derives an empty category list (the serde
    /// default); this is the fully populated variant.
    pub fn default_with_categories() -> Self {
        Self {
            global: GlobalSettings::default(),
            categories: default_categories(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.global.output_directory.is_empty() {
            anyhow::bail!("output_directory must not be empty");
        }
        if self.global.stats_directory.is_empty() {
            anyhow::bail!("stats_directory must not be empty");
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.id.is_empty() {
                anyhow::bail!("Category id must not be empty");
            }
            if !seen.insert(category.id.as_str()) {
                anyhow::bail!("Duplicate category id '{}'", category.id);
            }

            for source in &category.sources {
                if source.enabled && !source.url.starts_with("https://") {
                    anyhow::bail!(
                        "Source '{}' in category '{}' must use HTTPS: {}",
                        source.name,
                        category.id,
                        source.url
                    );
                }
            }
        }

        Ok(())
    }

    /// Save configuration to YAML file atomically
    ///
    /// Uses tempfile + rename pattern to prevent corruption on crash.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let path = path.as_ref();
        let content = serde_yaml::to_string(self).with_context(|| "Failed to serialize config")?;

        let parent_dir = path.parent().unwrap_or(Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .context("Failed to create temporary file for config")?;

        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;

        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist config file: {:?}", path))?;

        Ok(())
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Ids of all configured categories, in processing order.
    pub fn category_ids(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.id.as_str()).collect()
    }

    /// Generate default config with comments
    pub fn generate_default_yaml() -> String {
        include_str!("../templates/config.yaml").to_string()
    }
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig {
            id: "gambling".to_string(),
            name: "Gambling".to_string(),
            description: "Gambling and betting domains".to_string(),
            output_file: String::new(),
            priority_keywords: ["casino", "poker", "slot", "togel", "bet"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sources: vec![
                SourceConfig {
                    name: "blocklistproject_gambling".to_string(),
                    url: "https://blocklistproject.github.io/Lists/gambling.txt".to_string(),
                    enabled: true,
                },
                SourceConfig {
                    name: "stevenblack_gambling".to_string(),
                    url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/alternates/gambling-only/hosts".to_string(),
                    enabled: true,
                },
            ],
        },
        CategoryConfig {
            id: "suspicious".to_string(),
            name: "Suspicious".to_string(),
            description: "Suspicious and newly observed domains".to_string(),
            output_file: String::new(),
            priority_keywords: Vec::new(),
            sources: vec![SourceConfig {
                name: "blackbook".to_string(),
                url: "https://raw.githubusercontent.com/stamparm/blackbook/master/blackbook.txt"
                    .to_string(),
                enabled: true,
            }],
        },
        CategoryConfig {
            id: "malicious".to_string(),
            name: "Malicious".to_string(),
            description: "Malware and phishing domains".to_string(),
            output_file: String::new(),
            priority_keywords: ["phish", "malware"].iter().map(|s| s.to_string()).collect(),
            sources: vec![
                SourceConfig {
                    name: "urlhaus".to_string(),
                    url: "https://urlhaus.abuse.ch/downloads/hostfile/".to_string(),
                    enabled: true,
                },
                SourceConfig {
                    name: "phishtank".to_string(),
                    url: "https://data.phishtank.com/data/online-valid.csv".to_string(),
                    enabled: true,
                },
                SourceConfig {
                    name: "openphish".to_string(),
                    url: "https://openphish.com/feed.txt".to_string(),
                    enabled: true,
                },
            ],
        },
        CategoryConfig {
            id: "adult".to_string(),
            name: "Adult".to_string(),
            description: "Adult content domains".to_string(),
            output_file: String::new(),
            priority_keywords: ["porn", "xxx", "sex"].iter().map(|s| s.to_string()).collect(),
            sources: vec![SourceConfig {
                name: "stevenblack_porn".to_string(),
                url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/alternates/porn-only/hosts".to_string(),
                enabled: true,
            }],
        },
    ]
}
