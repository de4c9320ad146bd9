//! Statistics persistence for oustdom.
//!
//! One JSON file per category plus a combined file, rewritten after every
//! build. These files feed the generated READMEs and are the machine
//! readable record of each run.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::fetcher::FetchStatus;
use crate::merger::MergeStats;

/// Per-source outcome of one build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub url: String,
    pub status: FetchStatus,
    /// Raw lines fetched before normalization
    pub total_raw: usize,
    /// Valid domains after normalization
    pub total_normalized: usize,
    /// Normalized domains matching the category's priority keywords
    pub priority_count: usize,
    pub last_updated: DateTime<Utc>,
}

/// Full statistics for one category build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub name: String,
    pub description: String,
    pub last_updated: DateTime<Utc>,
    pub output_file: String,
    pub total_sources: usize,
    pub successful_sources: usize,
    pub sources: BTreeMap<String, SourceReport>,
    #[serde(flatten)]
    pub merge: MergeStats,
}

impl CategoryStats {
    /// Save statistics to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Summary of one category inside the combined statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub description: String,
    pub total_domains: usize,
    pub sources: usize,
    pub successful_sources: usize,
    pub last_updated: DateTime<Utc>,
    pub output_file: String,
}

/// Totals across all categories
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_domains: usize,
    pub total_sources: usize,
    pub successful_sources: usize,
}

/// Combined statistics across all categories of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedStats {
    pub last_updated: DateTime<Utc>,
    pub total_categories: usize,
    pub categories: BTreeMap<String, CategorySummary>,
    pub summary: Summary,
}

impl CombinedStats {
    /// Roll per-category statistics up into the combined shape
    pub fn from_categories(stats: &[CategoryStats]) -> Self {
        let mut categories = BTreeMap::new();
        let mut summary = Summary::default();

        for s in stats {
            categories.insert(
                s.category.clone(),
                CategorySummary {
                    name: s.name.clone(),
                    description: s.description.clone(),
                    total_domains: s.merge.total_count,
                    sources: s.total_sources,
                    successful_sources: s.successful_sources,
                    last_updated: s.last_updated,
                    output_file: s.output_file.clone(),
                },
            );
            summary.total_domains += s.merge.total_count;
            summary.total_sources += s.total_sources;
            summary.successful_sources += s.successful_sources;
        }

        Self {
            last_updated: Utc::now(),
            total_categories: stats.len(),
            categories,
            summary,
        }
    }

    /// Save combined statistics to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_stats(category: &str, total: usize, sources: usize, successful: usize) -> CategoryStats {
        CategoryStats {
            category: category.to_string(),
            name: category.to_uppercase(),
            description: format!("{} domains", category),
            last_updated: Utc::now(),
            output_file: format!("{}.txt", category),
            total_sources: sources,
            successful_sources: successful,
            sources: BTreeMap::new(),
            merge: MergeStats {
                existing_count: total / 2,
                new_count: total / 2,
                newly_added_count: total - total / 2,
                total_count: total,
                priority_count: 0,
            },
        }
    }

    #[test]
    fn test_merge_stats_are_flattened() {
        let stats = sample_stats("adult", 100, 2, 2);
        let json = serde_json::to_string(&stats).unwrap();
        // MergeStats fields appear at the top level, not nested
        assert!(json.contains("\"total_count\":100"));
        assert!(!json.contains("\"merge\""));
    }

    #[test]
    fn test_category_stats_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats").join("adult.json");

        let stats = sample_stats("adult", 42, 3, 2);
        stats.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: CategoryStats = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.category, "adult");
        assert_eq!(parsed.merge.total_count, 42);
        assert_eq!(parsed.successful_sources, 2);
    }

    #[test]
    fn test_combined_totals() {
        let all = vec![
            sample_stats("gambling", 100, 2, 2),
            sample_stats("adult", 50, 1, 0),
        ];
        let combined = CombinedStats::from_categories(&all);

        assert_eq!(combined.total_categories, 2);
        assert_eq!(combined.summary.total_domains, 150);
        assert_eq!(combined.summary.total_sources, 3);
        assert_eq!(combined.summary.successful_sources, 2);
        assert!(combined.categories.contains_key("gambling"));
        assert!(combined.categories.contains_key("adult"));
    }

    #[test]
    fn test_combined_empty() {
        let combined = CombinedStats::from_categories(&[]);
        assert_eq!(combined.total_categories, 0);
        assert_eq!(combined.summary.total_domains, 0);
        assert!(combined.categories.is_empty());
    }

    #[test]
    fn test_combined_save_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep").join("stats").join("combined.json");

        let combined = CombinedStats::from_categories(&[sample_stats("adult", 10, 1, 1)]);
        combined.save(&path).unwrap();

        assert!(path.exists());
        let content = fs::read_to_string(&path).unwrap();
        let parsed: CombinedStats = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.summary.total_domains, 10);
    }
}
