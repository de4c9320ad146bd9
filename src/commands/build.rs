//! Build command implementation.

use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

use crate::config::{CategoryConfig, Config, GlobalSettings};
use crate::corpus;
use crate::error::OustdomError;
use crate::fetcher::{FetchResult, FetchStatus, Fetcher};
use crate::fs_abstraction::real_fs;
use crate::merger;
use crate::normalizer;
use crate::readme;
use crate::stats::{CategoryStats, CombinedStats, SourceReport};
use crate::utils::format_count_with_separator;

/// Run the build command
pub async fn run(category: Option<String>, no_combined: bool, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let targets: Vec<&CategoryConfig> = match category {
        Some(ref id) => {
            let found = config.category(id).ok_or_else(|| OustdomError::UnknownCategory {
                requested: id.clone(),
                available: config.category_ids().iter().map(|s| s.to_string()).collect(),
            })?;
            vec![found]
        }
        None => {
            if config.categories.is_empty() {
                return Err(OustdomError::NoCategories.into());
            }
            config.categories.iter().collect()
        }
    };

    let fetcher = Fetcher::new(config.global.timeout_secs)?;

    let mut all_stats = Vec::with_capacity(targets.len());
    for target in targets {
        let stats = build_category(&fetcher, &config.global, target).await?;
        all_stats.push(stats);
    }

    if !no_combined {
        let combined = CombinedStats::from_categories(&all_stats);
        let combined_path = Path::new(&config.global.stats_directory).join("combined.json");
        combined.save(&combined_path)?;
        info!("Saved combined statistics to {:?}", combined_path);

        readme::write_main_readme(
            &combined,
            Path::new("README.md"),
            config.global.utc_offset_hours,
        )?;
        info!("Generated main README");
    }

    let total_domains: usize = all_stats.iter().map(|s| s.merge.total_count).sum();
    println!();
    println!(
        "[OK] {} categories processed, {} total domains",
        all_stats.len(),
        format_count_with_separator(total_domains)
    );

    Ok(())
}

/// Build one category: load corpus, fetch, normalize, merge, persist.
async fn build_category(
    fetcher: &Fetcher,
    global: &GlobalSettings,
    category: &CategoryConfig,
) -> Result<CategoryStats> {
    info!("Building blocklist for category: {}", category.name);

    let output_dir = Path::new(&global.output_directory);
    let stats_dir = Path::new(&global.stats_directory);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;
    std::fs::create_dir_all(stats_dir)
        .with_context(|| format!("Failed to create stats directory {:?}", stats_dir))?;

    let output_path = output_dir.join(category.output_file());
    let existing = corpus::load(real_fs(), &output_path);

    let results = fetcher.fetch_sources(&category.enabled_sources()).await;
    let batch = collect_batch(category, &results);

    let (final_domains, merge_stats) = merger::merge(&existing, &batch.incoming, &batch.priority);

    let header = corpus::render_header(&global.header_title, &category.name);
    corpus::save(&output_path, &final_domains, &header)?;

    let stats = CategoryStats {
        category: category.id.clone(),
        name: category.name.clone(),
        description: category.description.clone(),
        last_updated: Utc::now(),
        output_file: category.output_file(),
        total_sources: category.enabled_sources().len(),
        successful_sources: batch.successful_sources,
        sources: batch.reports,
        merge: merge_stats,
    };
    stats.save(&stats_dir.join(format!("{}.json", category.id)))?;

    let category_readme_path = output_dir.join(format!("README_{}.md", category.id));
    std::fs::write(
        &category_readme_path,
        readme::category_readme(&stats, global.utc_offset_hours),
    )
    .with_context(|| format!("Failed to write category README: {:?}", category_readme_path))?;

    info!(
        "{} blocklist completed: {} domains ({} new this run)",
        category.name,
        format_count_with_separator(merge_stats.total_count),
        format_count_with_separator(merge_stats.newly_added_count)
    );

    Ok(stats)
}

/// Accumulated normalization outcome of one category's fetches.
struct Batch {
    incoming: HashSet<String>,
    priority: HashSet<String>,
    reports: BTreeMap<String, SourceReport>,
    successful_sources: usize,
}

/// Normalize each source's raw lines and fold them into one incoming batch.
///
/// Pure over the fetch results: a failed source contributes an empty
/// normalized set and an error report, nothing more.
fn collect_batch(category: &CategoryConfig, results: &[FetchResult]) -> Batch {
    let mut incoming = HashSet::new();
    let mut priority = HashSet::new();
    let mut reports = BTreeMap::new();
    let mut successful_sources = 0;

    for result in results {
        let (normalized, priority_hits) = normalizer::process_lines(
            result.lines.iter().map(String::as_str),
            &category.priority_keywords,
            Some(&result.name),
        );

        if result.status == FetchStatus::Success {
            successful_sources += 1;
        }

        reports.insert(
            result.name.clone(),
            SourceReport {
                url: result.url.clone(),
                status: result.status,
                total_raw: result.raw_count,
                total_normalized: normalized.len(),
                priority_count: priority_hits.len(),
                last_updated: result.fetched_at,
            },
        );

        incoming.extend(normalized);
        priority.extend(priority_hits);
    }

    Batch {
        incoming,
        priority,
        reports,
        successful_sources,
    }
}
