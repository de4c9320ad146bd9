//! README generation from build statistics.

use anyhow::{Context, Result};
use std::path::Path;

use crate::fetcher::FetchStatus;
use crate::stats::{CategoryStats, CombinedStats};
use crate::utils::{format_count_with_separator, format_timestamp};

/// Render the README for a single category.
pub fn category_readme(stats: &CategoryStats, utc_offset_hours: i32) -> String {
    let last_updated = format_timestamp(stats.last_updated, utc_offset_hours);
    let mut content = format!(
        "# {} Domain Blocklist\n\n\
         {}\n\n\
         This list is cumulative; domains are only added and never removed.\n\n\
         ## Statistics\n\n\
         - **Last Updated**: {}\n\
         - **Total Unique Domains**: {}\n\
         - **Domains Added in Last Run**: {}\n\
         - **Sources**: {}/{} active\n\n\
         ## Files\n\n\
         - [`{}`]({}) - Main blocklist file (cumulative)\n\
         - [`stats/{}.json`](stats/{}.json) - Detailed statistics\n\n\
         ## Source Breakdown\n\n\
         | Source | Status | Raw Entries | Normalized | Last Updated |\n\
         |--------|--------|-------------|------------|--------------|\n",
        stats.name,
        stats.description,
        last_updated,
        format_count_with_separator(stats.merge.total_count),
        format_count_with_separator(stats.merge.newly_added_count),
        stats.successful_sources,
        stats.total_sources,
        stats.output_file,
        stats.output_file,
        stats.category,
        stats.category,
    );

    for (source_name, report) in &stats.sources {
        let status = match report.status {
            FetchStatus::Success => "ok",
            FetchStatus::Error => "failed",
        };
        content.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            source_name,
            status,
            format_count_with_separator(report.total_raw),
            format_count_with_separator(report.total_normalized),
            format_timestamp(report.last_updated, utc_offset_hours),
        ));
    }

    content.push_str(&format!(
        "\n## Technical Details\n\n\
         - **Format**: Plain text, one domain per line\n\
         - **Encoding**: UTF-8\n\
         - **Sorting**: Alphabetical order\n\
         - **Deduplication**: Automatic removal of duplicates\n\
         - **Cumulative**: Domains are never removed, only added\n\n\
         ---\n\n\
         *Last updated: {}*\n",
        last_updated
    ));

    content
}

/// Render the main project README from combined statistics.
pub fn main_readme(combined: &CombinedStats, utc_offset_hours: i32) -> String {
    let last_updated = format_timestamp(combined.last_updated, utc_offset_hours);
    let mut content = format!(
        "# oustdom\n\n\
         Cumulative domain blocklists aggregated from public sources, one\n\
         normalized and deduplicated list per category.\n\n\
         ## Overview Statistics\n\n\
         - **Last Updated**: {}\n\
         - **Total Categories**: {}\n\
         - **Total Domains**: {}\n\
         - **Total Sources**: {}\n\
         - **Active Sources**: {}\n\n\
         ## Available Categories\n\n\
         | Category | Domains | Sources | Status | File |\n\
         |----------|---------|---------|--------|------|\n",
        last_updated,
        combined.total_categories,
        format_count_with_separator(combined.summary.total_domains),
        combined.summary.total_sources,
        combined.summary.successful_sources,
    );

    for summary in combined.categories.values() {
        let status = if summary.successful_sources > 0 {
            "Active"
        } else {
            "Inactive"
        };
        content.push_str(&format!(
            "| {} | {} | {}/{} | {} | [`{}`](blocklist/{}) |\n",
            summary.name,
            format_count_with_separator(summary.total_domains),
            summary.successful_sources,
            summary.sources,
            status,
            summary.output_file,
            summary.output_file,
        ));
    }

    content.push_str(&format!(
        "\n---\n\n*Last updated: {}*\n*Generated automatically by oustdom*\n",
        last_updated
    ));

    content
}

/// Write the main README to disk.
pub fn write_main_readme(
    combined: &CombinedStats,
    path: &Path,
    utc_offset_hours: i32,
) -> Result<()> {
    let content = main_readme(combined, utc_offset_hours);
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write README: {:?}", path))?;
    Ok(())
}
