//! Corpus persistence: the blocklist file IS the accumulated domain set.
//!
//! Each category's output file is loaded at the start of a run, extended by
//! the newly fetched batch and rewritten in full. Domains are never removed
//! from a persisted file.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::fs_abstraction::FileSystem;
use crate::normalizer::is_valid_domain;
use crate::utils::format_count_with_separator;

/// Load the persisted corpus for a category.
///
/// A missing or unreadable file is an empty corpus, not an error: the run
/// proceeds as a fresh build. Blank lines and anything that does not
/// satisfy the canonical grammar (the descriptive header block, stray
/// junk) are ignored; the header is presentation, not corpus data.
pub fn load(fs: &dyn FileSystem, path: &Path) -> HashSet<String> {
    let content = match fs.read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("File {:?} not found. Starting fresh.", path);
            return HashSet::new();
        }
        Err(e) => {
            warn!("Could not read existing file {:?}: {}. Starting fresh.", path, e);
            return HashSet::new();
        }
    };

    let domains: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_valid_domain(line))
        .map(|line| line.to_string())
        .collect();

    info!(
        "Loaded {} existing domains from {:?}",
        format_count_with_separator(domains.len()),
        path
    );

    domains
}

/// Render the descriptive header block written above the domain lines.
///
/// The header carries no parseable data; [`load`] skips it on the way back
/// in.
pub fn render_header(title: &str, category_name: &str) -> String {
    format!("/**\n{}\nCategory: {}\n**/\n", title, category_name)
}

/// Persist the full corpus, header first, one domain per line.
///
/// The write is atomic (tempfile + rename) so a crash mid-run can never
/// truncate an existing list.
pub fn save(path: &Path, domains: &[String], header: &str) -> Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let parent_dir = path.parent().unwrap_or(Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temporary file next to {:?}", path))?;

    temp_file.write_all(header.as_bytes())?;
    temp_file.write_all(b"\n")?;
    for domain in domains {
        temp_file.write_all(domain.as_bytes())?;
        temp_file.write_all(b"\n")?;
    }
    temp_file.as_file().sync_all()?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist blocklist file: {:?}", path))?;

    info!(
        "Saved {} domains to {:?}",
        format_count_with_separator(domains.len()),
        path
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_abstraction::{real_fs, MockFileSystem};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let corpus = load(real_fs(), &dir.path().join("absent.txt"));
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_load_unreadable_file_is_empty_corpus() {
        let mut mock = MockFileSystem::new();
        mock.expect_read_to_string().returning(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "access denied",
            ))
        });

        let corpus = load(&mock, Path::new("/blocked/adult.txt"));
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let mut mock = MockFileSystem::new();
        mock.expect_read_to_string()
            .returning(|_| Ok("a.com\n\n\nb.com\n  \n".to_string()));

        let corpus = load(&mock, Path::new("any.txt"));
        assert_eq!(corpus.len(), 2);
        assert!(corpus.contains("a.com"));
        assert!(corpus.contains("b.com"));
    }

    #[test]
    fn test_load_skips_header_block() {
        let mut mock = MockFileSystem::new();
        mock.expect_read_to_string().returning(|_| {
            Ok("/**\noustdom - cumulative domain blocklists\nCategory: Adult\n**/\n\na.com\nb.com\n"
                .to_string())
        });

        let corpus = load(&mock, Path::new("adult.txt"));
        assert_eq!(corpus.len(), 2);
        assert!(!corpus.iter().any(|d| d.contains('*')));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.txt");
        let domains = vec!["a.com".to_string(), "b.com".to_string()];
        let header = render_header("test header", "Test");

        save(&path, &domains, &header).unwrap();
        let reloaded = load(real_fs(), &path);

        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("a.com"));
        assert!(reloaded.contains("b.com"));
    }

    #[test]
    fn test_save_writes_header_first() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.txt");
        let header = render_header("oustdom - cumulative domain blocklists", "Gambling");

        save(&path, &["z.com".to_string()], &header).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("/**\n"));
        assert!(content.contains("Category: Gambling\n"));
        assert!(content.ends_with("z.com\n"));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.txt");
        let header = render_header("t", "c");

        save(&path, &["old.com".to_string()], &header).unwrap();
        save(&path, &["old.com".to_string(), "new.com".to_string()], &header).unwrap();

        let reloaded = load(real_fs(), &path);
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_render_header() {
        let header = render_header("title line", "Malicious");
        assert_eq!(header, "/**\ntitle line\nCategory: Malicious\n**/\n");
    }
}
