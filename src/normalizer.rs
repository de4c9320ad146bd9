//! Domain normalization: one raw source line in, one canonical domain out.
//!
//! Sources publish wildly different syntaxes (hosts files, AdGuard filter
//! rules, CSV exports, bare domains, comments). Every line goes through the
//! same cleanup pipeline and ends at the canonical domain grammar; anything
//! that does not survive is silently dropped, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// Canonical domain grammar: lowercase dot-separated labels of 1-63
/// alphanumeric/hyphen characters, no label starts or ends with a hyphen,
/// final label is 2-63 letters.
static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$").expect("valid regex")
});

/// Address tokens that mark a hosts-file entry (`0.0.0.0 domain.com`).
const HOSTS_PREFIXES: &[&str] = &["0.0.0.0", "127.0.0.1", "::1", "localhost"];

/// Stray punctuation trimmed from both ends before validation.
const STRAY_CHARS: &[char] = &[
    '.', ',', ';', ':', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '[', ']', '{', '}', '"',
    '\'', ' ', '\t', '\n', '\r',
];

/// Source-specific extraction strategy, selected by source name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Structured CSV where the second column holds a URL or bare domain
    /// (PhishTank-style exports).
    CsvUrlColumn,
}

/// Registry of source-name markers and the extraction each one selects.
/// New per-source quirks are added here, not in the pipeline itself.
const SOURCE_EXTRACTIONS: &[(&str, Extraction)] = &[("phishtank", Extraction::CsvUrlColumn)];

/// Look up the extraction strategy for a source by name-substring match.
///
/// # Examples
/// ```
/// use oustdom::normalizer::{extraction_for, Extraction};
/// assert_eq!(extraction_for("my_phishtank_feed"), Some(Extraction::CsvUrlColumn));
/// assert_eq!(extraction_for("urlhaus"), None);
/// ```
pub fn extraction_for(source_name: &str) -> Option<Extraction> {
    let name = source_name.to_lowercase();
    SOURCE_EXTRACTIONS
        .iter()
        .find(|(marker, _)| name.contains(marker))
        .map(|(_, extraction)| *extraction)
}

/// Check a string against the canonical domain grammar.
///
/// Expects already-lowercased input; [`normalize`] lowercases before
/// validating.
///
/// # Examples
/// ```
/// use oustdom::normalizer::is_valid_domain;
/// assert!(is_valid_domain("ads.example.com"));
/// assert!(!is_valid_domain("example"));
/// assert!(!is_valid_domain("-bad.example.com"));
/// ```
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}

/// Normalize one raw source line into a canonical domain.
///
/// Returns `None` for comments, empty lines and anything that cannot be
/// reduced to a valid domain. Rejection is not an error condition; callers
/// filter and move on.
///
/// # Examples
/// ```
/// use oustdom::normalizer::normalize;
/// assert_eq!(normalize("0.0.0.0 ads.example.com", None), Some("ads.example.com".into()));
/// assert_eq!(normalize("||tracker.example.net^", None), Some("tracker.example.net".into()));
/// assert_eq!(normalize("# comment", None), None);
/// ```
pub fn normalize(raw: &str, source_name: Option<&str>) -> Option<String> {
    let mut domain = raw.trim().to_lowercase();

    // Comments and empty lines
    if domain.is_empty()
        || domain.starts_with('#')
        || domain.starts_with('!')
        || domain.starts_with(';')
    {
        return None;
    }

    // Source-specific extraction (CSV feeds)
    if let Some(Extraction::CsvUrlColumn) = source_name.and_then(extraction_for) {
        if domain.contains(',') {
            domain = extract_csv_url_column(&domain)?;
        }
    }

    // AdGuard filter syntax: ||domain^ or ||domain
    if domain.starts_with("||") {
        domain.drain(..2);
        if domain.ends_with('^') {
            domain.pop();
        }
    }

    // Hosts-file syntax: the domain is the second whitespace token
    if HOSTS_PREFIXES.iter().any(|p| domain.starts_with(p)) {
        domain = domain.split_whitespace().nth(1)?.to_string();
    }

    // Leftover adblock markers and wildcard prefixes
    domain = domain
        .trim_start_matches('|')
        .trim_end_matches('^')
        .trim_start_matches(['*', '.'])
        .to_string();

    // Protocol prefixes: take the URL host, keep the string on parse failure
    // (validation rejects genuine garbage later)
    if domain.starts_with("http://") || domain.starts_with("https://") || domain.starts_with("ftp://")
    {
        if let Ok(parsed) = Url::parse(&domain) {
            if let Some(host) = parsed.host_str() {
                domain = host.to_string();
            }
        }
    }

    // Port numbers; more than one colon means an IPv6-ish string we leave
    // alone for validation to reject
    if let Some(idx) = domain.find(':') {
        if !domain[idx + 1..].contains(':') {
            domain.truncate(idx);
        }
    }

    // Paths and query strings
    if let Some(idx) = domain.find('/') {
        domain.truncate(idx);
    }
    if let Some(idx) = domain.find('?') {
        domain.truncate(idx);
    }

    let domain = domain.trim_matches(STRAY_CHARS);

    if is_valid_domain(domain) {
        Some(domain.to_string())
    } else {
        None
    }
}

/// Pull the URL/domain column out of a CSV row (second field, quotes
/// stripped). A field that looks like a URL contributes its host.
fn extract_csv_url_column(line: &str) -> Option<String> {
    let field = line.split(',').nth(1)?.trim_matches('"');
    if field.starts_with("http") {
        let parsed = Url::parse(field).ok()?;
        Some(parsed.host_str()?.to_string())
    } else {
        Some(field.to_string())
    }
}

/// Test a canonical domain for priority keywords (case-insensitive
/// substring containment). Tagging is informational only; it never affects
/// inclusion or ordering.
pub fn has_priority_keywords(domain: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| domain.contains(&keyword.to_lowercase()))
}

/// Normalize a batch of raw lines into a deduplicated set of canonical
/// domains plus the subset matching the priority keywords.
///
/// Order-independent: each line is normalized on its own and re-insertion
/// of a duplicate is a no-op.
pub fn process_lines<'a, I>(
    lines: I,
    priority_keywords: &[String],
    source_name: Option<&str>,
) -> (HashSet<String>, HashSet<String>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut normalized = HashSet::new();
    let mut priority = HashSet::new();

    for line in lines {
        if let Some(domain) = normalize(line, source_name) {
            if !priority_keywords.is_empty() && has_priority_keywords(&domain, priority_keywords) {
                priority.insert(domain.clone());
            }
            normalized.insert(domain);
        }
    }

    (normalized, priority)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for canonical-looking domains. Labels start with plain
    /// letters so generated values never collide with hosts-file address
    /// tokens.
    fn domain_strategy() -> impl Strategy<Value = String> {
        (
            "[a-k][a-z0-9]{1,10}",
            prop::collection::vec("[a-k][a-z0-9]{0,8}", 0..3),
            "(com|net|org|io|dev)",
        )
            .prop_map(|(first, middle, tld)| {
                let mut labels = vec![first];
                labels.extend(middle);
                labels.push(tld);
                labels.join(".")
            })
    }

    proptest! {
        /// Normalization never panics, whatever the input
        #[test]
        fn prop_normalize_no_panic(raw in "\\PC{0,200}") {
            let _ = normalize(&raw, None);
            let _ = normalize(&raw, Some("phishtank"));
        }

        /// A canonical domain passes through unchanged
        #[test]
        fn prop_normalize_identity_on_canonical(domain in domain_strategy()) {
            prop_assert_eq!(normalize(&domain, None), Some(domain.clone()));
        }

        /// Normalization is idempotent over its own output
        #[test]
        fn prop_normalize_idempotent(domain in domain_strategy()) {
            let once = normalize(&domain, None).unwrap();
            prop_assert_eq!(normalize(&once, None), Some(once.clone()));
        }

        /// Every accepted output satisfies the canonical grammar
        #[test]
        fn prop_normalize_output_is_valid(raw in "\\PC{0,200}") {
            if let Some(domain) = normalize(&raw, None) {
                prop_assert!(is_valid_domain(&domain));
            }
        }

        /// Hosts-file wrapping never changes the accepted domain
        #[test]
        fn prop_hosts_wrapping_transparent(domain in domain_strategy()) {
            let wrapped = format!("0.0.0.0 {}", domain);
            prop_assert_eq!(normalize(&wrapped, None), Some(domain.clone()));
        }

        /// AdGuard wrapping never changes the accepted domain
        #[test]
        fn prop_adguard_wrapping_transparent(domain in domain_strategy()) {
            let wrapped = format!("||{}^", domain);
            prop_assert_eq!(normalize(&wrapped, None), Some(domain.clone()));
        }
    }
}
