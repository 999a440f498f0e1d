//! Catalog Service
//!
//! Fetches the curated prompt catalog (a community-maintained CSV
//! document) and parses it into candidate prompt records. The parser
//! tolerates the file's rough edges: quoted multi-line cells, commas
//! inside quotes, doubled-quote escapes, and stray malformed rows.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::prompt::{now_millis, CatalogEntry, Prompt};
use crate::utils::error::{AppError, AppResult};

/// Fixed upstream catalog URL. No authentication.
pub const CATALOG_URL: &str =
    "https://raw.githubusercontent.com/f/awesome-chatgpt-prompts/main/prompts.csv";

/// Tags stamped onto every imported catalog prompt.
pub const CATALOG_TAGS: [&str; 2] = ["github", "awesome-chatgpt-prompts"];

/// Parse the raw catalog document into ordered `(title, content)` entries.
///
/// The first physical line is a header and is discarded. Physical lines
/// accumulate into one logical record until the quote characters seen so
/// far balance, which is how quoted cells carry literal newlines. Rows
/// that yield fewer than two fields are dropped silently. Duplicate
/// titles are kept; de-duplication belongs to the importer.
pub fn parse_catalog(raw: &str) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();
    let mut record = String::new();

    for line in raw.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !record.is_empty() {
            record.push('\n');
        }
        record.push_str(line);

        // An odd number of quotes means an open multi-line cell.
        if record.matches('"').count() % 2 != 0 {
            continue;
        }
        if let Some(entry) = parse_record(&record) {
            entries.push(entry);
        }
        record.clear();
    }

    entries
}

/// Split one balanced record into fields and clean them. Returns `None`
/// for rows with fewer than two fields.
fn parse_record(record: &str) -> Option<CatalogEntry> {
    let fields = split_fields(record);
    if fields.len() < 2 {
        return None;
    }
    Some(CatalogEntry {
        title: clean_field(&fields[0]),
        content: clean_field(&fields[1]),
    })
}

/// Split on commas outside quotes only.
fn split_fields(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in record.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Strip one optional surrounding quote pair and unescape doubled quotes.
fn clean_field(raw: &str) -> String {
    let s = raw.strip_prefix('"').unwrap_or(raw);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.replace("\"\"", "\"")
}

/// Where the raw catalog text comes from. Abstracted so surfaces can be
/// tested without the network.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_raw(&self) -> AppResult<String>;
}

/// HTTP-backed catalog source.
pub struct HttpCatalogSource {
    url: String,
}

impl HttpCatalogSource {
    pub fn new() -> Self {
        Self {
            url: CATALOG_URL.to_string(),
        }
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for HttpCatalogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_raw(&self) -> AppResult<String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("promptuary")
            .build()?;

        let response = client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::catalog(format!(
                "HTTP {}: {}",
                response.status(),
                self.url
            )));
        }

        Ok(response.text().await?)
    }
}

/// Fetch-and-convert facade used by the import view.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Fetch the catalog and convert every parsed entry into a full
    /// prompt record, ready for `import_many`.
    pub async fn fetch_prompts(&self) -> AppResult<Vec<Prompt>> {
        let raw = self.source.fetch_raw().await?;
        Ok(parse_catalog(&raw)
            .into_iter()
            .map(entry_to_prompt)
            .collect())
    }
}

/// Convert a parsed entry to a stored prompt with a fresh id and the
/// catalog tags.
pub fn entry_to_prompt(entry: CatalogEntry) -> Prompt {
    Prompt {
        id: format!("catalog-{}", uuid::Uuid::new_v4()),
        title: entry.title,
        content: entry.content,
        tags: CATALOG_TAGS.iter().map(|t| t.to_string()).collect(),
        target_domains: Vec::new(),
        created_at: now_millis(),
    }
}
