use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::item::{tamil_year, WORLD_HISTORY};
use crate::model::Item;

/// Save normalized items as a pretty-printed JSON array.
pub fn save_items(items: &[Arc<Item>], path: &Path) -> Result<()> {
    let plain: Vec<&Item> = items.iter().map(|i| i.as_ref()).collect();
    let json = serde_json::to_string_pretty(&plain)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {} items to {}", items.len(), path.display());
    Ok(())
}

/// Load a JSON array of normalized items, sorted by ascending CE year.
pub fn load_items(path: &Path) -> Result<Vec<Arc<Item>>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut items: Vec<Item> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse items in {}", path.display()))?;
    items.sort_by_key(|i| i.year_ce);
    log::info!("Loaded {} items from {}", items.len(), path.display());
    Ok(items.into_iter().map(Arc::new).collect())
}

// ── Raw export ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategoryRef {
    pub key: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub id: serde_json::Value,
    #[serde(rename = "Heading_Tamil", default)]
    pub heading_tamil: Option<String>,
    #[serde(rename = "Heading_English", default)]
    pub heading_english: Option<String>,
    #[serde(rename = "DetailedText_Tamil", default)]
    pub detailed_text_tamil: Option<String>,
    #[serde(rename = "DetailedText_English", default)]
    pub detailed_text_english: Option<String>,
    #[serde(rename = "FeaturedImage", default)]
    pub featured_image: Option<String>,
    #[serde(rename = "AdditionalImages", default)]
    pub additional_images: Option<Vec<String>>,
    #[serde(rename = "Index", default)]
    pub index: Option<serde_json::Value>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Year_CE_Int")]
    pub year_ce: i32,
    #[serde(rename = "Category", default)]
    pub category: Option<RawCategoryRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub id: i64,
    pub name: String,
}

/// Both raw files wrap their records in `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

fn read_envelope<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let envelope: Envelope<T> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(envelope.data)
}

/// Load and normalize a raw events/categories export.
pub fn load_raw_export(events: &Path, categories: &Path) -> Result<Vec<Arc<Item>>> {
    let events: Vec<RawEvent> = read_envelope(events)?;
    let categories: Vec<RawCategory> = read_envelope(categories)?;
    let items = normalize_events(&events, &categories);
    log::info!(
        "Normalized {} events across {} categories",
        items.len(),
        categories.len()
    );
    Ok(items.into_iter().map(Arc::new).collect())
}

fn id_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_index(value: Option<&serde_json::Value>) -> u32 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0) as u32,
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // Exports carry either a bare date or a full timestamp.
    NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok()
}

/// Turn raw events into items. A missing, zero or unknown category key maps to
/// the world track; the result is stably sorted by ascending CE year.
pub fn normalize_events(events: &[RawEvent], categories: &[RawCategory]) -> Vec<Item> {
    let lookup: HashMap<i64, &str> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut items: Vec<Item> = events
        .iter()
        .map(|e| {
            let category = e
                .category
                .as_ref()
                .and_then(|c| c.key)
                .filter(|&k| k != 0)
                .and_then(|k| lookup.get(&k).copied())
                .unwrap_or(WORLD_HISTORY);
            Item {
                id: id_string(&e.id),
                tamil_heading: e.heading_tamil.clone().unwrap_or_default(),
                english_heading: e.heading_english.clone().unwrap_or_default(),
                tamil_long_text: e.detailed_text_tamil.clone().unwrap_or_default(),
                english_long_text: e.detailed_text_english.clone().unwrap_or_default(),
                year_ce: e.year_ce,
                year_ta: tamil_year(e.year_ce),
                category: category.to_string(),
                index: parse_index(e.index.as_ref()),
                featured_image: e.featured_image.clone().unwrap_or_default(),
                additional_images: e.additional_images.clone().unwrap_or_default(),
                date: e.date.as_deref().and_then(parse_date),
            }
        })
        .collect();

    items.sort_by_key(|i| i.year_ce);
    items
}

// ── Sample data ──────────────────────────────────────────────────────────────

const SAMPLE_CATEGORIES: [&str; 7] = [
    WORLD_HISTORY,
    "Literature",
    "Archeology",
    "Rulers",
    "Achievers",
    "Awardee",
    "Laws",
];

const SAMPLE_FIRST_YEAR: i64 = -3000;
const SAMPLE_LAST_YEAR: i64 = 2025;

/// Small linear congruential generator, so the sample is the same every run.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n.max(1)
    }
}

/// Deterministic demo dataset spread over 3000 B.C.E. to 2025 C.E.
pub fn sample_items(count: usize) -> Vec<Arc<Item>> {
    let mut rng = Lcg(0x7a31_1e55);
    let span = (SAMPLE_LAST_YEAR - SAMPLE_FIRST_YEAR + 1) as u64;

    let mut items: Vec<Item> = (0..count)
        .map(|i| {
            let year = (SAMPLE_FIRST_YEAR + rng.below(span) as i64) as i32;
            let category = SAMPLE_CATEGORIES[rng.below(SAMPLE_CATEGORIES.len() as u64) as usize];
            let n = i + 1;
            let mut item = Item::new(
                format!("sample-{}", n),
                format!("Sample English Heading {}", n),
                year,
                category,
            );
            item.tamil_heading = format!("Sample Tamil Heading {}", n);
            item.english_long_text =
                format!("A generated English description for sample item {}", n);
            item.tamil_long_text =
                format!("A generated Tamil description for sample item {}", n);
            item.index = i as u32;
            item.date = NaiveDate::from_ymd_opt(2000, 1, (i % 31) as u32 + 1);
            item
        })
        .collect();

    items.sort_by_key(|i| i.year_ce);
    items.into_iter().map(Arc::new).collect()
}
