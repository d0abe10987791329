use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::model::item::{tamil_year, WORLD_HISTORY};
use crate::model::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Heading,
    TamilHeading,
    Year,
    Category,
    Text,
    TamilText,
    Date,
    Image,
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a year such as `1200`, `-300`, `300 BCE` or `1200 C.E.`.
/// Era suffixes are case-insensitive; B.C.E. years map onto `1 - n`.
fn parse_year(s: &str) -> Option<i32> {
    let lower = s.trim().to_lowercase().replace('.', "");
    let (digits, bce) = if let Some(rest) = lower
        .strip_suffix("bce")
        .or_else(|| lower.strip_suffix("bc"))
    {
        (rest.trim(), true)
    } else if let Some(rest) = lower
        .strip_suffix("ce")
        .or_else(|| lower.strip_suffix("ad"))
    {
        (rest.trim(), false)
    } else {
        (lower.as_str(), false)
    };

    let n: i32 = digits.parse().ok()?;
    if bce {
        (n > 0).then(|| 1 - n)
    } else {
        Some(n)
    }
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons > commas && semicolons >= tabs {
        b';'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "id" | "key" => Some(Column::Id),

        "heading" | "englishheading" | "headingenglish" | "title" | "name" | "event" => {
            Some(Column::Heading)
        }

        "tamilheading" | "headingtamil" | "tamiltitle" => Some(Column::TamilHeading),

        "year" | "yearce" | "yearceint" | "ce" => Some(Column::Year),

        "category" | "type" | "collection" => Some(Column::Category),

        "description" | "englishlongtext" | "detailedtextenglish" | "text" | "details"
        | "notes" => Some(Column::Text),

        "tamillongtext" | "detailedtexttamil" | "tamildescription" => Some(Column::TamilText),

        "date" => Some(Column::Date),

        "image" | "featuredimage" => Some(Column::Image),

        _ => None,
    }
}

/// Import items from a CSV file.
///
/// Auto-detects the delimiter (comma, semicolon, tab) and matches headers
/// flexibly ("Heading English", "Year_CE", ...). Rows without a heading or a
/// parseable year are skipped. Returns `(items, skipped_count)`, sorted by
/// ascending CE year.
pub fn import_csv(path: &Path) -> Result<(Vec<Arc<Item>>, usize)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let (items, skipped) = parse_csv(&content)?;
    log::info!(
        "Imported {} items from {} ({} rows skipped)",
        items.len(),
        path.display(),
        skipped
    );
    Ok((items, skipped))
}

fn parse_csv(content: &str) -> Result<(Vec<Arc<Item>>, usize)> {
    let first_line = content.lines().next().unwrap_or("");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(first_line))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers().context("Failed to read CSV headers")?.clone();
    let columns: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let has = |c: Column| columns.contains(&Some(c));
    if !(has(Column::Heading) || has(Column::TamilHeading)) || !has(Column::Year) {
        let found: Vec<&str> = headers.iter().collect();
        bail!(
            "CSV is missing required columns. Found headers: {:?}. \
             Need a heading column and a year column.",
            found
        );
    }

    let mut items: Vec<Item> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping CSV row {}: {}", row, e);
                skipped += 1;
                continue;
            }
        };

        let field = |c: Column| {
            columns
                .iter()
                .position(|col| *col == Some(c))
                .and_then(|idx| record.get(idx))
                .filter(|s| !s.is_empty())
        };

        let heading = field(Column::Heading).unwrap_or_default();
        let tamil_heading = field(Column::TamilHeading).unwrap_or_default();
        if heading.is_empty() && tamil_heading.is_empty() {
            skipped += 1;
            continue;
        }

        let Some(year_ce) = field(Column::Year).and_then(parse_year) else {
            log::warn!(
                "Skipping CSV row {}: invalid year '{}'",
                row,
                field(Column::Year).unwrap_or("")
            );
            skipped += 1;
            continue;
        };

        items.push(Item {
            id: field(Column::Id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("csv-{}", row)),
            tamil_heading: tamil_heading.to_string(),
            english_heading: heading.to_string(),
            tamil_long_text: field(Column::TamilText).unwrap_or_default().to_string(),
            english_long_text: field(Column::Text).unwrap_or_default().to_string(),
            year_ce,
            year_ta: tamil_year(year_ce),
            category: field(Column::Category).unwrap_or(WORLD_HISTORY).to_string(),
            index: items.len() as u32,
            featured_image: field(Column::Image).unwrap_or_default().to_string(),
            additional_images: Vec::new(),
            date: field(Column::Date).and_then(parse_date),
        });
    }

    if items.is_empty() {
        if skipped > 0 {
            bail!("No valid items found in CSV ({} rows skipped)", skipped);
        }
        bail!("CSV file is empty or has no data rows");
    }

    items.sort_by_key(|i| i.year_ce);
    Ok((items.into_iter().map(Arc::new).collect(), skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;

    #[test]
    fn years_with_era_suffixes() {
        assert_eq!(parse_year("1200"), Some(1200));
        assert_eq!(parse_year("-300"), Some(-300));
        assert_eq!(parse_year("300 BCE"), Some(-299));
        assert_eq!(parse_year("300 B.C.E."), Some(-299));
        assert_eq!(parse_year("1 bc"), Some(0));
        assert_eq!(parse_year("1200 C.E."), Some(1200));
        assert_eq!(parse_year("AD"), None);
        assert_eq!(parse_year("soon"), None);
    }

    #[test]
    fn delimiter_detection() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("heading"), b',');
    }

    #[test]
    fn imports_with_aliases_and_skips_bad_rows() {
        let csv = "Heading English;Year_CE;Category;Tamil Heading\n\
                   Sangam age;300 BCE;Literature;சங்க காலம்\n\
                   ;500;Rulers;\n\
                   Printing press;circa 1440;World History;\n\
                   Chola navy;1025;Rulers;";
        let (items, skipped) = parse_csv(csv).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].english_heading, "Sangam age");
        assert_eq!(items[0].year_ce, -299);
        assert_eq!(items[0].tamil_heading, "சங்க காலம்");
        assert_eq!(items[1].category, "Rulers");
        assert_eq!(items[1].year_ta, 4137);
    }

    #[test]
    fn missing_category_goes_to_world_track() {
        let csv = "title,year\nPyramids,-2560";
        let (items, _) = parse_csv(csv).unwrap();
        assert_eq!(items[0].track(), Track::World);
        assert_eq!(items[0].id, "csv-2");
    }

    #[test]
    fn missing_required_columns_is_an_error() {
        let err = parse_csv("name,when\nx,1").unwrap_err();
        assert!(err.to_string().contains("missing required columns"));
        assert!(parse_csv("title,year\n").is_err());
    }

    #[test]
    fn import_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        std::fs::write(&path, "id,heading,year,date\nk1,Event,900,1999-12-31\n").unwrap();
        let (items, skipped) = import_csv(&path).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(items[0].id, "k1");
        assert_eq!(items[0].date, NaiveDate::from_ymd_opt(1999, 12, 31));
    }
}
