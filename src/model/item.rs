use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category name that routes an item onto the world track.
pub const WORLD_HISTORY: &str = "World History";

/// Which of the two parallel lanes an item is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// Upper lane, labelled with the Tamil-era year.
    Tamil,
    /// Lower lane, labelled with the common-era year.
    World,
}

impl Track {
    /// Route an item by its category. Missing categories count as world history.
    pub fn of(item: &Item) -> Self {
        Self::for_category(&item.category)
    }

    pub fn for_category(category: &str) -> Self {
        if category.is_empty() || category == WORLD_HISTORY {
            Track::World
        } else {
            Track::Tamil
        }
    }

    /// Row index from the top of the canvas.
    pub fn row(self) -> usize {
        match self {
            Track::Tamil => 0,
            Track::World => 1,
        }
    }
}

/// A single historical event on the timeline. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub tamil_heading: String,
    pub english_heading: String,
    #[serde(default)]
    pub tamil_long_text: String,
    #[serde(default)]
    pub english_long_text: String,
    pub year_ce: i32,
    pub year_ta: i32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Item {
    /// Create an item with the Tamil-era year derived from `year_ce`.
    pub fn new(
        id: impl Into<String>,
        english_heading: impl Into<String>,
        year_ce: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tamil_heading: String::new(),
            english_heading: english_heading.into(),
            tamil_long_text: String::new(),
            english_long_text: String::new(),
            year_ce,
            year_ta: tamil_year(year_ce),
            category: category.into(),
            index: 0,
            featured_image: String::new(),
            additional_images: Vec::new(),
            date: None,
        }
    }

    pub fn track(&self) -> Track {
        Track::of(self)
    }

    /// Heading shown on the card for the given lane. Falls back to the
    /// other language when the lane's own heading is empty.
    pub fn heading(&self, track: Track) -> &str {
        let (own, other) = match track {
            Track::Tamil => (&self.tamil_heading, &self.english_heading),
            Track::World => (&self.english_heading, &self.tamil_heading),
        };
        if own.is_empty() {
            other
        } else {
            own
        }
    }

    pub fn long_text(&self, track: Track) -> &str {
        match track {
            Track::Tamil => &self.tamil_long_text,
            Track::World => &self.english_long_text,
        }
    }
}

/// Convert a common-era year to the Tamil era shown on the upper lane.
/// The offset shifts by one for `year_ce < 1` (no year zero in CE).
pub fn tamil_year(year_ce: i32) -> i32 {
    if year_ce >= 1 {
        year_ce + 3112
    } else {
        3113 + year_ce
    }
}

/// Lane label for a year group.
pub fn year_label(track: Track, year_ce: i32) -> String {
    match track {
        Track::Tamil => tamil_year(year_ce).to_string(),
        Track::World if year_ce >= 1 => format!("{} C.E.", year_ce),
        Track::World => format!("{} B.C.E.", 1 - year_ce),
    }
}

/// Cut `text` to `max_chars` characters, appending "..." when shortened.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_history_and_missing_category_route_to_world() {
        assert_eq!(Track::for_category(WORLD_HISTORY), Track::World);
        assert_eq!(Track::for_category(""), Track::World);
        assert_eq!(Track::for_category("Literature"), Track::Tamil);
    }

    #[test]
    fn tamil_year_skips_year_zero() {
        assert_eq!(tamil_year(1), 3113);
        assert_eq!(tamil_year(2024), 5136);
        assert_eq!(tamil_year(0), 3113);
        assert_eq!(tamil_year(-500), 2613);
    }

    #[test]
    fn year_labels_per_lane() {
        assert_eq!(year_label(Track::Tamil, 100), "3212");
        assert_eq!(year_label(Track::World, 100), "100 C.E.");
        assert_eq!(year_label(Track::World, -299), "300 B.C.E.");
    }

    #[test]
    fn heading_falls_back_to_other_language() {
        let mut item = Item::new("1", "Sangam assembly", -300, "Literature");
        assert_eq!(item.heading(Track::Tamil), "Sangam assembly");
        item.tamil_heading = "சங்கம்".into();
        assert_eq!(item.heading(Track::Tamil), "சங்கம்");
        assert_eq!(item.heading(Track::World), "Sangam assembly");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        assert_eq!(excerpt("short", 47), "short");
        assert_eq!(excerpt("தமிழ் மொழி", 3), "தமி...");
    }
}
