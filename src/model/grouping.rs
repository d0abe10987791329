use std::collections::BTreeMap;
use std::sync::Arc;

use super::item::{Item, Track};

/// Maximum number of cards stacked in one column of one track.
pub const CHUNK_SIZE: usize = 4;

/// One visual column for one year: up to [`CHUNK_SIZE`] items per track.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupColumn {
    /// Position of this column within its year.
    pub group_index: usize,
    pub tamil: Vec<Arc<Item>>,
    pub world: Vec<Arc<Item>>,
}

impl GroupColumn {
    pub fn items(&self, track: Track) -> &[Arc<Item>] {
        match track {
            Track::Tamil => &self.tamil,
            Track::World => &self.world,
        }
    }
}

/// All columns for one common-era year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup {
    pub year: i32,
    pub columns: Vec<GroupColumn>,
}

/// Group items by year and track, splitting each track into chunks of
/// [`CHUNK_SIZE`]. Both tracks of a year get the same number of columns; the
/// shorter one is padded with empty chunks. Years come out ascending.
pub fn group_by_year_and_track(items: &[Arc<Item>]) -> Vec<YearGroup> {
    let mut years: BTreeMap<i32, (Vec<Arc<Item>>, Vec<Arc<Item>>)> = BTreeMap::new();

    for item in items {
        let entry = years.entry(item.year_ce).or_default();
        match item.track() {
            Track::Tamil => entry.0.push(Arc::clone(item)),
            Track::World => entry.1.push(Arc::clone(item)),
        }
    }

    years
        .into_iter()
        .map(|(year, (tamil, world))| {
            let tamil_chunks: Vec<&[Arc<Item>]> = tamil.chunks(CHUNK_SIZE).collect();
            let world_chunks: Vec<&[Arc<Item>]> = world.chunks(CHUNK_SIZE).collect();
            let column_count = tamil_chunks.len().max(world_chunks.len()).max(1);

            let columns = (0..column_count)
                .map(|i| GroupColumn {
                    group_index: i,
                    tamil: tamil_chunks.get(i).map(|c| c.to_vec()).unwrap_or_default(),
                    world: world_chunks.get(i).map(|c| c.to_vec()).unwrap_or_default(),
                })
                .collect();

            YearGroup { year, columns }
        })
        .collect()
}

/// Total number of columns across all years.
pub fn total_columns(groups: &[YearGroup]) -> usize {
    groups.iter().map(|g| g.columns.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::WORLD_HISTORY;

    fn item(id: &str, year: i32, category: &str) -> Arc<Item> {
        Arc::new(Item::new(id, format!("Event {}", id), year, category))
    }

    fn mixed_items() -> Vec<Arc<Item>> {
        let mut items = Vec::new();
        for i in 0..9 {
            items.push(item(&format!("t{}", i), 1200, "Rulers"));
        }
        for i in 0..3 {
            items.push(item(&format!("w{}", i), 1200, WORLD_HISTORY));
        }
        items.push(item("late", 1900, "Literature"));
        items.push(item("early", -300, WORLD_HISTORY));
        items.push(item("t-again", 1200, "Laws"));
        items
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(group_by_year_and_track(&[]).is_empty());
    }

    #[test]
    fn grouping_is_deterministic() {
        let items = mixed_items();
        let first = group_by_year_and_track(&items);
        for _ in 0..10 {
            assert_eq!(first, group_by_year_and_track(&items));
        }
    }

    #[test]
    fn years_are_strictly_ascending() {
        let groups = group_by_year_and_track(&mixed_items());
        let years: Vec<i32> = groups.iter().map(|g| g.year).collect();
        assert_eq!(years, vec![-300, 1200, 1900]);
    }

    #[test]
    fn short_track_is_padded_with_trailing_empty_chunks() {
        for group in group_by_year_and_track(&mixed_items()) {
            // Every chunk before the last non-empty one is full.
            for track in [Track::Tamil, Track::World] {
                let lens: Vec<usize> = group.columns.iter().map(|c| c.items(track).len()).collect();
                let filled = lens.iter().take_while(|&&n| n == CHUNK_SIZE).count();
                assert!(lens[filled..].iter().skip(1).all(|&n| n == 0), "{:?}", lens);
            }
        }
    }

    #[test]
    fn chunks_are_bounded_and_preserve_order() {
        let items = mixed_items();
        let groups = group_by_year_and_track(&items);
        for group in &groups {
            for track in [Track::Tamil, Track::World] {
                let mut rebuilt = Vec::new();
                for column in &group.columns {
                    assert!(column.items(track).len() <= CHUNK_SIZE);
                    rebuilt.extend(column.items(track).iter().map(|i| i.id.clone()));
                }
                let expected: Vec<String> = items
                    .iter()
                    .filter(|i| i.year_ce == group.year && i.track() == track)
                    .map(|i| i.id.clone())
                    .collect();
                assert_eq!(rebuilt, expected);
            }
        }
    }

    #[test]
    fn six_items_in_one_track_make_two_padded_columns() {
        let items: Vec<Arc<Item>> = (0..6).map(|i| item(&i.to_string(), 100, "Rulers")).collect();
        let groups = group_by_year_and_track(&items);
        assert_eq!(groups.len(), 1);
        let columns = &groups[0].columns;
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].tamil.len(), 4);
        assert_eq!(columns[1].tamil.len(), 2);
        assert!(columns.iter().all(|c| c.world.is_empty()));
        assert_eq!(columns[1].group_index, 1);
    }

    #[test]
    fn column_count_is_max_of_tracks() {
        let groups = group_by_year_and_track(&mixed_items());
        let year_1200 = groups.iter().find(|g| g.year == 1200).map(|g| g.columns.len());
        // 10 Tamil items -> 3 chunks, 3 world items -> 1 chunk.
        assert_eq!(year_1200, Some(3));
        assert_eq!(total_columns(&groups), 5);
    }
}
