//! Filter options derived from the catalog

use ahash::AHashMap;
use serde::Serialize;

use crate::sessions::MeditationSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub count: u32,
    pub name_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableFilters {
    /// Distinct durations in minutes, ascending
    pub durations: Vec<u32>,
    pub levels: Vec<u8>,
    /// Most common first; ties in first-seen order
    pub culture_tags: Vec<TagCount>,
    pub purposes: Vec<TagCount>,
}

pub fn get_available_filters(sessions: &[MeditationSession]) -> AvailableFilters {
    let mut durations: Vec<u32> = sessions.iter().map(|s| s.duration_minutes()).collect();
    durations.sort_unstable();
    durations.dedup();

    let mut levels: Vec<u8> = sessions.iter().map(|s| s.level).collect();
    levels.sort_unstable();
    levels.dedup();

    AvailableFilters {
        durations,
        levels,
        culture_tags: count_tags(
            sessions.iter().filter_map(|s| s.culture_tag.as_deref()),
            "cultures",
        ),
        purposes: count_tags(
            sessions.iter().filter_map(|s| s.purpose_tag.as_deref()),
            "purposes",
        ),
    }
}

fn count_tags<'a>(tags: impl Iterator<Item = &'a str>, namespace: &str) -> Vec<TagCount> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut counts: Vec<TagCount> = Vec::new();

    for tag in tags.filter(|t| !t.is_empty()) {
        match index.get(tag) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(tag, counts.len());
                counts.push(TagCount {
                    tag: tag.to_string(),
                    count: 1,
                    name_key: format!("{}.{}.name", namespace, tag),
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::catalog_session;

    #[test]
    fn test_available_filters() {
        let sessions = vec![
            catalog_session(1, 3, Some("vedic"), Some("sleep"), 600),
            catalog_session(2, 1, Some("zen"), None, 300),
            catalog_session(3, 1, Some("zen"), Some("focus"), 610),
            catalog_session(4, 2, Some("sufi"), None, 1200),
        ];
        let available = get_available_filters(&sessions);

        assert_eq!(available.durations, vec![5, 10, 20]);
        assert_eq!(available.levels, vec![1, 2, 3]);

        let cultures: Vec<_> = available
            .culture_tags
            .iter()
            .map(|t| (t.tag.as_str(), t.count))
            .collect();
        assert_eq!(cultures, vec![("zen", 2), ("vedic", 1), ("sufi", 1)]);
        assert_eq!(available.culture_tags[0].name_key, "cultures.zen.name");
        assert_eq!(available.purposes.len(), 2);
    }
}
