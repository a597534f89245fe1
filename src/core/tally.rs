use std::hash::Hash;

use ahash::AHashMap;

/// Occurrence counts, most frequent first
///
/// Ties keep first-seen order.
pub fn ranked_counts<K, I>(items: I) -> Vec<(K, u32)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: AHashMap<K, usize> = AHashMap::new();
    let mut counts: Vec<(K, u32)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The most frequent item, first-seen on ties
pub fn most_frequent<K, I>(items: I) -> Option<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    ranked_counts(items).into_iter().next().map(|(k, _)| k)
}
