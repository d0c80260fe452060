use tagtrail_corpus::{fold_tag, TagCount, TagFrequency};

/// Tags whose case-folded text starts with the case-folded `query`.
///
/// Sorted by descending count; equal counts keep table order. An empty query
/// returns nothing. The query is not trimmed, so `"space "` only reaches
/// multi-word tags.
pub fn search<'a>(table: &'a TagFrequency, query: &str) -> Vec<&'a TagCount> {
    let query = fold_tag(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<&TagCount> = table
        .iter()
        .filter(|entry| fold_tag(&entry.tag).starts_with(&query))
        .collect();
    hits.sort_by(|a, b| b.count.cmp(&a.count));

    log::debug!("Facet search {query:?}: {} hits", hits.len());
    hits
}

/// The `limit` most frequent tags, ties in table order.
pub fn top_tags(table: &TagFrequency, limit: usize) -> Vec<&TagCount> {
    let mut ranked: Vec<&TagCount> = table.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn tags(hits: &[&TagCount]) -> Vec<String> {
        hits.iter().map(|hit| hit.tag.clone()).collect()
    }

    #[test]
    fn prefix_hits_ranked_by_count() {
        let table = TagFrequency::from_counts([("Cat", 5), ("Car", 3), ("Dog", 9)]);
        assert_eq!(tags(&search(&table, "ca")), ["Cat", "Car"]);
        assert_eq!(tags(&search(&table, "CA")), ["Cat", "Car"]);
        assert_eq!(tags(&search(&table, "do")), ["Dog"]);
        assert!(search(&table, "x").is_empty());
    }

    #[test]
    fn blank_query_returns_nothing() {
        let table = TagFrequency::from_counts([("Cat", 5)]);
        assert!(search(&table, "").is_empty());
        assert!(search(&table, "   ").is_empty());
    }

    #[test]
    fn trailing_space_is_part_of_the_prefix() {
        let table = TagFrequency::from_counts([("spaceflight", 9), ("space biology", 3)]);
        assert_eq!(tags(&search(&table, "space ")), ["space biology"]);
        assert_eq!(tags(&search(&table, "Space")), ["spaceflight", "space biology"]);
        assert!(search(&table, " space").is_empty());
    }

    #[test]
    fn ties_keep_table_order() {
        let table = TagFrequency::from_counts([("beta", 2), ("bat", 4), ("bone", 2), ("bee", 2)]);
        assert_eq!(tags(&search(&table, "b")), ["bat", "beta", "bone", "bee"]);
    }

    #[test]
    fn prefix_only_not_substring() {
        let table = TagFrequency::from_counts([("microgravity", 3), ("gravity", 1)]);
        assert_eq!(tags(&search(&table, "grav")), ["gravity"]);
    }

    #[test]
    fn top_tags_truncates_to_limit() {
        let table = TagFrequency::from_counts([("a", 1), ("b", 7), ("c", 7), ("d", 3)]);
        assert_eq!(tags(&top_tags(&table, 3)), ["b", "c", "d"]);
        assert_eq!(top_tags(&table, 10).len(), 4);
        assert!(top_tags(&table, 0).is_empty());
    }

    proptest! {
        #[test]
        fn hits_are_sorted_and_prefixed(
            counts in prop::collection::vec(("[a-cA-C]{1,4}", 0usize..20), 0..20),
            query in "[a-cA-C]{1,2}",
        ) {
            let table = TagFrequency::from_counts(counts);
            let hits = search(&table, &query);
            let folded = query.to_lowercase();
            for pair in hits.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
            for hit in &hits {
                prop_assert!(hit.tag.to_lowercase().starts_with(&folded));
            }
        }
    }
}
