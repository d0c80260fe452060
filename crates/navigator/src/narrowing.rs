use std::collections::HashSet;
use tagtrail_corpus::{Corpus, Document};

/// Documents whose tag set is a superset of `path`, in corpus order.
///
/// An empty path matches every document; a tag no document carries matches
/// nothing. Intersects the corpus posting lists starting from the shortest,
/// so the result only depends on which tags are in `path`, not their order.
pub fn matching_documents<'a, S: AsRef<str>>(
    corpus: &'a Corpus,
    path: &[S],
) -> Vec<&'a Document> {
    if path.is_empty() {
        return corpus.documents().iter().collect();
    }

    let mut lists: Vec<&[usize]> = path
        .iter()
        .map(|tag| corpus.postings(tag.as_ref()))
        .collect();
    lists.sort_by_key(|list| list.len());

    let Some((shortest, rest)) = lists.split_first() else {
        return Vec::new();
    };

    shortest
        .iter()
        .copied()
        .filter(|position| rest.iter().all(|list| list.binary_search(position).is_ok()))
        .filter_map(|position| corpus.get(position))
        .collect()
}

/// Linear superset scan over a candidate pool, preserving pool order.
pub fn filter_matching<'a, I, S>(pool: I, path: &[S]) -> Vec<&'a Document>
where
    I: IntoIterator<Item = &'a Document>,
    S: AsRef<str>,
{
    pool.into_iter().filter(|doc| doc.has_all_tags(path)).collect()
}

/// Tags still worth offering after selecting `path`.
///
/// Empty when nothing is selected yet, or when at most one document matches.
/// Never contains a tag of `path`. Tags come in first-seen order over the
/// matching documents.
pub fn available_facets<'a, S: AsRef<str>>(corpus: &'a Corpus, path: &[S]) -> Vec<&'a str> {
    if path.is_empty() {
        return Vec::new();
    }
    let matching = matching_documents(corpus, path);
    facets_of(&matching, path)
}

pub(crate) fn facets_of<'a, S: AsRef<str>>(
    matching: &[&'a Document],
    path: &[S],
) -> Vec<&'a str> {
    if path.is_empty() || matching.len() <= 1 {
        return Vec::new();
    }

    let selected: HashSet<&str> = path.iter().map(|tag| tag.as_ref()).collect();
    let mut seen = HashSet::new();
    let mut facets = Vec::new();
    for doc in matching {
        for tag in doc.tags() {
            let tag = tag.as_str();
            if !selected.contains(tag) && seen.insert(tag) {
                facets.push(tag);
            }
        }
    }
    facets
}
