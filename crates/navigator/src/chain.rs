use crate::narrowing::filter_matching;
use tagtrail_corpus::{Corpus, Document};
use tagtrail_protocol::ChainView;

/// Label of the placeholder returned for an empty selection path.
pub const EMPTY_CHAIN_LABEL: &str = "No selection";

/// Node of a navigation chain.
///
/// A chain has one facet level per selected tag, each with exactly one facet
/// child, except the deepest level whose children are the matching leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainNode<'a> {
    /// Nothing selected yet; not meant to be rendered as a chain.
    Empty,
    Facet(FacetNode<'a>),
    Leaf(LeafNode<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetNode<'a> {
    pub tag: String,
    /// Selection path up to and including `tag`
    pub accumulated_path: Vec<String>,
    pub children: Vec<ChainNode<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode<'a> {
    /// Borrowed from the corpus so the consumer can open the full record.
    pub document: &'a Document,
    pub accumulated_path: Vec<String>,
}

impl<'a> ChainNode<'a> {
    pub fn label(&self) -> &str {
        match self {
            Self::Empty => EMPTY_CHAIN_LABEL,
            Self::Facet(node) => &node.tag,
            Self::Leaf(leaf) => leaf.document.label(),
        }
    }

    pub fn children(&self) -> &[ChainNode<'a>] {
        match self {
            Self::Facet(node) => &node.children,
            Self::Empty | Self::Leaf(_) => &[],
        }
    }

    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Facet nodes from the root down to the deepest level.
    pub fn facet_levels(&self) -> Vec<&FacetNode<'a>> {
        let mut levels = Vec::new();
        let mut current = self;
        while let Self::Facet(node) = current {
            levels.push(node);
            match node.children.first() {
                Some(child @ Self::Facet(_)) => current = child,
                _ => break,
            }
        }
        levels
    }

    /// Documents at the deepest level.
    pub fn leaves(&self) -> Vec<&'a Document> {
        self.facet_levels()
            .last()
            .map(|deepest| {
                deepest
                    .children
                    .iter()
                    .filter_map(|child| match child {
                        Self::Leaf(leaf) => Some(leaf.document),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn to_view(&self) -> ChainView {
        match self {
            Self::Empty => ChainView::Empty {
                name: EMPTY_CHAIN_LABEL.to_string(),
            },
            Self::Facet(node) => ChainView::Facet {
                name: node.tag.clone(),
                accumulated_path: node.accumulated_path.clone(),
                children: node.children.iter().map(ChainNode::to_view).collect(),
            },
            Self::Leaf(leaf) => ChainView::Leaf {
                name: leaf.document.label().to_string(),
                document_id: leaf.document.id().to_string(),
                accumulated_path: leaf.accumulated_path.clone(),
            },
        }
    }
}

impl<'a> FacetNode<'a> {
    fn new(accumulated_path: Vec<String>, children: Vec<ChainNode<'a>>) -> Self {
        Self {
            tag: accumulated_path.last().cloned().unwrap_or_default(),
            accumulated_path,
            children,
        }
    }
}

/// Build the navigation chain for `path`, following the selection order.
///
/// Each level narrows the candidate pool of the level above it, so the
/// deepest level's leaves are exactly the documents matching the full path.
/// An empty path yields [`ChainNode::Empty`]; a path nothing matches yields a
/// chain whose deepest level has no leaves.
pub fn build_chain<'a, S: AsRef<str>>(path: &[S], corpus: &'a Corpus) -> ChainNode<'a> {
    if path.is_empty() {
        return ChainNode::Empty;
    }

    let mut pool: Vec<&'a Document> = corpus.documents().iter().collect();
    let mut levels: Vec<Vec<String>> = Vec::with_capacity(path.len());
    for depth in 1..=path.len() {
        let accumulated: Vec<String> = path[..depth]
            .iter()
            .map(|tag| tag.as_ref().to_string())
            .collect();
        pool = filter_matching(pool, &accumulated);
        levels.push(accumulated);
    }

    let mut levels = levels.into_iter().rev();
    let Some(deepest) = levels.next() else {
        return ChainNode::Empty;
    };

    log::debug!(
        "Chain for {:?}: {} levels, {} leaves",
        deepest,
        path.len(),
        pool.len()
    );

    let leaves = pool
        .into_iter()
        .map(|document| {
            ChainNode::Leaf(LeafNode {
                document,
                accumulated_path: deepest.clone(),
            })
        })
        .collect();

    let mut node = FacetNode::new(deepest, leaves);
    for accumulated in levels {
        node = FacetNode::new(accumulated, vec![ChainNode::Facet(node)]);
    }
    ChainNode::Facet(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ids, scenario_corpus};
    use crate::narrowing::matching_documents;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn scenario_chain() {
        let corpus = scenario_corpus();
        let chain = build_chain(&["X", "Y"], &corpus);

        let levels = chain.facet_levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].tag, "X");
        assert_eq!(levels[0].accumulated_path, ["X"]);
        assert_eq!(levels[0].children.len(), 1);
        assert_eq!(levels[1].tag, "Y");
        assert_eq!(levels[1].accumulated_path, ["X", "Y"]);
        assert_eq!(ids(&chain.leaves()), ["D1"]);

        let ChainNode::Leaf(leaf) = &levels[1].children[0] else {
            panic!("expected a leaf");
        };
        assert_eq!(leaf.accumulated_path, ["X", "Y"]);
        assert!(std::ptr::eq(leaf.document, &corpus.documents()[0]));
    }

    #[test]
    fn unknown_tag_gives_a_level_without_leaves() {
        let corpus = scenario_corpus();
        let chain = build_chain(&["Q"], &corpus);

        assert_eq!(chain.label(), "Q");
        assert!(chain.children().is_empty());
        assert_eq!(chain.facet_levels().len(), 1);
    }

    #[test]
    fn empty_path_gives_placeholder() {
        let corpus = scenario_corpus();
        let chain = build_chain::<&str>(&[], &corpus);

        assert!(chain.is_empty_selection());
        assert_eq!(chain.label(), EMPTY_CHAIN_LABEL);
        assert!(chain.children().is_empty());
        assert_eq!(
            chain.to_view(),
            ChainView::Empty {
                name: EMPTY_CHAIN_LABEL.to_string()
            }
        );
    }

    #[test]
    fn order_shapes_the_chain_but_not_the_leaves() {
        let corpus = scenario_corpus();
        let xy = build_chain(&["X", "Y"], &corpus);
        let yx = build_chain(&["Y", "X"], &corpus);

        assert_eq!(xy.label(), "X");
        assert_eq!(yx.label(), "Y");
        assert_eq!(ids(&xy.leaves()), ids(&yx.leaves()));
    }

    #[test]
    fn view_uses_document_labels() {
        let corpus = Corpus::from_documents(vec![
            Document::new("PMC7", "", ["a"]),
            Document::new("PMC8", "Titled", ["a"]),
        ]);
        let view = build_chain(&["a"], &corpus).to_view();

        let names: Vec<&str> = view.children().iter().map(ChainView::name).collect();
        assert_eq!(names, ["PMC7", "Titled"]);
        let json = serde_json::to_value(&view).expect("json");
        assert_eq!(json["children"][0]["document_id"], "PMC7");
    }

    const TAGS: [&str; 5] = ["a", "b", "c", "d", "e"];

    proptest! {
        #[test]
        fn one_level_per_tag_and_leaves_only_at_the_bottom(
            docs in prop::collection::vec(
                prop::collection::vec(prop::sample::select(TAGS.to_vec()), 0..4),
                0..10,
            ),
            path in prop::sample::subsequence(TAGS.to_vec(), 1..=4).prop_shuffle(),
        ) {
            let corpus = Corpus::from_documents(
                docs.into_iter()
                    .enumerate()
                    .map(|(i, tags)| Document::new(format!("D{i}"), "", tags))
                    .collect(),
            );
            let chain = build_chain(&path, &corpus);
            let levels = chain.facet_levels();
            prop_assert_eq!(levels.len(), path.len());

            let (deepest, upper) = levels.split_last().expect("non-empty path");
            for level in upper {
                prop_assert_eq!(level.children.len(), 1);
                prop_assert!(matches!(level.children[0], ChainNode::Facet(_)));
            }
            prop_assert!(deepest
                .children
                .iter()
                .all(|child| matches!(child, ChainNode::Leaf(_))));
            prop_assert_eq!(ids(&chain.leaves()), ids(&matching_documents(&corpus, &path)));
        }
    }
}
