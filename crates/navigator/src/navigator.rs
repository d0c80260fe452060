use crate::chain::{build_chain, ChainNode};
use crate::narrowing::{available_facets, facets_of, matching_documents};
use tagtrail_corpus::{Corpus, Document};
use tagtrail_protocol::{DocumentSummary, ExploreView};

/// Read-only entry point over a loaded corpus.
///
/// Holds no selection state: every call takes the current path and
/// recomputes from scratch.
#[derive(Debug, Clone, Copy)]
pub struct FacetNavigator<'a> {
    corpus: &'a Corpus,
}

/// Everything a front end needs after the selection path changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration<'a> {
    pub path: Vec<String>,
    pub matching: Vec<&'a Document>,
    pub available_facets: Vec<&'a str>,
    pub chain: ChainNode<'a>,
}

impl<'a> FacetNavigator<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &'a Corpus {
        self.corpus
    }

    pub fn matching<S: AsRef<str>>(&self, path: &[S]) -> Vec<&'a Document> {
        matching_documents(self.corpus, path)
    }

    pub fn available_facets<S: AsRef<str>>(&self, path: &[S]) -> Vec<&'a str> {
        available_facets(self.corpus, path)
    }

    pub fn chain<S: AsRef<str>>(&self, path: &[S]) -> ChainNode<'a> {
        build_chain(path, self.corpus)
    }

    pub fn explore<S: AsRef<str>>(&self, path: &[S]) -> Exploration<'a> {
        let matching = matching_documents(self.corpus, path);
        let available_facets = facets_of(&matching, path);
        Exploration {
            path: path.iter().map(|tag| tag.as_ref().to_string()).collect(),
            available_facets,
            chain: build_chain(path, self.corpus),
            matching,
        }
    }
}

impl Exploration<'_> {
    pub fn to_view(&self) -> ExploreView {
        ExploreView {
            path: self.path.clone(),
            matching: self
                .matching
                .iter()
                .map(|doc| DocumentSummary {
                    id: doc.id().to_string(),
                    title: doc.title().to_string(),
                })
                .collect(),
            available_facets: self
                .available_facets
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
            chain: self.chain.to_view(),
        }
    }
}
