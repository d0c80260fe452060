use tagtrail_corpus::{Corpus, Document};

/// D1{X,Y}, D2{X}, D3{Y,Z}
pub(crate) fn scenario_corpus() -> Corpus {
    Corpus::from_documents(vec![
        Document::new("D1", "First", ["X", "Y"]),
        Document::new("D2", "Second", ["X"]),
        Document::new("D3", "Third", ["Y", "Z"]),
    ])
}

pub(crate) fn ids<'a>(docs: &[&'a Document]) -> Vec<&'a str> {
    docs.iter().map(|doc| doc.id()).collect()
}
