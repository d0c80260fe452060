use rand::seq::IndexedRandom;
use rand::Rng;

/// Number of facets offered before anything is selected.
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// Pick `count` distinct tags uniformly at random from `vocabulary`.
///
/// Returns every tag (in random order) when the vocabulary is smaller than
/// `count`. The vocabulary is expected to hold distinct tags already.
pub fn suggest<'a, R>(vocabulary: &'a [String], count: usize, rng: &mut R) -> Vec<&'a str>
where
    R: Rng + ?Sized,
{
    vocabulary
        .choose_multiple(rng, count)
        .map(String::as_str)
        .collect()
}

/// [`suggest`] with the thread-local generator.
pub fn suggest_random(vocabulary: &[String], count: usize) -> Vec<&str> {
    suggest(vocabulary, count, &mut rand::rng())
}
