use crate::error::AnagramError;
use crate::types::*;
use crate::vocab::*;

///Find all single-word and two-word anagrams of the query, with default parameters
pub fn find<'a>(dictionary: &'a Dictionary, query: &Query) -> Vec<MatchResult<'a>> {
    search(dictionary, dictionary, query, &MatchParams::default())
}

///Find anagrams of the query, reading frequency vectors from the specified encoding. Single-word
///matches come first, followed by the pairs, both in dictionary order. Returns `EncodingMismatch`
///if the encoding was not computed from this dictionary.
pub fn find_with<'a, E>(
    dictionary: &'a Dictionary,
    encoding: &E,
    query: &Query,
    params: &MatchParams,
) -> Result<Vec<MatchResult<'a>>, AnagramError>
where
    E: Encoding + ?Sized,
{
    encoding.verify(dictionary)?;
    Ok(search(dictionary, encoding, query, params))
}

///The search proper, `encoding` has been verified against `dictionary`
pub(crate) fn search<'a, E>(
    dictionary: &'a Dictionary,
    encoding: &E,
    query: &Query,
    params: &MatchParams,
) -> Vec<MatchResult<'a>>
where
    E: Encoding + ?Sized,
{
    let mut results = Vec::new();
    if query.is_empty() {
        return results;
    }
    if params.single_words {
        find_single_words(dictionary, encoding, query, params, &mut results);
    }
    if params.word_pairs && !params.is_full(results.len()) {
        find_word_pairs(dictionary, encoding, query, params, &mut results);
    }
    results
}

///Scans the length bucket of the query for words with an identical frequency vector, the query
///itself is not a match
fn find_single_words<'a, E>(
    dictionary: &'a Dictionary,
    encoding: &E,
    query: &Query,
    params: &MatchParams,
    results: &mut Vec<MatchResult<'a>>,
) where
    E: Encoding + ?Sized,
{
    for id in dictionary.range(query.len()) {
        if encoding.vector(id) == *query.vector() {
            if let Some(word) = dictionary.get(id) {
                if word.as_str() != query.text() {
                    results.push(MatchResult::SingleWord(word.as_str()));
                    if params.is_full(results.len()) {
                        return;
                    }
                }
            }
        }
    }
}

///For each feasible first word, the second word must have exactly the remaining letters, so only
///the (feasible part of the) bucket of the complementary length is searched.
fn find_word_pairs<'a, E>(
    dictionary: &'a Dictionary,
    encoding: &E,
    query: &Query,
    params: &MatchParams,
    results: &mut Vec<MatchResult<'a>>,
) where
    E: Encoding + ?Sized,
{
    let querylen = query.len();

    //feasible candidates grouped per length, positions stay in dictionary order
    let mut buckets: Vec<Vec<(WordId, FrequencyVector)>> =
        vec![Vec::new(); querylen.min(dictionary.max_length() + 1)];
    for id in dictionary.unchecked_candidates(encoding, query.vector()) {
        if let Some(word) = dictionary.get(id) {
            if word.len() >= params.min_word_length {
                buckets[word.len()].push((id, encoding.vector(id)));
            }
        }
    }

    for (length, firsts) in buckets.iter().enumerate() {
        let seconds = match buckets.get(querylen - length) {
            Some(seconds) if !seconds.is_empty() => seconds,
            _ => continue,
        };
        for (id1, vector1) in firsts.iter() {
            let need = match query.vector().delete(vector1) {
                Some(need) => need,
                None => continue,
            };
            for (id2, vector2) in seconds.iter() {
                if params.deduplicate_pairs && id2 < id1 {
                    continue;
                }
                if *vector2 == need {
                    if let (Some(w1), Some(w2)) = (dictionary.get(*id1), dictionary.get(*id2)) {
                        results.push(MatchResult::WordPair(w1.as_str(), w2.as_str()));
                        if params.is_full(results.len()) {
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(words: &[&str]) -> Dictionary {
        Dictionary::build(words).expect("valid dictionary")
    }

    #[test]
    fn pairs_are_ordered_both_ways() {
        let dictionary = dictionary(&["ab", "cd"]);
        let query = Query::new("abcd").expect("query");
        assert_eq!(
            find(&dictionary, &query),
            vec![MatchResult::WordPair("ab", "cd"), MatchResult::WordPair("cd", "ab")]
        );
    }

    #[test]
    fn word_pairs_with_itself() {
        let dictionary = dictionary(&["ab"]);
        let query = Query::new("baba").expect("query");
        assert_eq!(find(&dictionary, &query), vec![MatchResult::WordPair("ab", "ab")]);
    }

    #[test]
    fn deduplicated_pairs() {
        let dictionary = dictionary(&["ab", "cd", "dc"]);
        let query = Query::new("abcd").expect("query");
        let params = MatchParams::default().with_deduplicate_pairs();
        assert_eq!(
            find_with(&dictionary, &dictionary, &query, &params).expect("search"),
            vec![MatchResult::WordPair("ab", "cd"), MatchResult::WordPair("ab", "dc")]
        );
    }

    #[test]
    fn max_matches_truncates() {
        let dictionary = dictionary(&["ab", "cd", "dc", "abcd", "dcba"]);
        let query = Query::new("bcda").expect("query");
        let params = MatchParams::default().with_max_matches(3);
        assert_eq!(
            find_with(&dictionary, &dictionary, &query, &params).expect("search"),
            vec![
                MatchResult::SingleWord("abcd"),
                MatchResult::SingleWord("dcba"),
                MatchResult::WordPair("ab", "cd"),
            ]
        );
    }

    #[test]
    fn min_word_length_skips_short_components() {
        let dictionary = dictionary(&["a", "b", "bcd", "acd"]);
        let query = Query::new("abcd").expect("query");
        assert_eq!(find(&dictionary, &query).len(), 4);
        let params = MatchParams::default().with_min_word_length(2);
        assert!(find_with(&dictionary, &dictionary, &query, &params).expect("search").is_empty());
    }

    #[test]
    fn rejects_equally_sized_foreign_dictionary() {
        let dictionary = dictionary(&["xy", "zw"]);
        let other = self::dictionary(&["ab", "cd"]);
        let query = Query::new("abcd").expect("query");
        assert!(matches!(
            find_with(&dictionary, &other, &query, &MatchParams::default()),
            Err(AnagramError::EncodingMismatch(_))
        ));
        //an identical but separately built dictionary is accepted
        let copy = self::dictionary(&["xy", "zw"]);
        let query = Query::new("xyzw").expect("query");
        assert_eq!(
            find_with(&dictionary, &copy, &query, &MatchParams::default()).expect("search"),
            find(&dictionary, &query)
        );
    }

    #[test]
    fn query_longer_than_any_word() {
        let dictionary = dictionary(&["a", "b"]);
        let query = Query::new("abcdefghij").expect("query");
        assert!(find(&dictionary, &query).is_empty());
    }
}
