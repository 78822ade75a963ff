use crate::types::*;
use crate::vocab::*;
use crate::AnagramModel;

pub const WORDLIST: &[&str] = &[
    "cat",
    "act",
    "tac",
    "dog",
    "god",
    "a",
    "it",
    "ti",
    "tail",
    "hot",
    "olt",
    "enlit",
    "listen",
    "silent",
    "enlist",
    "tinsel",
    "stressed",
    "desserts",
    "dormitory",
    "dirty",
    "room",
];

pub fn get_test_wordlist() -> Vec<String> {
    WORDLIST.iter().map(|w| w.to_string()).collect()
}

pub fn get_test_dictionary() -> Dictionary {
    Dictionary::build(WORDLIST).expect("test word list is valid")
}

pub fn get_test_model() -> AnagramModel {
    let mut model = AnagramModel::new(false);
    let params = WordListParams::default();
    for word in WORDLIST {
        model.add_to_wordlist(word, &params).expect("test word list is valid");
    }
    model.build().expect("building test model");
    model
}

pub fn get_test_matchparams() -> MatchParams {
    MatchParams::default().with_single_thread()
}
