use criterion::{BenchmarkId,black_box, criterion_group, criterion_main, Criterion};

use anagrams::*;
use anagrams::test::*;

///Synthetic word list: every three- to five-letter combination over a small set of letters
fn get_bench_dictionary() -> Dictionary {
    let letters = ["a", "e", "i", "l", "n", "o", "r", "s", "t"];
    let mut words: Vec<String> = get_test_wordlist();
    for a in letters.iter() {
        for b in letters.iter() {
            for c in letters.iter() {
                words.push(format!("{}{}{}", a, b, c));
                words.push(format!("{}{}{}{}", a, b, c, a));
                words.push(format!("{}{}{}{}{}", c, b, a, b, c));
            }
        }
    }
    Dictionary::build(words).expect("valid words")
}

pub fn count_benchmark(c: &mut Criterion) {
    c.bench_function("count_word_6_chars", |b| b.iter(|| {
        count(black_box("houses"))
    }));

    c.bench_function("count_word_12_chars", |b| b.iter(|| {
        count(black_box("benchmarking"))
    }));
}

pub fn find_benchmark(c: &mut Criterion) {
    let dictionary = get_bench_dictionary();
    let matrix = encode_all(&dictionary);
    let params = MatchParams::default();

    for input in ["listen", "rationales"] {
        let query = Query::new(input).expect("valid query");
        c.bench_with_input(BenchmarkId::new("find_recount", input), &query, |b, query| b.iter(|| {
            find_with(&dictionary, &dictionary, query, &params)
        }));
        c.bench_with_input(BenchmarkId::new("find_matrix", input), &query, |b, query| b.iter(|| {
            find_with(&dictionary, &matrix, query, &params)
        }));
    }

    c.bench_function("encode_all", |b| b.iter(|| {
        encode_all(&dictionary)
    }));
}

criterion_group!(benches, count_benchmark, find_benchmark);
criterion_main!(benches);
