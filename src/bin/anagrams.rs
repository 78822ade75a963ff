extern crate clap;

use clap::{App, Arg, ArgMatches, SubCommand};
use simple_error::{bail, SimpleError};
use std::error::Error;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::exit;

use anagrams::*;

fn output_matches_as_text(out: &mut impl Write, matches: &[MatchResult]) -> io::Result<()> {
    for m in matches {
        writeln!(out, "{}", m)?;
    }
    Ok(())
}

fn output_matches_as_json(out: &mut impl Write, input: &str, matches: &[MatchResult], seqnr: usize) -> Result<(), Box<dyn Error>> {
    if seqnr > 1 {
        writeln!(out, ",")?;
    }
    writeln!(out, "    {{ \"input\": {}, \"matches\": [ ", serde_json::to_string(input)?)?;
    let l = matches.len();
    for (i, m) in matches.iter().enumerate() {
        let words = serde_json::to_string(&m.words())?;
        if i < l - 1 {
            writeln!(out, "        {},", words)?;
        } else {
            writeln!(out, "        {}", words)?;
        }
    }
    write!(out, "    ]}}")?;
    Ok(())
}

///Wraps everything `body` writes in a JSON array. The array is closed even if `body` fails halfway,
///its error is returned afterwards.
fn output_json_array<W: Write>(out: &mut W, body: impl FnOnce(&mut W) -> Result<(), Box<dyn Error>>) -> Result<(), Box<dyn Error>> {
    writeln!(out, "[")?;
    let result = body(out);
    writeln!(out, "\n]")?;
    out.flush()?;
    result
}

fn output_index(out: &mut impl Write, model: &AnagramModel) -> io::Result<()> {
    for (length, range) in model.dictionary().index().buckets() {
        writeln!(out, "{}\t{}\t{}\t{}", length, range.start, range.end, range.len())?;
    }
    Ok(())
}

///Prepares an input line for querying, returns None if there is nothing to query
fn prepare_input(input: &str, lenient: bool) -> Option<String> {
    let input = if lenient {
        strip_to_alphabet(input)
    } else {
        input.trim().to_string()
    };
    if input.is_empty() {
        None
    } else {
        Some(input)
    }
}

fn process(out: &mut impl Write, model: &AnagramModel, inputs: &[String], params: &MatchParams, json: bool, headers: bool, seqnr: &mut usize) -> Result<(), Box<dyn Error>> {
    for (input, result) in inputs.iter().zip(model.find_all_anagrams(inputs, params)) {
        let matches = result?;
        *seqnr += 1;
        if json {
            output_matches_as_json(out, input, &matches, *seqnr)?;
        } else {
            if headers {
                writeln!(out, "# {}", input)?;
            }
            output_matches_as_text(out, &matches)?;
        }
    }
    Ok(())
}

fn process_stream(out: &mut impl Write, model: &AnagramModel, inputstream: impl Read, params: &MatchParams, lenient: bool, json: bool, seqnr: &mut usize) -> Result<(), Box<dyn Error>> {
    let f_buffer = BufReader::new(inputstream);
    for line in f_buffer.lines() {
        let line = line?;
        if let Some(input) = prepare_input(&line, lenient) {
            process(out, model, &[input], params, json, true, seqnr)?;
            out.flush()?;
        }
    }
    Ok(())
}

///Answers the queries given on the command line, or those read from standard input if there are none
fn process_queries(out: &mut impl Write, model: &AnagramModel, queries: Option<clap::Values>, params: &MatchParams, lenient: bool, json: bool) -> Result<(), Box<dyn Error>> {
    let mut seqnr = 0;
    if let Some(queries) = queries {
        let inputs: Vec<String> = queries.filter_map(|q| prepare_input(q, lenient)).collect();
        process(out, model, &inputs, params, json, inputs.len() > 1, &mut seqnr)
    } else {
        eprintln!("(accepting standard input; enter words to find anagrams for, one per line)");
        let stdin = io::stdin();
        process_stream(out, model, stdin, params, lenient, json, &mut seqnr)
    }
}

fn parse_number(args: &ArgMatches, name: &str) -> Result<usize, Box<dyn Error>> {
    match args.value_of(name) {
        Some(value) => value.parse::<usize>().map_err(|_| {
            SimpleError::new(format!("--{} should be a non-negative integer, got {}", name, value)).into()
        }),
        None => Ok(0),
    }
}

pub fn common_arguments<'a, 'b>() -> Vec<clap::Arg<'a, 'b>> {
    let mut args: Vec<Arg> = Vec::new();
    args.push(Arg::with_name("wordlist")
        .long("wordlist")
        .short("w")
        .help("Word list against which all anagrams are found (may be used multiple times). The word list is a plain text file with one word per line, blank lines are ignored.")
        .takes_value(true)
        .number_of_values(1)
        .multiple(true)
        .required(true));
    args.push(Arg::with_name("skip-invalid")
        .long("skip-invalid")
        .help("Skip entries in the word list that contain characters other than a-z, instead of failing")
        .required(false));
    args.push(Arg::with_name("min-length")
        .long("min-length")
        .help("Only load words of at least this length")
        .takes_value(true)
        .required(false));
    args.push(Arg::with_name("max-length")
        .long("max-length")
        .help("Only load words of at most this length")
        .takes_value(true)
        .required(false));
    args
}

pub fn query_arguments<'a, 'b>() -> Vec<clap::Arg<'a, 'b>> {
    let mut args: Vec<Arg> = Vec::new();
    args.push(Arg::with_name("encoding")
        .long("encoding")
        .short("e")
        .help("Load the precomputed encoding of the word list from this file (as produced by the encode subcommand)")
        .takes_value(true)
        .required(false));
    args.push(Arg::with_name("lenient")
        .long("lenient")
        .help("Drop all characters that are not letters from the query rather than rejecting the query")
        .required(false));
    args.push(Arg::with_name("json")
        .long("json")
        .short("j")
        .help("Output json instead of plain text")
        .required(false));
    args.push(Arg::with_name("singles-only")
        .long("singles-only")
        .help("Only find single-word anagrams")
        .conflicts_with("pairs-only")
        .required(false));
    args.push(Arg::with_name("pairs-only")
        .long("pairs-only")
        .help("Only find two-word anagrams")
        .required(false));
    args.push(Arg::with_name("dedup-pairs")
        .long("dedup-pairs")
        .help("Report each pair of words only once rather than in both orders")
        .required(false));
    args.push(Arg::with_name("min-word-length")
        .long("min-word-length")
        .short("l")
        .help("Minimum length of each word in a two-word anagram")
        .takes_value(true)
        .default_value("1"));
    args.push(Arg::with_name("max-matches")
        .long("max-matches")
        .short("n")
        .help("Number of matches to return per query (0 for unlimited)")
        .takes_value(true)
        .default_value("0"));
    args.push(Arg::with_name("single-thread")
        .long("single-thread")
        .help("Use only a single thread when processing multiple queries")
        .required(false));
    args.push(Arg::with_name("queries")
        .help("Words to find anagrams for; if none are given, they are read from standard input, one per line")
        .takes_value(true)
        .multiple(true)
        .required(false));
    args
}

fn load_model(args: &ArgMatches, debug: bool) -> Result<AnagramModel, Box<dyn Error>> {
    let mut params = WordListParams::default()
        .with_min_length(parse_number(args, "min-length")?)
        .with_max_length(parse_number(args, "max-length")?);
    if args.is_present("skip-invalid") {
        params = params.with_skip_invalid();
    }

    let mut model = AnagramModel::new(debug);

    eprintln!("Loading word lists...");
    if let Some(filenames) = args.values_of("wordlist") {
        for filename in filenames {
            if let Err(e) = model.read_wordlist(filename, &params) {
                bail!("Error reading word list {}: {}", filename, e);
            }
        }
    }
    if model.skipped > 0 {
        eprintln!(" - Skipped {} invalid entries", model.skipped);
    }

    eprintln!("Building model...");
    model.build()?;
    Ok(model)
}

fn run() -> Result<(), Box<dyn Error>> {
    let rootargs = App::new("anagrams")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("Find single-word and two-word anagrams of a query in a word list")
                    .subcommand(
                        SubCommand::with_name("query")
                            .about("Find all anagrams of the provided words")
                            .args(&common_arguments())
                            .args(&query_arguments())
                    )
                    .subcommand(
                        SubCommand::with_name("encode")
                            .about("Compute the frequency vectors of the whole word list and save them to file")
                            .args(&common_arguments())
                            .arg(Arg::with_name("output")
                                .long("output")
                                .short("o")
                                .help("File to write the encoding to")
                                .takes_value(true)
                                .required(true))
                    )
                    .subcommand(
                        SubCommand::with_name("index")
                            .about("Output the length index of the word list (length, start, end, count)")
                            .args(&common_arguments())
                    )
                    .arg(Arg::with_name("debug")
                        .long("debug")
                        .short("D")
                        .help("Debug")
                        .required(false))
                    .get_matches();

    let debug = rootargs.is_present("debug");

    if let Some(args) = rootargs.subcommand_matches("index") {
        let model = load_model(args, debug)?;
        output_index(&mut io::stdout().lock(), &model)?;
    } else if let Some(args) = rootargs.subcommand_matches("encode") {
        let mut model = load_model(args, debug)?;
        let output = args.value_of("output").unwrap_or_default();
        model.save_encoding(Path::new(output))?;
    } else if let Some(args) = rootargs.subcommand_matches("query") {
        let mut model = load_model(args, debug)?;
        if let Some(encoding) = args.value_of("encoding") {
            model.load_encoding(Path::new(encoding))?;
        }

        let mut params = MatchParams::default()
            .with_single_words(!args.is_present("pairs-only"))
            .with_word_pairs(!args.is_present("singles-only"))
            .with_min_word_length(parse_number(args, "min-word-length")?)
            .with_max_matches(parse_number(args, "max-matches")?);
        if args.is_present("dedup-pairs") {
            params = params.with_deduplicate_pairs();
        }
        if args.is_present("single-thread") {
            params = params.with_single_thread();
        }
        let lenient = args.is_present("lenient");
        let json = args.is_present("json");

        eprintln!("Querying the model...");
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let queries = args.values_of("queries");
        if json {
            output_json_array(&mut out, |out| process_queries(out, &model, queries, &params, lenient, json))?;
        } else {
            process_queries(&mut out, &model, queries, &params, lenient, json)?;
        }
    } else {
        bail!("No command specified, use one of: query, encode, index (see --help)");
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("ERROR: {}", e);
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anagrams::test::*;

    fn json_for(model: &AnagramModel, inputs: &[&str]) -> (Result<(), Box<dyn Error>>, serde_json::Value) {
        let inputs: Vec<String> = inputs.iter().map(|s| s.to_string()).collect();
        let params = get_test_matchparams();
        let mut out: Vec<u8> = Vec::new();
        let result = output_json_array(&mut out, |out| {
            let mut seqnr = 0;
            for input in inputs.iter() {
                process(out, model, &[input.clone()], &params, true, false, &mut seqnr)?;
            }
            Ok(())
        });
        let value = serde_json::from_slice(&out).expect("output is valid json");
        (result, value)
    }

    #[test]
    fn json_output() {
        let model = get_test_model();
        let (result, value) = json_for(&model, &["dormitory", "listen"]);
        assert!(result.is_ok());
        assert_eq!(value[0]["input"], "dormitory");
        assert_eq!(value[0]["matches"][0], serde_json::json!(["room", "dirty"]));
        assert_eq!(value[1]["matches"].as_array().map(|m| m.len()), Some(3));
    }

    #[test]
    fn json_array_closed_on_invalid_query() {
        let model = get_test_model();
        let (result, value) = json_for(&model, &["listen", "it's", "dormitory"]);
        assert!(result.is_err());
        let entries = value.as_array().expect("array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["input"], "listen");
    }

    #[test]
    fn json_array_empty() {
        let model = get_test_model();
        let (result, value) = json_for(&model, &[]);
        assert!(result.is_ok());
        assert_eq!(value, serde_json::json!([]));
    }

    #[test]
    fn json_escapes_input() {
        let model = get_test_model();
        let mut out: Vec<u8> = Vec::new();
        let input = "tab\there \"quoted\" \\ \u{1}";
        output_matches_as_json(&mut out, input, &model.find_anagrams("listen", &get_test_matchparams()).expect("query"), 1)
            .expect("write");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("output is valid json");
        assert_eq!(value["input"], input);
        assert_eq!(value["matches"].as_array().map(|m| m.len()), Some(3));
    }

    #[test]
    fn index_output() {
        let model = get_test_model();
        let mut out: Vec<u8> = Vec::new();
        output_index(&mut out, &model).expect("write");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.lines().any(|line| line == "1\t0\t1\t1"));
    }
}
