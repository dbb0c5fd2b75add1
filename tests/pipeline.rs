use std::collections::HashSet;
use std::fs;

use pretty_assertions::assert_eq;
use question_tokeniser::{
    load, load_vocab, parse_corpus, save_vocabs, vocab_from_training_data, Config, Error,
    OneHotEncoder, OneHotLabels,
};

const TRAIN: &str = "\
NUM:date When did Elvis Presley die ?
NUM:money How much did the Louisiana Purchase cost , in $ 15,000,000 terms ?
NUM:perc What is 50 % of 100 ?
LOC:other Where can I find http://www.example.com/faq ?
HUM:ind Who sang `` Blue Suede Shoes '' in March 1956 ?
";

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("train.txt"), TRAIN).expect("write train");
    fs::write(
        dir.path().join("run.toml"),
        r#"
[paths]
train = "train.txt"

[tokenisation]
TOKENISE_QUOTES = true
TOKENISE_NUMBERS = true
TOKENISE_MONTH = true
TOKENISE_PERCENTAGES = true
REMOVE_QUESTION_MARKS = true
TOKENISE_URLS = true
TOKENISE_MONEY = true
TOKENISE_YEAR = true
TOKENISE_COMMA_SEPERATED_NUMBERS = true
"#,
    )
    .expect("write config");
    dir
}

#[test]
fn tokenises_dataset_from_config() {
    let dir = workspace();
    let config = Config::from_config_file(dir.path().join("run.toml")).expect("config");
    let dataset = load(&config.paths.train).expect("dataset");
    let tokenised = parse_corpus(&dataset.questions, &config.rules);

    assert_eq!(dataset.labels[2], "NUM:perc");
    assert_eq!(tokenised[2], ["What", "is", "<PERCENT>", "of", "<NUMBER>"]);
    assert_eq!(tokenised[3], ["Where", "can", "I", "find", "<URL>"]);
    assert_eq!(
        tokenised[4],
        ["Who", "sang", "<QUOTE>", "Blue", "Suede", "Shoes", "<QUOTE>", "in", "<MONTH>", "<YEAR>"]
    );
    assert!(tokenised[1].contains(&"<MONEY>".to_string()));
    assert!(tokenised.iter().flatten().all(|t| t != "?"));
}

#[test]
fn vocabulary_round_trips_through_file() {
    let dir = workspace();
    let train = dir.path().join("train.txt");
    let out = dir.path().join("vocab.txt");

    save_vocabs(&train, &out).expect("save");
    let loaded = load_vocab(&out).expect("load");

    let as_set: HashSet<String> = loaded.iter().cloned().collect();
    assert_eq!(as_set.len(), loaded.len(), "vocabulary file has duplicates");
    assert_eq!(as_set, vocab_from_training_data(&train).expect("vocab"));
}

#[test]
fn one_hot_encoder_seeded_from_vocab_file() {
    let dir = workspace();
    let train = dir.path().join("train.txt");
    let out = dir.path().join("vocab.txt");
    save_vocabs(&train, &out).expect("save");

    let vocab = load_vocab(&out).expect("load");
    let mut encoder = OneHotEncoder::from_vocab(vocab.clone());
    assert_eq!(encoder.tokens(), vocab.as_slice());

    let question = vec![vec![vocab[0].clone(), vocab[1].clone()]];
    let encoded = encoder.encode(&question, false).expect("encode");
    assert_eq!(encoded[0].dim(), (2, vocab.len()));
    assert_eq!(encoded[0][[0, 0]], 1.0);
    assert_eq!(encoded[0][[1, 1]], 1.0);

    let unseen = vec![vec!["never-seen-token".to_string()]];
    assert!(matches!(
        encoder.encode(&unseen, false),
        Err(Error::UnknownToken(_))
    ));
}

#[test]
fn labels_index_matches_dataset() {
    let dir = workspace();
    let dataset = load(dir.path().join("train.txt")).expect("dataset");
    let labels = OneHotLabels::from_labels(&dataset.labels);

    assert_eq!(labels.len(), 5);
    for label in &dataset.labels {
        let index = labels.idx_for_label(label).expect("known label");
        assert_eq!(labels.label_for_idx(index).expect("known index"), label);
    }
}
