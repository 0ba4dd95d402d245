use itertools::{Itertools, repeat_n};

use crate::automaton::Dfa;

/// All words over the union of both alphabets (single-character symbols only)
/// up to `max_word_length` symbols, plus every such word with a trailing
/// symbol that neither alphabet contains.
fn words(a: &Dfa, b: &Dfa, max_word_length: usize) -> Vec<String> {
    let mut symbols = a
        .alphabet()
        .iter()
        .chain(b.alphabet().iter())
        .filter_map(|s| s.chars().exactly_one().ok())
        .unique()
        .collect_vec();
    symbols.sort();

    let foreign = ('!'..='~')
        .find(|c| !symbols.contains(c))
        .unwrap_or('\u{2603}');

    let mut words = vec![];
    for i in 0..=max_word_length {
        for word in repeat_n(symbols.iter(), i).multi_cartesian_product() {
            let word: String = word.into_iter().collect();
            words.push(format!("{word}{foreign}"));
            words.push(word);
        }
    }

    words
}

/// Checks if two automata behave the same: same verdict, same trace and same
/// message on every word up to a certain length.
pub fn same_behaviour(a: &Dfa, b: &Dfa, max_word_length: usize) -> bool {
    words(a, b, max_word_length)
        .iter()
        .all(|word| a.process_string(word) == b.process_string(word))
}

pub fn assert_same_behaviour(a: &Dfa, b: &Dfa, max_word_length: usize) {
    for word in words(a, b, max_word_length) {
        let run_a = a.process_string(&word);
        let run_b = b.process_string(&word);

        assert_eq!(
            run_a, run_b,
            "{:?} is processed differently by automaton `a` and automaton `b`",
            word
        );
    }
}

/// Checks if two automata accept the same words up to a certain length,
/// ignoring traces and messages.
pub fn same_language(a: &Dfa, b: &Dfa, max_word_length: usize) -> bool {
    words(a, b, max_word_length)
        .iter()
        .all(|word| a.process_string(word).accepted() == b.process_string(word).accepted())
}
