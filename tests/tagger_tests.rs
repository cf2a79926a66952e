use measure_extract::lexicon::{HyponymGraph, TagVocabulary};
use measure_extract::measurement_types::{CompoundMeasurement, Measurement, TaggedMeasurement};
use measure_extract::syntax::{DependencyTree, Sentence, Token};
use measure_extract::tagger::MeasurementTagger;
use std::collections::HashMap;

fn distance_tagger(max_gram: usize) -> MeasurementTagger {
    let vocabulary = TagVocabulary::from_hierarchy(&HyponymGraph::builtin(), "linear_unit.n.01").unwrap();
    let right_mods = HashMap::from([("foot".to_string(), "inch".to_string())]);
    MeasurementTagger::new(vocabulary, max_gram, right_mods)
}

/// A hand-built tree that reports children directly, without head indices
struct StubTree {
    lemmas: Vec<&'static str>,
    deps: Vec<&'static str>,
    lefts: HashMap<usize, Vec<usize>>,
    rights: HashMap<usize, Vec<usize>>,
}

impl DependencyTree for StubTree {
    fn len(&self) -> usize {
        self.lemmas.len()
    }

    fn lemma(&self, index: usize) -> &str {
        self.lemmas[index]
    }

    fn dependency(&self, index: usize) -> &str {
        self.deps[index]
    }

    fn left_children(&self, index: usize) -> Vec<usize> {
        self.lefts.get(&index).cloned().unwrap_or_default()
    }

    fn right_children(&self, index: usize) -> Vec<usize> {
        self.rights.get(&index).cloned().unwrap_or_default()
    }
}

#[test]
fn test_longest_match_precedence() {
    let tags = TagVocabulary::from_tags(["foot", "light year", "year"]);
    let tagger = MeasurementTagger::new(tags, 2, HashMap::new());
    let tree = StubTree {
        lemmas: vec!["travel", "one", "light", "year"],
        deps: vec!["ROOT", "nummod", "compound", "dobj"],
        lefts: HashMap::from([(3, vec![1, 2])]),
        rights: HashMap::from([(0, vec![3])]),
    };

    let tagged = tagger.tag(&tree).unwrap();
    assert_eq!(tagged, vec![TaggedMeasurement::from(Measurement::new("one", "light year"))]);
}

#[test]
fn test_max_gram_one_misses_two_word_units() {
    let tags = TagVocabulary::from_tags(["light year", "year"]);
    let tagger = MeasurementTagger::new(tags, 1, HashMap::new());
    let tree = StubTree {
        lemmas: vec!["one", "light", "year"],
        deps: vec!["nummod", "compound", "ROOT"],
        lefts: HashMap::from([(2, vec![0, 1])]),
        rights: HashMap::new(),
    };

    let tagged = tagger.tag(&tree).unwrap();
    assert_eq!(tagged, vec![TaggedMeasurement::from(Measurement::new("one", "year"))]);
}

#[test]
fn test_compound_feet_and_inches() {
    // "he is 3 foot 7": 3 <-nummod- foot -nummod-> 7
    let sentence = Sentence::new(vec![
        Token::new("he", "he", "nsubj").with_head(1),
        Token::new("is", "be", "ROOT"),
        Token::new("3", "3", "nummod").with_head(3),
        Token::new("foot", "foot", "attr").with_head(1),
        Token::new("7", "7", "nummod").with_head(3),
    ]);

    let tagged = distance_tagger(2).tag(&sentence).unwrap();
    assert_eq!(
        tagged,
        vec![TaggedMeasurement::from(CompoundMeasurement::new(
            Measurement::new("3", "foot"),
            Measurement::new("7", "inch"),
        ))]
    );
}

#[test]
fn test_number_words_are_kept_as_lemmas() {
    let sentence = Sentence::new(vec![
        Token::new("two", "two", "nummod").with_head(1),
        Token::new("feet", "foot", "ROOT"),
    ]);

    let tagged = distance_tagger(2).tag(&sentence).unwrap();
    assert_eq!(tagged, vec![TaggedMeasurement::from(Measurement::new("two", "foot"))]);
}

#[test]
fn test_unit_without_modifier_is_not_tagged() {
    let sentence = Sentence::new(vec![
        Token::new("miles", "mile", "nsubj").with_head(1),
        Token::new("passed", "pass", "ROOT"),
    ]);
    assert_eq!(distance_tagger(2).tag(&sentence), None);
}

#[test]
fn test_non_numeric_dependents_are_ignored() {
    let sentence = Sentence::new(vec![
        Token::new("long", "long", "amod").with_head(1),
        Token::new("miles", "mile", "ROOT"),
    ]);
    assert_eq!(distance_tagger(2).tag(&sentence), None);
}

#[test]
fn test_tagger_is_reusable_across_sentences() {
    let tagger = distance_tagger(2);
    let first = Sentence::new(vec![
        Token::new("4", "4", "nummod").with_head(1),
        Token::new("fathoms", "fathom", "ROOT"),
    ]);
    let second = Sentence::new(vec![
        Token::new("9", "9", "nummod").with_head(1),
        Token::new("yards", "yard", "ROOT"),
    ]);

    assert_eq!(
        tagger.tag(&first).unwrap(),
        vec![TaggedMeasurement::from(Measurement::new("4", "fathom"))]
    );
    assert_eq!(
        tagger.tag(&second).unwrap(),
        vec![TaggedMeasurement::from(Measurement::new("9", "yard"))]
    );
    // the same sentence tags the same way twice
    assert_eq!(tagger.tag(&first), tagger.tag(&first));
}
