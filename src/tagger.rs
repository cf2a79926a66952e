//! # Measurement Tagger Module
//!
//! Finds unit phrases in a dependency-parsed sentence and pairs them with the
//! numbers that modify them.
//!
//! The scan is greedy and longest-match-first: windows of `max_gram` tokens are
//! tried before shorter ones, left to right, so "light year" wins over "year".
//! Tokens of a window that produced a measurement are marked consumed and no
//! later window overlapping them is considered.

use log::{debug, trace};
use std::collections::HashMap;

use crate::lexicon::TagVocabulary;
use crate::measurement_config::DEFAULT_MAX_GRAM;
use crate::measurement_types::{CompoundMeasurement, Measurement, TaggedMeasurement};
use crate::syntax::{DependencyTree, NUMERIC_MODIFIER_LABELS};
use crate::utils::overlapping;

/// Which side of a token to search for a numeric modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Tags measurements using a fixed vocabulary of unit phrases
#[derive(Debug, Clone)]
pub struct MeasurementTagger {
    tags: TagVocabulary,
    max_gram: usize,
    right_modifiers: HashMap<String, String>,
}

impl MeasurementTagger {
    /// Create a tagger
    ///
    /// # Arguments
    ///
    /// * `tags` - unit phrases to match
    /// * `max_gram` - longest phrase, in tokens, to try
    /// * `right_modifiers` - unit lemmas that may carry a second measurement on
    ///   their right, mapped to that measurement's unit (e.g. "foot" -> "inch")
    pub fn new(tags: TagVocabulary, max_gram: usize, right_modifiers: HashMap<String, String>) -> Self {
        Self {
            tags,
            max_gram,
            right_modifiers,
        }
    }

    /// A tagger with the default n-gram width and no right modifiers
    pub fn with_tags(tags: TagVocabulary) -> Self {
        Self::new(tags, DEFAULT_MAX_GRAM, HashMap::new())
    }

    pub fn tags(&self) -> &TagVocabulary {
        &self.tags
    }

    pub fn max_gram(&self) -> usize {
        self.max_gram
    }

    /// Extract measurements from a parsed sentence
    ///
    /// Returns `None` when nothing in the sentence was tagged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use measure_extract::lexicon::TagVocabulary;
    /// use measure_extract::measurement_types::{Measurement, TaggedMeasurement};
    /// use measure_extract::syntax::{Sentence, Token};
    /// use measure_extract::tagger::MeasurementTagger;
    ///
    /// let tagger = MeasurementTagger::with_tags(TagVocabulary::from_tags(["mile"]));
    /// let sentence = Sentence::new(vec![
    ///     Token::new("1", "1", "nummod").with_head(1),
    ///     Token::new("mile", "mile", "ROOT"),
    /// ]);
    ///
    /// let tagged = tagger.tag(&sentence).unwrap();
    /// assert_eq!(tagged, vec![TaggedMeasurement::Single(Measurement::new("1", "mile"))]);
    /// ```
    pub fn tag<T>(&self, sentence: &T) -> Option<Vec<TaggedMeasurement>>
    where
        T: DependencyTree + ?Sized,
    {
        let len = sentence.len();
        let mut consumed = vec![false; len];
        let mut measurements = Vec::new();

        for n in (1..=self.max_gram).rev() {
            for window in overlapping(len, n) {
                if consumed[window.clone()].iter().any(|&c| c) {
                    continue;
                }

                let phrase = window
                    .clone()
                    .map(|i| sentence.lemma(i))
                    .collect::<Vec<_>>()
                    .join(" ");
                if !self.tags.contains(&phrase) {
                    continue;
                }

                // the last token of the phrase carries the modifiers
                let anchor = window.end - 1;
                match self.resolve_modifiers(sentence, anchor, &phrase) {
                    Some(measurement) => {
                        debug!("Tagged '{}' as {}", phrase, measurement);
                        measurements.push(measurement);
                        consumed[window].iter_mut().for_each(|c| *c = true);
                    }
                    None => trace!("Unit '{}' at {} has no numeric modifier", phrase, anchor),
                }
            }
        }

        if measurements.is_empty() {
            None
        } else {
            Some(measurements)
        }
    }

    /// Pair a matched unit with the numeric modifiers of its anchor token
    fn resolve_modifiers<T>(&self, sentence: &T, anchor: usize, unit: &str) -> Option<TaggedMeasurement>
    where
        T: DependencyTree + ?Sized,
    {
        let left = self
            .find_modifier(sentence, anchor, Direction::Left)
            .map(|value| Measurement::new(value, unit));

        let right = self
            .right_modifiers
            .get(sentence.lemma(anchor))
            .and_then(|right_unit| {
                self.find_modifier(sentence, anchor, Direction::Right)
                    .map(|value| Measurement::new(value, right_unit.as_str()))
            });

        match (left, right) {
            (Some(left), Some(right)) => Some(CompoundMeasurement::new(left, right).into()),
            (Some(single), None) | (None, Some(single)) => Some(single.into()),
            (None, None) => None,
        }
    }

    /// Lemma of the first child in `direction` labelled as a numeric modifier
    fn find_modifier<'s, T>(&self, sentence: &'s T, token: usize, direction: Direction) -> Option<&'s str>
    where
        T: DependencyTree + ?Sized,
    {
        let children = match direction {
            Direction::Left => sentence.left_children(token),
            Direction::Right => sentence.right_children(token),
        };
        children
            .into_iter()
            .find(|&child| NUMERIC_MODIFIER_LABELS.contains(&sentence.dependency(child)))
            .map(|child| sentence.lemma(child))
    }
}
