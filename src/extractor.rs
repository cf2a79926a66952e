//! # Extraction Pipeline
//!
//! Wires the formatter, an NLP provider, the tagger and the converter into one
//! pass over a text: every line is formatted, parsed into sentences, tagged and
//! converted.

use serde::Serialize;
use tracing::{debug, info};

use crate::converter::Converter;
use crate::lexicon::LexicalHierarchy;
use crate::measurement_config::{ExtractorConfig, MeasurementParams};
use crate::measurement_errors::MeasurementError;
use crate::measurement_types::TaggedMeasurement;
use crate::syntax::{NlpProvider, Sentence};
use crate::tagger::MeasurementTagger;
use crate::text_processing::Formatter;
use crate::unit_conversion::{ConversionTable, UnitConversion};

/// Counters collected over one extraction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    /// Sentences handed to the tagger
    pub sentences: usize,
    /// Measurements found by the tagger
    pub tagged: usize,
    /// Measurements left after conversion
    pub converted: usize,
}

/// Measurements extracted from a text together with run counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    pub measurements: Vec<TaggedMeasurement>,
    pub summary: ExtractionSummary,
}

/// End-to-end measurement extraction
pub struct Extractor<N, P = ConversionTable> {
    formatter: Formatter,
    nlp: N,
    tagger: MeasurementTagger,
    converter: Converter<P>,
}

impl<N: NlpProvider> Extractor<N, ConversionTable> {
    /// Build an extractor from configuration
    ///
    /// The tag vocabulary is resolved here; an unknown root concept fails the
    /// whole construction.
    pub fn from_config<H>(
        config: &ExtractorConfig,
        params: &MeasurementParams,
        hierarchy: &H,
        nlp: N,
    ) -> Result<Self, MeasurementError>
    where
        H: LexicalHierarchy + ?Sized,
    {
        config.validate()?;
        let kind_params = params.get(config.kind);
        let vocabulary = kind_params.vocabulary(hierarchy)?;
        info!(
            kind = %config.kind,
            tags = vocabulary.len(),
            max_gram = config.max_gram,
            "Extractor configured"
        );

        let tagger = MeasurementTagger::new(vocabulary, config.max_gram, kind_params.right_mods);
        let converter = Converter::builtin(config.kind, config.return_unconverted);
        Ok(Self::new(Formatter::new(config.kind), nlp, tagger, converter))
    }
}

impl<N: NlpProvider, P: UnitConversion> Extractor<N, P> {
    pub fn new(formatter: Formatter, nlp: N, tagger: MeasurementTagger, converter: Converter<P>) -> Self {
        Self {
            formatter,
            nlp,
            tagger,
            converter,
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn tagger(&self) -> &MeasurementTagger {
        &self.tagger
    }

    pub fn converter(&self) -> &Converter<P> {
        &self.converter
    }

    /// Format, parse, tag and convert every line of `text`
    pub fn extract_text(&self, text: &str) -> Result<Extraction, MeasurementError> {
        debug!(lines = text.lines().count(), kind = %self.formatter.kind(), "Extracting from text");
        let mut sentences = Vec::new();
        for line in text.lines() {
            let formatted = self.formatter.format(line);
            if formatted.is_empty() {
                continue;
            }
            sentences.extend(self.nlp.parse(&formatted)?);
        }
        Ok(self.extract_sentences(&sentences))
    }

    /// Tag and convert sentences that were already parsed
    pub fn extract_sentences(&self, sentences: &[Sentence]) -> Extraction {
        let mut extraction = Extraction::default();

        for sentence in sentences {
            extraction.summary.sentences += 1;
            let Some(tagged) = self.tagger.tag(sentence) else {
                continue;
            };
            extraction.summary.tagged += tagged.len();
            debug!(sentence = %sentence.text(), tagged = tagged.len(), "Tagged sentence");
            extraction.measurements.extend(self.converter.convert(tagged));
        }

        extraction.summary.converted = extraction.measurements.len();
        info!(
            sentences = extraction.summary.sentences,
            tagged = extraction.summary.tagged,
            converted = extraction.summary.converted,
            "Extraction finished"
        );
        extraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::HyponymGraph;
    use crate::measurement_types::{Measurement, MeasurementKind};
    use crate::syntax::Token;

    /// Treats each formatted line as one sentence and attaches any number to
    /// the next word.
    struct NumberAttachingParser;

    impl NlpProvider for NumberAttachingParser {
        fn parse(&self, text: &str) -> Result<Vec<Sentence>, MeasurementError> {
            let words: Vec<&str> = text.split_whitespace().collect();
            let tokens = words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    let lemma = word.trim_end_matches('s');
                    if word.parse::<f64>().is_ok() && i + 1 < words.len() {
                        Token::new(word, word, "nummod").with_head(i + 1)
                    } else {
                        Token::new(word, lemma, "dep")
                    }
                })
                .collect();
            Ok(vec![Sentence::new(tokens)])
        }
    }

    #[test]
    fn test_extract_text() {
        let config = ExtractorConfig::default();
        let extractor = Extractor::from_config(
            &config,
            &MeasurementParams::default(),
            &HyponymGraph::builtin(),
            NumberAttachingParser,
        )
        .unwrap();

        let extraction = extractor
            .extract_text("I walked 5 miles\nnothing here\n2 inch of rain")
            .unwrap();
        assert_eq!(
            extraction.measurements,
            vec![
                Measurement::new("8046.72", "m").into(),
                Measurement::new("0.05", "m").into(),
            ]
        );
        assert_eq!(
            extraction.summary,
            ExtractionSummary {
                sentences: 3,
                tagged: 2,
                converted: 2
            }
        );
    }

    #[test]
    fn test_unknown_root_concept_is_fatal() {
        let mut params = MeasurementParams::default();
        params.set(
            MeasurementKind::Distance,
            crate::measurement_config::KindParams::new("nothing.n.01"),
        );
        let result = Extractor::from_config(
            &ExtractorConfig::default(),
            &params,
            &HyponymGraph::builtin(),
            NumberAttachingParser,
        );
        assert!(matches!(result, Err(MeasurementError::Lookup(_))));
    }
}
