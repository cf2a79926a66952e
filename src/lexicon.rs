//! # Lexicon Module
//!
//! The tag vocabulary is the set of unit phrases the tagger matches. It is
//! built once at startup by asking a lexical hierarchy for every lemma below a
//! root concept, WordNet style: `linear_unit.n.01` expands to "mile", "foot",
//! "light year" and so on.
//!
//! [`HyponymGraph`] is an in-memory hierarchy. It ships with a built-in graph
//! of measurement units for every
//! [`MeasurementKind`](crate::measurement_types::MeasurementKind) and can also be loaded
//! from JSON.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use crate::measurement_errors::MeasurementError;

/// Resolves a concept to the lemmas of all concepts below it
pub trait LexicalHierarchy {
    /// Lemma names of the transitive hyponyms of `concept_id`
    ///
    /// Fails with [`MeasurementError::Lookup`] when the concept is unknown.
    fn hyponym_lemmas(&self, concept_id: &str) -> Result<HashSet<String>, MeasurementError>;
}

/// One node of the hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Lemma names of this concept, underscores for spaces ("light_year")
    #[serde(default)]
    pub lemmas: Vec<String>,
    /// Ids of the direct hyponyms
    #[serde(default)]
    pub hyponyms: Vec<String>,
}

/// An in-memory concept graph keyed by concept id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HyponymGraph {
    concepts: HashMap<String, Concept>,
}

type ConceptEntry = (&'static str, &'static [&'static str], &'static [&'static str]);

// (id, lemmas, hyponyms)
const BUILTIN_CONCEPTS: &[ConceptEntry] = &[
    // distance
    ("linear_unit.n.01", &["linear_unit", "linear_measure"], &[
        "metric_linear_unit.n.01", "english_linear_unit.n.01",
        "nautical_linear_unit.n.01", "astronomy_unit.n.01",
    ]),
    ("metric_linear_unit.n.01", &["metric_linear_unit"], &[
        "meter.n.01", "kilometer.n.01", "centimeter.n.01", "millimeter.n.01",
        "micron.n.01", "nanometer.n.01",
    ]),
    ("meter.n.01", &["meter", "metre", "m"], &[]),
    ("kilometer.n.01", &["kilometer", "kilometre", "km", "klick"], &[]),
    ("centimeter.n.01", &["centimeter", "centimetre", "cm"], &[]),
    ("millimeter.n.01", &["millimeter", "millimetre", "mm"], &[]),
    ("micron.n.01", &["micron", "micrometer"], &[]),
    ("nanometer.n.01", &["nanometer", "nanometre", "nm"], &[]),
    ("english_linear_unit.n.01", &["english_linear_unit"], &[
        "inch.n.01", "foot.n.02", "yard.n.01", "mile.n.01", "furlong.n.01",
        "chain.n.08", "rod.n.03",
    ]),
    ("inch.n.01", &["inch"], &[]),
    ("foot.n.02", &["foot", "ft"], &[]),
    ("yard.n.01", &["yard", "yd"], &[]),
    ("mile.n.01", &["mile", "statute_mile", "land_mile"], &[]),
    ("furlong.n.01", &["furlong"], &[]),
    ("chain.n.08", &["chain"], &[]),
    ("rod.n.03", &["rod", "perch", "pole"], &[]),
    ("nautical_linear_unit.n.01", &["nautical_linear_unit"], &[
        "fathom.n.02", "nautical_mile.n.01", "league.n.01", "cable.n.03",
    ]),
    ("fathom.n.02", &["fathom", "fthm"], &[]),
    ("nautical_mile.n.01", &["nautical_mile", "sea_mile"], &[]),
    ("league.n.01", &["league"], &[]),
    ("cable.n.03", &["cable_length", "cable's_length"], &[]),
    ("astronomy_unit.n.01", &["astronomy_unit"], &[
        "light_year.n.01", "astronomical_unit.n.01", "parsec.n.01",
    ]),
    ("light_year.n.01", &["light_year", "light-year"], &[]),
    ("astronomical_unit.n.01", &["astronomical_unit", "au"], &[]),
    ("parsec.n.01", &["parsec", "secpar"], &[]),
    // mass
    ("mass_unit.n.01", &["mass_unit"], &[
        "metric_weight_unit.n.01", "avoirdupois_unit.n.01", "troy_unit.n.01", "carat.n.01",
    ]),
    ("metric_weight_unit.n.01", &["metric_weight_unit", "weight_unit"], &[
        "gram.n.01", "kilogram.n.01", "milligram.n.01", "microgram.n.01", "metric_ton.n.01",
    ]),
    ("gram.n.01", &["gram", "gramme", "gm", "g"], &[]),
    ("kilogram.n.01", &["kilogram", "kilogramme", "kg", "kilo"], &[]),
    ("milligram.n.01", &["milligram", "milligramme", "mg"], &[]),
    ("microgram.n.01", &["microgram", "mcg"], &[]),
    ("metric_ton.n.01", &["metric_ton", "tonne", "t"], &[]),
    ("avoirdupois_unit.n.01", &["avoirdupois_unit"], &[
        "pound.n.01", "ounce.n.01", "stone.n.02", "short_ton.n.01", "long_ton.n.01",
        "grain.n.02", "dram.n.02", "hundredweight.n.01",
    ]),
    ("pound.n.01", &["pound", "lb"], &[]),
    ("ounce.n.01", &["ounce", "oz"], &[]),
    ("stone.n.02", &["stone"], &[]),
    ("short_ton.n.01", &["short_ton", "ton", "net_ton"], &[]),
    ("long_ton.n.01", &["long_ton", "gross_ton"], &[]),
    ("grain.n.02", &["grain"], &[]),
    ("dram.n.02", &["dram", "drachm"], &[]),
    ("hundredweight.n.01", &["hundredweight", "cwt"], &[]),
    ("troy_unit.n.01", &["troy_unit"], &["troy_ounce.n.01"]),
    ("troy_ounce.n.01", &["troy_ounce", "apothecaries'_ounce"], &[]),
    ("carat.n.01", &["carat"], &[]),
    // time
    ("time_unit.n.01", &["time_unit", "unit_of_time"], &[
        "second.n.01", "millisecond.n.01", "microsecond.n.01", "nanosecond.n.01",
        "minute.n.01", "hour.n.01", "day.n.01", "week.n.01", "fortnight.n.01",
        "month.n.01", "lunar_month.n.01", "quarter.n.03", "year.n.01", "decade.n.01",
        "century.n.01", "millennium.n.01",
    ]),
    ("second.n.01", &["second", "sec", "s"], &[]),
    ("millisecond.n.01", &["millisecond", "msec", "ms"], &[]),
    ("microsecond.n.01", &["microsecond"], &[]),
    ("nanosecond.n.01", &["nanosecond", "ns"], &[]),
    ("minute.n.01", &["minute", "min"], &[]),
    ("hour.n.01", &["hour", "hr"], &[]),
    ("day.n.01", &["day", "twenty-four_hours", "solar_day"], &[]),
    ("week.n.01", &["week", "hebdomad"], &[]),
    ("fortnight.n.01", &["fortnight", "two_weeks"], &[]),
    ("month.n.01", &["month", "calendar_month"], &[]),
    ("lunar_month.n.01", &["lunar_month", "moon", "lunation", "synodic_month"], &[]),
    ("quarter.n.03", &["quarter"], &[]),
    ("year.n.01", &["year", "twelvemonth", "yr"], &[]),
    ("decade.n.01", &["decade", "decennary", "decennium"], &[]),
    ("century.n.01", &["century"], &[]),
    ("millennium.n.01", &["millennium", "millenary"], &[]),
    // volume
    ("volume_unit.n.01", &["volume_unit", "capacity_unit", "cubic_measure"], &[
        "liter.n.01", "milliliter.n.01", "centiliter.n.01", "deciliter.n.01",
        "cubic_meter.n.01", "cubic_centimeter.n.01", "cubic_foot.n.01", "cubic_inch.n.01",
        "gallon.n.01", "quart.n.01", "pint.n.01", "cup.n.02", "fluid_ounce.n.01",
        "tablespoon.n.02", "teaspoon.n.02", "barrel.n.02", "quarter.n.09",
    ]),
    ("liter.n.01", &["liter", "litre", "l"], &[]),
    ("milliliter.n.01", &["milliliter", "millilitre", "ml", "mil"], &[]),
    ("centiliter.n.01", &["centiliter", "centilitre", "cl"], &[]),
    ("deciliter.n.01", &["deciliter", "decilitre", "dl"], &[]),
    ("cubic_meter.n.01", &["cubic_meter", "cubic_metre"], &[]),
    ("cubic_centimeter.n.01", &["cubic_centimeter", "cubic_centimetre", "cc"], &[]),
    ("cubic_foot.n.01", &["cubic_foot", "cu_ft"], &[]),
    ("cubic_inch.n.01", &["cubic_inch", "cu_in"], &[]),
    ("gallon.n.01", &["gallon", "gal"], &[]),
    ("quart.n.01", &["quart", "qt"], &[]),
    ("pint.n.01", &["pint", "pt"], &[]),
    ("cup.n.02", &["cup"], &[]),
    ("fluid_ounce.n.01", &["fluid_ounce", "fl_oz"], &[]),
    ("tablespoon.n.02", &["tablespoon", "tbsp"], &[]),
    ("teaspoon.n.02", &["teaspoon", "tsp"], &[]),
    ("barrel.n.02", &["barrel", "bbl"], &[]),
    ("quarter.n.09", &["quarter"], &[]),
    // energy
    ("work_unit.n.01", &["work_unit", "heat_unit", "energy_unit"], &[
        "joule.n.01", "kilojoule.n.01", "calorie.n.02", "kilocalorie.n.01",
        "electron_volt.n.01", "erg.n.01", "british_thermal_unit.n.01",
        "watt-hour.n.01", "kilowatt_hour.n.01", "therm.n.01", "foot-pound.n.01",
    ]),
    ("joule.n.01", &["joule", "j", "watt_second"], &[]),
    ("kilojoule.n.01", &["kilojoule", "kj"], &[]),
    ("calorie.n.02", &["calorie", "gram_calorie", "small_calorie"], &[]),
    ("kilocalorie.n.01", &["kilocalorie", "kcal", "large_calorie"], &[]),
    ("electron_volt.n.01", &["electron_volt", "ev"], &[]),
    ("erg.n.01", &["erg"], &[]),
    ("british_thermal_unit.n.01", &["british_thermal_unit", "btu"], &[]),
    ("watt-hour.n.01", &["watt-hour", "watt_hour"], &[]),
    ("kilowatt_hour.n.01", &["kilowatt_hour", "kilowatt-hour", "kwh"], &[]),
    ("therm.n.01", &["therm"], &[]),
    ("foot-pound.n.01", &["foot-pound"], &[]),
];

impl HyponymGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph of measurement units shipped with the crate
    pub fn builtin() -> Self {
        let mut graph = Self::new();
        for (id, lemmas, hyponyms) in BUILTIN_CONCEPTS {
            graph.insert(
                id,
                Concept {
                    lemmas: lemmas.iter().map(|l| l.to_string()).collect(),
                    hyponyms: hyponyms.iter().map(|h| h.to_string()).collect(),
                },
            );
        }
        graph
    }

    /// Load a graph from a JSON object of `id -> { lemmas, hyponyms }`
    pub fn from_json_str(json: &str) -> Result<Self, MeasurementError> {
        serde_json::from_str(json)
            .map_err(|e| MeasurementError::Config(format!("invalid hyponym graph: {e}")))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MeasurementError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MeasurementError::Config(format!("cannot read hyponym graph {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, id: &str, concept: Concept) {
        self.concepts.insert(id.to_string(), concept);
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

impl LexicalHierarchy for HyponymGraph {
    fn hyponym_lemmas(&self, concept_id: &str) -> Result<HashSet<String>, MeasurementError> {
        let root = self
            .concepts
            .get(concept_id)
            .ok_or_else(|| MeasurementError::Lookup(format!("unknown concept '{concept_id}'")))?;

        // Breadth-first closure; the root's own lemmas are not included
        let mut seen: HashSet<&str> = HashSet::from([concept_id]);
        let mut queue: VecDeque<&str> = root.hyponyms.iter().map(String::as_str).collect();
        let mut lemmas = HashSet::new();

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            let Some(concept) = self.concepts.get(id) else {
                debug!("Hyponym '{}' of '{}' has no entry, skipping", id, concept_id);
                continue;
            };
            lemmas.extend(concept.lemmas.iter().map(|l| l.replace('_', " ").to_lowercase()));
            queue.extend(concept.hyponyms.iter().map(String::as_str));
        }

        debug!("Concept '{}' expanded to {} lemmas", concept_id, lemmas.len());
        Ok(lemmas)
    }
}

/// The unit phrases a tagger matches
///
/// Phrases are lowercase lemmas joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagVocabulary {
    phrases: HashSet<String>,
}

impl TagVocabulary {
    /// Build a vocabulary from explicit phrases
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = tags
            .into_iter()
            .map(|tag| normalize_phrase(tag.as_ref()))
            .filter(|tag| !tag.is_empty())
            .collect();
        Self { phrases }
    }

    /// Build a vocabulary from every lemma below `concept_id`
    ///
    /// A failed lookup is fatal for the caller: there is nothing to tag without it.
    pub fn from_hierarchy<H>(hierarchy: &H, concept_id: &str) -> Result<Self, MeasurementError>
    where
        H: LexicalHierarchy + ?Sized,
    {
        let vocabulary = Self::from_tags(hierarchy.hyponym_lemmas(concept_id)?);
        info!(
            "Built tag vocabulary of {} phrases from '{}'",
            vocabulary.len(),
            concept_id
        );
        Ok(vocabulary)
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains(phrase)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

fn normalize_phrase(phrase: &str) -> String {
    phrase
        .replace('_', " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement_config::KindParams;
    use crate::measurement_types::MeasurementKind;
    use crate::unit_conversion::{ConversionTable, UnitConversion};

    #[test]
    fn test_builtin_distance_closure() {
        let graph = HyponymGraph::builtin();
        let lemmas = graph.hyponym_lemmas("linear_unit.n.01").unwrap();
        assert!(lemmas.contains("inch"));
        assert!(lemmas.contains("mile"));
        assert!(lemmas.contains("light year"));
        assert!(lemmas.contains("nautical mile"));
        assert!(!lemmas.contains("cubic meter"));
        assert!(!lemmas.contains("joule"));
        // the root itself is not its own hyponym
        assert!(!lemmas.contains("linear unit"));
    }

    #[test]
    fn test_unknown_concept_is_lookup_error() {
        let graph = HyponymGraph::builtin();
        let err = graph.hyponym_lemmas("fgdfg").unwrap_err();
        assert!(matches!(err, MeasurementError::Lookup(_)));
    }

    #[test]
    fn test_closure_survives_cycles() {
        let graph = HyponymGraph::from_json_str(
            r#"{
                "a": {"lemmas": ["a"], "hyponyms": ["b"]},
                "b": {"lemmas": ["big_b"], "hyponyms": ["a", "missing"]}
            }"#,
        )
        .unwrap();
        let lemmas = graph.hyponym_lemmas("a").unwrap();
        assert_eq!(lemmas, HashSet::from(["big b".to_string()]));
    }

    #[test]
    fn test_vocabulary_normalizes_phrases() {
        let vocabulary = TagVocabulary::from_tags(["Light_Year", "foot", "  "]);
        assert_eq!(vocabulary.len(), 2);
        assert!(vocabulary.contains("light year"));
    }

    /// Lemmas of the concepts below `root` that have no hyponyms of their own
    fn leaf_lemmas(graph: &HyponymGraph, root: &str) -> Vec<String> {
        let mut leaves = Vec::new();
        let mut queue: VecDeque<&str> = graph.concepts[root].hyponyms.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            let concept = &graph.concepts[id];
            if concept.hyponyms.is_empty() {
                leaves.extend(concept.lemmas.iter().cloned());
            }
            queue.extend(concept.hyponyms.iter().map(String::as_str));
        }
        leaves
    }

    #[test]
    fn test_builtin_units_all_convert() {
        let graph = HyponymGraph::builtin();
        let table = ConversionTable::builtin();
        for kind in MeasurementKind::ALL {
            let root = KindParams::builtin(kind).synset;
            let vocabulary = TagVocabulary::from_tags(leaf_lemmas(&graph, &root));
            assert!(!vocabulary.is_empty());
            for phrase in vocabulary.iter() {
                assert!(
                    table.to_standard("1", phrase, kind).is_ok(),
                    "{kind} unit '{phrase}' is tagged but cannot be converted"
                );
            }
        }
    }

    #[test]
    fn test_every_builtin_kind_has_a_root() {
        let graph = HyponymGraph::builtin();
        for root in [
            "linear_unit.n.01",
            "mass_unit.n.01",
            "time_unit.n.01",
            "volume_unit.n.01",
            "work_unit.n.01",
        ] {
            let vocabulary = TagVocabulary::from_hierarchy(&graph, root).unwrap();
            assert!(!vocabulary.is_empty(), "{root} should not be empty");
        }
    }
}
