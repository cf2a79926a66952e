//! # Measurement Configuration Module
//!
//! This module defines the per-kind tagging parameters and the settings that
//! are threaded into the tagger and converter at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::lexicon::{LexicalHierarchy, TagVocabulary};
use crate::measurement_errors::MeasurementError;
use crate::measurement_types::MeasurementKind;

// Constants for extraction configuration
pub const DEFAULT_MAX_GRAM: usize = 2;
pub const DEFAULT_KIND: MeasurementKind = MeasurementKind::Distance;

/// Environment variables read by [`ExtractorConfig::from_env`]
pub const ENV_MEASUREMENT_KIND: &str = "MEASUREMENT_KIND";
pub const ENV_MAX_GRAM: &str = "MAX_GRAM";
pub const ENV_RETURN_UNCONVERTED: &str = "RETURN_UNCONVERTED";
pub const ENV_MEASUREMENT_PARAMS: &str = "MEASUREMENT_PARAMS";
pub const ENV_HYPONYM_GRAPH: &str = "HYPONYM_GRAPH";

/// Tagging parameters for one measurement kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindParams {
    /// Root concept whose hyponyms form the tag vocabulary (e.g. "linear_unit.n.01")
    pub synset: String,
    /// Explicit tags; when non-empty they are used instead of the hierarchy lookup
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unit lemmas mapped to the unit of a number found on their right
    #[serde(default)]
    pub right_mods: HashMap<String, String>,
}

impl KindParams {
    pub fn new(synset: &str) -> Self {
        Self {
            synset: synset.to_string(),
            tags: Vec::new(),
            right_mods: HashMap::new(),
        }
    }

    pub fn with_right_mod(mut self, unit: &str, right_unit: &str) -> Self {
        self.right_mods.insert(unit.to_string(), right_unit.to_string());
        self
    }

    /// Built-in parameters for `kind`
    pub fn builtin(kind: MeasurementKind) -> Self {
        match kind {
            MeasurementKind::Distance => Self::new("linear_unit.n.01").with_right_mod("foot", "inch"),
            MeasurementKind::Mass => Self::new("mass_unit.n.01"),
            MeasurementKind::Time => Self::new("time_unit.n.01"),
            MeasurementKind::Volume => Self::new("volume_unit.n.01"),
            MeasurementKind::Energy => Self::new("work_unit.n.01"),
        }
    }

    /// Resolve the tag vocabulary, preferring explicit tags over the hierarchy
    pub fn vocabulary<H>(&self, hierarchy: &H) -> Result<TagVocabulary, MeasurementError>
    where
        H: LexicalHierarchy + ?Sized,
    {
        if self.tags.is_empty() {
            TagVocabulary::from_hierarchy(hierarchy, &self.synset)
        } else {
            Ok(TagVocabulary::from_tags(&self.tags))
        }
    }
}

/// Parameters for every measurement kind, keyed by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementParams {
    kinds: BTreeMap<MeasurementKind, KindParams>,
}

impl Default for MeasurementParams {
    fn default() -> Self {
        Self {
            kinds: MeasurementKind::ALL
                .into_iter()
                .map(|kind| (kind, KindParams::builtin(kind)))
                .collect(),
        }
    }
}

impl MeasurementParams {
    /// Load parameters from a JSON file
    ///
    /// Kinds missing from the file keep their built-in parameters.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read params file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse params file {}", path.display()))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: BTreeMap<MeasurementKind, KindParams> = serde_json::from_str(json)?;
        let mut params = Self::default();
        params.kinds.extend(overrides);
        Ok(params)
    }

    pub fn get(&self, kind: MeasurementKind) -> KindParams {
        self.kinds
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| KindParams::builtin(kind))
    }

    pub fn set(&mut self, kind: MeasurementKind, params: KindParams) {
        self.kinds.insert(kind, params);
    }
}

/// Settings chosen by the caller for one extraction run
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Kind of measurement to tag
    pub kind: MeasurementKind,
    /// Longest unit phrase, in tokens, to match
    pub max_gram: usize,
    /// Whether measurements that cannot be normalised are returned as they are
    pub return_unconverted: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            kind: DEFAULT_KIND,
            max_gram: DEFAULT_MAX_GRAM,
            return_unconverted: false,
        }
    }
}

impl ExtractorConfig {
    /// Read settings from the environment, falling back to the defaults
    pub fn from_env() -> Result<Self, MeasurementError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MeasurementError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(kind) = lookup(ENV_MEASUREMENT_KIND) {
            config.kind = kind.parse()?;
        }
        if let Some(max_gram) = lookup(ENV_MAX_GRAM) {
            config.max_gram = max_gram.trim().parse().map_err(|_| {
                MeasurementError::Config(format!("{ENV_MAX_GRAM} must be a positive integer, got '{max_gram}'"))
            })?;
        }
        if let Some(flag) = lookup(ENV_RETURN_UNCONVERTED) {
            config.return_unconverted = parse_flag(&flag)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MeasurementError> {
        if self.max_gram == 0 {
            return Err(MeasurementError::Config("max_gram must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool, MeasurementError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(MeasurementError::Config(format!("invalid boolean flag '{other}'"))),
    }
}
