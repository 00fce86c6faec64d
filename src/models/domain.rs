use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Value used for any numeric preference the caller leaves unset
pub const NEUTRAL_TRAIT: f64 = 0.5;

/// Wire value meaning "no constraint" for size and group
pub const ANY: &str = "Any";

fn neutral_trait() -> f64 {
    NEUTRAL_TRAIT
}

/// Errors raised while parsing categorical values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("Unknown size: {0} (expected Small, Medium or Large)")]
    UnknownSize(String),
}

/// Errors raised while turning a raw dataset record into a [`Breed`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Breed record has an empty name")]
    MissingName,

    #[error("Breed {breed} is missing trait {name}")]
    MissingTrait { breed: String, name: &'static str },

    #[error("Breed {breed} has invalid {name} value {value} (expected 0.0..=1.0)")]
    InvalidTrait {
        breed: String,
        name: &'static str,
        value: f64,
    },
}

/// Breed size category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConstraintError::UnknownSize(s.to_string()))
    }
}

/// The five normalized numeric traits shared by breeds and preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericTrait {
    Grooming,
    Shedding,
    Energy,
    Trainability,
    LifetimeCost,
}

impl NumericTrait {
    pub const ALL: [NumericTrait; 5] = [
        NumericTrait::Grooming,
        NumericTrait::Shedding,
        NumericTrait::Energy,
        NumericTrait::Trainability,
        NumericTrait::LifetimeCost,
    ];

    /// Field name as it appears in the dataset and request bodies
    pub fn name(&self) -> &'static str {
        match self {
            NumericTrait::Grooming => "grooming",
            NumericTrait::Shedding => "shedding",
            NumericTrait::Energy => "energy",
            NumericTrait::Trainability => "trainability",
            NumericTrait::LifetimeCost => "lifetime_cost",
        }
    }
}

/// Either "Any" or one concrete categorical value
///
/// Serialized as a plain string: `"Any"` or the value itself. The `"Any"`
/// sentinel is read case-insensitively, like [`Size`] values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint<T> {
    Any,
    Only(T),
}

impl<T> Constraint<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Constraint::Any)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Constraint::Any => None,
            Constraint::Only(value) => Some(value),
        }
    }
}

impl<T: PartialEq> Constraint<T> {
    /// Whether a breed's (possibly absent) value satisfies this constraint
    ///
    /// `Any` admits everything, including absent values. A concrete
    /// constraint only admits an exactly equal value.
    pub fn admits(&self, candidate: Option<&T>) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Only(wanted) => candidate == Some(wanted),
        }
    }
}

impl<T> Default for Constraint<T> {
    fn default() -> Self {
        Constraint::Any
    }
}

impl<T: fmt::Display> Serialize for Constraint<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Constraint::Any => serializer.serialize_str(ANY),
            Constraint::Only(value) => serializer.collect_str(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Constraint<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().eq_ignore_ascii_case(ANY) {
            return Ok(Constraint::Any);
        }
        raw.parse::<T>().map(Constraint::Only).map_err(de::Error::custom)
    }
}

/// Dog breed record from the static catalog
///
/// Deserialization goes through [`BreedRecord`] so that records with missing
/// or out-of-range traits are rejected instead of producing `NaN` scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BreedRecord")]
pub struct Breed {
    pub breed: String,
    pub grooming: f64,
    pub shedding: f64,
    pub energy: f64,
    pub trainability: f64,
    pub lifetime_cost: f64,
    pub temperament: Vec<String>,
    pub size: Option<Size>,
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<serde_json::Value>,
}

impl Breed {
    pub fn trait_value(&self, which: NumericTrait) -> f64 {
        match which {
            NumericTrait::Grooming => self.grooming,
            NumericTrait::Shedding => self.shedding,
            NumericTrait::Energy => self.energy,
            NumericTrait::Trainability => self.trainability,
            NumericTrait::LifetimeCost => self.lifetime_cost,
        }
    }
}

/// Unvalidated breed record as stored in the dataset file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreedRecord {
    #[serde(default)]
    pub breed: String,
    pub grooming: Option<f64>,
    pub shedding: Option<f64>,
    pub energy: Option<f64>,
    pub trainability: Option<f64>,
    pub lifetime_cost: Option<f64>,
    #[serde(default)]
    pub temperament: Vec<String>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country_of_origin: Option<String>,
    #[serde(default)]
    pub intelligence: Option<serde_json::Value>,
}

fn require_trait(
    breed: &str,
    which: NumericTrait,
    value: Option<f64>,
) -> Result<f64, RecordError> {
    let value = value.ok_or_else(|| RecordError::MissingTrait {
        breed: breed.to_string(),
        name: which.name(),
    })?;

    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(RecordError::InvalidTrait {
            breed: breed.to_string(),
            name: which.name(),
            value,
        });
    }

    Ok(value)
}

impl TryFrom<BreedRecord> for Breed {
    type Error = RecordError;

    fn try_from(record: BreedRecord) -> Result<Self, Self::Error> {
        let name = record.breed.trim();
        if name.is_empty() {
            return Err(RecordError::MissingName);
        }

        Ok(Breed {
            grooming: require_trait(name, NumericTrait::Grooming, record.grooming)?,
            shedding: require_trait(name, NumericTrait::Shedding, record.shedding)?,
            energy: require_trait(name, NumericTrait::Energy, record.energy)?,
            trainability: require_trait(name, NumericTrait::Trainability, record.trainability)?,
            lifetime_cost: require_trait(name, NumericTrait::LifetimeCost, record.lifetime_cost)?,
            breed: name.to_string(),
            temperament: record.temperament,
            size: record.size,
            group: record.group,
            description: record.description,
            country_of_origin: record.country_of_origin,
            intelligence: record.intelligence,
        })
    }
}

/// Complete preference vector used for scoring
///
/// Numeric fields left out of a request body default to [`NEUTRAL_TRAIT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PreferenceVector {
    #[serde(default = "neutral_trait")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub grooming: f64,
    #[serde(default = "neutral_trait")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub shedding: f64,
    #[serde(default = "neutral_trait")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub energy: f64,
    #[serde(default = "neutral_trait")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub trainability: f64,
    #[serde(default = "neutral_trait")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub lifetime_cost: f64,
    #[serde(default)]
    pub temperament: Vec<String>,
    #[serde(default)]
    pub size: Constraint<Size>,
    #[serde(default)]
    pub group: Constraint<String>,
}

impl PreferenceVector {
    pub fn trait_value(&self, which: NumericTrait) -> f64 {
        match which {
            NumericTrait::Grooming => self.grooming,
            NumericTrait::Shedding => self.shedding,
            NumericTrait::Energy => self.energy,
            NumericTrait::Trainability => self.trainability,
            NumericTrait::LifetimeCost => self.lifetime_cost,
        }
    }

    /// Whether size or group narrows the candidate set
    pub fn has_categorical_constraint(&self) -> bool {
        !self.size.is_any() || !self.group.is_any()
    }
}

impl Default for PreferenceVector {
    fn default() -> Self {
        Self {
            grooming: NEUTRAL_TRAIT,
            shedding: NEUTRAL_TRAIT,
            energy: NEUTRAL_TRAIT,
            trainability: NEUTRAL_TRAIT,
            lifetime_cost: NEUTRAL_TRAIT,
            temperament: Vec::new(),
            size: Constraint::Any,
            group: Constraint::Any,
        }
    }
}

/// Partial preference vector, typically produced from free text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grooming: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shedding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperament: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl PartialPreset {
    pub fn is_empty(&self) -> bool {
        *self == PartialPreset::default()
    }

    /// Overlay the fields set in this preset onto `base`
    ///
    /// A field explicitly set to `0.0` is kept; only absent fields fall
    /// through to the base value.
    pub fn apply_to(&self, base: &PreferenceVector) -> PreferenceVector {
        PreferenceVector {
            grooming: self.grooming.unwrap_or(base.grooming),
            shedding: self.shedding.unwrap_or(base.shedding),
            energy: self.energy.unwrap_or(base.energy),
            trainability: self.trainability.unwrap_or(base.trainability),
            lifetime_cost: self.lifetime_cost.unwrap_or(base.lifetime_cost),
            temperament: self
                .temperament
                .clone()
                .unwrap_or_else(|| base.temperament.clone()),
            size: self.size.map_or_else(|| base.size.clone(), Constraint::Only),
            group: self
                .group
                .clone()
                .map_or_else(|| base.group.clone(), Constraint::Only),
        }
    }

    /// Fill every absent field with the default preference values
    pub fn into_preferences(self) -> PreferenceVector {
        self.apply_to(&PreferenceVector::default())
    }
}

/// Breed record augmented with its match score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredBreed {
    #[serde(flatten)]
    pub breed: Breed,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}

/// One `{breed, score}` pair returned by the semantic search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub breed: String,
    pub score: f64,
}

/// How size and group take part in scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Size/group contribute a weighted categorical sub-score
    #[default]
    Weighted,
    /// Size/group act as a hard filter; only numeric and temperament are weighted
    Filtered,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Weighted => f.write_str("weighted"),
            ScoringMode::Filtered => f.write_str("filtered"),
        }
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub numeric: f64,
    pub temperament: f64,
    pub categorical: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.numeric + self.temperament + self.categorical
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            numeric: 0.5,
            temperament: 0.3,
            categorical: 0.2,
        }
    }
}
