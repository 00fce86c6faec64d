use crate::core::BreedLookup;
use crate::models::{Breed, BreedRecord, RecordError};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading the breed catalog
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset is not a JSON array of breed records: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid breed record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("Duplicate breed name: {0}")]
    DuplicateBreed(String),

    #[error("Dataset contains no breeds")]
    Empty,
}

/// Read-only breed catalog
///
/// Loaded once at startup and shared behind an `Arc`. Breed order is the
/// file order, which is the tie-break order for ranking.
#[derive(Debug, Clone)]
pub struct BreedCatalog {
    breeds: Vec<Breed>,
    index: HashMap<String, usize>,
}

impl BreedCatalog {
    /// Build a catalog from already validated breeds
    pub fn from_breeds(breeds: Vec<Breed>) -> Result<Self, DatasetError> {
        if breeds.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut index = HashMap::with_capacity(breeds.len());
        for (position, breed) in breeds.iter().enumerate() {
            if index.insert(breed.breed.clone(), position).is_some() {
                return Err(DatasetError::DuplicateBreed(breed.breed.clone()));
            }
        }

        Ok(Self { breeds, index })
    }

    /// Parse and validate a JSON array of breed records
    ///
    /// A record with a missing or out-of-range numeric trait fails the whole
    /// load.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<BreedRecord> = serde_json::from_str(json)?;

        let breeds = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Breed::try_from(record).map_err(|source| DatasetError::InvalidRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_breeds(breeds)
    }

    /// Load the catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&json)?;
        tracing::info!("Loaded {} breeds from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn breeds(&self) -> &[Breed] {
        &self.breeds
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }

    /// All temperament tags across the catalog, sorted and deduplicated
    pub fn temperaments(&self) -> Vec<String> {
        self.breeds
            .iter()
            .flat_map(|breed| breed.temperament.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All breed groups, sorted and deduplicated
    pub fn groups(&self) -> Vec<String> {
        self.breeds
            .iter()
            .filter_map(|breed| breed.group.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl BreedLookup for BreedCatalog {
    fn find(&self, name: &str) -> Option<&Breed> {
        self.index.get(name).map(|&position| &self.breeds[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {"breed": "Pug", "grooming": 0.2, "shedding": 0.6, "energy": 0.4,
         "trainability": 0.4, "lifetime_cost": 0.5, "temperament": ["Charming", "Loyal"],
         "size": "Small", "group": "Toy", "description": "A compact clown."},
        {"breed": "Border Collie", "grooming": 0.4, "shedding": 0.6, "energy": 1.0,
         "trainability": 1.0, "lifetime_cost": 0.5, "temperament": ["Energetic", "Loyal"],
         "size": "Medium", "group": "Herding", "intelligence": 1},
        {"breed": "Mixed", "grooming": 0.5, "shedding": 0.5, "energy": 0.5,
         "trainability": 0.5, "lifetime_cost": 0.5, "size": null}
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = BreedCatalog::from_json(DATASET).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.breeds()[1].breed, "Border Collie");
        assert_eq!(catalog.breeds()[2].size, None);
        assert!(catalog.breeds()[2].temperament.is_empty());
    }

    #[test]
    fn test_find_by_name() {
        let catalog = BreedCatalog::from_json(DATASET).unwrap();

        assert_eq!(catalog.find("Pug").map(|b| b.energy), Some(0.4));
        assert!(catalog.find("pug").is_none());
    }

    #[test]
    fn test_option_listings() {
        let catalog = BreedCatalog::from_json(DATASET).unwrap();

        assert_eq!(catalog.groups(), vec!["Herding", "Toy"]);
        assert_eq!(catalog.temperaments(), vec!["Charming", "Energetic", "Loyal"]);
    }

    #[test]
    fn test_missing_trait_rejected() {
        let json = r#"[{"breed": "Pug", "grooming": 0.2, "shedding": 0.6,
                        "trainability": 0.4, "lifetime_cost": 0.5}]"#;

        let err = BreedCatalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidRecord {
                index: 0,
                source: RecordError::MissingTrait { name: "energy", .. }
            }
        ));
    }

    #[test]
    fn test_duplicate_breed_rejected() {
        let json = r#"[
            {"breed": "Pug", "grooming": 0.2, "shedding": 0.6, "energy": 0.4, "trainability": 0.4, "lifetime_cost": 0.5},
            {"breed": "Pug", "grooming": 0.3, "shedding": 0.6, "energy": 0.4, "trainability": 0.4, "lifetime_cost": 0.5}
        ]"#;

        assert!(matches!(
            BreedCatalog::from_json(json),
            Err(DatasetError::DuplicateBreed(name)) if name == "Pug"
        ));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(matches!(BreedCatalog::from_json("[]"), Err(DatasetError::Empty)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = BreedCatalog::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
