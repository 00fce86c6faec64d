use crate::models::{Breed, ScoredBreed, SearchHit};

/// Name-based access to breed records
pub trait BreedLookup {
    fn find(&self, name: &str) -> Option<&Breed>;
}

impl BreedLookup for [Breed] {
    fn find(&self, name: &str) -> Option<&Breed> {
        self.iter().find(|breed| breed.breed == name)
    }
}

impl BreedLookup for Vec<Breed> {
    fn find(&self, name: &str) -> Option<&Breed> {
        self.as_slice().find(name)
    }
}

/// Outcome of joining remote search hits against the catalog
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub matches: Vec<ScoredBreed>,
    /// Hit names with no catalog record, in hit order
    pub unknown: Vec<String>,
}

/// Attach full breed records to remote `{breed, score}` hits
///
/// Hits keep their order and their remote score becomes the match score.
/// A hit naming a breed the catalog does not know is skipped and reported
/// in [`MergeOutcome::unknown`] rather than emitted half-filled.
pub fn merge_search_hits<L>(catalog: &L, hits: Vec<SearchHit>) -> MergeOutcome
where
    L: BreedLookup + ?Sized,
{
    let mut outcome = MergeOutcome::default();

    for hit in hits {
        match catalog.find(&hit.breed) {
            Some(breed) => outcome.matches.push(ScoredBreed {
                breed: breed.clone(),
                match_score: hit.score,
            }),
            None => {
                tracing::warn!("Search hit {} has no catalog record, skipping", hit.breed);
                outcome.unknown.push(hit.breed);
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_breed(name: &str) -> Breed {
        Breed {
            breed: name.to_string(),
            grooming: 0.5,
            shedding: 0.5,
            energy: 0.5,
            trainability: 0.5,
            lifetime_cost: 0.5,
            temperament: vec![],
            size: None,
            group: None,
            description: Some(format!("About the {}", name)),
            country_of_origin: None,
            intelligence: None,
        }
    }

    fn hit(name: &str, score: f64) -> SearchHit {
        SearchHit {
            breed: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_merge_keeps_hit_order_and_score() {
        let catalog = vec![create_breed("Beagle"), create_breed("Poodle")];

        let outcome = merge_search_hits(&catalog, vec![hit("Poodle", 0.71), hit("Beagle", 0.42)]);

        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].breed.breed, "Poodle");
        assert_eq!(outcome.matches[0].match_score, 0.71);
        assert_eq!(
            outcome.matches[0].breed.description.as_deref(),
            Some("About the Poodle")
        );
        assert!(outcome.unknown.is_empty());
    }

    #[test]
    fn test_merge_skips_unknown_breeds() {
        let catalog = vec![create_breed("Beagle")];

        let outcome = merge_search_hits(
            catalog.as_slice(),
            vec![hit("Dingo", 0.9), hit("Beagle", 0.5), hit("Wolf", 0.3)],
        );

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].breed.breed, "Beagle");
        assert_eq!(outcome.unknown, vec!["Dingo", "Wolf"]);
    }

    #[test]
    fn test_merge_is_case_sensitive() {
        let catalog = vec![create_breed("Beagle")];

        let outcome = merge_search_hits(&catalog, vec![hit("beagle", 0.5)]);

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.unknown, vec!["beagle"]);
    }
}
