use crate::models::{Breed, PreferenceVector};

/// Check if a breed passes the size/group hard filter
///
/// Used by filter-then-score mode. Unconstrained ("Any") dimensions always
/// pass; a constrained dimension needs an exact match, so a breed with no
/// recorded size or group fails it.
#[inline]
pub fn matches_categorical(breed: &Breed, preferences: &PreferenceVector) -> bool {
    preferences.size.admits(breed.size.as_ref()) && preferences.group.admits(breed.group.as_ref())
}

/// Calculate the categorical sub-score (0.0 to 1.0)
///
/// Fraction of constrained dimensions (size, group) the breed matches.
/// Returns 1.0 when neither dimension is constrained.
#[inline]
pub fn calculate_categorical_score(breed: &Breed, preferences: &PreferenceVector) -> f64 {
    if !preferences.has_categorical_constraint() {
        return 1.0;
    }

    let mut constrained = 0u8;
    let mut matched = 0u8;

    if !preferences.size.is_any() {
        constrained += 1;
        if preferences.size.admits(breed.size.as_ref()) {
            matched += 1;
        }
    }

    if !preferences.group.is_any() {
        constrained += 1;
        if preferences.group.admits(breed.group.as_ref()) {
            matched += 1;
        }
    }

    f64::from(matched) / f64::from(constrained)
}

/// Calculate the temperament sub-score (0.0 to 1.0)
///
/// Share of the preferred tags the breed carries. An empty preference list
/// is a perfect match. Unknown tags simply never match.
#[inline]
pub fn calculate_temperament_score(breed: &Breed, preferences: &PreferenceVector) -> f64 {
    if preferences.temperament.is_empty() {
        return 1.0;
    }

    let matches = preferences
        .temperament
        .iter()
        .filter(|wanted| breed.temperament.contains(wanted))
        .count();

    matches as f64 / preferences.temperament.len() as f64
}
