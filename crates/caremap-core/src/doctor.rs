use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{DoctorId, FacilityId};

/// A practitioner affiliated with exactly one facility.
///
/// `first_name` and `last_name` are only used to order doctor listings; the
/// display `name` is what clients show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub facility_id: FacilityId,
    pub source: String,
    pub source_key: String,
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
}

impl Doctor {
    pub fn new(
        id: DoctorId,
        facility_id: FacilityId,
        source: impl Into<String>,
        source_key: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            facility_id,
            source: source.into(),
            source_key: source_key.into(),
            name: name.into(),
            first_name: None,
            last_name: None,
            specialty: None,
        }
    }

    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    /// Sort key for doctor listings: last name, first name, display name,
    /// with missing name parts treated as empty.
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (
            self.last_name.as_deref().unwrap_or(""),
            self.first_name.as_deref().unwrap_or(""),
            self.name.as_str(),
        )
    }

    /// Order of doctors in listings.
    ///
    /// Compares [`Doctor::sort_key`] ignoring case, with umlauts sorted as
    /// their base vowel and `ß` as `ss`. Keys equal under that folding fall
    /// back to the raw key, then the id, so the order is total.
    pub fn listing_order(&self, other: &Self) -> Ordering {
        let (a, b) = (self.sort_key(), other.sort_key());
        folded(a.0)
            .cmp(folded(b.0))
            .then_with(|| folded(a.1).cmp(folded(b.1)))
            .then_with(|| folded(a.2).cmp(folded(b.2)))
            .then_with(|| a.cmp(&b))
            .then(self.id.cmp(&other.id))
    }
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).flat_map(|c| {
        let (head, tail) = match c {
            'ä' => ('a', None),
            'ö' => ('o', None),
            'ü' => ('u', None),
            'ß' => ('s', Some('s')),
            other => (other, None),
        };
        std::iter::once(head).chain(tail)
    })
}
