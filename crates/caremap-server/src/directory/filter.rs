use caremap_core::{Facility, FacilityType};

/// Narrows the facility listing the way the map UI does: free text over
/// name and type code, an exact type, and the accessibility flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityFilter {
    pub q: Option<String>,
    pub facility_type: Option<FacilityType>,
    pub wheelchair_accessible: Option<bool>,
}

impl FacilityFilter {
    pub fn is_empty(&self) -> bool {
        self.query().is_none() && self.facility_type.is_none() && self.wheelchair_accessible.is_none()
    }

    pub fn matches(&self, facility: &Facility) -> bool {
        if let Some(q) = self.query() {
            let q = q.to_lowercase();
            let hit = facility.name.to_lowercase().contains(&q)
                || facility.facility_type.code().to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        if let Some(t) = self.facility_type
            && facility.facility_type != t
        {
            return false;
        }
        if let Some(accessible) = self.wheelchair_accessible
            && facility.wheelchair_accessible != Some(accessible)
        {
            return false;
        }
        true
    }

    fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(name: &str, facility_type: FacilityType, accessible: Option<bool>) -> Facility {
        let f = Facility::new(1, "kvwl", "k", name, facility_type);
        match accessible {
            Some(a) => f.with_wheelchair_accessible(a),
            None => f,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = FacilityFilter {
            q: Some("   ".into()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&facility("Praxis", FacilityType::MedicalPractice, None)));
    }

    #[test]
    fn q_matches_name_or_type_code_case_insensitively() {
        let filter = FacilityFilter {
            q: Some(" apotheke ".into()),
            ..Default::default()
        };
        assert!(filter.matches(&facility("Adler Apotheke", FacilityType::Other, None)));
        assert!(filter.matches(&facility("Löwen", FacilityType::Pharmacy, None)));
        assert!(!filter.matches(&facility("Praxis Nord", FacilityType::MedicalPractice, None)));
    }

    #[test]
    fn type_and_accessibility_must_match_exactly() {
        let filter = FacilityFilter {
            facility_type: Some(FacilityType::Hospital),
            wheelchair_accessible: Some(true),
            ..Default::default()
        };
        assert!(filter.matches(&facility("St. Marien", FacilityType::Hospital, Some(true))));
        assert!(!filter.matches(&facility("St. Marien", FacilityType::Hospital, None)));
        assert!(!filter.matches(&facility("St. Marien", FacilityType::Hospital, Some(false))));
        assert!(!filter.matches(&facility("Praxis", FacilityType::MedicalPractice, Some(true))));

        let not_accessible = FacilityFilter {
            wheelchair_accessible: Some(false),
            ..Default::default()
        };
        assert!(not_accessible.matches(&facility("A", FacilityType::Other, Some(false))));
        assert!(!not_accessible.matches(&facility("A", FacilityType::Other, None)));
    }
}
