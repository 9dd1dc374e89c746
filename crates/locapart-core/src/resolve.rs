// ── Cross-reference resolution ──
//
// Foreign keys are shown as the parent's label and submitted back as a
// label. Both directions look in the parent collection as currently
// cached; a label with no match resolves to `None`, which validation
// then reports as a missing field.

use std::sync::Arc;

use crate::model::Labelled;

/// Display label of the parent with `id`, if it is cached.
pub fn label_for<P: Labelled>(parents: &[Arc<P>], id: i64) -> Option<&str> {
    parents.iter().find(|p| p.id() == id).map(|p| p.label())
}

/// Id of the first parent labelled exactly `label`.
pub fn id_for<P: Labelled>(parents: &[Arc<P>], label: &str) -> Option<i64> {
    parents.iter().find(|p| p.label() == label).map(|p| p.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Apartment, City};

    fn cities() -> Vec<Arc<City>> {
        vec![Arc::new(City {
            id: 1,
            name: "Paris".into(),
        })]
    }

    #[test]
    fn resolves_city_both_ways() {
        let cities = cities();
        let apartment = Apartment {
            id: 10,
            city_id: 1,
            price: 900.0,
            kind: "T2".into(),
            postal_code: "75001".into(),
            address: "1 rue de Rivoli".into(),
            name: "Rivoli".into(),
        };

        assert_eq!(label_for(&cities, apartment.city_id), Some("Paris"));
        assert_eq!(id_for(&cities, "Paris"), Some(1));
    }

    #[test]
    fn unknown_label_or_id_is_absent() {
        let cities = cities();
        assert_eq!(id_for(&cities, "Lyon"), None);
        assert_eq!(label_for(&cities, 2), None);
        assert_eq!(id_for::<City>(&[], "Paris"), None);
    }

    #[test]
    fn first_match_wins_on_duplicate_labels() {
        let cities = vec![
            Arc::new(City {
                id: 4,
                name: "Valence".into(),
            }),
            Arc::new(City {
                id: 9,
                name: "Valence".into(),
            }),
        ];
        assert_eq!(id_for(&cities, "Valence"), Some(4));
    }
}
