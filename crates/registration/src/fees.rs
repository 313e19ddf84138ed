use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::EventCatalog;
use crate::error::Result;

/// Amounts charged for one registration, in whole rupees.
///
/// Invariant: `total_amount == registration_fee + events_fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeeBreakdown {
    pub registration_fee: i32,
    pub events_fee: i32,
    pub total_amount: i32,
}

/// Compute the fee for a selection of event ids.
///
/// Every id must resolve in `catalog`; an unknown id is an error rather
/// than being left out of the total.
pub fn fee_for_selection<S: AsRef<str>>(
    selected_ids: &[S],
    catalog: &EventCatalog,
) -> Result<FeeBreakdown> {
    let events = catalog.events_by_ids(selected_ids)?;

    let registration_fee = catalog.registration_fee();
    let events_fee = events.len() as i32 * catalog.per_event_fee();

    Ok(FeeBreakdown {
        registration_fee,
        events_fee,
        total_amount: registration_fee + events_fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AgeGroup, EVENTS, Event, PER_EVENT_FEE, REGISTRATION_FEE};
    use crate::error::WizardError;

    #[test]
    fn test_empty_selection_costs_registration_fee() {
        let fees = fee_for_selection::<&str>(&[], &EventCatalog::standard()).unwrap();
        assert_eq!(fees.events_fee, 0);
        assert_eq!(fees.total_amount, REGISTRATION_FEE);
    }

    #[test]
    fn test_single_event() {
        let fees = fee_for_selection(&["U10_FS_40_B"], &EventCatalog::standard()).unwrap();
        assert_eq!(fees.total_amount, REGISTRATION_FEE + PER_EVENT_FEE);
    }

    #[test]
    fn test_two_events_at_hundred() {
        let fees = fee_for_selection(&["U12_BF_40_G", "U12_FS_80_G"], &EventCatalog::standard())
            .unwrap();

        assert_eq!(fees.registration_fee, 100);
        assert_eq!(fees.events_fee, 200);
        assert_eq!(fees.total_amount, 300);
    }

    #[test]
    fn test_fee_is_monotonic_in_selection_size() {
        let catalog = EventCatalog::standard();
        let ids: Vec<&str> = EVENTS.iter().map(|e| e.id).collect();

        let mut previous = 0;
        for n in 0..=ids.len() {
            let total = fee_for_selection(&ids[..n], &catalog).unwrap().total_amount;
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_unknown_event_fails_fast() {
        let err = fee_for_selection(&["U6_KB", "U99_XX"], &EventCatalog::standard()).unwrap_err();
        assert!(matches!(err, WizardError::UnknownEvent(id) if id == "U99_XX"));
    }

    #[test]
    fn test_custom_fee_table() {
        static EVENTS_SUBSET: [Event; 1] = [Event {
            id: "U6_KB",
            age_group: AgeGroup::U6,
            event: "Kick Board Swimming",
            distance: "20 mts",
            gender: "Boys/Girls",
            fee: 75,
        }];
        let catalog = EventCatalog::new(&EVENTS_SUBSET, 50, 75, 1);

        let fees = fee_for_selection(&["U6_KB"], &catalog).unwrap();
        assert_eq!(fees.total_amount, 125);
    }
}
