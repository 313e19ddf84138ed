use registration::{AgeGroup, Event, EventCatalog};
use serde::Serialize;
use utoipa::ToSchema;

pub const TITLE: &str = "Vivekanandha Swimming Pool Junior Swim Fest";
pub const TAGLINE: &str = "Join us for an exciting swimming competition for young talents";
pub const VENUE: &str = "Kulai Cheruvu Swimming Pool, Kakinada";
pub const EVENT_DATE: &str = "Date to be announced";
pub const NOTICES: [&str; 1] = ["No spot registrations will be accepted"];

#[derive(Debug, Serialize, ToSchema)]
pub struct InfoResponse {
    pub title: String,
    pub tagline: String,
    pub venue: String,
    pub date: String,
    pub registration_fee: i32,
    pub per_event_fee: i32,
    pub max_events_per_person: usize,
    pub age_groups: Vec<AgeGroup>,
    pub notices: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgeGroupEvents {
    pub age_group: AgeGroup,
    pub events: Vec<Event>,
}

pub fn info(catalog: &EventCatalog) -> InfoResponse {
    InfoResponse {
        title: TITLE.to_string(),
        tagline: TAGLINE.to_string(),
        venue: VENUE.to_string(),
        date: EVENT_DATE.to_string(),
        registration_fee: catalog.registration_fee(),
        per_event_fee: catalog.per_event_fee(),
        max_events_per_person: catalog.max_events_per_person(),
        age_groups: AgeGroup::ALL.to_vec(),
        notices: NOTICES.iter().map(|n| n.to_string()).collect(),
    }
}

/// Events grouped by band, or only the requested band
pub fn list_events(catalog: &EventCatalog, age_group: Option<AgeGroup>) -> Vec<AgeGroupEvents> {
    let groups = match age_group {
        Some(group) => vec![(group, catalog.events_for_age_group(group))],
        None => catalog.grouped(),
    };

    groups
        .into_iter()
        .map(|(age_group, events)| AgeGroupEvents {
            age_group,
            events: events.into_iter().copied().collect(),
        })
        .collect()
}
