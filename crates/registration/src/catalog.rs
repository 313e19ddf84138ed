use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::{Result, WizardError};

pub const REGISTRATION_FEE: i32 = 100;
pub const PER_EVENT_FEE: i32 = 100;
pub const MAX_EVENTS_PER_PERSON: usize = 2;

/// Participant age band
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum AgeGroup {
    #[serde(rename = "U-6")]
    U6,
    #[serde(rename = "U-8")]
    U8,
    #[serde(rename = "U-10")]
    U10,
    #[serde(rename = "U-12")]
    U12,
    #[serde(rename = "U-14")]
    U14,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown age group: '{0}'. Available: U-6, U-8, U-10, U-12, U-14")]
pub struct ParseAgeGroupError(pub String);

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [Self::U6, Self::U8, Self::U10, Self::U12, Self::U14];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U6 => "U-6",
            Self::U8 => "U-8",
            Self::U10 => "U-10",
            Self::U12 => "U-12",
            Self::U14 => "U-14",
        }
    }

    fn parse_str(s: &str) -> std::result::Result<Self, ParseAgeGroupError> {
        let normalized = s.trim().to_uppercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "U6" => Ok(Self::U6),
            "U8" => Ok(Self::U8),
            "U10" => Ok(Self::U10),
            "U12" => Ok(Self::U12),
            "U14" => Ok(Self::U14),
            _ => Err(ParseAgeGroupError(s.to_string())),
        }
    }
}

impl std::str::FromStr for AgeGroup {
    type Err = ParseAgeGroupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A competition event. Reference data, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Event {
    pub id: &'static str,
    pub age_group: AgeGroup,
    pub event: &'static str,
    pub distance: &'static str,
    pub gender: &'static str,
    pub fee: i32,
}

const fn event(
    id: &'static str,
    age_group: AgeGroup,
    event: &'static str,
    distance: &'static str,
    gender: &'static str,
) -> Event {
    Event {
        id,
        age_group,
        event,
        distance,
        gender,
        fee: PER_EVENT_FEE,
    }
}

use AgeGroup::{U6, U8, U10, U12, U14};

pub static EVENTS: [Event; 37] = [
    event("U6_KB", U6, "Kick Board Swimming", "20 mts", "Boys/Girls"),
    event("U6_HF", U6, "Hand Floaters Swimming", "20 mts", "Boys/Girls"),
    event("U8_KB", U8, "Kick Board Swimming", "40 mts", "Boys/Girls"),
    event("U8_FS_B", U8, "Free Style", "40 mts", "Boys"),
    event("U8_FS_G", U8, "Free Style", "40 mts", "Girls"),
    event("U8_BK_B", U8, "Back Stroke", "40 mts", "Boys"),
    event("U8_BK_G", U8, "Back Stroke", "40 mts", "Girls"),
    event("U10_FS_40_B", U10, "Free Style", "40 mts", "Boys"),
    event("U10_FS_40_G", U10, "Free Style", "40 mts", "Girls"),
    event("U10_BR_40_B", U10, "Breast Stroke", "40 mts", "Boys"),
    event("U10_BR_40_G", U10, "Breast Stroke", "40 mts", "Girls"),
    event("U10_BK_40_B", U10, "Back Stroke", "40 mts", "Boys"),
    event("U10_BK_40_G", U10, "Back Stroke", "40 mts", "Girls"),
    event("U10_FS_80_B", U10, "Free Style", "80 mts", "Boys"),
    event("U10_FS_80_G", U10, "Free Style", "80 mts", "Girls"),
    event("U12_FS_40_B", U12, "Free Style", "40 mts", "Boys"),
    event("U12_FS_40_G", U12, "Free Style", "40 mts", "Girls"),
    event("U12_BR_40_B", U12, "Breast Stroke", "40 mts", "Boys"),
    event("U12_BR_40_G", U12, "Breast Stroke", "40 mts", "Girls"),
    event("U12_BK_40_B", U12, "Back Stroke", "40 mts", "Boys"),
    event("U12_BK_40_G", U12, "Back Stroke", "40 mts", "Girls"),
    event("U12_BF_40_B", U12, "Butterfly", "40 mts", "Boys"),
    event("U12_BF_40_G", U12, "Butterfly", "40 mts", "Girls"),
    event("U12_FS_80_B", U12, "Free Style", "80 mts", "Boys"),
    event("U12_FS_80_G", U12, "Free Style", "80 mts", "Girls"),
    event("U14_FS_40_B", U14, "Free Style", "40 mts", "Boys"),
    event("U14_FS_40_G", U14, "Free Style", "40 mts", "Girls"),
    event("U14_BR_40_B", U14, "Breast Stroke", "40 mts", "Boys"),
    event("U14_BR_40_G", U14, "Breast Stroke", "40 mts", "Girls"),
    event("U14_BK_40_B", U14, "Back Stroke", "40 mts", "Boys"),
    event("U14_BK_40_G", U14, "Back Stroke", "40 mts", "Girls"),
    event("U14_BF_40_B", U14, "Butterfly", "40 mts", "Boys"),
    event("U14_BF_40_G", U14, "Butterfly", "40 mts", "Girls"),
    event("U14_FS_80_B", U14, "Free Style", "80 mts", "Boys"),
    event("U14_FS_80_G", U14, "Free Style", "80 mts", "Girls"),
    event("U14_IM_B", U14, "Individual Medley", "160 mts", "Boys"),
    event("U14_IM_G", U14, "Individual Medley", "160 mts", "Girls"),
];

/// The event list together with the fee table and selection limit
#[derive(Debug, Clone, Copy)]
pub struct EventCatalog {
    events: &'static [Event],
    registration_fee: i32,
    per_event_fee: i32,
    max_events_per_person: usize,
}

impl EventCatalog {
    pub const fn new(
        events: &'static [Event],
        registration_fee: i32,
        per_event_fee: i32,
        max_events_per_person: usize,
    ) -> Self {
        Self {
            events,
            registration_fee,
            per_event_fee,
            max_events_per_person,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            &EVENTS,
            REGISTRATION_FEE,
            PER_EVENT_FEE,
            MAX_EVENTS_PER_PERSON,
        )
    }

    pub fn events(&self) -> &'static [Event] {
        self.events
    }

    pub fn registration_fee(&self) -> i32 {
        self.registration_fee
    }

    pub fn per_event_fee(&self) -> i32 {
        self.per_event_fee
    }

    pub fn max_events_per_person(&self) -> usize {
        self.max_events_per_person
    }

    pub fn find(&self, id: &str) -> Option<&'static Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events open to `group`, in catalog order
    pub fn events_for_age_group(&self, group: AgeGroup) -> Vec<&'static Event> {
        self.events
            .iter()
            .filter(|e| e.age_group == group)
            .collect()
    }

    /// Resolve ids in the given order, failing on the first unknown one
    pub fn events_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<&'static Event>> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.find(id)
                    .ok_or_else(|| WizardError::UnknownEvent(id.to_string()))
            })
            .collect()
    }

    /// Every age band with its events, bands in ascending order
    pub fn grouped(&self) -> Vec<(AgeGroup, Vec<&'static Event>)> {
        AgeGroup::ALL
            .iter()
            .map(|group| (*group, self.events_for_age_group(*group)))
            .collect()
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
