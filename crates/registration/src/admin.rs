use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use storage::models::{PaymentStatus, Registration};
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};

use crate::store::RegistrationStore;

pub const CSV_HEADERS: [&str; 11] = [
    "Registration ID",
    "Student Name",
    "Father Name",
    "Phone",
    "Email",
    "Age Group",
    "Events",
    "Total Amount",
    "Payment Status",
    "Attended",
    "Created At",
];

pub const LOAD_FAILED_NOTICE: &str = "Failed to load registrations";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    /// Both `pending` and `awaiting_verification`
    Pending,
    Attended,
}

impl StatusFilter {
    pub fn matches(&self, registration: &Registration) -> bool {
        match self {
            Self::All => true,
            Self::Paid => registration.payment_status == PaymentStatus::Paid,
            Self::Pending => registration.payment_status.is_outstanding(),
            Self::Attended => registration.attended,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "attended" => Ok(Self::Attended),
            other => Err(format!(
                "Unknown status filter: '{}'. Available: all, paid, pending, attended",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    #[serde(default)]
    pub status: StatusFilter,
    /// Case-insensitive match on student name, registration id or phone
    pub search: Option<String>,
}

impl DashboardQuery {
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

fn matches_search(registration: &Registration, term: &str) -> bool {
    [
        &registration.student_name,
        &registration.reg_id,
        &registration.phone,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term))
}

/// The records passing both the status filter and the search, order preserved
pub fn filter_registrations<'a>(
    registrations: &'a [Registration],
    query: &DashboardQuery,
) -> Vec<&'a Registration> {
    let term = query.search_term();

    registrations
        .iter()
        .filter(|r| query.status.matches(r))
        .filter(|r| term.as_deref().is_none_or(|t| matches_search(r, t)))
        .collect()
}

/// Headline counters, always taken over the whole set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Summary {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub attended: usize,
}

impl Summary {
    pub fn of(registrations: &[Registration]) -> Self {
        registrations.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            if StatusFilter::Paid.matches(r) {
                acc.paid += 1;
            }
            if StatusFilter::Pending.matches(r) {
                acc.pending += 1;
            }
            if r.attended {
                acc.attended += 1;
            }
            acc
        })
    }
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn csv_row(registration: &Registration) -> String {
    let cells = [
        registration.reg_id.clone(),
        registration.student_name.clone(),
        registration.father_name.clone(),
        registration.phone.clone(),
        registration.email.clone().unwrap_or_default(),
        registration.age_group.clone(),
        registration.selected_events.join("; "),
        registration.total_amount.to_string(),
        registration.payment_status.as_str().to_string(),
        if registration.attended { "Yes" } else { "No" }.to_string(),
        registration
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    ];

    cells
        .iter()
        .map(|cell| quote(cell))
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize rows as CSV: a header line, then one quoted line per record
pub fn export_csv<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a Registration>,
{
    std::iter::once(CSV_HEADERS.join(","))
        .chain(rows.into_iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("registrations-{}.csv", date.format("%Y-%m-%d"))
}

/// The full registration set as loaded from the store
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub registrations: Vec<Registration>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardView {
    pub registrations: Vec<Registration>,
    pub summary: Summary,
    pub notice: Option<String>,
}

impl Dashboard {
    pub fn summary(&self) -> Summary {
        Summary::of(&self.registrations)
    }

    pub fn filtered(&self, query: &DashboardQuery) -> Vec<&Registration> {
        filter_registrations(&self.registrations, query)
    }

    pub fn view(&self, query: &DashboardQuery) -> DashboardView {
        DashboardView {
            registrations: self.filtered(query).into_iter().cloned().collect(),
            summary: self.summary(),
            notice: self.notice.clone(),
        }
    }

    pub fn export(&self, query: &DashboardQuery) -> String {
        let rows = self.filtered(query);
        info!("Exporting {} registrations", rows.len());
        export_csv(rows)
    }
}

/// Load every registration, newest first.
///
/// A store failure is logged and turned into an empty dashboard with a notice.
pub async fn load_dashboard<S: RegistrationStore + ?Sized>(store: &S) -> Dashboard {
    match store.list_newest_first().await {
        Ok(registrations) => Dashboard {
            registrations,
            notice: None,
        },
        Err(e) => {
            error!("Failed to load registrations: {}", e);
            Dashboard {
                registrations: Vec::new(),
                notice: Some(LOAD_FAILED_NOTICE.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use storage::models::{Attachments, PaymentRef};
    use uuid::Uuid;

    fn record(reg_id: &str, name: &str, phone: &str, status: PaymentStatus, attended: bool) -> Registration {
        let created_at = Utc.with_ymd_and_hms(2025, 11, 2, 9, 30, 0).unwrap();
        Registration {
            registration_id: Uuid::new_v4(),
            reg_id: reg_id.to_string(),
            student_name: name.to_string(),
            father_name: "Ravi".to_string(),
            occupation: None,
            address: "1 Pool Road".to_string(),
            phone: phone.to_string(),
            email: None,
            age_group: "U-8".to_string(),
            selected_events: vec!["U8_KB".to_string(), "U8_FS_B".to_string()],
            attachments: Attachments {
                aadhaar_url: "https://m/a".to_string(),
                dob_url: "https://m/d".to_string(),
            },
            registration_fee: 100,
            events_fee: 200,
            total_amount: 300,
            payment_status: status,
            payment_ref: PaymentRef {
                txn_token: reg_id.to_string(),
                upi_link: "upi://pay".to_string(),
                qr_url: "https://qr".to_string(),
                utr: None,
            },
            attended,
            attended_at: None,
            verified_by: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn fixture() -> Vec<Registration> {
        vec![
            record("SWIM-A", "Asha", "9133355570", PaymentStatus::Paid, true),
            record("SWIM-B", "Bala", "9133311111", PaymentStatus::Pending, false),
            record("SWIM-C", "Chitra", "8000000000", PaymentStatus::Paid, false),
            record("SWIM-D", "Deepa", "9133322222", PaymentStatus::AwaitingVerification, false),
        ]
    }

    fn query(status: StatusFilter, search: &str) -> DashboardQuery {
        DashboardQuery {
            status,
            search: Some(search.to_string()),
        }
    }

    fn ids(rows: &[&Registration]) -> Vec<String> {
        rows.iter().map(|r| r.reg_id.clone()).collect()
    }

    #[test]
    fn test_filter_and_search_compose() {
        let records = fixture();
        let rows = filter_registrations(&records, &query(StatusFilter::Paid, "9133"));
        assert_eq!(ids(&rows), vec!["SWIM-A"]);
    }

    #[test]
    fn test_pending_includes_awaiting_verification() {
        let records = fixture();
        let rows = filter_registrations(&records, &query(StatusFilter::Pending, ""));
        assert_eq!(ids(&rows), vec!["SWIM-B", "SWIM-D"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = fixture();
        let by_name = filter_registrations(&records, &query(StatusFilter::All, "cHiT"));
        assert_eq!(ids(&by_name), vec!["SWIM-C"]);

        let by_id = filter_registrations(&records, &query(StatusFilter::All, "swim-d"));
        assert_eq!(ids(&by_id), vec!["SWIM-D"]);
    }

    #[test]
    fn test_summary_ignores_filters() {
        let dashboard = Dashboard {
            registrations: fixture(),
            notice: None,
        };
        let view = dashboard.view(&query(StatusFilter::Attended, "Asha"));

        assert_eq!(view.registrations.len(), 1);
        assert_eq!(
            view.summary,
            Summary {
                total: 4,
                paid: 2,
                pending: 2,
                attended: 1,
            }
        );
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let csv = export_csv(std::iter::empty());
        assert_eq!(csv, CSV_HEADERS.join(","));
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_export_row_format() {
        let mut records = fixture();
        records[0].student_name = "Asha \"Ash\" K".to_string();

        let csv = export_csv(&records[..1]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"SWIM-A\",\"Asha \"\"Ash\"\" K\",\"Ravi\",\"9133355570\",\"\",\"U-8\",\
             \"U8_KB; U8_FS_B\",\"300\",\"paid\",\"Yes\",\"2025-11-02T09:30:00.000Z\""
        );
    }

    #[test]
    fn test_export_filename_uses_date() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        assert_eq!(export_filename(date), "registrations-2025-11-02.csv");
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("PAID".parse::<StatusFilter>(), Ok(StatusFilter::Paid));
        assert!("refunded".parse::<StatusFilter>().is_err());
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_notice() {
        struct Broken;

        #[async_trait::async_trait]
        impl RegistrationStore for Broken {
            async fn create(
                &self,
                _: &storage::dto::NewRegistration,
            ) -> storage::error::Result<Registration> {
                Err(storage::error::StorageError::NotFound)
            }

            async fn list_newest_first(&self) -> storage::error::Result<Vec<Registration>> {
                Err(storage::error::StorageError::ConstraintViolation("down".to_string()))
            }

            async fn find_by_reg_id(&self, _: &str) -> storage::error::Result<Registration> {
                Err(storage::error::StorageError::NotFound)
            }
        }

        let dashboard = load_dashboard(&Broken).await;
        assert!(dashboard.registrations.is_empty());
        assert_eq!(dashboard.notice.as_deref(), Some(LOAD_FAILED_NOTICE));
    }
}
