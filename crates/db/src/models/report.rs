//! Meeting report rows, derived report tree, and the row-to-report fold.
//!
//! The report query joins meetings, photos, per-species detections, and
//! per-family rollups into one flat row stream (one row per detection
//! edge). [`assemble_meeting_reports`] folds that stream back into the
//! nested `Meeting -> Photo -> {species, families}` view and computes the
//! per-meeting summary.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use sqlx::FromRow;

use pestops_core::reporting::{merge_label_counts, DateRange};
use pestops_core::scope::TenantScope;
use pestops_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Query input
// ---------------------------------------------------------------------------

/// Filters for the meeting report query.
///
/// Absent optional filters add no condition; they never match NULL.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub scope: TenantScope,
    pub date_range: Option<DateRange>,
    pub location_id: Option<DbId>,
    pub customer_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Flat row
// ---------------------------------------------------------------------------

/// One flat row from the report join.
///
/// A photo fans out across several rows (cross product of its species
/// detections and family rollups); the detection columns are NULL on rows
/// where the left joins found nothing.
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub meeting_id: DbId,
    pub meeting_title: String,
    pub scheduled_date: NaiveDate,

    pub location_id: DbId,
    pub location_name: String,
    pub location_address: String,
    pub location_city: String,
    pub location_state: String,

    pub customer_id: DbId,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,

    pub photo_id: DbId,
    pub photo_created_at: Timestamp,

    pub species_result_id: Option<DbId>,
    pub detected_pest: Option<String>,
    pub pest_count: Option<i32>,

    pub family_result_id: Option<DbId>,
    pub family_name: Option<String>,
    pub family_count: Option<i32>,
}

// ---------------------------------------------------------------------------
// Derived report tree
// ---------------------------------------------------------------------------

/// One AI-classified species observation in a photo.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesDetection {
    pub id: DbId,
    pub species: String,
    pub count: i32,
}

/// One taxonomic family-level aggregate in a photo.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyRollup {
    pub id: DbId,
    pub family: String,
    pub count: i32,
}

/// A photo with its deduplicated detections, in fetch order.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoReport {
    pub photo_id: DbId,
    pub created_at: Timestamp,
    pub detected_species: Vec<SpeciesDetection>,
    pub detected_families: Vec<FamilyRollup>,
}

/// Location metadata attached to a meeting report.
#[derive(Debug, Clone, Serialize)]
pub struct LocationInfo {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

/// Customer metadata attached to a meeting report.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerInfo {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A species label with its count summed across all photos of a meeting.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesCount {
    pub species: String,
    pub count: i64,
}

/// A family label with its count summed across all photos of a meeting.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyCount {
    pub family: String,
    pub count: i64,
}

/// Per-meeting rollup statistics.
///
/// `total_insects` sums species counts only; family rollups are a separate
/// classification granularity and never contribute to the total.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_photos: i64,
    pub total_insects: i64,
    pub unique_species: Vec<SpeciesCount>,
    pub unique_families: Vec<FamilyCount>,
}

/// A meeting with its photos and summary. Built per request, not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingReport {
    pub meeting_id: DbId,
    pub meeting_title: String,
    pub meeting_date: NaiveDate,
    pub location: LocationInfo,
    pub customer: CustomerInfo,
    pub photos: Vec<PhotoReport>,
    pub summary: ReportSummary,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Per-meeting accumulator while folding the row stream.
struct MeetingAcc {
    meeting_id: DbId,
    meeting_title: String,
    meeting_date: NaiveDate,
    location: LocationInfo,
    customer: CustomerInfo,
    photos: IndexMap<DbId, PhotoReport>,
}

impl MeetingAcc {
    fn finish(self) -> MeetingReport {
        let photos: Vec<PhotoReport> = self.photos.into_values().collect();

        let total_insects: i64 = photos
            .iter()
            .flat_map(|p| &p.detected_species)
            .map(|s| i64::from(s.count))
            .sum();

        let unique_species = merge_label_counts(
            photos
                .iter()
                .flat_map(|p| &p.detected_species)
                .map(|s| (s.species.clone(), i64::from(s.count))),
        )
        .into_iter()
        .map(|(species, count)| SpeciesCount { species, count })
        .collect();

        let unique_families = merge_label_counts(
            photos
                .iter()
                .flat_map(|p| &p.detected_families)
                .map(|f| (f.family.clone(), i64::from(f.count))),
        )
        .into_iter()
        .map(|(family, count)| FamilyCount { family, count })
        .collect();

        let summary = ReportSummary {
            total_photos: photos.len() as i64,
            total_insects,
            unique_species,
            unique_families,
        };

        MeetingReport {
            meeting_id: self.meeting_id,
            meeting_title: self.meeting_title,
            meeting_date: self.meeting_date,
            location: self.location,
            customer: self.customer,
            photos,
            summary,
        }
    }
}

/// Fold a flat row stream into nested meeting reports.
///
/// Grouping is keyed by meeting id, then photo id; the first occurrence of
/// a key establishes the record, so output order is fetch order (the query
/// orders `m.id DESC, p.id DESC`). Detections are deduplicated by their own
/// row id, which makes duplicate rows from the join fan-out harmless.
pub fn assemble_meeting_reports(rows: Vec<ReportRow>) -> Vec<MeetingReport> {
    let mut meetings: IndexMap<DbId, MeetingAcc> = IndexMap::new();

    for row in rows {
        let meeting = meetings.entry(row.meeting_id).or_insert_with(|| MeetingAcc {
            meeting_id: row.meeting_id,
            meeting_title: row.meeting_title.clone(),
            meeting_date: row.scheduled_date,
            location: LocationInfo {
                id: row.location_id,
                name: row.location_name.clone(),
                address: row.location_address.clone(),
                city: row.location_city.clone(),
                state: row.location_state.clone(),
            },
            customer: CustomerInfo {
                id: row.customer_id,
                name: row.customer_name.clone(),
                email: row.customer_email.clone(),
                phone: row.customer_phone.clone(),
            },
            photos: IndexMap::new(),
        });

        let photo = meeting
            .photos
            .entry(row.photo_id)
            .or_insert_with(|| PhotoReport {
                photo_id: row.photo_id,
                created_at: row.photo_created_at,
                detected_species: Vec::new(),
                detected_families: Vec::new(),
            });

        if let (Some(id), Some(species)) = (row.species_result_id, row.detected_pest.as_deref()) {
            if !photo.detected_species.iter().any(|s| s.id == id) {
                photo.detected_species.push(SpeciesDetection {
                    id,
                    species: species.to_string(),
                    count: row.pest_count.unwrap_or(0),
                });
            }
        }

        if let (Some(id), Some(family)) = (row.family_result_id, row.family_name.as_deref()) {
            if !photo.detected_families.iter().any(|f| f.id == id) {
                photo.detected_families.push(FamilyRollup {
                    id,
                    family: family.to_string(),
                    count: row.family_count.unwrap_or(0),
                });
            }
        }
    }

    meetings.into_values().map(MeetingAcc::finish).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
