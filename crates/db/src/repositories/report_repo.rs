//! Repository for the meeting report join query.

use chrono::NaiveDate;
use sqlx::PgPool;

use pestops_core::scope::TenantScope;

use crate::models::report::{assemble_meeting_reports, MeetingReport, ReportQuery, ReportRow};

/// Column list for the report join. One row per detection edge; the left
/// joins leave the detection columns NULL for photos without results.
const REPORT_COLUMNS: &str = "\
    m.id AS meeting_id, m.title AS meeting_title, m.scheduled_date, \
    l.id AS location_id, l.name AS location_name, l.address AS location_address, \
    l.city AS location_city, l.state AS location_state, \
    c.id AS customer_id, c.name AS customer_name, c.email AS customer_email, \
    c.phone AS customer_phone, \
    p.id AS photo_id, p.created_at AS photo_created_at, \
    ar.id AS species_result_id, ar.detected_pest, ar.pest_count, \
    af.id AS family_result_id, af.family_name, af.family_count";

/// Fixed cap on fetched join rows. There is no pagination on the report
/// endpoint; a scope wide enough to exceed this needs a narrower filter.
const MAX_REPORT_ROWS: i64 = 10_000;

/// Row Fetcher and builder for meeting reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Fetch the flat join rows for a report scope, ordered by meeting id
    /// descending then photo id descending (stable grouping order).
    ///
    /// Meetings without photos are excluded by the inner join: a report
    /// covers meetings with at least one photo in range.
    pub async fn fetch_report_rows(
        pool: &PgPool,
        query: &ReportQuery,
    ) -> Result<Vec<ReportRow>, sqlx::Error> {
        let (where_clause, bind_values) = build_report_filter(query);

        let sql = format!(
            "SELECT {REPORT_COLUMNS} \
             FROM meetings m \
             JOIN photos p ON p.meeting_id = m.id \
             LEFT JOIN ai_results ar ON ar.photo_id = p.id \
             LEFT JOIN ai_families af ON af.photo_id = p.id \
             JOIN locations l ON p.location_id = l.id \
             JOIN customers c ON p.customer_id = c.id \
             {where_clause} \
             ORDER BY m.id DESC, p.id DESC \
             LIMIT {MAX_REPORT_ROWS}"
        );

        let q = bind_report_values(sqlx::query_as::<_, ReportRow>(&sql), &bind_values);
        q.fetch_all(pool)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Meeting report row fetch failed"))
    }

    /// Fetch rows and assemble them into nested meeting reports.
    pub async fn fetch_meeting_reports(
        pool: &PgPool,
        query: &ReportQuery,
    ) -> Result<Vec<MeetingReport>, sqlx::Error> {
        let rows = Self::fetch_report_rows(pool, query).await?;
        Ok(assemble_meeting_reports(rows))
    }
}

/// Typed bind value for the dynamically-built report query.
enum BindValue {
    BigInt(i64),
    Date(NaiveDate),
}

/// Build the WHERE clause and bind values from report filters.
///
/// The clause is empty when no filters are active (admin scope, no
/// optional filters), or starts with `WHERE `.
fn build_report_filter(query: &ReportQuery) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let TenantScope::Company(company_id) = query.scope {
        conditions.push(format!("m.company_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(company_id));
    }

    if let Some(range) = query.date_range {
        conditions.push(format!(
            "p.created_at::date BETWEEN ${bind_idx} AND ${}",
            bind_idx + 1
        ));
        bind_idx += 2;
        bind_values.push(BindValue::Date(range.start));
        bind_values.push(BindValue::Date(range.end));
    }

    if let Some(location_id) = query.location_id {
        conditions.push(format!("p.location_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(location_id));
    }

    if let Some(customer_id) = query.customer_id {
        conditions.push(format!("p.customer_id = ${bind_idx}"));
        bind_values.push(BindValue::BigInt(customer_id));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_report_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}
