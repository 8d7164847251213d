//! Repository for the insect-population analytics queries.

use chrono::NaiveDate;
use sqlx::PgPool;

use pestops_core::scope::TenantScope;

use crate::models::population::{FamilyBucket, PopulationQuery, SeriesPoint};

/// Population analytics Row Fetcher: two independent aggregate queries
/// over per-species detections, scoped through the capturing
/// exterminator's company.
pub struct PopulationRepo;

impl PopulationRepo {
    /// Daily time series: total detection counts per capture date,
    /// ascending by date. Dates with no detections emit no point.
    pub async fn fetch_daily_series(
        pool: &PgPool,
        query: &PopulationQuery,
    ) -> Result<Vec<SeriesPoint>, sqlx::Error> {
        let (where_clause, bind_values) = build_population_filter(query);

        let sql = format!(
            "SELECT p.created_at::date AS date, \
                    SUM(ar.pest_count)::BIGINT AS total_insects \
             FROM ai_results ar \
             JOIN photos p ON ar.photo_id = p.id \
             JOIN users u ON p.exterminator_id = u.id \
             {where_clause} \
             GROUP BY p.created_at::date \
             ORDER BY date ASC"
        );

        let q = bind_population_values(sqlx::query_as::<_, SeriesPoint>(&sql), &bind_values);
        q.fetch_all(pool)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Daily series fetch failed"))
    }

    /// Distribution of totals per family label, descending by total.
    ///
    /// Detections without a family assignment are bucketed under their raw
    /// species label; those labels are not necessarily true taxonomic
    /// families, per the upstream classifier contract.
    pub async fn fetch_family_distribution(
        pool: &PgPool,
        query: &PopulationQuery,
    ) -> Result<Vec<FamilyBucket>, sqlx::Error> {
        let (where_clause, bind_values) = build_population_filter(query);

        let sql = format!(
            "SELECT COALESCE(ar.family_name, ar.detected_pest) AS family, \
                    SUM(ar.pest_count)::BIGINT AS total \
             FROM ai_results ar \
             JOIN photos p ON ar.photo_id = p.id \
             JOIN users u ON p.exterminator_id = u.id \
             {where_clause} \
             GROUP BY COALESCE(ar.family_name, ar.detected_pest) \
             ORDER BY total DESC"
        );

        let q = bind_population_values(sqlx::query_as::<_, FamilyBucket>(&sql), &bind_values);
        q.fetch_all(pool)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Family distribution fetch failed"))
    }
}

/// Typed bind value for the dynamically-built analytics queries.
enum BindValue {
    BigInt(i64),
    Date(NaiveDate),
}

/// Build the WHERE clause shared by both analytics queries.
///
/// The date range is always present, so the clause always starts with
/// `WHERE `; tenant, location, and meeting conditions follow when active.
fn build_population_filter(query: &PopulationQuery) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = vec![String::from(
        "p.created_at::date BETWEEN $1 AND $2",
    )];
    let mut bind_idx = 3u32;
    let mut bind_values: Vec<BindValue> = vec![
        BindValue::Date(query.date_range.start),
        BindValue::Date(query.date_range.end),
    ];

    if let TenantScope::Company(company_id) = query.scope {
        conditions.push(format!("u.company_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(company_id));
    }

    if let Some(location_id) = query.location_id {
        conditions.push(format!("p.location_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(location_id));
    }

    if let Some(meeting_id) = query.meeting_id {
        conditions.push(format!("p.meeting_id = ${bind_idx}"));
        bind_values.push(BindValue::BigInt(meeting_id));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));
    (where_clause, bind_values)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_population_values<'q, O>(
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

#[cfg(test)]
mod tests {
    use super::*;
    use pestops_core::reporting::DateRange;

    fn base_query(scope: TenantScope) -> PopulationQuery {
        PopulationQuery {
            scope,
            date_range: DateRange {
                start: "2026-01-01".parse().unwrap(),
                end: "2026-01-31".parse().unwrap(),
            },
            location_id: None,
            meeting_id: None,
        }
    }

    #[test]
    fn date_range_is_always_first_condition() {
        let (where_clause, binds) = build_population_filter(&base_query(TenantScope::All));
        assert_eq!(where_clause, "WHERE p.created_at::date BETWEEN $1 AND $2");
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn company_scope_filters_through_exterminator() {
        let (where_clause, binds) =
            build_population_filter(&base_query(TenantScope::Company(12)));
        assert_eq!(
            where_clause,
            "WHERE p.created_at::date BETWEEN $1 AND $2 AND u.company_id = $3"
        );
        assert_eq!(binds.len(), 3);
    }

    #[test]
    fn optional_filters_extend_placeholders() {
        let mut query = base_query(TenantScope::Company(12));
        query.location_id = Some(4);
        query.meeting_id = Some(8);

        let (where_clause, binds) = build_population_filter(&query);
        assert_eq!(
            where_clause,
            "WHERE p.created_at::date BETWEEN $1 AND $2 \
             AND u.company_id = $3 AND p.location_id = $4 AND p.meeting_id = $5"
        );
        assert_eq!(binds.len(), 5);
    }
}
