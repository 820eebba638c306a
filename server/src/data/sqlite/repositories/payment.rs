//! Payment repository for SQLite operations
//!
//! Revenue aggregates are single `SUM`/`COUNT` statements; amounts never
//! leave the database as individual rows.
//!
//! Other writers store `payment_date` text in whatever layout their driver
//! picks (`T` or space separator, zero to six fractional digits, a trailing
//! offset). Every comparison and ordering goes through `PAYMENT_INSTANT`
//! so the text is compared as one canonical UTC layout, to the millisecond.
//! `amount` is `NUMERIC(12,2)` and may come back as REAL, so each row is
//! rounded to whole cents before summing.

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::data::sqlite::SqliteError;
use crate::data::types::{
    CategoryRevenueRow, ListPaymentsParams, MonthRevenueRow, PaymentRow, RevenueFilter,
    RevenueTotals, row_count,
};
use crate::utils::time::year_bounds;

/// `payment_date` in the layout of `idx_payments_instant_*`
const PAYMENT_INSTANT: &str = "strftime('%Y-%m-%d %H:%M:%f', payment_date)";

/// Bound parameter normalized to the same layout as [`PAYMENT_INSTANT`]
const BOUND_INSTANT: &str = "strftime('%Y-%m-%d %H:%M:%f', ?)";

const AMOUNT_MINOR: &str = "CAST(ROUND(amount * 100) AS INTEGER)";

const PAYMENT_COLUMNS: &str = "id, transaction_id, customer_id, customer_email, customer_name, \
     CAST(ROUND(amount * 100) AS INTEGER) AS amount_minor, currency, payment_method, status, \
     product_name, product_category, description, extra_data, payment_date, created_at, \
     updated_at";

/// Append `WHERE status = ? [AND instant >= start] [AND instant <= end]`
fn push_revenue_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a RevenueFilter) {
    qb.push(" WHERE status = ").push_bind(filter.status.as_str());
    if let Some(start) = filter.start {
        qb.push(format!(" AND {} >= strftime('%Y-%m-%d %H:%M:%f', ", PAYMENT_INSTANT))
            .push_bind(start)
            .push(")");
    }
    if let Some(end) = filter.end {
        qb.push(format!(" AND {} <= strftime('%Y-%m-%d %H:%M:%f', ", PAYMENT_INSTANT))
            .push_bind(end)
            .push(")");
    }
}

/// Total amount (minor units) and count of matching payments
pub async fn calculate_revenue(
    pool: &SqlitePool,
    filter: &RevenueFilter,
) -> Result<RevenueTotals, SqliteError> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT COALESCE(SUM({}), 0), COUNT(id) FROM payments",
        AMOUNT_MINOR
    ));
    push_revenue_filter(&mut qb, filter);

    let (total_minor, count): (i64, i64) = qb.build_query_as().fetch_one(pool).await?;

    Ok(RevenueTotals {
        total_minor,
        count: row_count(count),
    })
}

/// Matching payments grouped by product category (NULL kept as its own group)
pub async fn revenue_by_category(
    pool: &SqlitePool,
    filter: &RevenueFilter,
) -> Result<Vec<CategoryRevenueRow>, SqliteError> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT product_category, COALESCE(SUM({}), 0), COUNT(id) FROM payments",
        AMOUNT_MINOR
    ));
    push_revenue_filter(&mut qb, filter);
    qb.push(" GROUP BY product_category");

    let rows: Vec<(Option<String>, i64, i64)> = qb.build_query_as().fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|(category, total_minor, count)| CategoryRevenueRow {
            category,
            total_minor,
            count: row_count(count),
        })
        .collect())
}

/// Monthly totals for one calendar year, ascending by month
pub async fn revenue_by_month(
    pool: &SqlitePool,
    year: i32,
    status: &str,
) -> Result<Vec<MonthRevenueRow>, SqliteError> {
    let Some((start, end)) = year_bounds(year) else {
        return Ok(Vec::new());
    };

    let sql = format!(
        "SELECT CAST(strftime('%m', payment_date) AS INTEGER) AS month, \
         COALESCE(SUM({amount}), 0), COUNT(id) \
         FROM payments \
         WHERE status = ? AND {instant} >= {bound} AND {instant} < {bound} \
         GROUP BY month ORDER BY month",
        amount = AMOUNT_MINOR,
        instant = PAYMENT_INSTANT,
        bound = BOUND_INSTANT,
    );
    let rows = sqlx::query_as::<_, (i64, i64, i64)>(&sql)
        .bind(status)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(month, total_minor, count)| {
            let month = u32::try_from(month).ok().filter(|m| (1..=12).contains(m))?;
            Some(MonthRevenueRow {
                month,
                total_minor,
                count: row_count(count),
            })
        })
        .collect())
}

/// Append the optional listing filters
fn push_list_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, params: &'a ListPaymentsParams) {
    let mut separator = " WHERE ";
    if let Some(status) = params.status.as_deref() {
        qb.push(separator).push("status = ").push_bind(status);
        separator = " AND ";
    }
    if let Some(customer_id) = params.customer_id.as_deref() {
        qb.push(separator).push("customer_id = ").push_bind(customer_id);
    }
}

/// Page of payments ordered by `payment_date DESC`, with the total for the filter
pub async fn list_payments(
    pool: &SqlitePool,
    params: &ListPaymentsParams,
) -> Result<(Vec<PaymentRow>, u64), SqliteError> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM payments", PAYMENT_COLUMNS));
    push_list_filter(&mut qb, params);
    qb.push(format!(" ORDER BY {} DESC, id DESC LIMIT ", PAYMENT_INSTANT))
        .push_bind(i64::from(params.limit))
        .push(" OFFSET ")
        .push_bind(i64::from(params.offset));

    let rows = qb.build().fetch_all(pool).await?;
    let payments = rows
        .iter()
        .map(payment_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM payments");
    push_list_filter(&mut count_qb, params);
    let (total,): (i64,) = count_qb.build_query_as().fetch_one(pool).await?;

    Ok((payments, row_count(total)))
}

/// Get a payment by primary key
pub async fn get_payment(pool: &SqlitePool, id: i64) -> Result<Option<PaymentRow>, SqliteError> {
    let sql = format!("SELECT {} FROM payments WHERE id = ?", PAYMENT_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    Ok(row.as_ref().map(payment_from_row).transpose()?)
}

fn payment_from_row(row: &SqliteRow) -> Result<PaymentRow, sqlx::Error> {
    Ok(PaymentRow {
        id: row.try_get("id")?,
        transaction_id: row.try_get("transaction_id")?,
        customer_id: row.try_get("customer_id")?,
        customer_email: row.try_get("customer_email")?,
        customer_name: row.try_get("customer_name")?,
        amount_minor: row.try_get("amount_minor")?,
        currency: row.try_get("currency")?,
        payment_method: row.try_get("payment_method")?,
        status: row.try_get("status")?,
        product_name: row.try_get("product_name")?,
        product_category: row.try_get("product_category")?,
        description: row.try_get("description")?,
        extra_data: row.try_get("extra_data")?,
        payment_date: row.try_get::<NaiveDateTime, _>("payment_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
