//! Payment repository for PostgreSQL operations
//!
//! `amount` is `NUMERIC(12,2)`; scaling by 100 is exact in `numeric`, so
//! amounts and sums are cast to whole cents as `BIGINT` before decoding.
//! `id` is cast to `BIGINT` so both `INTEGER` and `BIGINT` keys decode.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::data::postgres::PostgresError;
use crate::data::types::{
    CategoryRevenueRow, ListPaymentsParams, MonthRevenueRow, PaymentRow, RevenueFilter,
    RevenueTotals, row_count,
};
use crate::utils::time::year_bounds;

const PAYMENT_COLUMNS: &str = "id::BIGINT AS id, transaction_id, customer_id, customer_email, \
     customer_name, (amount * 100)::BIGINT AS amount_minor, currency, payment_method, status, \
     product_name, product_category, description, extra_data, payment_date, created_at, \
     updated_at";

const SUM_MINOR: &str = "COALESCE(SUM(amount * 100), 0)::BIGINT";

fn push_revenue_filter<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a RevenueFilter) {
    qb.push(" WHERE status = ").push_bind(filter.status.as_str());
    if let Some(start) = filter.start {
        qb.push(" AND payment_date >= ").push_bind(start);
    }
    if let Some(end) = filter.end {
        qb.push(" AND payment_date <= ").push_bind(end);
    }
}

pub async fn calculate_revenue(
    pool: &PgPool,
    filter: &RevenueFilter,
) -> Result<RevenueTotals, PostgresError> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {}, COUNT(id) FROM payments",
        SUM_MINOR
    ));
    push_revenue_filter(&mut qb, filter);

    let (total_minor, count): (i64, i64) = qb.build_query_as().fetch_one(pool).await?;

    Ok(RevenueTotals {
        total_minor,
        count: row_count(count),
    })
}

pub async fn revenue_by_category(
    pool: &PgPool,
    filter: &RevenueFilter,
) -> Result<Vec<CategoryRevenueRow>, PostgresError> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT product_category, {}, COUNT(id) FROM payments",
        SUM_MINOR
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

pub async fn revenue_by_month(
    pool: &PgPool,
    year: i32,
    status: &str,
) -> Result<Vec<MonthRevenueRow>, PostgresError> {
    let Some((start, end)) = year_bounds(year) else {
        return Ok(Vec::new());
    };

    let sql = format!(
        "SELECT EXTRACT(MONTH FROM payment_date)::INT AS month, {}, COUNT(id) \
         FROM payments \
         WHERE status = $1 AND payment_date >= $2 AND payment_date < $3 \
         GROUP BY month ORDER BY month",
        SUM_MINOR
    );
    let rows = sqlx::query_as::<_, (i32, i64, i64)>(&sql)
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

fn push_list_filter<'a>(qb: &mut QueryBuilder<'a, Postgres>, params: &'a ListPaymentsParams) {
    let mut separator = " WHERE ";
    if let Some(status) = params.status.as_deref() {
        qb.push(separator).push("status = ").push_bind(status);
        separator = " AND ";
    }
    if let Some(customer_id) = params.customer_id.as_deref() {
        qb.push(separator).push("customer_id = ").push_bind(customer_id);
    }
}

pub async fn list_payments(
    pool: &PgPool,
    params: &ListPaymentsParams,
) -> Result<(Vec<PaymentRow>, u64), PostgresError> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM payments", PAYMENT_COLUMNS));
    push_list_filter(&mut qb, params);
    qb.push(" ORDER BY payment_date DESC, id DESC LIMIT ")
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

pub async fn get_payment(pool: &PgPool, id: i64) -> Result<Option<PaymentRow>, PostgresError> {
    let sql = format!("SELECT {} FROM payments WHERE id = $1", PAYMENT_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    Ok(row.as_ref().map(payment_from_row).transpose()?)
}

fn payment_from_row(row: &PgRow) -> Result<PaymentRow, sqlx::Error> {
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
        payment_date: row.try_get("payment_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
