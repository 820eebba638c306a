//! Read access to individual payment records

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::{ListPaymentsParams, PaymentRow};
use crate::data::{DataError, PaymentsDatabase};
use crate::domain::revenue::minor_to_decimal;
use crate::utils::time::to_iso;

/// Payment as exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaymentRecord {
    pub id: i64,
    pub transaction_id: String,
    pub customer_id: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    #[schema(value_type = f64, example = 49.99)]
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub status: String,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub description: Option<String>,
    pub extra_data: Option<String>,
    /// ISO 8601 without offset (UTC)
    pub payment_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PaymentRow> for PaymentRecord {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            transaction_id: row.transaction_id,
            customer_id: row.customer_id,
            customer_email: row.customer_email,
            customer_name: row.customer_name,
            amount: minor_to_decimal(row.amount_minor),
            currency: row.currency,
            payment_method: row.payment_method,
            status: row.status,
            product_name: row.product_name,
            product_category: row.product_category,
            description: row.description,
            extra_data: row.extra_data,
            payment_date: to_iso(row.payment_date),
            created_at: to_iso(row.created_at),
            updated_at: to_iso(row.updated_at),
        }
    }
}

/// One page of payments, newest first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentPage {
    pub payments: Vec<PaymentRecord>,
    /// Payments matching the filters across all pages
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Clone)]
pub struct PaymentService {
    database: Arc<PaymentsDatabase>,
}

impl PaymentService {
    pub fn new(database: Arc<PaymentsDatabase>) -> Self {
        Self { database }
    }

    pub async fn list(&self, params: ListPaymentsParams) -> Result<PaymentPage, DataError> {
        let (rows, total) = self.database.repository().list_payments(&params).await?;
        Ok(PaymentPage {
            payments: rows.into_iter().map(PaymentRecord::from).collect(),
            total,
            limit: params.limit,
            offset: params.offset,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<PaymentRecord>, DataError> {
        Ok(self
            .database
            .repository()
            .get_payment(id)
            .await?
            .map(PaymentRecord::from))
    }
}
