//! Purchase order drafts and status transitions

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Order, OrderItem, OrderStatus};

/// Days between sending an order and the expected delivery
pub const DEFAULT_LEAD_DAYS: i64 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("order {id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("order draft for supplier {0} has no items")]
    EmptyDraft(String),
}

/// Items gathered for one supplier before the order is sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub supplier_id: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
}

impl OrderDraft {
    pub fn new(supplier_id: impl Into<String>, items: Vec<OrderItem>) -> Self {
        let total_amount = items.iter().map(|item| item.total_price).sum();
        Self {
            supplier_id: supplier_id.into(),
            items,
            total_amount,
        }
    }
}

impl Order {
    /// Turn a draft into a sent order, expected `DEFAULT_LEAD_DAYS` later
    pub fn from_draft(
        draft: OrderDraft,
        order_number: impl Into<String>,
        supplier_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if draft.items.is_empty() {
            return Err(OrderError::EmptyDraft(draft.supplier_id));
        }
        Ok(Self {
            id: format!("order-{}", Uuid::new_v4()),
            order_number: order_number.into(),
            supplier_id: draft.supplier_id,
            supplier_name: supplier_name.into(),
            items: draft.items,
            total_amount: draft.total_amount,
            status: OrderStatus::Ordered,
            order_date: now,
            expected_date: Some(now + Duration::days(DEFAULT_LEAD_DAYS)),
            received_date: None,
        })
    }

    /// Move to `to` if the status machine allows it
    ///
    /// draft → ordered → received; draft and ordered may be cancelled.
    pub fn transition(&mut self, to: OrderStatus, now: DateTime<Utc>) -> Result<(), OrderError> {
        let allowed = matches!(
            (self.status, to),
            (OrderStatus::Draft, OrderStatus::Ordered)
                | (OrderStatus::Ordered, OrderStatus::Received)
                | (OrderStatus::Draft, OrderStatus::Cancelled)
                | (OrderStatus::Ordered, OrderStatus::Cancelled)
        );
        if !allowed {
            return Err(OrderError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
                to,
            });
        }

        match to {
            OrderStatus::Ordered => self.order_date = now,
            OrderStatus::Received => self.received_date = Some(now),
            _ => {}
        }
        self.status = to;
        Ok(())
    }

    /// Sent but not yet received
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Ordered
    }
}
