// Audit logging service for marketplace events
// Records registrations, logins, and state-changing actions to the database

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::queries;
use crate::error::Result;

/// Business events to be audited
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// New account created
    UserRegistered { user_id: Uuid, role: String },
    /// User successfully logged in
    UserLogin { user_id: Uuid },
    /// Login attempt failed for an existing account
    LoginFailed { user_id: Uuid, email: String },
    /// Seller published a listing
    ProductCreated { user_id: Uuid, product_id: Uuid },
    /// Listing changed
    ProductUpdated { user_id: Uuid, product_id: Uuid },
    /// Listing removed
    ProductDeleted { user_id: Uuid, product_id: Uuid },
    /// Buyer raised an enquiry
    EnquiryCreated { user_id: Uuid, enquiry_id: Uuid },
    /// Seller responded to an enquiry
    EnquiryResponded {
        user_id: Uuid,
        enquiry_id: Uuid,
        status: Option<String>,
    },
    /// Delivery order created
    OrderCreated { user_id: Uuid, order_id: Uuid },
    /// Order status or transporter changed
    OrderUpdated {
        user_id: Uuid,
        order_id: Uuid,
        status: Option<String>,
    },
    /// Payment recorded
    TransactionCreated {
        user_id: Uuid,
        transaction_id: Uuid,
        order_id: Uuid,
    },
    /// Transporter published a route
    RouteCreated { user_id: Uuid, route_id: Uuid },
    /// Admin changed another user's account
    AdminAction {
        user_id: Uuid,
        action: String,
        target_user_id: Option<Uuid>,
    },
}

impl AuditEvent {
    /// Get the action name for database storage
    pub fn action(&self) -> &'static str {
        match self {
            AuditEvent::UserRegistered { .. } => "user_registered",
            AuditEvent::UserLogin { .. } => "user_login",
            AuditEvent::LoginFailed { .. } => "login_failed",
            AuditEvent::ProductCreated { .. } => "product_created",
            AuditEvent::ProductUpdated { .. } => "product_updated",
            AuditEvent::ProductDeleted { .. } => "product_deleted",
            AuditEvent::EnquiryCreated { .. } => "enquiry_created",
            AuditEvent::EnquiryResponded { .. } => "enquiry_responded",
            AuditEvent::OrderCreated { .. } => "order_created",
            AuditEvent::OrderUpdated { .. } => "order_updated",
            AuditEvent::TransactionCreated { .. } => "transaction_created",
            AuditEvent::RouteCreated { .. } => "route_created",
            AuditEvent::AdminAction { .. } => "admin_action",
        }
    }

    /// The acting user
    pub fn user_id(&self) -> Uuid {
        match self {
            AuditEvent::UserRegistered { user_id, .. }
            | AuditEvent::UserLogin { user_id }
            | AuditEvent::LoginFailed { user_id, .. }
            | AuditEvent::ProductCreated { user_id, .. }
            | AuditEvent::ProductUpdated { user_id, .. }
            | AuditEvent::ProductDeleted { user_id, .. }
            | AuditEvent::EnquiryCreated { user_id, .. }
            | AuditEvent::EnquiryResponded { user_id, .. }
            | AuditEvent::OrderCreated { user_id, .. }
            | AuditEvent::OrderUpdated { user_id, .. }
            | AuditEvent::TransactionCreated { user_id, .. }
            | AuditEvent::RouteCreated { user_id, .. }
            | AuditEvent::AdminAction { user_id, .. } => *user_id,
        }
    }
}

/// Audit logger service
#[derive(Debug, Clone)]
pub struct AuditLogger {
    db: PgPool,
    enabled: bool,
}

impl AuditLogger {
    pub fn new(db: PgPool, enabled: bool) -> Self {
        Self { db, enabled }
    }

    /// Log an audit event to the database
    pub async fn log(&self, event: AuditEvent) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let action = event.action();
        let user_id = event.user_id();
        let details = serde_json::to_value(&event).unwrap_or_default();

        queries::audit::insert(&self.db, user_id, action, &details).await?;

        tracing::info!(
            action = action,
            user_id = %user_id,
            "Audit event logged"
        );

        Ok(())
    }

    /// Log event without awaiting (fire-and-forget)
    /// Useful for non-critical logging that shouldn't block the request
    pub fn log_async(&self, event: AuditEvent) {
        let logger = self.clone();
        tokio::spawn(async move {
            if let Err(e) = logger.log(event).await {
                tracing::error!(error = %e, "Failed to log audit event");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_action_names() {
        let user_id = Uuid::new_v4();
        let event = AuditEvent::UserRegistered {
            user_id,
            role: "Seller".to_string(),
        };
        assert_eq!(event.action(), "user_registered");
        assert_eq!(event.user_id(), user_id);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = AuditEvent::OrderUpdated {
            user_id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            status: Some("Delivered".to_string()),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "order_updated");
        assert_eq!(value["status"], "Delivered");
    }
}
