//! Purchase repository for database operations.
//!
//! Implements [`TransactionStore`] using SeaORM.

use chrono::{SubsecRound, Utc};
use purser_core::PurchaseError;
use purser_core::purchase::{NewPurchase, PurchaseTransaction, TransactionStore};
use purser_shared::{Amount, PurchaseId};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::debug;

use crate::entities::purchase_transactions;

/// Purchase repository implementation.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    db: DatabaseConnection,
}

impl PurchaseRepository {
    /// Create a new purchase repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TransactionStore for PurchaseRepository {
    async fn create(&self, purchase: NewPurchase) -> Result<PurchaseTransaction, PurchaseError> {
        let id = PurchaseId::new();
        // Postgres keeps microseconds; truncate so the returned row matches later reads.
        let date = purchase.date.trunc_subsecs(6);

        let active_model = purchase_transactions::ActiveModel {
            id: Set(id.into_inner()),
            transaction_date: Set(date.fixed_offset()),
            description: Set(purchase.description),
            amount_in_usd: Set(purchase.amount.to_string()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| PurchaseError::storage(e.to_string()))?;
        debug!(transaction_id = %id, "Inserted purchase transaction");

        to_domain(model)
    }

    async fn find_by_id(&self, id: PurchaseId) -> Result<Option<PurchaseTransaction>, PurchaseError> {
        let model = purchase_transactions::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| PurchaseError::storage(e.to_string()))?;

        model.map(to_domain).transpose()
    }
}

/// Convert a database row to the domain type.
fn to_domain(model: purchase_transactions::Model) -> Result<PurchaseTransaction, PurchaseError> {
    let amount = Amount::parse(&model.amount_in_usd).map_err(|e| {
        PurchaseError::storage(format!("corrupt amount in transaction {}: {e}", model.id))
    })?;

    Ok(PurchaseTransaction {
        id: PurchaseId::from_uuid(model.id),
        date: model.transaction_date.with_timezone(&Utc),
        description: model.description,
        amount,
    })
}
