//! `SeaORM` entity definitions.

pub mod purchase_transactions;

pub mod prelude {
    //! Entity re-exports.
    pub use super::purchase_transactions::Entity as PurchaseTransactions;
}
