//! Store abstraction for purchases and restores

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Product as listed by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreProduct {
    pub identifier: String,
    pub title: String,
    /// Localised price, ready for display
    pub price_string: String,
    pub currency_code: String,
}

/// A purchasable offering wrapping a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub identifier: String,
    pub product: StoreProduct,
}

impl Package {
    pub fn new(identifier: impl Into<String>, product: StoreProduct) -> Self {
        Self {
            identifier: identifier.into(),
            product,
        }
    }
}

/// Entitlement state of the current user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerInfo {
    pub app_user_id: String,
    pub active_entitlements: Vec<String>,
}

impl CustomerInfo {
    pub fn has_entitlement(&self, entitlement: &str) -> bool {
        self.active_entitlements.iter().any(|e| e == entitlement)
    }
}

/// Result of a completed purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub transaction_id: String,
    pub product_identifier: String,
    pub customer_info: CustomerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchasesError {
    #[error("purchase cancelled by user")]
    UserCancelled,
    #[error("store error: {0}")]
    Store(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("product not available: {0}")]
    ProductNotAvailable(String),
    #[error("payment pending approval")]
    PaymentPending,
}

impl PurchasesError {
    /// Whether the user should simply be allowed to try again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PurchasesError::UserCancelled | PurchasesError::Network(_)
        )
    }
}

/// Boxed store future
pub type PurchaseFuture<T> = Pin<Box<dyn Future<Output = Result<T, PurchasesError>> + Send>>;

/// Purchase backend. Futures must not borrow the store.
pub trait PurchaseStore: Send + Sync + 'static {
    fn purchase(&self, package: &Package) -> PurchaseFuture<PurchaseOutcome>;

    fn restore_purchases(&self) -> PurchaseFuture<CustomerInfo>;
}
