//! SlideKit Commerce
//!
//! Puts a purchase or restore call behind a slide-to-confirm:
//!
//! - [`AsyncActionAdapter`]: runs a future on tokio, reports `Pending`
//!   synchronously and exactly one terminal [`ActionState`] on the polling thread
//! - [`PurchaseStore`]: the store backend, returning boxed `Send` futures
//! - [`CommerceSlide`]: owns the committed flag and drives the widget from
//!   action results
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use slidekit_commerce::{ActionState, AsyncActionAdapter};
//!
//! let runtime = tokio::runtime::Builder::new_multi_thread()
//!     .enable_all()
//!     .build()
//!     .unwrap();
//!
//! let mut adapter = AsyncActionAdapter::<u32, String>::new(runtime.handle().clone());
//! adapter.invoke(async { Err("declined".to_string()) });
//! let states = adapter.wait_for_delivery(Duration::from_secs(1));
//! assert!(matches!(states.as_slice(), [ActionState::Failure(_)]));
//! ```

pub mod action;
pub mod purchases;
pub mod slide;

pub use action::{ActionError, ActionState, AsyncActionAdapter, InvocationId};
pub use purchases::{
    CustomerInfo, Package, PurchaseFuture, PurchaseOutcome, PurchaseStore, PurchasesError,
    StoreProduct,
};
pub use slide::{CommerceAction, CommerceOutcome, CommerceSlide, PurchaseState};
