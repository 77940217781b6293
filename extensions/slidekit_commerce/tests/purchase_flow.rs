//! Slide-driven purchase and restore flows against scripted stores

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use slidekit_commerce::{
    ActionError, ActionState, CommerceAction, CommerceOutcome, CommerceSlide, CustomerInfo,
    Package, PurchaseFuture, PurchaseOutcome, PurchaseState, PurchaseStore, PurchasesError,
    StoreProduct,
};
use slidekit_core::{Anchor, Event, Size};
use slidekit_widgets::{HintTexts, SlideConfig, SlideToConfirm};

struct ScriptedStore {
    purchase: Result<PurchaseOutcome, PurchasesError>,
    restore: Result<CustomerInfo, PurchasesError>,
    calls: AtomicU32,
}

impl ScriptedStore {
    fn new(purchase: Result<PurchaseOutcome, PurchasesError>) -> Self {
        Self {
            purchase,
            restore: Ok(customer()),
            calls: AtomicU32::new(0),
        }
    }
}

impl PurchaseStore for ScriptedStore {
    fn purchase(&self, _package: &Package) -> PurchaseFuture<PurchaseOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self.purchase.clone();
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            result
        })
    }

    fn restore_purchases(&self) -> PurchaseFuture<CustomerInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self.restore.clone();
        Box::pin(async move { result })
    }
}

/// Never answers
struct StalledStore;

impl PurchaseStore for StalledStore {
    fn purchase(&self, _package: &Package) -> PurchaseFuture<PurchaseOutcome> {
        Box::pin(std::future::pending())
    }

    fn restore_purchases(&self) -> PurchaseFuture<CustomerInfo> {
        Box::pin(std::future::pending())
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

fn customer() -> CustomerInfo {
    CustomerInfo {
        app_user_id: "user-1".into(),
        active_entitlements: vec!["pro".into()],
    }
}

fn package() -> Package {
    Package::new(
        "monthly",
        StoreProduct {
            identifier: "pro_monthly".into(),
            title: "Pro (monthly)".into(),
            price_string: "$4.99".into(),
            currency_code: "USD".into(),
        },
    )
}

fn outcome() -> PurchaseOutcome {
    PurchaseOutcome {
        transaction_id: "tx-1".into(),
        product_identifier: "pro_monthly".into(),
        customer_info: customer(),
    }
}

fn widget() -> SlideToConfirm {
    SlideToConfirm::new(
        SlideConfig::default(),
        HintTexts::new("Slide to subscribe", "Subscribing..."),
        false,
    )
    .unwrap()
    .container(Size::new(300.0, 72.0))
}

fn recorded<S: PurchaseStore>(
    store: S,
    action: CommerceAction,
    rt: &tokio::runtime::Runtime,
) -> (CommerceSlide<S>, Arc<Mutex<Vec<PurchaseState>>>) {
    let states = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&states);
    let commerce = CommerceSlide::new(widget(), Arc::new(store), action, rt.handle().clone())
        .on_purchase_state_changed(move |state| sink.lock().unwrap().push(state.clone()));
    (commerce, states)
}

fn swipe_to_end<S: PurchaseStore>(commerce: &mut CommerceSlide<S>) {
    commerce.handle_event(&Event::drag_start(0));
    commerce.handle_event(&Event::drag(228.0, 0.0, 16));
    commerce.handle_event(&Event::drag_end(0.0, 32));
}

fn run<S: PurchaseStore>(commerce: &mut CommerceSlide<S>, frames: usize) {
    for _ in 0..frames {
        commerce.tick(1.0 / 60.0);
    }
}

fn finish<S: PurchaseStore>(commerce: &mut CommerceSlide<S>) {
    run(commerce, 120);
    if commerce.is_pending() {
        commerce.wait_for_result(Duration::from_secs(5));
    }
    run(commerce, 120);
}

#[test]
fn failed_purchase_reports_pending_then_failure() {
    let rt = runtime();
    let store = ScriptedStore::new(Err(PurchasesError::Store("declined".into())));
    let (mut commerce, states) = recorded(store, CommerceAction::Purchase(package()), &rt);

    swipe_to_end(&mut commerce);
    finish(&mut commerce);

    assert_eq!(
        *states.lock().unwrap(),
        vec![
            ActionState::Pending,
            ActionState::Failure(ActionError::Action(PurchasesError::Store(
                "declined".into()
            ))),
        ]
    );
    assert!(!commerce.is_committed());
    assert!(!commerce.is_pending());
    assert_eq!(commerce.slide().anchor(), Anchor::Start);
    assert!(commerce.slide().is_enabled());
}

#[test]
fn successful_purchase_stays_committed() {
    let rt = runtime();
    let (mut commerce, states) =
        recorded(ScriptedStore::new(Ok(outcome())), CommerceAction::Purchase(package()), &rt);

    swipe_to_end(&mut commerce);
    finish(&mut commerce);

    assert_eq!(
        *states.lock().unwrap(),
        vec![
            ActionState::Pending,
            ActionState::Success(CommerceOutcome::Purchased(outcome())),
        ]
    );
    assert!(commerce.is_committed());
    assert_eq!(commerce.slide().anchor(), Anchor::End);
    assert!(!commerce.slide().is_enabled());
    assert_eq!(commerce.slide().completions(), 1);
}

#[test]
fn restore_runs_restore_purchases() {
    let rt = runtime();
    let (mut commerce, states) =
        recorded(ScriptedStore::new(Ok(outcome())), CommerceAction::Restore, &rt);

    swipe_to_end(&mut commerce);
    finish(&mut commerce);

    let states = states.lock().unwrap();
    match states.last() {
        Some(ActionState::Success(CommerceOutcome::Restored(info))) => {
            assert!(info.has_entitlement("pro"));
        }
        other => panic!("expected restore success, got {other:?}"),
    }
}

#[test]
fn failure_without_reset_keeps_thumb_at_end() {
    let rt = runtime();
    let store = ScriptedStore::new(Err(PurchasesError::UserCancelled));
    let (commerce, _) = recorded(store, CommerceAction::Purchase(package()), &rt);
    let mut commerce = commerce.reset_on_failure(false);

    swipe_to_end(&mut commerce);
    finish(&mut commerce);

    assert!(commerce.is_committed());
    assert_eq!(commerce.slide().anchor(), Anchor::End);
}

#[test]
fn commit_while_pending_is_refused() {
    let rt = runtime();
    let (mut commerce, states) = recorded(StalledStore, CommerceAction::Purchase(package()), &rt);

    swipe_to_end(&mut commerce);
    run(&mut commerce, 120);
    assert!(commerce.is_pending());
    assert!(!commerce.commit());

    commerce.teardown();
    std::thread::sleep(Duration::from_millis(20));
    assert!(commerce.poll().is_empty());
    assert_eq!(*states.lock().unwrap(), vec![ActionState::Pending]);
}

#[test]
fn retry_after_failure_invokes_again() {
    let rt = runtime();
    let store = ScriptedStore::new(Err(PurchasesError::Network("offline".into())));
    let (mut commerce, states) = recorded(store, CommerceAction::Purchase(package()), &rt);

    swipe_to_end(&mut commerce);
    finish(&mut commerce);
    swipe_to_end(&mut commerce);
    finish(&mut commerce);

    let states = states.lock().unwrap();
    assert_eq!(states.len(), 4);
    assert_eq!(states.iter().filter(|s| s.is_pending()).count(), 2);
    assert_eq!(commerce.slide().completions(), 2);
}

/// Answers after a fixed delay
struct SlowStore(Duration);

impl PurchaseStore for SlowStore {
    fn purchase(&self, _package: &Package) -> PurchaseFuture<PurchaseOutcome> {
        let delay = self.0;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(outcome())
        })
    }

    fn restore_purchases(&self) -> PurchaseFuture<CustomerInfo> {
        let delay = self.0;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(customer())
        })
    }
}

fn swipe_until_pending<S: PurchaseStore>(commerce: &mut CommerceSlide<S>) {
    swipe_to_end(commerce);
    for _ in 0..120 {
        if commerce.is_pending() {
            break;
        }
        commerce.tick(1.0 / 60.0);
    }
    assert!(commerce.is_pending());
}

#[test]
fn unmount_discards_late_purchase_result() {
    let rt = runtime();
    let store = SlowStore(Duration::from_millis(150));
    let (mut commerce, states) = recorded(store, CommerceAction::Purchase(package()), &rt);

    swipe_until_pending(&mut commerce);
    assert!(commerce.handle_event(&Event::unmount(100)));
    assert!(commerce.slide().is_torn_down());
    assert!(!commerce.is_pending());

    std::thread::sleep(Duration::from_millis(300));
    run(&mut commerce, 5);
    assert!(commerce.poll().is_empty());
    assert_eq!(*states.lock().unwrap(), vec![ActionState::Pending]);
}

#[test]
fn explicit_teardown_discards_late_restore_result() {
    let rt = runtime();
    let store = SlowStore(Duration::from_millis(150));
    let (mut commerce, states) = recorded(store, CommerceAction::Restore, &rt);

    swipe_until_pending(&mut commerce);
    commerce.teardown();

    std::thread::sleep(Duration::from_millis(300));
    run(&mut commerce, 5);
    assert!(commerce.wait_for_result(Duration::from_millis(50)).is_empty());
    assert_eq!(*states.lock().unwrap(), vec![ActionState::Pending]);
    assert!(!commerce.commit());
}

#[test]
fn teardown_while_stalled_ignores_further_input() {
    let rt = runtime();
    let (mut commerce, states) = recorded(StalledStore, CommerceAction::Purchase(package()), &rt);

    swipe_until_pending(&mut commerce);
    commerce.handle_event(&Event::unmount(100));

    swipe_to_end(&mut commerce);
    run(&mut commerce, 120);
    assert_eq!(commerce.slide().completions(), 1);
    assert_eq!(*states.lock().unwrap(), vec![ActionState::Pending]);
}
