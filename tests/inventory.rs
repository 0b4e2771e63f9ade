// ABOUTME: Integration tests for machine-type resolution.
// ABOUTME: Covers the explicit override, the inventory lookup, and neither.

use async_trait::async_trait;
use kiln::commands::resolve_machine_type;
use kiln::error::Error;
use kiln::inventory::{InventoryError, MachineLocator};
use kiln::types::MachineName;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

struct FakeLocator {
    results: Mutex<VecDeque<Result<String, InventoryError>>>,
    calls: AtomicU32,
}

impl FakeLocator {
    fn returning(result: Result<String, InventoryError>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(vec![result])),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl MachineLocator for FakeLocator {
    async fn machine_type(&self, _name: &str) -> Result<String, InventoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected inventory lookup")
    }
}

fn machine() -> MachineName {
    MachineName::new("cephtest-042.front.example.com").unwrap()
}

/// Test: An explicit machine type wins without consulting the inventory.
#[tokio::test]
async fn explicit_flag_skips_the_inventory() {
    let locator = FakeLocator::returning(Ok("smithi".to_string()));

    let machine_type =
        resolve_machine_type(Some(&locator), &machine(), Some("mira".to_string()))
            .await
            .unwrap();

    assert_eq!(machine_type, "mira");
    assert_eq!(locator.calls.load(Ordering::SeqCst), 0);
}

/// Test: Without a flag the inventory answers, queried by short name.
#[tokio::test]
async fn inventory_resolves_when_no_flag_is_given() {
    let locator = FakeLocator::returning(Ok("smithi".to_string()));

    let machine_type = resolve_machine_type(Some(&locator), &machine(), None)
        .await
        .unwrap();

    assert_eq!(machine_type, "smithi");
    assert_eq!(locator.calls.load(Ordering::SeqCst), 1);
}

/// Test: With no flag and no configured inventory the run cannot proceed.
#[tokio::test]
async fn no_source_at_all_is_an_error() {
    let err = resolve_machine_type(None::<&FakeLocator>, &machine(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoMachineType(_)));
}

/// Test: An inventory failure surfaces instead of being guessed around.
#[tokio::test]
async fn inventory_errors_propagate() {
    let locator = FakeLocator::returning(Err(InventoryError::UnknownMachine(
        "cephtest-042".to_string(),
    )));

    let err = resolve_machine_type(Some(&locator), &machine(), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Inventory(InventoryError::UnknownMachine(_))
    ));
}
