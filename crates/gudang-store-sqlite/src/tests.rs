//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use gudang_core::{
  Error,
  category::{Category, NewCategory},
  item::{Item, NewItem},
  location::{Location, NewLocation},
  store::InventoryStore,
  transaction::{NewTransaction, Transaction, TransactionType},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

async fn seed_category(s: &SqliteStore, name: &str) -> Category {
  s.create_category(NewCategory {
    name:        name.into(),
    description: format!("{name} items"),
  })
  .await
  .unwrap()
}

async fn seed_location(s: &SqliteStore, name: &str) -> Location {
  s.create_location(NewLocation {
    name:        name.into(),
    description: format!("{name} floor"),
  })
  .await
  .unwrap()
}

async fn seed_item(
  s: &SqliteStore,
  category_id: Uuid,
  location_id: Uuid,
  name: &str,
) -> Item {
  s.create_item(NewItem {
    name: name.into(),
    description: format!("{name} description"),
    category_id,
    location_id,
  })
  .await
  .unwrap()
}

fn movement(
  item_id: Uuid,
  quantity: i64,
  transaction_type: TransactionType,
  day: &str,
) -> NewTransaction {
  NewTransaction {
    item_id,
    quantity,
    transaction_type,
    transaction_date: date(day),
    notes: None,
    user_id: Uuid::new_v4(),
  }
}

async fn seed_movement(
  s: &SqliteStore,
  item_id: Uuid,
  quantity: i64,
  transaction_type: TransactionType,
  day: &str,
) -> Transaction {
  s.create_transaction(movement(item_id, quantity, transaction_type, day))
    .await
    .unwrap()
}

/// Category + location + item in one go, for tests that only need an item.
async fn seed_stocked_item(s: &SqliteStore, name: &str) -> Item {
  let category = seed_category(s, &format!("{name} category")).await;
  let location = seed_location(s, &format!("{name} location")).await;
  seed_item(s, category.id, location.id, name).await
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_category() {
  let s = store().await;

  let category = seed_category(&s, "Electronics").await;
  assert_eq!(category.name, "Electronics");

  let fetched = s.get_category(category.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, category.id);
  assert_eq!(fetched.name, "Electronics");
  assert_eq!(fetched.created_at, category.created_at);
}

#[tokio::test]
async fn get_category_missing_returns_none() {
  let s = store().await;
  assert!(s.get_category(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_categories_returns_all() {
  let s = store().await;
  seed_category(&s, "A").await;
  seed_category(&s, "B").await;
  seed_category(&s, "C").await;

  let all = s.list_categories().await.unwrap();
  assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn update_category_replaces_the_record() {
  let s = store().await;
  let category = seed_category(&s, "Electornics").await;

  let updated = s
    .update_category(
      category.id,
      NewCategory {
        name:        "Electronics".into(),
        description: "fixed the typo".into(),
      },
    )
    .await
    .unwrap();

  assert_eq!(updated.name, "Electronics");
  assert_eq!(updated.description, "fixed the typo");
  // created_at survives a full-record update
  assert_eq!(updated.created_at, category.created_at);
}

#[tokio::test]
async fn update_missing_category_errors() {
  let s = store().await;
  let err = s
    .update_category(
      Uuid::new_v4(),
      NewCategory { name: "X".into(), description: "Y".into() },
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CategoryNotFound(_)));
}

#[tokio::test]
async fn delete_category() {
  let s = store().await;
  let category = seed_category(&s, "Ephemeral").await;

  s.delete_category(category.id).await.unwrap();
  assert!(s.get_category(category.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_category_errors() {
  let s = store().await;
  let err = s.delete_category(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::CategoryNotFound(_)));
}

#[tokio::test]
async fn delete_category_with_items_is_refused() {
  let s = store().await;
  let category = seed_category(&s, "Electronics").await;
  let location = seed_location(&s, "Warehouse A").await;
  let item = seed_item(&s, category.id, location.id, "Cable").await;

  let err = s.delete_category(category.id).await.unwrap_err();
  assert!(matches!(err, Error::CategoryInUse(id) if id == category.id));

  // Once the referencing item is gone the delete goes through.
  s.delete_item(item.id).await.unwrap();
  s.delete_category(category.id).await.unwrap();
}

// ─── Locations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn location_crud_round_trip() {
  let s = store().await;
  let location = seed_location(&s, "Warehouse A").await;

  let fetched = s.get_location(location.id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Warehouse A");

  let updated = s
    .update_location(
      location.id,
      NewLocation { name: "Warehouse B".into(), description: "moved".into() },
    )
    .await
    .unwrap();
  assert_eq!(updated.name, "Warehouse B");

  s.delete_location(location.id).await.unwrap();
  assert!(s.get_location(location.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_location_with_items_is_refused() {
  let s = store().await;
  let category = seed_category(&s, "Electronics").await;
  let location = seed_location(&s, "Warehouse A").await;
  seed_item(&s, category.id, location.id, "Cable").await;

  let err = s.delete_location(location.id).await.unwrap_err();
  assert!(matches!(err, Error::LocationInUse(id) if id == location.id));
}

// ─── Items ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_item() {
  let s = store().await;
  let category = seed_category(&s, "Electronics").await;
  let location = seed_location(&s, "Warehouse A").await;

  let item = seed_item(&s, category.id, location.id, "Cable").await;

  let fetched = s.get_item(item.id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Cable");
  assert_eq!(fetched.category_id, category.id);
  assert_eq!(fetched.location_id, location.id);
}

#[tokio::test]
async fn create_item_with_unknown_category_errors() {
  let s = store().await;
  let location = seed_location(&s, "Warehouse A").await;
  let ghost = Uuid::new_v4();

  let err = s
    .create_item(NewItem {
      name:        "Cable".into(),
      description: "HDMI 2m".into(),
      category_id: ghost,
      location_id: location.id,
    })
    .await
    .unwrap_err();

  assert!(matches!(
    err,
    Error::ReferenceNotFound { field: "category_id", id, .. } if id == ghost
  ));
  // Nothing was written.
  assert!(s.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_item_with_unknown_location_errors() {
  let s = store().await;
  let category = seed_category(&s, "Electronics").await;

  let err = s
    .create_item(NewItem {
      name:        "Cable".into(),
      description: "HDMI 2m".into(),
      category_id: category.id,
      location_id: Uuid::new_v4(),
    })
    .await
    .unwrap_err();

  assert!(matches!(
    err,
    Error::ReferenceNotFound { field: "location_id", .. }
  ));
}

#[tokio::test]
async fn update_item_can_move_it_between_categories() {
  let s = store().await;
  let electronics = seed_category(&s, "Electronics").await;
  let tools = seed_category(&s, "Tools").await;
  let location = seed_location(&s, "Warehouse A").await;
  let item = seed_item(&s, electronics.id, location.id, "Crimper").await;

  let updated = s
    .update_item(
      item.id,
      NewItem {
        name:        "Crimper".into(),
        description: "RJ45 crimper".into(),
        category_id: tools.id,
        location_id: location.id,
      },
    )
    .await
    .unwrap();
  assert_eq!(updated.category_id, tools.id);
}

#[tokio::test]
async fn update_item_to_unknown_category_errors() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  let err = s
    .update_item(
      item.id,
      NewItem {
        name:        "Cable".into(),
        description: "HDMI 2m".into(),
        category_id: Uuid::new_v4(),
        location_id: item.location_id,
      },
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ReferenceNotFound { field: "category_id", .. }));
}

#[tokio::test]
async fn delete_item_with_transactions_is_refused() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;
  let tx = seed_movement(&s, item.id, 10, TransactionType::In, "2025-03-01").await;

  let err = s.delete_item(item.id).await.unwrap_err();
  assert!(matches!(err, Error::ItemInUse(id) if id == item.id));

  s.delete_transaction(tx.id).await.unwrap();
  s.delete_item(item.id).await.unwrap();
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_transaction() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  let mut input = movement(item.id, 10, TransactionType::In, "2025-03-01");
  input.notes = Some("initial delivery".into());
  let tx = s.create_transaction(input).await.unwrap();

  let fetched = s.get_transaction(tx.id).await.unwrap().unwrap();
  assert_eq!(fetched.item_id, item.id);
  assert_eq!(fetched.quantity, 10);
  assert_eq!(fetched.transaction_type, TransactionType::In);
  assert_eq!(fetched.transaction_date, date("2025-03-01"));
  assert_eq!(fetched.notes.as_deref(), Some("initial delivery"));
  assert_eq!(fetched.user_id, tx.user_id);
}

#[tokio::test]
async fn create_transaction_for_unknown_item_errors() {
  let s = store().await;
  let ghost = Uuid::new_v4();

  let err = s
    .create_transaction(movement(ghost, 1, TransactionType::In, "2025-03-01"))
    .await
    .unwrap_err();

  assert!(matches!(
    err,
    Error::ReferenceNotFound { field: "item_id", id, .. } if id == ghost
  ));
  assert!(s.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_transaction_replaces_the_record() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;
  let tx = seed_movement(&s, item.id, 10, TransactionType::In, "2025-03-01").await;

  let mut replacement = movement(item.id, 4, TransactionType::Out, "2025-03-02");
  replacement.notes = Some("corrected".into());
  let updated = s.update_transaction(tx.id, replacement).await.unwrap();

  assert_eq!(updated.id, tx.id);
  assert_eq!(updated.quantity, 4);
  assert_eq!(updated.transaction_type, TransactionType::Out);
  assert_eq!(updated.notes.as_deref(), Some("corrected"));
}

#[tokio::test]
async fn update_missing_transaction_errors() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  let err = s
    .update_transaction(
      Uuid::new_v4(),
      movement(item.id, 1, TransactionType::In, "2025-03-01"),
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::TransactionNotFound(_)));
}

#[tokio::test]
async fn delete_missing_transaction_errors() {
  let s = store().await;
  let err = s.delete_transaction(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::TransactionNotFound(_)));
}

// ─── Stock on hand ───────────────────────────────────────────────────────────

#[tokio::test]
async fn stock_on_hand_sums_the_ledger() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  seed_movement(&s, item.id, 10, TransactionType::In, "2025-03-01").await;
  seed_movement(&s, item.id, 3, TransactionType::Out, "2025-03-02").await;
  seed_movement(&s, item.id, 2, TransactionType::In, "2025-03-03").await;

  assert_eq!(s.stock_on_hand(item.id).await.unwrap(), 9);
}

#[tokio::test]
async fn stock_on_hand_is_scoped_to_the_item() {
  let s = store().await;
  let category = seed_category(&s, "Electronics").await;
  let location = seed_location(&s, "Warehouse A").await;
  let cable = seed_item(&s, category.id, location.id, "Cable").await;
  let board = seed_item(&s, category.id, location.id, "Board").await;

  seed_movement(&s, cable.id, 10, TransactionType::In, "2025-03-01").await;
  seed_movement(&s, board.id, 7, TransactionType::In, "2025-03-01").await;

  assert_eq!(s.stock_on_hand(cable.id).await.unwrap(), 10);
  assert_eq!(s.stock_on_hand(board.id).await.unwrap(), 7);
}

#[tokio::test]
async fn stock_on_hand_with_no_transactions_is_zero() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;
  assert_eq!(s.stock_on_hand(item.id).await.unwrap(), 0);
}

#[tokio::test]
async fn stock_on_hand_for_unknown_item_errors() {
  let s = store().await;
  let err = s.stock_on_hand(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::ItemNotFound(_)));
}

#[tokio::test]
async fn stock_on_hand_may_go_negative() {
  // Concurrent writers are not checked against available stock; the derived
  // sum reports whatever the ledger says.
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  seed_movement(&s, item.id, 2, TransactionType::In, "2025-03-01").await;
  seed_movement(&s, item.id, 5, TransactionType::Out, "2025-03-02").await;

  assert_eq!(s.stock_on_hand(item.id).await.unwrap(), -3);
}

// ─── Dashboard stats ─────────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_stats_count_entities_and_low_stock() {
  let s = store().await;
  let category = seed_category(&s, "Electronics").await;
  let location = seed_location(&s, "Warehouse A").await;

  let stocked = seed_item(&s, category.id, location.id, "Cable").await;
  // Never moved, so stock 0: low.
  seed_item(&s, category.id, location.id, "Board").await;

  seed_movement(&s, stocked.id, 10, TransactionType::In, "2025-03-01").await;

  let stats = s.dashboard_stats().await.unwrap();
  assert_eq!(stats.total_items, 2);
  assert_eq!(stats.total_categories, 1);
  assert_eq!(stats.total_locations, 1);
  assert_eq!(stats.low_stock_items, 1);
}

#[tokio::test]
async fn dashboard_stats_low_stock_uses_the_ledger_threshold() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  // Exactly at the threshold: not low.
  seed_movement(&s, item.id, 5, TransactionType::In, "2025-03-01").await;
  assert_eq!(s.dashboard_stats().await.unwrap().low_stock_items, 0);

  // One unit out drops it below.
  seed_movement(&s, item.id, 1, TransactionType::Out, "2025-03-02").await;
  assert_eq!(s.dashboard_stats().await.unwrap().low_stock_items, 1);
}

// ─── Recent transactions ─────────────────────────────────────────────────────

#[tokio::test]
async fn recent_transactions_are_newest_first_and_capped() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  for day in 10..=16 {
    seed_movement(
      &s,
      item.id,
      day,
      TransactionType::In,
      &format!("2025-03-{day}"),
    )
    .await;
  }

  let recent = s.recent_transactions(5).await.unwrap();
  assert_eq!(recent.len(), 5);
  assert_eq!(recent[0].transaction_date, date("2025-03-16"));
  assert_eq!(recent[4].transaction_date, date("2025-03-12"));
  assert!(recent.iter().all(|r| r.item_name == "Cable"));
}

#[tokio::test]
async fn recent_transactions_default_notes_to_empty_string() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;
  seed_movement(&s, item.id, 1, TransactionType::In, "2025-03-01").await;

  let recent = s.recent_transactions(5).await.unwrap();
  assert_eq!(recent[0].notes, "");
}

// ─── Monthly flows ───────────────────────────────────────────────────────────

#[tokio::test]
async fn monthly_flows_group_by_calendar_month_ascending() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  // Inserted out of calendar order on purpose.
  seed_movement(&s, item.id, 8, TransactionType::In, "2025-03-10").await;
  seed_movement(&s, item.id, 5, TransactionType::In, "2025-01-15").await;
  seed_movement(&s, item.id, 2, TransactionType::Out, "2025-01-20").await;
  seed_movement(&s, item.id, 1, TransactionType::Out, "2025-03-11").await;

  let flows = s.monthly_flows(2025).await.unwrap();
  assert_eq!(flows.len(), 2);

  assert_eq!(flows[0].name, "January");
  assert_eq!(flows[0].masuk, 5);
  assert_eq!(flows[0].keluar, 2);

  assert_eq!(flows[1].name, "March");
  assert_eq!(flows[1].masuk, 8);
  assert_eq!(flows[1].keluar, 1);
}

#[tokio::test]
async fn monthly_flows_ignore_other_years() {
  let s = store().await;
  let item = seed_stocked_item(&s, "Cable").await;

  seed_movement(&s, item.id, 5, TransactionType::In, "2024-06-01").await;
  seed_movement(&s, item.id, 3, TransactionType::In, "2025-06-01").await;

  let flows = s.monthly_flows(2025).await.unwrap();
  assert_eq!(flows.len(), 1);
  assert_eq!(flows[0].name, "June");
  assert_eq!(flows[0].masuk, 3);
}

// ─── Category distribution ───────────────────────────────────────────────────

#[tokio::test]
async fn category_distribution_is_descending_and_capped_at_limit() {
  let s = store().await;
  let location = seed_location(&s, "Warehouse A").await;

  // Six categories holding 6, 5, 4, 3, 2, 1 items.
  for count in 1..=6 {
    let category = seed_category(&s, &format!("C{count}")).await;
    for n in 0..count {
      seed_item(&s, category.id, location.id, &format!("C{count}-{n}")).await;
    }
  }

  let slices = s.category_distribution(5).await.unwrap();
  assert_eq!(slices.len(), 5);
  assert_eq!(slices[0].name, "C6");
  assert_eq!(slices[0].jumlah, 6);
  assert_eq!(slices[4].name, "C2");
  assert_eq!(slices[4].jumlah, 2);

  let counts: Vec<i64> = slices.iter().map(|s| s.jumlah).collect();
  let mut sorted = counts.clone();
  sorted.sort_unstable_by(|a, b| b.cmp(a));
  assert_eq!(counts, sorted);
}

#[tokio::test]
async fn category_distribution_skips_empty_categories() {
  let s = store().await;
  seed_category(&s, "Empty").await;

  assert!(s.category_distribution(5).await.unwrap().is_empty());
}

// ─── End to end ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn cable_scenario_tracks_stock_and_low_stock_flag() {
  let s = store().await;
  let electronics = seed_category(&s, "Electronics").await;
  let warehouse_a = seed_location(&s, "Warehouse A").await;
  let cable = seed_item(&s, electronics.id, warehouse_a.id, "Cable").await;

  seed_movement(&s, cable.id, 10, TransactionType::In, "2025-03-01").await;
  seed_movement(&s, cable.id, 3, TransactionType::Out, "2025-03-02").await;

  let stock = s.stock_on_hand(cable.id).await.unwrap();
  assert_eq!(stock, 7);
  assert!(!gudang_core::ledger::is_low_stock(stock));
  assert_eq!(s.dashboard_stats().await.unwrap().low_stock_items, 0);

  seed_movement(&s, cable.id, 5, TransactionType::Out, "2025-03-03").await;

  let stock = s.stock_on_hand(cable.id).await.unwrap();
  assert_eq!(stock, 2);
  assert!(gudang_core::ledger::is_low_stock(stock));
  assert_eq!(s.dashboard_stats().await.unwrap().low_stock_items, 1);
}
