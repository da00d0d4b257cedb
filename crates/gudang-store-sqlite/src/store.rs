//! [`SqliteStore`] - the SQLite implementation of [`InventoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use gudang_core::{
  Error, Result,
  category::{Category, NewCategory},
  item::{Item, NewItem},
  ledger::{self, CategorySlice, DashboardStats, MonthlyFlow, RecentTransaction},
  location::{Location, NewLocation},
  store::InventoryStore,
  transaction::{NewTransaction, Transaction},
};

use crate::{
  encode::{
    RawCategory, RawItem, RawLocation, RawRecentTransaction, RawTransaction,
    encode_date, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

/// Map a connection-level failure into the store-unavailable error the rest
/// of the system degrades on.
fn unavailable(err: tokio_rusqlite::Error) -> Error {
  Error::Unavailable(err.to_string())
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A gudang inventory store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted and all
/// operations are serialised onto its worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(unavailable)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(unavailable)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(unavailable)
  }

  /// Existence probe for reference checks; `sql` must select a single row
  /// by the bound id.
  async fn row_exists(&self, sql: &'static str, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let found: Option<bool> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(sql, rusqlite::params![id_str], |_| Ok(true))
            .optional()?,
        )
      })
      .await
      .map_err(unavailable)?;
    Ok(found.unwrap_or(false))
  }

  /// Run a plain `UPDATE`/`DELETE` and report how many rows it touched.
  async fn execute(
    &self,
    sql: &'static str,
    params: Vec<String>,
  ) -> Result<usize> {
    self
      .conn
      .call(move |conn| {
        Ok(conn.execute(sql, rusqlite::params_from_iter(params))?)
      })
      .await
      .map_err(unavailable)
  }

  async fn check_item_refs(&self, input: &NewItem) -> Result<()> {
    if !self
      .row_exists("SELECT 1 FROM categories WHERE id = ?1", input.category_id)
      .await?
    {
      return Err(Error::ReferenceNotFound {
        field: "category_id",
        table: "categories",
        id:    input.category_id,
      });
    }
    if !self
      .row_exists("SELECT 1 FROM locations WHERE id = ?1", input.location_id)
      .await?
    {
      return Err(Error::ReferenceNotFound {
        field: "location_id",
        table: "locations",
        id:    input.location_id,
      });
    }
    Ok(())
  }

  async fn check_transaction_ref(&self, input: &NewTransaction) -> Result<()> {
    if !self
      .row_exists("SELECT 1 FROM items WHERE id = ?1", input.item_id)
      .await?
    {
      return Err(Error::ReferenceNotFound {
        field: "item_id",
        table: "items",
        id:    input.item_id,
      });
    }
    Ok(())
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for SqliteStore {
  // ── Categories ────────────────────────────────────────────────────────────

  async fn create_category(&self, input: NewCategory) -> Result<Category> {
    let category = Category {
      id:          Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      created_at:  Utc::now(),
    };

    let id_str   = encode_uuid(category.id);
    let name     = category.name.clone();
    let desc     = category.description.clone();
    let at_str   = encode_dt(category.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (id, name, description, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, desc, at_str],
        )?;
        Ok(())
      })
      .await
      .map_err(unavailable)?;

    Ok(category)
  }

  async fn get_category(&self, id: Uuid) -> Result<Option<Category>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCategory> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, description, created_at
               FROM categories WHERE id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawCategory {
                  id:          row.get(0)?,
                  name:        row.get(1)?,
                  description: row.get(2)?,
                  created_at:  row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(unavailable)?;

    raw.map(RawCategory::into_category).transpose()
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let raws: Vec<RawCategory> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT id, name, description, created_at FROM categories")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCategory {
              id:          row.get(0)?,
              name:        row.get(1)?,
              description: row.get(2)?,
              created_at:  row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(unavailable)?;

    raws.into_iter().map(RawCategory::into_category).collect()
  }

  async fn update_category(
    &self,
    id: Uuid,
    input: NewCategory,
  ) -> Result<Category> {
    let affected = self
      .execute(
        "UPDATE categories SET name = ?2, description = ?3 WHERE id = ?1",
        vec![encode_uuid(id), input.name, input.description],
      )
      .await?;
    if affected == 0 {
      return Err(Error::CategoryNotFound(id));
    }
    self
      .get_category(id)
      .await?
      .ok_or(Error::CategoryNotFound(id))
  }

  async fn delete_category(&self, id: Uuid) -> Result<()> {
    if self
      .row_exists("SELECT 1 FROM items WHERE category_id = ?1 LIMIT 1", id)
      .await?
    {
      return Err(Error::CategoryInUse(id));
    }
    let affected = self
      .execute("DELETE FROM categories WHERE id = ?1", vec![encode_uuid(id)])
      .await?;
    if affected == 0 {
      return Err(Error::CategoryNotFound(id));
    }
    Ok(())
  }

  // ── Locations ─────────────────────────────────────────────────────────────

  async fn create_location(&self, input: NewLocation) -> Result<Location> {
    let location = Location {
      id:          Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      created_at:  Utc::now(),
    };

    let id_str = encode_uuid(location.id);
    let name   = location.name.clone();
    let desc   = location.description.clone();
    let at_str = encode_dt(location.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO locations (id, name, description, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, desc, at_str],
        )?;
        Ok(())
      })
      .await
      .map_err(unavailable)?;

    Ok(location)
  }

  async fn get_location(&self, id: Uuid) -> Result<Option<Location>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawLocation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, description, created_at
               FROM locations WHERE id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawLocation {
                  id:          row.get(0)?,
                  name:        row.get(1)?,
                  description: row.get(2)?,
                  created_at:  row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(unavailable)?;

    raw.map(RawLocation::into_location).transpose()
  }

  async fn list_locations(&self) -> Result<Vec<Location>> {
    let raws: Vec<RawLocation> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT id, name, description, created_at FROM locations")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawLocation {
              id:          row.get(0)?,
              name:        row.get(1)?,
              description: row.get(2)?,
              created_at:  row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(unavailable)?;

    raws.into_iter().map(RawLocation::into_location).collect()
  }

  async fn update_location(
    &self,
    id: Uuid,
    input: NewLocation,
  ) -> Result<Location> {
    let affected = self
      .execute(
        "UPDATE locations SET name = ?2, description = ?3 WHERE id = ?1",
        vec![encode_uuid(id), input.name, input.description],
      )
      .await?;
    if affected == 0 {
      return Err(Error::LocationNotFound(id));
    }
    self
      .get_location(id)
      .await?
      .ok_or(Error::LocationNotFound(id))
  }

  async fn delete_location(&self, id: Uuid) -> Result<()> {
    if self
      .row_exists("SELECT 1 FROM items WHERE location_id = ?1 LIMIT 1", id)
      .await?
    {
      return Err(Error::LocationInUse(id));
    }
    let affected = self
      .execute("DELETE FROM locations WHERE id = ?1", vec![encode_uuid(id)])
      .await?;
    if affected == 0 {
      return Err(Error::LocationNotFound(id));
    }
    Ok(())
  }

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn create_item(&self, input: NewItem) -> Result<Item> {
    self.check_item_refs(&input).await?;

    let item = Item {
      id:          Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      category_id: input.category_id,
      location_id: input.location_id,
      created_at:  Utc::now(),
    };

    let id_str     = encode_uuid(item.id);
    let name       = item.name.clone();
    let desc       = item.description.clone();
    let cat_id_str = encode_uuid(item.category_id);
    let loc_id_str = encode_uuid(item.location_id);
    let at_str     = encode_dt(item.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO items (id, name, description, category_id, location_id, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, desc, cat_id_str, loc_id_str, at_str],
        )?;
        Ok(())
      })
      .await
      .map_err(unavailable)?;

    Ok(item)
  }

  async fn get_item(&self, id: Uuid) -> Result<Option<Item>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, description, category_id, location_id, created_at
               FROM items WHERE id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawItem {
                  id:          row.get(0)?,
                  name:        row.get(1)?,
                  description: row.get(2)?,
                  category_id: row.get(3)?,
                  location_id: row.get(4)?,
                  created_at:  row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(unavailable)?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn list_items(&self) -> Result<Vec<Item>> {
    let raws: Vec<RawItem> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, description, category_id, location_id, created_at
           FROM items",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawItem {
              id:          row.get(0)?,
              name:        row.get(1)?,
              description: row.get(2)?,
              category_id: row.get(3)?,
              location_id: row.get(4)?,
              created_at:  row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(unavailable)?;

    raws.into_iter().map(RawItem::into_item).collect()
  }

  async fn update_item(&self, id: Uuid, input: NewItem) -> Result<Item> {
    self.check_item_refs(&input).await?;

    let affected = self
      .execute(
        "UPDATE items
         SET name = ?2, description = ?3, category_id = ?4, location_id = ?5
         WHERE id = ?1",
        vec![
          encode_uuid(id),
          input.name,
          input.description,
          encode_uuid(input.category_id),
          encode_uuid(input.location_id),
        ],
      )
      .await?;
    if affected == 0 {
      return Err(Error::ItemNotFound(id));
    }
    self.get_item(id).await?.ok_or(Error::ItemNotFound(id))
  }

  async fn delete_item(&self, id: Uuid) -> Result<()> {
    if self
      .row_exists(
        "SELECT 1 FROM transactions WHERE item_id = ?1 LIMIT 1",
        id,
      )
      .await?
    {
      return Err(Error::ItemInUse(id));
    }
    let affected = self
      .execute("DELETE FROM items WHERE id = ?1", vec![encode_uuid(id)])
      .await?;
    if affected == 0 {
      return Err(Error::ItemNotFound(id));
    }
    Ok(())
  }

  // ── Transactions ──────────────────────────────────────────────────────────

  async fn create_transaction(
    &self,
    input: NewTransaction,
  ) -> Result<Transaction> {
    self.check_transaction_ref(&input).await?;

    let transaction = Transaction {
      id:               Uuid::new_v4(),
      item_id:          input.item_id,
      quantity:         input.quantity,
      transaction_type: input.transaction_type,
      transaction_date: input.transaction_date,
      notes:            input.notes,
      user_id:          input.user_id,
      created_at:       Utc::now(),
    };

    let id_str      = encode_uuid(transaction.id);
    let item_id_str = encode_uuid(transaction.item_id);
    let quantity    = transaction.quantity;
    let type_str    = transaction.transaction_type.as_str();
    let date_str    = encode_date(transaction.transaction_date);
    let notes       = transaction.notes.clone();
    let user_id_str = encode_uuid(transaction.user_id);
    let at_str      = encode_dt(transaction.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO transactions
             (id, item_id, quantity, transaction_type, transaction_date,
              notes, user_id, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            item_id_str,
            quantity,
            type_str,
            date_str,
            notes,
            user_id_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(unavailable)?;

    Ok(transaction)
  }

  async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawTransaction> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, item_id, quantity, transaction_type,
                      transaction_date, notes, user_id, created_at
               FROM transactions WHERE id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawTransaction {
                  id:               row.get(0)?,
                  item_id:          row.get(1)?,
                  quantity:         row.get(2)?,
                  transaction_type: row.get(3)?,
                  transaction_date: row.get(4)?,
                  notes:            row.get(5)?,
                  user_id:          row.get(6)?,
                  created_at:       row.get(7)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(unavailable)?;

    raw.map(RawTransaction::into_transaction).transpose()
  }

  async fn list_transactions(&self) -> Result<Vec<Transaction>> {
    let raws: Vec<RawTransaction> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, item_id, quantity, transaction_type, transaction_date,
                  notes, user_id, created_at
           FROM transactions",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawTransaction {
              id:               row.get(0)?,
              item_id:          row.get(1)?,
              quantity:         row.get(2)?,
              transaction_type: row.get(3)?,
              transaction_date: row.get(4)?,
              notes:            row.get(5)?,
              user_id:          row.get(6)?,
              created_at:       row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(unavailable)?;

    raws
      .into_iter()
      .map(RawTransaction::into_transaction)
      .collect()
  }

  async fn update_transaction(
    &self,
    id: Uuid,
    input: NewTransaction,
  ) -> Result<Transaction> {
    self.check_transaction_ref(&input).await?;

    let id_str      = encode_uuid(id);
    let item_id_str = encode_uuid(input.item_id);
    let quantity    = input.quantity;
    let type_str    = input.transaction_type.as_str();
    let date_str    = encode_date(input.transaction_date);
    let notes       = input.notes.clone();
    let user_id_str = encode_uuid(input.user_id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE transactions
           SET item_id = ?2, quantity = ?3, transaction_type = ?4,
               transaction_date = ?5, notes = ?6, user_id = ?7
           WHERE id = ?1",
          rusqlite::params![
            id_str,
            item_id_str,
            quantity,
            type_str,
            date_str,
            notes,
            user_id_str,
          ],
        )?)
      })
      .await
      .map_err(unavailable)?;
    if affected == 0 {
      return Err(Error::TransactionNotFound(id));
    }
    self
      .get_transaction(id)
      .await?
      .ok_or(Error::TransactionNotFound(id))
  }

  async fn delete_transaction(&self, id: Uuid) -> Result<()> {
    let affected = self
      .execute(
        "DELETE FROM transactions WHERE id = ?1",
        vec![encode_uuid(id)],
      )
      .await?;
    if affected == 0 {
      return Err(Error::TransactionNotFound(id));
    }
    Ok(())
  }

  // ── Ledger reads ──────────────────────────────────────────────────────────

  async fn stock_on_hand(&self, item_id: Uuid) -> Result<i64> {
    if !self
      .row_exists("SELECT 1 FROM items WHERE id = ?1", item_id)
      .await?
    {
      return Err(Error::ItemNotFound(item_id));
    }

    let id_str = encode_uuid(item_id);
    self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COALESCE(SUM(CASE WHEN transaction_type = 'in'
                                    THEN quantity ELSE -quantity END), 0)
           FROM transactions WHERE item_id = ?1",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?)
      })
      .await
      .map_err(unavailable)
  }

  async fn dashboard_stats(&self) -> Result<DashboardStats> {
    let threshold = ledger::LOW_STOCK_THRESHOLD;

    let (items, categories, locations, low_stock) = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT
             (SELECT COUNT(*) FROM items),
             (SELECT COUNT(*) FROM categories),
             (SELECT COUNT(*) FROM locations),
             (SELECT COUNT(*) FROM items i
              WHERE COALESCE((SELECT SUM(CASE WHEN t.transaction_type = 'in'
                                              THEN t.quantity ELSE -t.quantity END)
                              FROM transactions t
                              WHERE t.item_id = i.id), 0) < ?1)",
          rusqlite::params![threshold],
          |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
          },
        )?)
      })
      .await
      .map_err(unavailable)?;

    Ok(DashboardStats {
      total_items:      items,
      total_categories: categories,
      total_locations:  locations,
      low_stock_items:  low_stock,
    })
  }

  async fn recent_transactions(
    &self,
    limit: usize,
  ) -> Result<Vec<RecentTransaction>> {
    let limit_val = limit as i64;

    // LEFT JOIN with a placeholder: the delete policy keeps item references
    // live, but an out-of-band edit must not take the whole feed down.
    let raws: Vec<RawRecentTransaction> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT t.id, COALESCE(i.name, 'Unknown Item') AS item_name,
                  t.quantity, t.transaction_date, t.transaction_type,
                  COALESCE(t.notes, '') AS notes
           FROM transactions t
           LEFT JOIN items i ON i.id = t.item_id
           ORDER BY t.transaction_date DESC, t.created_at DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| {
            Ok(RawRecentTransaction {
              id:               row.get(0)?,
              item_name:        row.get(1)?,
              quantity:         row.get(2)?,
              transaction_date: row.get(3)?,
              transaction_type: row.get(4)?,
              notes:            row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(unavailable)?;

    raws
      .into_iter()
      .map(RawRecentTransaction::into_recent)
      .collect()
  }

  async fn monthly_flows(&self, year: i32) -> Result<Vec<MonthlyFlow>> {
    let rows: Vec<(i64, i64, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT CAST(strftime('%m', transaction_date) AS INTEGER) AS month,
                  SUM(CASE WHEN transaction_type = 'in'  THEN quantity ELSE 0 END) AS masuk,
                  SUM(CASE WHEN transaction_type = 'out' THEN quantity ELSE 0 END) AS keluar
           FROM transactions
           WHERE CAST(strftime('%Y', transaction_date) AS INTEGER) = ?1
           GROUP BY month
           ORDER BY month",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(unavailable)?;

    rows
      .into_iter()
      .map(|(month, masuk, keluar)| {
        let name = ledger::month_name(month as u32)
          .ok_or_else(|| Error::Unavailable(format!("month out of range: {month}")))?;
        Ok(MonthlyFlow { name: name.to_owned(), masuk, keluar })
      })
      .collect()
  }

  async fn category_distribution(
    &self,
    limit: usize,
  ) -> Result<Vec<CategorySlice>> {
    let limit_val = limit as i64;

    let rows: Vec<(String, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT c.name, COUNT(i.id) AS jumlah
           FROM items i
           JOIN categories c ON c.id = i.category_id
           GROUP BY c.id, c.name
           ORDER BY jumlah DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(unavailable)?;

    Ok(
      rows
        .into_iter()
        .map(|(name, jumlah)| CategorySlice { name, jumlah })
        .collect(),
    )
  }
}
