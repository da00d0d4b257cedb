//! SQL schema for the gudang SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The CHECK constraints restate the quantity and type rules the validation
/// layer already enforces, as a backstop against out-of-band writes.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS locations (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS items (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    category_id TEXT NOT NULL REFERENCES categories(id),
    location_id TEXT NOT NULL REFERENCES locations(id),
    created_at  TEXT NOT NULL
);

-- The ledger. Stock is always derived by summing these rows; no balance is
-- stored anywhere.
CREATE TABLE IF NOT EXISTS transactions (
    id               TEXT PRIMARY KEY,
    item_id          TEXT NOT NULL REFERENCES items(id),
    quantity         INTEGER NOT NULL CHECK (quantity >= 1),
    transaction_type TEXT NOT NULL CHECK (transaction_type IN ('in', 'out')),
    transaction_date TEXT NOT NULL,   -- calendar date, 'YYYY-MM-DD'
    notes            TEXT,
    user_id          TEXT NOT NULL,   -- actor id; no users table lives here
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS items_category_idx    ON items(category_id);
CREATE INDEX IF NOT EXISTS items_location_idx    ON items(location_id);
CREATE INDEX IF NOT EXISTS transactions_item_idx ON transactions(item_id, transaction_type);
CREATE INDEX IF NOT EXISTS transactions_date_idx ON transactions(transaction_date);

PRAGMA user_version = 1;
";
