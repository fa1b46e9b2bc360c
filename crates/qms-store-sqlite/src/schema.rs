//! SQL schema for the QMS SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every table carries `is_active` and `created_at`. Rows are never deleted;
/// a soft delete flips `is_active` to 0.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS employees (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS workcenters (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    code        TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS part_numbers (
    id          TEXT PRIMARY KEY,
    part_number TEXT NOT NULL,
    description TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS customers (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    code        TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS inspection_items (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

-- Work orders; employees are referenced under three roles.
CREATE TABLE IF NOT EXISTS dmt_records (
    id                         TEXT PRIMARY KEY,
    date                       TEXT,            -- YYYY-MM-DD or NULL
    dmt_closed                 INTEGER NOT NULL DEFAULT 0,
    workcenter_id              TEXT REFERENCES workcenters(id),
    part_number_id             TEXT REFERENCES part_numbers(id),
    employee_id                TEXT REFERENCES employees(id),
    customer_id                TEXT REFERENCES customers(id),
    inspection_item_id         TEXT REFERENCES inspection_items(id),
    prepared_by_id             TEXT REFERENCES employees(id),
    disposition_approved_by_id TEXT REFERENCES employees(id),
    is_active                  INTEGER NOT NULL DEFAULT 1,
    created_at                 TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS dmt_records_created_idx ON dmt_records(created_at);

PRAGMA user_version = 1;
";
