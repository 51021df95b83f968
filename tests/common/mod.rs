//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ikimina_savings::db::{DbPool, establish_connection_pool};
use ikimina_savings::schema::{groups, members};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    /// Database with group 1 and its active members 1 and 2.
    pub fn seeded() -> Self {
        let db = Self::new();
        let mut conn = db.pool.get().expect("Failed to get SQLite connection.");
        diesel::insert_into(groups::table)
            .values((
                groups::id.eq(1),
                groups::name.eq("Abishyizehamwe"),
                groups::created_at.eq(at(1, 0, 0)),
            ))
            .execute(&mut conn)
            .expect("should seed group");
        for (id, name) in [(1, "Aline"), (2, "Jean")] {
            diesel::insert_into(members::table)
                .values((
                    members::id.eq(id),
                    members::group_id.eq(1),
                    members::name.eq(name),
                    members::phone.eq(Some(format!("078800000{id}"))),
                    members::active.eq(true),
                    members::joined_at.eq(at(1, 0, 0)),
                ))
                .execute(&mut conn)
                .expect("should seed member");
        }
        db
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

pub fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    date(day).and_hms_opt(h, m, 0).unwrap()
}
