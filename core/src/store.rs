//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Scorers never see the store; the dashboard fetches record collections
//! here and passes them in.

use crate::{
    dataset::Dataset,
    error::KdsResult,
    forecast::latest_for_firm,
    types::{lenient::parse_timestamp, EntrepreneurRecord, FirmId, FirmRecord, ForecastRecord},
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

/// Id and name, for caller-side firm selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmSummary {
    pub id: FirmId,
    pub name: String,
}

pub struct KdsStore {
    conn: Connection,
}

impl KdsStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> KdsResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> KdsResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> KdsResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Import ─────────────────────────────────────────────────

    /// Load a whole dataset in one transaction.
    pub fn import(&self, dataset: &Dataset) -> KdsResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for firm in &dataset.firms {
            self.insert_firm(firm)?;
        }
        for forecast in &dataset.forecasts {
            self.insert_forecast(forecast)?;
        }
        for entrepreneur in &dataset.entrepreneurs {
            self.insert_entrepreneur(entrepreneur)?;
        }
        if let Some(pct) = dataset.allocation_percentage {
            self.set_allocation_percentage(pct)?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Firms ──────────────────────────────────────────────────

    pub fn insert_firm(&self, firm: &FirmRecord) -> KdsResult<()> {
        self.conn.execute(
            "INSERT INTO firm (id, name, waste_volume, recycling_rate, revenue)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                assigned_id(firm.id),
                firm.name,
                firm.waste_volume,
                firm.recycling_rate,
                firm.revenue,
            ],
        )?;
        Ok(())
    }

    pub fn firms(&self) -> KdsResult<Vec<FirmRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, waste_volume, recycling_rate, revenue
             FROM firm ORDER BY id ASC",
        )?;
        let firms = stmt
            .query_map([], firm_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(firms)
    }

    pub fn firm(&self, firm_id: FirmId) -> KdsResult<Option<FirmRecord>> {
        let firm = self
            .conn
            .query_row(
                "SELECT id, name, waste_volume, recycling_rate, revenue
                 FROM firm WHERE id = ?1",
                params![firm_id],
                firm_from_row,
            )
            .optional()?;
        Ok(firm)
    }

    /// All firms ordered by name.
    pub fn firm_directory(&self) -> KdsResult<Vec<FirmSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM firm ORDER BY name ASC, id ASC")?;
        let rows = stmt
            .query_map([], |r| {
                let name: Option<String> = r.get(1)?;
                Ok(FirmSummary {
                    id: r.get(0)?,
                    name: crate::types::display_name(name.as_deref()).to_string(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Import `dataset` only into a store with no firms yet.
    /// Returns whether anything was written.
    pub fn seed_if_empty(&self, dataset: &Dataset) -> KdsResult<bool> {
        if self.firm_count()? > 0 {
            log::info!("store: firms already present, skipping seed");
            return Ok(false);
        }
        self.import(dataset)?;
        Ok(true)
    }

    pub fn firm_count(&self) -> KdsResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM firm", [], |r| r.get(0))?)
    }

    // ── Forecasts ──────────────────────────────────────────────

    pub fn insert_forecast(&self, forecast: &ForecastRecord) -> KdsResult<()> {
        self.conn.execute(
            "INSERT INTO firm_forecast
                 (id, firm_id, forecast_return, sustainability_score, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                assigned_id(forecast.id),
                forecast.firm_id,
                forecast.forecast_return,
                forecast.sustainability_score,
                forecast.created_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Every forecast in insertion order.
    pub fn forecasts(&self) -> KdsResult<Vec<ForecastRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, firm_id, forecast_return, sustainability_score, created_at
             FROM firm_forecast ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map([], forecast_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn latest_forecast_for_firm(&self, firm_id: FirmId) -> KdsResult<Option<ForecastRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, firm_id, forecast_return, sustainability_score, created_at
             FROM firm_forecast WHERE firm_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![firm_id], forecast_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(latest_for_firm(&rows, firm_id).cloned())
    }

    // ── Entrepreneurs ──────────────────────────────────────────

    pub fn insert_entrepreneur(&self, e: &EntrepreneurRecord) -> KdsResult<()> {
        self.conn.execute(
            "INSERT INTO entrepreneur
                 (id, name, women_ratio, disabled_ratio, established_year)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                assigned_id(e.id),
                e.name,
                e.women_ratio,
                e.disabled_ratio,
                e.established_year,
            ],
        )?;
        Ok(())
    }

    pub fn entrepreneurs(&self) -> KdsResult<Vec<EntrepreneurRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, women_ratio, disabled_ratio, established_year
             FROM entrepreneur ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map([], |r| {
                Ok(EntrepreneurRecord {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    women_ratio: r.get(2)?,
                    disabled_ratio: r.get(3)?,
                    established_year: r.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // ── Settings ───────────────────────────────────────────────

    pub fn set_allocation_percentage(&self, pct: f64) -> KdsResult<()> {
        self.conn.execute(
            "INSERT INTO settings (id, allocation_percentage) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET allocation_percentage = excluded.allocation_percentage",
            params![pct],
        )?;
        Ok(())
    }

    pub fn allocation_percentage(&self) -> KdsResult<Option<f64>> {
        let pct = self
            .conn
            .query_row(
                "SELECT allocation_percentage FROM settings WHERE id = 1",
                [],
                |r| r.get::<_, Option<f64>>(0),
            )
            .optional()?;
        Ok(pct.flatten())
    }
}

/// Ids of 0 or below mean "let the database assign one".
fn assigned_id(id: i64) -> Option<i64> {
    (id > 0).then_some(id)
}

fn firm_from_row(r: &Row<'_>) -> rusqlite::Result<FirmRecord> {
    Ok(FirmRecord {
        id: r.get(0)?,
        name: r.get(1)?,
        waste_volume: r.get(2)?,
        recycling_rate: r.get(3)?,
        revenue: r.get(4)?,
    })
}

fn forecast_from_row(r: &Row<'_>) -> rusqlite::Result<ForecastRecord> {
    let id: i64 = r.get(0)?;
    let raw_created: Option<String> = r.get(4)?;
    let created_at = raw_created.as_deref().and_then(|raw| {
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            log::warn!("store: forecast {id} has unreadable timestamp {raw:?}");
        }
        parsed
    });
    Ok(ForecastRecord {
        id,
        firm_id: r.get(1)?,
        forecast_return: r.get(2)?,
        sustainability_score: r.get(3)?,
        created_at,
    })
}
