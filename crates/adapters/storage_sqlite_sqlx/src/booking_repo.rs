//! `SQLite` implementation of [`BookingRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careops_app::ports::BookingRepository;
use careops_domain::booking::Booking;
use careops_domain::error::CareOpsError;
use careops_domain::id::WorkspaceId;

use crate::error::StorageError;
use crate::row::{parse, parse_timestamp, timestamp};

struct Wrapper(Booking);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let workspace_id: String = row.try_get("workspace_id")?;
        let contact_id: String = row.try_get("contact_id")?;
        let scheduled_at: String = row.try_get("scheduled_at")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Booking {
            id: parse(&id)?,
            workspace_id: parse(&workspace_id)?,
            contact_id: parse(&contact_id)?,
            service_name: row.try_get("service_name")?,
            scheduled_at: parse_timestamp(&scheduled_at)?,
            duration_minutes: row.try_get("duration_minutes")?,
            status: parse(&status)?,
            notes: row.try_get("notes")?,
            created_at: parse_timestamp(&created_at)?,
        }))
    }
}

/// `SQLite`-backed booking repository.
#[derive(Clone)]
pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking, CareOpsError> {
        sqlx::query(
            "INSERT INTO bookings (id, workspace_id, contact_id, service_name, scheduled_at, duration_minutes, status, notes, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(booking.id.to_string())
        .bind(booking.workspace_id.to_string())
        .bind(booking.contact_id.to_string())
        .bind(&booking.service_name)
        .bind(timestamp(booking.scheduled_at))
        .bind(booking.duration_minutes)
        .bind(booking.status.to_string())
        .bind(&booking.notes)
        .bind(timestamp(booking.created_at))
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(booking)
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Booking>, CareOpsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM bookings WHERE workspace_id = ? ORDER BY scheduled_at",
        )
        .bind(workspace_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
