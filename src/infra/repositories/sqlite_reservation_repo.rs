use crate::domain::{models::reservation::Reservation, ports::ReservationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteReservationRepo {
    pool: SqlitePool,
}

impl SqliteReservationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for SqliteReservationRepo {
    async fn create_with_debit(&self, reservation: &Reservation, hours: f64) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let debit = sqlx::query(
            "UPDATE promo_codes SET hours_left = hours_left - ?, updated_at = ?
             WHERE id = ? AND is_active = 1 AND hours_left >= ?"
        )
            .bind(hours).bind(Utc::now()).bind(&reservation.promo_code_id).bind(hours)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if debit.rows_affected() == 0 {
            return Err(AppError::Conflict("Insufficient hours left on promo code".to_string()));
        }

        // Concurrent bookings for the same window race here, inside the
        // transaction, not in the availability calculator.
        let overlap = sqlx::query(
            "SELECT COUNT(*) as count FROM reservations
             WHERE start_time < ? AND end_time > ? AND status IN ('CONFIRMED', 'COMPLETED')"
        )
            .bind(reservation.end_time).bind(reservation.start_time)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if overlap.get::<i64, _>("count") > 0 {
            return Err(AppError::Conflict("Time slot is already reserved".to_string()));
        }

        let created = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (id, user_id, slot_config_id, promo_code_id, start_time, end_time, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&reservation.id).bind(&reservation.user_id).bind(&reservation.slot_config_id)
            .bind(&reservation.promo_code_id).bind(reservation.start_time).bind(reservation.end_time)
            .bind(&reservation.status).bind(reservation.created_at).bind(reservation.updated_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE user_id = ? ORDER BY start_time DESC")
            .bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY start_time DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_blocking_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations
             WHERE start_time < ? AND end_time > ? AND status IN ('CONFIRMED', 'COMPLETED')
             ORDER BY start_time ASC"
        )
            .bind(end).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn cancel_with_credit(&self, id: &str, status: &str, hours: f64) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let cancelled = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = ?, updated_at = ?
             WHERE id = ? AND status IN ('CONFIRMED', 'COMPLETED')
             RETURNING *"
        )
            .bind(status).bind(Utc::now()).bind(id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::Conflict("Reservation is not active".to_string()))?;

        sqlx::query("UPDATE promo_codes SET hours_left = hours_left + ?, updated_at = ? WHERE id = ?")
            .bind(hours).bind(Utc::now()).bind(&cancelled.promo_code_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }
}
