use crate::domain::{models::slot_config::SlotConfig, ports::SlotConfigRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSlotConfigRepo {
    pool: SqlitePool,
}

impl SqliteSlotConfigRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotConfigRepository for SqliteSlotConfigRepo {
    async fn create(&self, config: &SlotConfig) -> Result<SlotConfig, AppError> {
        sqlx::query_as::<_, SlotConfig>(
            "INSERT INTO slot_configs (id, name, duration_min, setup_min, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&config.id).bind(&config.name).bind(config.duration_min)
            .bind(config.setup_min).bind(config.is_active).bind(config.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SlotConfig>, AppError> {
        sqlx::query_as::<_, SlotConfig>("SELECT * FROM slot_configs WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<SlotConfig>, AppError> {
        sqlx::query_as::<_, SlotConfig>("SELECT * FROM slot_configs ORDER BY created_at ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active(&self) -> Result<Vec<SlotConfig>, AppError> {
        sqlx::query_as::<_, SlotConfig>("SELECT * FROM slot_configs WHERE is_active = 1 ORDER BY created_at ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, config: &SlotConfig) -> Result<SlotConfig, AppError> {
        sqlx::query_as::<_, SlotConfig>(
            "UPDATE slot_configs SET name = ?, duration_min = ?, setup_min = ?, is_active = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&config.name).bind(config.duration_min).bind(config.setup_min)
            .bind(config.is_active).bind(&config.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM slot_configs WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Slot config not found".into()));
        }
        Ok(())
    }
}
