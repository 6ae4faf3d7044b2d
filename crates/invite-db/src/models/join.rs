//! Join statistics row

use chrono::NaiveDate;
use sqlx::FromRow;

/// One `GROUP BY DATE(created_at)` bucket of the joins table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct DailyJoinModel {
    pub day: NaiveDate,
    pub total: i64,
}
