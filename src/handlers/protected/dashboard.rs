use axum::Extension;

use crate::config;
use crate::database::repository::dashboard::{self, DashboardSummary};
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/dashboard - today's sets and today's calorie total
///
/// "Today" is the server's UTC date (see ClockConfig).
pub async fn summary(Extension(user): Extension<AuthUser>) -> ApiResult<DashboardSummary> {
    let today = config::config().clock.today();
    let pool = DatabaseManager::pool().await?;
    let summary = dashboard::summary(pool, user.user_id, today).await?;
    Ok(ApiResponse::success(summary))
}
