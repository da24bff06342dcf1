use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{error, info};

use crate::domain::repositories::ItemsRepository;

/// 健康状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Healthy,
    Unhealthy,
}

/// 单个依赖的检查结果
#[derive(Debug, Clone, Serialize)]
pub struct DependencyCheck {
    pub name: String,
    pub status: Status,
    pub exception: Option<String>,
    /// 耗时，毫秒
    pub duration: u128,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: Status,
    pub checks: Vec<DependencyCheck>,
}

impl HealthReport {
    pub fn from_checks(checks: Vec<DependencyCheck>) -> Self {
        let status = if checks.iter().all(|check| check.status == Status::Healthy) {
            Status::Healthy
        } else {
            Status::Unhealthy
        };

        Self { status, checks }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == Status::Healthy
    }
}

/// 商品存储的健康检查
#[derive(Clone)]
pub struct HealthCheck {
    repository: Arc<dyn ItemsRepository>,
    timeout: Duration,
}

impl HealthCheck {
    pub fn new(repository: Arc<dyn ItemsRepository>, timeout: Duration) -> Self {
        Self { repository, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 存活检查不访问任何依赖
    pub fn liveness(&self) -> HealthReport {
        HealthReport::from_checks(Vec::new())
    }

    pub async fn readiness(&self) -> HealthReport {
        HealthReport::from_checks(vec![self.check_store().await])
    }

    async fn check_store(&self) -> DependencyCheck {
        let name = self.repository.backend_name().to_string();
        let start = Instant::now();

        let result = tokio::time::timeout(self.timeout, self.repository.ping()).await;

        let elapsed = start.elapsed();

        let (status, exception) = match result {
            Ok(Ok(())) => {
                info!("{} health check successful, latency: {:?}", name, elapsed);
                (Status::Healthy, None)
            }
            Ok(Err(e)) => {
                error!("{} health check failed: {}", name, e);
                (Status::Unhealthy, Some(e.to_string()))
            }
            Err(_) => {
                error!("{} health check timed out after {:?}", name, self.timeout);
                (Status::Unhealthy, Some(format!("Timed out after {:?}", self.timeout)))
            }
        };

        DependencyCheck {
            name,
            status,
            exception,
            duration: elapsed.as_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{InMemItemsRepository, MockItemsRepository};
    use crate::domain::models::Item;
    use crate::error::AppError;
    use async_trait::async_trait;
    use uuid::Uuid;

    const TIMEOUT: Duration = Duration::from_secs(3);

    /// ping 永远不返回的存储
    struct StalledRepository;

    #[async_trait]
    impl ItemsRepository for StalledRepository {
        async fn get_items(&self) -> Result<Vec<Item>, AppError> {
            Ok(Vec::new())
        }

        async fn get_item(&self, _id: Uuid) -> Result<Option<Item>, AppError> {
            Ok(None)
        }

        async fn create_item(&self, _item: Item) -> Result<(), AppError> {
            Ok(())
        }

        async fn update_item(&self, _item: Item) -> Result<(), AppError> {
            Ok(())
        }

        async fn delete_item(&self, _id: Uuid) -> Result<(), AppError> {
            Ok(())
        }

        async fn ping(&self) -> Result<(), AppError> {
            std::future::pending().await
        }

        fn backend_name(&self) -> &'static str {
            "mongodb"
        }
    }

    #[tokio::test]
    async fn in_memory_store_is_ready() {
        let health = HealthCheck::new(Arc::new(InMemItemsRepository::new()), TIMEOUT);

        let report = health.readiness().await;

        assert!(report.is_healthy());
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks[0].name, "memory");
        assert_eq!(report.checks[0].exception, None);
    }

    #[tokio::test]
    async fn unreachable_store_is_not_ready() {
        let mut repository = MockItemsRepository::new();
        repository.expect_backend_name().return_const("mongodb");
        repository
            .expect_ping()
            .returning(|| Err(AppError::Internal("server selection timeout".to_string())));
        let health = HealthCheck::new(Arc::new(repository), TIMEOUT);

        let report = health.readiness().await;

        assert_eq!(report.status, Status::Unhealthy);
        assert_eq!(report.checks[0].name, "mongodb");
        assert_eq!(report.checks[0].status, Status::Unhealthy);
        assert!(report.checks[0]
            .exception
            .as_deref()
            .is_some_and(|message| message.contains("server selection timeout")));
    }

    #[tokio::test]
    async fn stalled_store_times_out() {
        let health = HealthCheck::new(Arc::new(StalledRepository), Duration::from_millis(50));

        let report = health.readiness().await;

        assert_eq!(report.status, Status::Unhealthy);
        assert_eq!(report.checks[0].name, "mongodb");
        assert_eq!(report.checks[0].exception.as_deref(), Some("Timed out after 50ms"));
        assert!(report.checks[0].duration >= 50);
    }

    #[test]
    fn liveness_has_no_checks() {
        let health = HealthCheck::new(Arc::new(InMemItemsRepository::new()), TIMEOUT);

        let report = health.liveness();

        assert!(report.is_healthy());
        assert!(report.checks.is_empty());
    }
}
