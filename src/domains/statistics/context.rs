use super::service::StatisticsService;
use std::sync::Arc;

pub trait StatisticsContext: Clone + Send + Sync + 'static {
    fn statistics_service(&self) -> &StatisticsService;
}

#[derive(Clone)]
pub struct StatisticsState {
    pub statistics: Arc<StatisticsService>,
}

impl StatisticsContext for StatisticsState {
    fn statistics_service(&self) -> &StatisticsService {
        &self.statistics
    }
}
