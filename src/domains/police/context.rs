use super::service::{InspectionService, ViolationService};
use std::sync::Arc;

pub trait PoliceContext: Clone + Send + Sync + 'static {
    fn violation_service(&self) -> &ViolationService;
    fn inspection_service(&self) -> &InspectionService;
}

#[derive(Clone)]
pub struct PoliceState {
    pub violations: ViolationService,
    pub inspections: Arc<InspectionService>,
}

impl PoliceContext for PoliceState {
    fn violation_service(&self) -> &ViolationService {
        &self.violations
    }

    fn inspection_service(&self) -> &InspectionService {
        &self.inspections
    }
}
