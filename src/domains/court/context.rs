use super::service::{CrimeReportService, HearingService, SuspensionService, WarrantService};
use std::sync::Arc;

/// State required by the court handlers
pub trait CourtContext: Clone + Send + Sync + 'static {
    fn hearing_service(&self) -> &HearingService;
    fn warrant_service(&self) -> &WarrantService;
    fn suspension_service(&self) -> &SuspensionService;
    fn crime_report_service(&self) -> &CrimeReportService;
}

/// Court service state
#[derive(Clone)]
pub struct CourtState {
    pub hearings: Arc<HearingService>,
    pub warrants: Arc<WarrantService>,
    pub suspensions: Arc<SuspensionService>,
    pub crime_reports: Arc<CrimeReportService>,
}

impl CourtContext for CourtState {
    fn hearing_service(&self) -> &HearingService {
        &self.hearings
    }

    fn warrant_service(&self) -> &WarrantService {
        &self.warrants
    }

    fn suspension_service(&self) -> &SuspensionService {
        &self.suspensions
    }

    fn crime_report_service(&self) -> &CrimeReportService {
        &self.crime_reports
    }
}
