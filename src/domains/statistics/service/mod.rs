//! Traffic statistics
//!
//! Statistics are stored per region, month and violation type. `generate`
//! derives them from the police violation records and the MUP vehicle
//! registry. The vehicle and violation reports are computed on request and
//! never stored.

use crate::client::{Deadline, MupRegistry, ViolationSource};
use crate::domain::common::now;
use crate::domain::{
    GenerateStatisticsInput, NewTrafficStatistic, TrafficStatistic, Vehicle, VehicleCount,
    TOTAL_VIOLATIONS,
};
use crate::error::{AppError, Result};
use crate::repository::Repository;
use chrono::Datelike;
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;

pub struct StatisticsService {
    statistics: Arc<dyn Repository<TrafficStatistic>>,
    violations: Arc<dyn ViolationSource>,
    vehicles: Arc<dyn MupRegistry>,
}

impl StatisticsService {
    pub fn new(
        statistics: Arc<dyn Repository<TrafficStatistic>>,
        violations: Arc<dyn ViolationSource>,
        vehicles: Arc<dyn MupRegistry>,
    ) -> Self {
        Self {
            statistics,
            violations,
            vehicles,
        }
    }

    pub async fn list(&self) -> Result<Vec<TrafficStatistic>> {
        self.statistics.list().await
    }

    pub async fn get(&self, id: &str) -> Result<TrafficStatistic> {
        self.statistics
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Traffic statistic {} not found", id)))
    }

    pub async fn create(&self, input: NewTrafficStatistic) -> Result<TrafficStatistic> {
        check_month(input.month)?;
        input.validate()?;

        self.statistics
            .create(TrafficStatistic {
                id: String::new(),
                date: now(),
                region: input.region,
                year: input.year,
                month: input.month,
                violation_type: input.violation_type,
                violations: input.violations,
                registered_vehicles: input.registered_vehicles,
            })
            .await
    }

    /// Replace every field of a stored statistic except its id and date
    pub async fn update(&self, id: &str, input: NewTrafficStatistic) -> Result<TrafficStatistic> {
        check_month(input.month)?;
        input.validate()?;
        let current = self.get(id).await?;

        self.statistics
            .update(TrafficStatistic {
                id: current.id,
                date: current.date,
                region: input.region,
                year: input.year,
                month: input.month,
                violation_type: input.violation_type,
                violations: input.violations,
                registered_vehicles: input.registered_vehicles,
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.get(id).await?;
        self.statistics.delete(id).await
    }

    pub async fn registered_vehicles(&self, deadline: &Deadline, token: &str) -> Result<Vec<Vehicle>> {
        Ok(self.vehicles.registered_vehicles(deadline, token).await?)
    }

    /// Registered vehicles per model year
    pub async fn vehicles_by_year(
        &self,
        deadline: &Deadline,
        token: &str,
    ) -> Result<BTreeMap<i32, u64>> {
        let vehicles = self.registered_vehicles(deadline, token).await?;
        Ok(count_by(vehicles.iter().map(|v| v.year)))
    }

    pub async fn registered_in_year(
        &self,
        deadline: &Deadline,
        year: i32,
        token: &str,
    ) -> Result<VehicleCount> {
        let vehicles = self.registered_vehicles(deadline, token).await?;
        let count = vehicles.iter().filter(|v| v.year == year).count() as u64;
        Ok(VehicleCount { count })
    }

    /// Registered vehicles of model year `year`, counted per brand
    pub async fn popular_brands(
        &self,
        deadline: &Deadline,
        year: i32,
        token: &str,
    ) -> Result<BTreeMap<String, u64>> {
        let vehicles = self.registered_vehicles(deadline, token).await?;
        Ok(count_by(
            vehicles
                .into_iter()
                .filter(|v| v.year == year)
                .map(|v| v.brand),
        ))
    }

    /// Violations recorded in `year`, per reason plus a grand total
    pub async fn violations_report(
        &self,
        deadline: &Deadline,
        year: i32,
        token: &str,
    ) -> Result<BTreeMap<String, u64>> {
        let violations = self.violations.traffic_violations(deadline, token).await?;
        let in_year: Vec<_> = violations
            .into_iter()
            .filter(|v| v.time.year() == year)
            .collect();

        let total = in_year.len() as u64;
        let mut report = count_by(in_year.into_iter().map(|v| v.reason));
        report.insert(TOTAL_VIOLATIONS.to_string(), total);
        Ok(report)
    }

    /// Build one statistic per violation reason seen in the requested month
    pub async fn generate(
        &self,
        deadline: &Deadline,
        input: GenerateStatisticsInput,
        token: &str,
    ) -> Result<Vec<TrafficStatistic>> {
        check_month(input.month)?;
        input.validate()?;

        let violations = self.violations.traffic_violations(deadline, token).await?;
        let registered_vehicles = self.vehicles.registered_vehicles(deadline, token).await?.len() as u64;

        let by_reason = count_by(
            violations
                .into_iter()
                .filter(|v| v.time.year() == input.year && v.time.month() == input.month)
                .map(|v| v.reason),
        );

        let generated_at = now();
        let mut generated = Vec::with_capacity(by_reason.len());
        for (violation_type, count) in by_reason {
            let statistic = self
                .statistics
                .create(TrafficStatistic {
                    id: String::new(),
                    date: generated_at,
                    region: input.region.clone(),
                    year: input.year,
                    month: input.month,
                    violation_type,
                    violations: count,
                    registered_vehicles,
                })
                .await?;
            generated.push(statistic);
        }

        tracing::info!(
            region = %input.region,
            year = input.year,
            month = input.month,
            count = generated.len(),
            "Traffic statistics generated"
        );
        Ok(generated)
    }
}

fn count_by<K: Ord>(keys: impl IntoIterator<Item = K>) -> BTreeMap<K, u64> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    counts
}

fn check_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(AppError::BadRequest(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(())
}
