//! Warrant check run before a permit or registration request is accepted
//!
//! The check fails closed: when the court cannot be asked, the request is
//! refused with the upstream error instead of being let through.

use crate::client::{Deadline, WarrantLookup};
use crate::error::Result;
use metrics::counter;
use std::sync::Arc;

pub const OUTSTANDING_WARRANT: &str = "subject has outstanding warrant";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarrantCheck {
    pub has_warrant: bool,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny(String),
}

#[derive(Clone)]
pub struct WarrantGate {
    warrants: Arc<dyn WarrantLookup>,
}

impl WarrantGate {
    pub fn new(warrants: Arc<dyn WarrantLookup>) -> Self {
        Self { warrants }
    }

    pub async fn check(&self, deadline: &Deadline, subject: &str, token: &str) -> Result<WarrantCheck> {
        let warrants = self.warrants.warrants_for(deadline, subject, token).await?;
        Ok(WarrantCheck {
            has_warrant: !warrants.is_empty(),
            count: warrants.len(),
        })
    }

    pub async fn check_and_gate(
        &self,
        deadline: &Deadline,
        subject: &str,
        token: &str,
    ) -> Result<GateDecision> {
        let check = self.check(deadline, subject, token).await?;
        if check.has_warrant {
            counter!("uprava_warrant_gate_denials_total").increment(1);
            tracing::info!(subject = %subject, warrants = check.count, "Request denied by warrant gate");
            return Ok(GateDecision::Deny(OUTSTANDING_WARRANT.to_string()));
        }
        Ok(GateDecision::Allow)
    }
}
