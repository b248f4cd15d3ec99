//! Usage metrics over the calculation history

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{CalculationFilter, DomainResult, RepositoryProvider, UsagePeriod, UsageReport};

pub struct UsageService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UsageService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn report(&self, period: UsagePeriod) -> DomainResult<UsageReport> {
        let records = self
            .repos
            .calculations()
            .find_all(&CalculationFilter::default())
            .await?;
        Ok(UsageReport::build(&records, period, Utc::now()))
    }
}
