//! CrisisTruth Statistics Client
//!
//! A client for the backend's dashboard statistics endpoint.

use crate::consts::cli_consts::{DASHBOARD_STATS_ENDPOINT, http};
use crate::environment::Environment;
use crate::snapshot::DashboardSnapshot;
use crate::stats::StatsSource;
use crate::stats::error::StatsError;
use reqwest::{Client, ClientBuilder, Response};

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("crisistruth/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    environment: Environment,
}

impl StatsClient {
    pub fn new(environment: Environment) -> Result<Self, StatsError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, StatsError> {
        if !response.status().is_success() {
            return Err(StatsError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_snapshot(&self, endpoint: &str) -> Result<DashboardSnapshot, StatsError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let body = response.bytes().await?;
        Ok(DashboardSnapshot::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl StatsSource for StatsClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn fetch_dashboard_stats(&self) -> Result<DashboardSnapshot, StatsError> {
        self.get_snapshot(DASHBOARD_STATS_ENDPOINT).await
    }
}
