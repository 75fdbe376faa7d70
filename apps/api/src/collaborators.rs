use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::budget::analysis::{BudgetAnalyst, LlmBudgetAnalyst, MockBudgetAnalyst};
use crate::config::Config;
use crate::llm_client::{self, LlmClient};
use crate::locator::resolver::{LlmLocationResolver, LocationResolver, MockLocationResolver};
use crate::orientation::dashboard::{DashboardWriter, LlmDashboardWriter, MockDashboardWriter};
use crate::orientation::jobs::{JobMatcher, LlmJobMatcher, MockJobMatcher};
use crate::orientation::plan::{ActionPlanner, LlmActionPlanner, MockActionPlanner};
use crate::orientation::profile::{LlmProfileAnalyzer, MockProfileAnalyzer, ProfileAnalyzer};
use crate::resume::parser::{LlmResumeParser, MockResumeParser, ResumeParser};
use crate::resume::suggestions::{LlmSuggestionWriter, MockSuggestionWriter, SuggestionWriter};

/// Every generative capability the service uses, chosen once at startup.
#[derive(Clone)]
pub struct Collaborators {
    pub resume_parser: Arc<dyn ResumeParser>,
    pub suggestion_writer: Arc<dyn SuggestionWriter>,
    pub budget_analyst: Arc<dyn BudgetAnalyst>,
    pub profile_analyzer: Arc<dyn ProfileAnalyzer>,
    pub job_matcher: Arc<dyn JobMatcher>,
    pub location_resolver: Arc<dyn LocationResolver>,
    pub dashboard_writer: Arc<dyn DashboardWriter>,
    pub action_planner: Arc<dyn ActionPlanner>,
}

impl Collaborators {
    /// Live collaborators when an API key is configured, mocks otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let Some(key) = config.anthropic_api_key.clone() else {
            warn!("ANTHROPIC_API_KEY not set, using simulated collaborators");
            return Ok(Self::mock());
        };

        let client = match &config.anthropic_base_url {
            Some(url) => LlmClient::with_base_url(key, url.clone()),
            None => LlmClient::new(key),
        }
        .context("failed to build LLM client")?;
        info!("LLM client initialized (model: {})", llm_client::MODEL);

        Ok(Self::live(client))
    }

    pub fn live(client: LlmClient) -> Self {
        Self {
            resume_parser: Arc::new(LlmResumeParser(client.clone())),
            suggestion_writer: Arc::new(LlmSuggestionWriter(client.clone())),
            budget_analyst: Arc::new(LlmBudgetAnalyst(client.clone())),
            profile_analyzer: Arc::new(LlmProfileAnalyzer(client.clone())),
            job_matcher: Arc::new(LlmJobMatcher(client.clone())),
            location_resolver: Arc::new(LlmLocationResolver(client.clone())),
            dashboard_writer: Arc::new(LlmDashboardWriter(client.clone())),
            action_planner: Arc::new(LlmActionPlanner(client)),
        }
    }

    pub fn mock() -> Self {
        Self {
            resume_parser: Arc::new(MockResumeParser),
            suggestion_writer: Arc::new(MockSuggestionWriter),
            budget_analyst: Arc::new(MockBudgetAnalyst),
            profile_analyzer: Arc::new(MockProfileAnalyzer),
            job_matcher: Arc::new(MockJobMatcher),
            location_resolver: Arc::new(MockLocationResolver),
            dashboard_writer: Arc::new(MockDashboardWriter),
            action_planner: Arc::new(MockActionPlanner),
        }
    }
}
