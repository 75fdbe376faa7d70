use async_trait::async_trait;

use crate::budget::models::BudgetData;
use crate::budget::prompts;
use crate::budget::summary::summarize;
use crate::errors::AppError;
use crate::llm_client::{prompts::NARRATIVE_SYSTEM, LlmClient};

pub const ANALYSIS_FAILED: &str = "Impossible d'analyser le budget pour le moment.";

/// Free-form advice on a budget, returned as markdown-ish text.
#[async_trait]
pub trait BudgetAnalyst: Send + Sync {
    async fn analyze(&self, budget: &BudgetData) -> Result<String, AppError>;
}

pub struct LlmBudgetAnalyst(pub LlmClient);

#[async_trait]
impl BudgetAnalyst for LlmBudgetAnalyst {
    async fn analyze(&self, budget: &BudgetData) -> Result<String, AppError> {
        let prompt = prompts::analysis_prompt(budget, &summarize(budget));
        self.0
            .call_text(&prompt, NARRATIVE_SYSTEM)
            .await
            .map_err(|e| AppError::collaborator(ANALYSIS_FAILED, e))
    }
}

pub struct MockBudgetAnalyst;

#[async_trait]
impl BudgetAnalyst for MockBudgetAnalyst {
    async fn analyze(&self, _budget: &BudgetData) -> Result<String, AppError> {
        Ok("Voici une analyse basée sur tes chiffres (Mode Simulation) :\n\n\
            1. **Logement** : Ton loyer occupe une part importante de ton budget. Idéalement, il ne \
            devrait pas dépasser 30% de ton revenu net.\n\
            2. **Épargne** : C'est excellent d'avoir prévu un fonds d'urgence. Essaie de \
            l'augmenter progressivement.\n\
            3. **Alimentation** : Tes dépenses semblent réalistes, mais surveille les sorties au \
            restaurant qui peuvent vite s'accumuler."
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_budget() -> BudgetData {
        let mut budget = BudgetData::default();
        budget.income = 2000.0;
        budget.expenses.housing.rent = 900.0;
        budget.expenses.food.groceries = 350.0;
        budget
    }

    #[test]
    fn test_prompt_carries_computed_figures() {
        let budget = sample_budget();
        let prompt = prompts::analysis_prompt(&budget, &summarize(&budget));
        assert!(prompt.contains("Revenu Net: 2000.00$"));
        assert!(prompt.contains("Total Dépenses: 1250.00$"));
        assert!(prompt.contains("Balance: 750.00$"));
    }

    #[tokio::test]
    async fn test_llm_analyst_returns_model_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(body_string_contains("Revenu Net"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "  - Bravo pour ton épargne.  "}],
                "usage": {"input_tokens": 10, "output_tokens": 5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::with_base_url("key".to_string(), server.uri()).unwrap();
        let text = LlmBudgetAnalyst(client).analyze(&sample_budget()).await.unwrap();
        assert_eq!(text, "- Bravo pour ton épargne.");
    }

    #[tokio::test]
    async fn test_mock_analyst_mentions_simulation() {
        let text = MockBudgetAnalyst.analyze(&sample_budget()).await.unwrap();
        assert!(text.contains("Mode Simulation"));
    }
}
