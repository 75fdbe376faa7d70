//! Text search: a collaborator picks an office from a city or postal code,
//! and the answer is checked against the local list before anyone sees it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::locator::offices::{find_office, OfficeCard, OFFICES};
use crate::locator::prompts;

pub const SEARCH_FAILED: &str = "Une erreur est survenue lors de la recherche intelligente.";
pub const EMPTY_QUERY: &str = "Merci d'entrer au moins une ville ou un code postal.";
pub const UNKNOWN_OFFICE: &str = "Erreur: CJE introuvable dans la base de données.";
pub const NO_RESULT: &str = "Aucun CJE trouvé pour cette recherche.";
pub const DEFAULT_REASON: &str = "Ce CJE correspond le mieux à ta recherche.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationQuery {
    pub ville: Option<String>,
    pub code_postal: Option<String>,
}

impl LocationQuery {
    /// Trims both fields, turning blanks into `None`. At least one must remain.
    pub fn normalized(self) -> Result<Self, AppError> {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        let query = Self {
            ville: clean(self.ville),
            code_postal: clean(self.code_postal).map(|s| s.to_uppercase()),
        };
        if query.ville.is_none() && query.code_postal.is_none() {
            return Err(AppError::Validation(EMPTY_QUERY.to_string()));
        }
        Ok(query)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLabels {
    pub ville: String,
    pub code_postal: String,
    pub bouton_rechercher: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMessages {
    pub info_initiale: String,
    pub aucune_entree: String,
    pub aucun_resultat: String,
    pub resultats_trouves: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchUi {
    pub page_title: String,
    pub intro_text: String,
    pub form_labels: FormLabels,
    pub messages: SearchMessages,
}

/// The collaborator's pick. Only `id` and `raison_selection` are trusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposedOffice {
    pub id: Option<String>,
    pub nom: Option<String>,
    pub ville: Option<String>,
    pub raison_selection: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposedAlternative {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverAnswer {
    pub ui: SearchUi,
    pub cje_plus_proche: ProposedOffice,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub top_3_cjes: Vec<ProposedAlternative>,
    pub message_global: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub office: OfficeCard,
    pub raison: String,
    pub alternatives: Vec<OfficeCard>,
    pub ui: SearchUi,
    pub message_global: String,
}

#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, query: &LocationQuery) -> Result<ResolverAnswer, AppError>;
}

/// Validates the query, asks the resolver and re-hydrates its pick from the
/// local list.
pub async fn search(
    resolver: &dyn LocationResolver,
    query: LocationQuery,
) -> Result<SearchResult, AppError> {
    let query = query.normalized()?;
    let answer = resolver.resolve(&query).await?;

    let Some(id) = answer
        .cje_plus_proche
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        let message = Some(answer.ui.messages.aucun_resultat.trim())
            .filter(|m| !m.is_empty())
            .unwrap_or(NO_RESULT);
        return Err(AppError::NotFound(message.to_string()));
    };

    let office = find_office(id).ok_or_else(|| {
        warn!("Resolver picked unknown office id {id:?}");
        AppError::NotFound(UNKNOWN_OFFICE.to_string())
    })?;

    let raison = answer
        .cje_plus_proche
        .raison_selection
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_REASON)
        .to_string();

    let mut alternatives: Vec<OfficeCard> = Vec::new();
    for alt in &answer.top_3_cjes {
        match find_office(&alt.id) {
            Some(o) if !alternatives.iter().any(|a| a.office.id == o.id) => {
                alternatives.push(o.into())
            }
            Some(_) => {}
            None => warn!("Dropping unknown alternative office id {:?}", alt.id),
        }
        if alternatives.len() == 3 {
            break;
        }
    }

    info!("Location search resolved to {}", office.id);
    Ok(SearchResult {
        office: office.into(),
        raison,
        alternatives,
        ui: answer.ui,
        message_global: answer.message_global,
    })
}

pub struct LlmLocationResolver(pub LlmClient);

#[async_trait]
impl LocationResolver for LlmLocationResolver {
    async fn resolve(&self, query: &LocationQuery) -> Result<ResolverAnswer, AppError> {
        let input = json!({
            "entree_utilisateur": query,
            "cjes": OFFICES,
        });
        self.0
            .generate(&prompts::search_prompt(&input), &prompts::search_schema(), None)
            .await
            .map_err(|e| AppError::collaborator(SEARCH_FAILED, e))
    }
}

/// Offline stand-in: always the first office in the list.
pub struct MockLocationResolver;

#[async_trait]
impl LocationResolver for MockLocationResolver {
    async fn resolve(&self, _query: &LocationQuery) -> Result<ResolverAnswer, AppError> {
        let first = &OFFICES[0];
        Ok(ResolverAnswer {
            ui: SearchUi {
                page_title: "Trouve ton Carrefour jeunesse-emploi".to_string(),
                intro_text: "Entre ta ville ou ton code postal pour savoir quel CJE peut t'aider."
                    .to_string(),
                form_labels: FormLabels {
                    ville: "Entre ta ville".to_string(),
                    code_postal: "Entre ton code postal".to_string(),
                    bouton_rechercher: "Trouver mon CJE".to_string(),
                },
                messages: SearchMessages {
                    info_initiale: "Utilise la recherche pour commencer.".to_string(),
                    aucune_entree: "Tu dois entrer au moins une information.".to_string(),
                    aucun_resultat: "Aucun CJE trouvé.".to_string(),
                    resultats_trouves: "Voici le CJE le plus proche.".to_string(),
                },
            },
            cje_plus_proche: ProposedOffice {
                id: Some(first.id.to_string()),
                nom: Some(first.nom.to_string()),
                ville: Some(first.ville.to_string()),
                raison_selection: Some(
                    "Ceci est une réponse simulée (API Key manquante).".to_string(),
                ),
            },
            top_3_cjes: vec![ProposedAlternative {
                id: first.id.to_string(),
            }],
            message_global: "Mode démo activé.".to_string(),
        })
    }
}
