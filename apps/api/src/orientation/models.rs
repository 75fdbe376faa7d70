use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Every model-produced struct below is `#[serde(default)]`: a missing string
// becomes "". List fields go through `lenient::list`, so a missing, null or
// non-array value becomes an empty list instead of failing the call.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiasecInput {
    pub nom: String,
    pub age: String,
    pub groupe_age: String,
    pub region: String,
    pub objectif: String,
    pub scores_riasec: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DominantProfile {
    #[serde(deserialize_with = "crate::lenient::list")]
    pub lettres_dominantes: Vec<String>,
    pub description_courte: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerLead {
    pub intitule: String,
    pub secteur: String,
    pub commentaire: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityLead {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Narrative profile produced from quiz scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiasecOutput {
    pub titre_profil: String,
    pub profil_riasec_principal: DominantProfile,
    pub description_detaillee: String,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub forces: Vec<String>,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub pistes_metiers: Vec<CareerLead>,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub pistes_activites: Vec<ActivityLead>,
    pub message_motivation: String,
    pub avertissement: String,
}

/// One offer of the fixed candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOffer {
    pub id: &'static str,
    pub titre: &'static str,
    pub employeur: &'static str,
    pub lieu: &'static str,
    pub description: &'static str,
    pub type_emploi: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobMatch {
    pub id: String,
    pub titre: String,
    pub employeur: String,
    pub lieu: String,
    pub type_emploi: String,
    pub url: String,
    pub score_pertinence: f64,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub tags_riasec: Vec<String>,
    pub resume: String,
    pub raison_match: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSearchOutput {
    #[serde(rename = "resultats_filtres", alias = "resultats_filtrés")]
    #[serde(deserialize_with = "crate::lenient::list")]
    pub resultats_filtres: Vec<JobMatch>,
    pub message_global: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanUi {
    pub page_title: String,
    pub intro_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSummary {
    #[serde(deserialize_with = "crate::lenient::list")]
    pub lettres: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainGoal {
    pub titre: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalResource {
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub lien: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallToAction {
    pub texte: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPlan {
    pub ui: PlanUi,
    pub resume_profil: ProfileSummary,
    pub objectif_principal: MainGoal,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub actions_prioritaires: Vec<String>,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub actions_moyen_terme: Vec<String>,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub ressources_region: Vec<RegionalResource>,
    pub cta_suite: CallToAction,
    pub message_final: String,
}

/// Inputs gathered from the orientation results page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPlanInput {
    pub titre_profil: String,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub lettres_dominantes: Vec<String>,
    pub region: String,
    pub objectif: String,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub emplois_retenus: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardContent {
    pub titre: String,
    pub message_accueil: String,
    pub prochaine_etape: String,
    #[serde(deserialize_with = "crate::lenient::list")]
    pub conseils: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_riasec_output_missing_arrays_default_to_empty() {
        let out: RiasecOutput = serde_json::from_value(json!({
            "titre_profil": "Bâtisseur curieux",
            "profil_riasec_principal": {"lettres_dominantes": ["R", "I"]}
        }))
        .unwrap();
        assert_eq!(out.titre_profil, "Bâtisseur curieux");
        assert!(out.forces.is_empty());
        assert!(out.pistes_metiers.is_empty());
        assert_eq!(out.profil_riasec_principal.description_courte, "");
    }

    #[test]
    fn test_null_lists_in_model_answers_become_empty() {
        let out: RiasecOutput = serde_json::from_value(json!({
            "titre_profil": "Bâtisseur curieux",
            "profil_riasec_principal": {"lettres_dominantes": null},
            "forces": null,
            "pistes_metiers": [null, {"intitule": "Technicien"}],
            "pistes_activites": "aucune"
        }))
        .unwrap();
        assert!(out.profil_riasec_principal.lettres_dominantes.is_empty());
        assert!(out.forces.is_empty());
        assert_eq!(out.pistes_metiers.len(), 1);
        assert!(out.pistes_activites.is_empty());

        let plan: ActionPlan = serde_json::from_value(json!({
            "resume_profil": {"lettres": null},
            "actions_prioritaires": null,
            "ressources_region": null
        }))
        .unwrap();
        assert!(plan.resume_profil.lettres.is_empty());
        assert!(plan.actions_prioritaires.is_empty());
        assert!(plan.ressources_region.is_empty());
    }

    #[test]
    fn test_job_search_accepts_accented_key() {
        let out: JobSearchOutput = serde_json::from_value(json!({
            "resultats_filtrés": [{"id": "4", "score_pertinence": 72}],
            "message_global": "ok"
        }))
        .unwrap();
        assert_eq!(out.resultats_filtres.len(), 1);
        assert_eq!(out.resultats_filtres[0].id, "4");
        assert!(out.resultats_filtres[0].tags_riasec.is_empty());
    }

    #[test]
    fn test_activity_lead_type_key() {
        let lead: ActivityLead =
            serde_json::from_value(json!({"type": "benevolat", "description": "Aider"})).unwrap();
        assert_eq!(lead.kind, "benevolat");
    }
}
