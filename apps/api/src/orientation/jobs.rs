//! Job suggestions over a fixed pool of offers.
//!
//! The model only ranks and explains; it never adds offers. Results are
//! checked against the pool: unknown ids are dropped, factual fields are
//! taken from the pool entry and scores are clamped to 0–100.

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::orientation::models::{JobMatch, JobOffer, JobSearchOutput};
use crate::orientation::prompts;

pub const JOBS_FAILED: &str = "Impossible de trouver des emplois pour le moment.";
pub const DEFAULT_REGION: &str = "Montréal";
const MOCK_SCORE: f64 = 85.0;

const fn offer(
    id: &'static str,
    titre: &'static str,
    employeur: &'static str,
    lieu: &'static str,
    description: &'static str,
    type_emploi: &'static str,
) -> JobOffer {
    JobOffer {
        id,
        titre,
        employeur,
        lieu,
        description,
        type_emploi,
        url: "#",
    }
}

pub static JOB_POOL: [JobOffer; 17] = [
    offer("1", "Apprenti Charpentier-menuisier", "Construction Bâtisse Inc.", "Montréal",
        "Aide à la coupe de bois, assemblage de murs et pose de gypse sur chantiers résidentiels.", "Temps plein"),
    offer("2", "Préposé(e) aux bénéficiaires", "Résidence Le Havre", "Québec",
        "Assister les résidents dans leurs activités quotidiennes et veiller à leur confort.", "Temps partiel"),
    offer("3", "Assistant(e) Marketing et Réseaux Sociaux", "Agence Créative Zoom", "Télétravail / Montréal",
        "Création de contenu visuel et gestion des communautés en ligne.", "Contrat"),
    offer("4", "Commis d'entrepôt", "Logistique Express", "Laval",
        "Réception, tri et expédition de marchandises. Utilisation de transpalette.", "Temps plein"),
    offer("5", "Conseiller(ère) à la vente", "Boutique Plein Air", "Sherbrooke",
        "Conseiller les clients sur l'équipement de randonnée et camping.", "Temps partiel"),
    offer("6", "Technicien(ne) en informatique niveau 1", "TechSupport", "Gatineau",
        "Support technique aux utilisateurs, installation de logiciels et dépannage.", "Temps plein"),
    offer("7", "Mécanicien(ne) de véhicules lourds", "Transport Nord", "Saguenay",
        "Entretien préventif et réparation de camions et machinerie.", "Temps plein"),
    offer("8", "Réceptionniste / Adjoint(e) administratif", "Clinique Dentaire Sourire", "Trois-Rivières",
        "Gestion de l'agenda, accueil des patients et facturation.", "Temps plein"),
    offer("9", "Ouvrier(ère) paysagiste", "Vert Nature", "Lévis",
        "Entretien de terrains, tonte de pelouse et plantation de fleurs.", "Saisonnier"),
    offer("10", "Aide-Cuisinier(ère)", "Resto bistro Le Coin", "Montréal",
        "Préparation des ingrédients, aide au montage des assiettes et nettoyage.", "Soir / Fin de semaine"),
    offer("11", "Animateur(trice) de camp de jour", "Loisirs Communautaires", "Longueuil",
        "Animation d'activités sportives et artistiques pour enfants de 5 à 12 ans.", "Été"),
    offer("12", "Analyste de données junior", "Banque Nationale", "Montréal",
        "Analyse de tableaux Excel, production de rapports statistiques.", "Temps plein"),
    offer("13", "Journalier(ère) de production", "Usine FabTech", "Drummondville",
        "Opérer des machines de production et assembler des pièces.", "Temps plein"),
    offer("14", "Coordonnateur(trice) d'événements", "Festivals Inc.", "Québec",
        "Planification logistique et coordination d'événements culturels.", "Contrat"),
    offer("15", "Technicien(ne) de laboratoire", "PharmaLab", "Laval",
        "Effectuer des tests de qualité sur des échantillons.", "Temps plein"),
    offer("16", "Manœuvre minier", "Mine Or", "Val-d'Or",
        "Travaux divers sous terre et en surface.", "Temps plein - 14/14"),
    offer("17", "Guide touristique", "Tourisme Gaspésie", "Gaspé",
        "Faire visiter les attraits locaux aux groupes de touristes.", "Saisonnier"),
];

pub fn find_offer(id: &str) -> Option<&'static JobOffer> {
    JOB_POOL.iter().find(|o| o.id == id.trim())
}

#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn find_jobs(&self, letters: &[String], region: &str) -> Result<JobSearchOutput, AppError>;
}

/// Drops results that do not name a pool offer and rewrites the rest from it.
pub fn validate_results(mut output: JobSearchOutput) -> JobSearchOutput {
    let before = output.resultats_filtres.len();
    output.resultats_filtres = output
        .resultats_filtres
        .into_iter()
        .filter_map(|m| {
            let offer = find_offer(&m.id)?;
            Some(hydrate(m, offer))
        })
        .collect();

    let dropped = before - output.resultats_filtres.len();
    if dropped > 0 {
        warn!("Dropped {dropped} job result(s) with unknown ids");
    }
    output
}

fn hydrate(m: JobMatch, offer: &JobOffer) -> JobMatch {
    let score = if m.score_pertinence.is_finite() {
        m.score_pertinence.clamp(0.0, 100.0)
    } else {
        0.0
    };
    JobMatch {
        id: offer.id.to_string(),
        titre: offer.titre.to_string(),
        employeur: offer.employeur.to_string(),
        lieu: offer.lieu.to_string(),
        type_emploi: offer.type_emploi.to_string(),
        url: offer.url.to_string(),
        score_pertinence: score,
        ..m
    }
}

pub struct LlmJobMatcher(pub LlmClient);

#[async_trait]
impl JobMatcher for LlmJobMatcher {
    async fn find_jobs(&self, letters: &[String], region: &str) -> Result<JobSearchOutput, AppError> {
        let input = json!({
            "profil_riasec": letters,
            "secteur_cible": null,
            "region": region,
            "emplois_api": JOB_POOL,
        });
        let output: JobSearchOutput = self
            .0
            .generate(&prompts::jobs_prompt(&input), &prompts::jobs_schema(), None)
            .await
            .map_err(|e| AppError::collaborator(JOBS_FAILED, e))?;
        Ok(validate_results(output))
    }
}

/// Offline stand-in: the first offer in the region (or the first offer
/// overall), so the result still passes pool validation.
pub struct MockJobMatcher;

#[async_trait]
impl JobMatcher for MockJobMatcher {
    async fn find_jobs(&self, letters: &[String], region: &str) -> Result<JobSearchOutput, AppError> {
        let needle = region.trim().to_lowercase();
        let offer = JOB_POOL
            .iter()
            .find(|o| !needle.is_empty() && o.lieu.to_lowercase().contains(&needle))
            .unwrap_or(&JOB_POOL[0]);

        let result = JobMatch {
            id: offer.id.to_string(),
            titre: offer.titre.to_string(),
            employeur: offer.employeur.to_string(),
            lieu: offer.lieu.to_string(),
            type_emploi: offer.type_emploi.to_string(),
            url: offer.url.to_string(),
            score_pertinence: MOCK_SCORE,
            tags_riasec: letters.to_vec(),
            resume: offer.description.to_string(),
            raison_match: "Ceci est un résultat simulé car l'API n'est pas connectée.".to_string(),
        };
        Ok(JobSearchOutput {
            resultats_filtres: vec![result],
            message_global: "Mode démo activé. Configure une clé API pour une vraie recherche."
                .to_string(),
        })
    }
}
