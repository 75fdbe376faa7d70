// Prompts and response schemas for the orientation collaborators.
// Inputs are embedded as pretty JSON; `{audience}` comes from llm_client::prompts.

use serde_json::{json, Value};

use crate::llm_client::prompts::AUDIENCE_INSTRUCTION;

pub const PROFILE_PROMPT_TEMPLATE: &str = "\
CONTEXTE
Tu es un conseiller d'orientation virtuel pour l'application « Mon parcours vers l'autonomie », \
utilisée au Québec dans des organismes jeunesse (Carrefour jeunesse-emploi, OBNL, milieu \
communautaire). Cette section s'appelle « Test – établir ton profil RIASEC ».

{audience}

DONNÉES D'ENTRÉE
{input}

SIGNIFICATION DES LETTRES RIASEC
R : Réaliste, I : Investigateur, A : Artistique, S : Social, E : Entreprenant, C : Conventionnel.

TA TÂCHE
1. Identifier les 2 ou 3 lettres RIASEC dominantes en te basant sur les scores.
2. Expliquer le profil en langage simple et positif.
3. Mettre en valeur les forces de la personne.
4. Proposer des pistes de métiers cohérentes avec le profil, l'objectif et le contexte québécois.
5. Proposer des actions concrètes à court terme (explorer, rencontrer, tester).
6. Adapter légèrement le ton pour une région éloignée ou nordique, sans inventer d'informations locales.
7. Rappeler que le test est un outil de réflexion, pas un verdict.

CONTRAINTES
- Jamais de diagnostic psychologique.
- Pas de ton autoritaire ou définitif; le profil n'est pas figé.
- Si une information est absente (nom, région, âge), tu n'inventes rien.
- Le champ \"type\" des pistes d'activités vaut exploration, benevolat, formation ou emploi.";

pub const JOBS_PROMPT_TEMPLATE: &str = "\
RÔLE
Tu analyses un profil RIASEC et une région pour proposer les meilleures pistes d'emploi au Québec. \
Cet onglet s'appelle « Trouver des emplois selon ton profil RIASEC ».

{audience}

ENTRÉE
{input}

EXPLICATION
- \"emplois_api\" contient les offres disponibles. Tu NE dois PAS inventer d'offres.
- Tu filtres, clarifies, restructures et expliques. Tu gardes seulement ce qui correspond au profil.
- Chaque résultat reprend exactement l'\"id\" d'une offre reçue.

TA TÂCHE
1. Associer les lettres dominantes à des mots-clés métiers.
2. Trier les offres selon la cohérence RIASEC, la cohérence secteur et la cohérence région.
3. Garder entre 5 et 12 offres au maximum.
4. Pour chaque offre retenue : un \"score_pertinence\" de 0 à 100, un résumé de 2 ou 3 phrases, \
et une phrase qui explique pourquoi l'emploi est pertinent.
5. Si peu d'offres sont pertinentes, l'expliquer dans \"message_global\".";

pub const PLAN_PROMPT_TEMPLATE: &str = "\
RÔLE
Tu construis un plan d'action personnalisé pour la page « Ton plan d'action » de l'application \
« Mon parcours vers l'autonomie ».

{audience}

ENTRÉE
{input}

TA TÂCHE
1. Résumer le profil en une phrase à partir des lettres dominantes.
2. Formuler un objectif principal réaliste, cohérent avec l'objectif de la personne.
3. Proposer 3 à 5 actions prioritaires à faire dans les 1 à 2 prochaines semaines.
4. Proposer 3 actions à moyen terme (1 à 3 mois).
5. Suggérer des ressources de la région (Carrefour jeunesse-emploi, Services Québec, etc.) \
sans inventer d'adresses ni de liens; \"lien\" reste null si tu n'es pas certain.
6. Terminer par un appel à l'action et un message final encourageant.
7. Tenir compte des emplois retenus s'il y en a.";

pub const DASHBOARD_PROMPT_TEMPLATE: &str = "\
RÔLE
Tu écris les textes du tableau de bord de l'application « Mon parcours vers l'autonomie ».

{audience}

PROGRESSION DE LA PERSONNE
{input}

TA TÂCHE
1. Un titre court et un message d'accueil chaleureux qui reconnaît ce qui est déjà fait.
2. La prochaine étape la plus utile parmi ce qui reste à faire (CV, budget, test RIASEC, plan d'action).
3. Trois conseils concrets et courts.";

fn render(template: &str, input: &Value) -> String {
    let rendered = serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string());
    template
        .replace("{audience}", AUDIENCE_INSTRUCTION)
        .replace("{input}", &rendered)
}

pub fn profile_prompt(input: &Value) -> String {
    render(PROFILE_PROMPT_TEMPLATE, input)
}

pub fn jobs_prompt(input: &Value) -> String {
    render(JOBS_PROMPT_TEMPLATE, input)
}

pub fn plan_prompt(input: &Value) -> String {
    render(PLAN_PROMPT_TEMPLATE, input)
}

pub fn dashboard_prompt(input: &Value) -> String {
    render(DASHBOARD_PROMPT_TEMPLATE, input)
}

fn string() -> Value {
    json!({"type": "string"})
}

fn string_array() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}

pub fn profile_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "titre_profil": string(),
            "profil_riasec_principal": {
                "type": "object",
                "properties": {
                    "lettres_dominantes": string_array(),
                    "description_courte": string()
                }
            },
            "description_detaillee": string(),
            "forces": string_array(),
            "pistes_metiers": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "intitule": string(),
                        "secteur": string(),
                        "commentaire": string()
                    }
                }
            },
            "pistes_activites": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": string(),
                        "description": string()
                    }
                }
            },
            "message_motivation": string(),
            "avertissement": string()
        }
    })
}

pub fn jobs_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "resultats_filtres": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": string(),
                        "titre": string(),
                        "employeur": string(),
                        "lieu": string(),
                        "type_emploi": string(),
                        "url": string(),
                        "score_pertinence": {"type": "number"},
                        "tags_riasec": string_array(),
                        "resume": string(),
                        "raison_match": string()
                    }
                }
            },
            "message_global": string()
        }
    })
}

pub fn plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ui": {
                "type": "object",
                "properties": {"page_title": string(), "intro_text": string()}
            },
            "resume_profil": {
                "type": "object",
                "properties": {"lettres": string_array(), "description": string()}
            },
            "objectif_principal": {
                "type": "object",
                "properties": {"titre": string(), "description": string()}
            },
            "actions_prioritaires": string_array(),
            "actions_moyen_terme": string_array(),
            "ressources_region": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "nom": string(),
                        "type": string(),
                        "lien": {"type": ["string", "null"]}
                    }
                }
            },
            "cta_suite": {
                "type": "object",
                "properties": {"texte": string(), "description": string()}
            },
            "message_final": string()
        }
    })
}

pub fn dashboard_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "titre": string(),
            "message_accueil": string(),
            "prochaine_etape": string(),
            "conseils": string_array()
        }
    })
}
