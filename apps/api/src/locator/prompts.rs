// Prompt and response schema for the text search over CJE offices.

use serde_json::{json, Value};

use crate::llm_client::prompts::AUDIENCE_INSTRUCTION;

pub const SEARCH_PROMPT_TEMPLATE: &str = "\
RÔLE
Tu alimentes la page « Trouve ton CJE ». Elle aide une personne à trouver le Carrefour \
jeunesse-emploi le plus logique pour elle, à partir de sa ville ou de son code postal au Québec.

{audience}

ENTRÉE
{input}

RÈGLES D'INTERPRÉTATION
- L'utilisateur donne sa ville OU son code postal (parfois les deux).
- Tu n'as pas de géolocalisation automatique.
- Si \"ville\" est renseignée : privilégier les CJE de cette ville, sinon une ville proche \
ou de la même région.
- Si \"code_postal\" est renseigné : compare les 1 à 3 premiers caractères (ex.: G8P, H2X) \
pour approcher la zone.
- Si les deux sont fournis, la ville passe en premier et le code postal sert d'appui.

COMPORTEMENT
1. Choisir un CJE principal (\"cje_plus_proche\") parmi ceux de la liste \"cjes\" uniquement.
2. Choisir jusqu'à 3 bons choix (\"top_3_cjes\"), toujours dans la liste.
3. Pour le CJE principal, expliquer en une phrase courte pourquoi il est pertinent.
4. Reprendre exactement l'\"id\" des CJE reçus. Si aucun ne convient, mettre \"id\" à null.
5. Fournir les textes d'interface de la page (titre, introduction, libellés, messages).";

pub fn search_prompt(input: &Value) -> String {
    let rendered = serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string());
    SEARCH_PROMPT_TEMPLATE
        .replace("{audience}", AUDIENCE_INSTRUCTION)
        .replace("{input}", &rendered)
}

fn string() -> Value {
    json!({"type": "string"})
}

fn nullable_string() -> Value {
    json!({"type": ["string", "null"]})
}

pub fn search_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ui": {
                "type": "object",
                "properties": {
                    "page_title": string(),
                    "intro_text": string(),
                    "form_labels": {
                        "type": "object",
                        "properties": {
                            "ville": string(),
                            "code_postal": string(),
                            "bouton_rechercher": string()
                        }
                    },
                    "messages": {
                        "type": "object",
                        "properties": {
                            "info_initiale": string(),
                            "aucune_entree": string(),
                            "aucun_resultat": string(),
                            "resultats_trouves": string()
                        }
                    }
                }
            },
            "cje_plus_proche": {
                "type": "object",
                "properties": {
                    "id": nullable_string(),
                    "nom": nullable_string(),
                    "ville": nullable_string(),
                    "adresse": nullable_string(),
                    "siteWeb": nullable_string(),
                    "telephone": nullable_string(),
                    "raison_selection": nullable_string(),
                    "lien_google_maps": nullable_string()
                }
            },
            "top_3_cjes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": string(),
                        "nom": string(),
                        "ville": string(),
                        "adresse": string(),
                        "lien_google_maps": string()
                    }
                }
            },
            "message_global": string()
        },
        "required": ["ui", "cje_plus_proche", "top_3_cjes", "message_global"]
    })
}
