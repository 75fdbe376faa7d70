// Prompts and response schemas for the résumé collaborators.

use serde_json::{json, Value};

const EXTRACTION_RULES: &str = "\
Tes tâches sont:
1. **Extraire les données structurées** : Remplis les champs pour les informations personnelles, \
les expériences, la formation, les projets personnels ou académiques, et les certifications.
   - Pour les dates, essaie de les standardiser (ex: \"2020-Présent\").
   - Pour les descriptions, résume les tâches en une seule phrase concise.
   - Pour les compétences, extrais uniquement les compétences mentionnées explicitement. N'en invente pas.
   - Si une information n'est pas présente, laisse le champ vide.

Retourne le résultat complet en format JSON en respectant le schéma fourni.";

/// Résumé parsing from conversational text. Replace `{text}` before sending.
pub const PARSE_TEXT_PROMPT_TEMPLATE: &str = "\
Tu es un expert en création de CV pour les jeunes adultes au Québec. Analyse le texte \
conversationnel suivant et extrais les informations pour créer un CV structuré.

{rules}

Texte de l'utilisateur:
\"{text}\"";

/// Résumé parsing from an uploaded file (attached, or its extracted text in `{text}`).
pub const PARSE_FILE_PROMPT_TEMPLATE: &str = "\
Tu es un expert en création de CV pour les jeunes adultes au Québec. Analyse le fichier de CV \
suivant (qui peut être une image, un PDF ou un document texte) et extrais les informations pour \
créer un CV structuré.

{rules}
{text}";

/// Bullet rewriting. Replace `{description}` before sending.
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = "\
Tu es un coach de carrière chevronné, spécialisé dans l'aide aux jeunes adultes pour leur entrée \
sur le marché du travail québécois. Ton objectif est de transformer une description de tâche \
simple en 3 alternatives professionnelles, percutantes et axées sur les résultats pour un CV.

Description originale de l'utilisateur : \"{description}\"

Voici tes instructions :
1. **Verbes d'action forts :** Commence chaque suggestion par un verbe d'action percutant \
(ex: Optimisé, Coordonné, Géré, Développé, Accru).
2. **Quantification :** Incorpore des résultats mesurables autant que possible. Si l'utilisateur \
n'a pas fourni de chiffres, utilise des placeholders comme [nombre] ou [pourcentage]%.
3. **Variété :** Propose trois options distinctes, chacune sur un angle différent de la tâche \
(efficacité, service client, responsabilité).
4. **Clarté et concision :** Les phrases doivent être claires, concises et professionnelles.

Retourne un tableau JSON contenant exactement 3 chaînes de caractères.";

pub fn parse_text_prompt(text: &str) -> String {
    PARSE_TEXT_PROMPT_TEMPLATE
        .replace("{rules}", EXTRACTION_RULES)
        .replace("{text}", text)
}

pub fn parse_file_prompt(extracted_text: Option<&str>) -> String {
    let text = match extracted_text {
        Some(t) => format!("\nContenu du fichier:\n\"{t}\""),
        None => String::new(),
    };
    PARSE_FILE_PROMPT_TEMPLATE
        .replace("{rules}", EXTRACTION_RULES)
        .replace("{text}", &text)
}

pub fn suggestions_prompt(description: &str) -> String {
    SUGGESTIONS_PROMPT_TEMPLATE.replace("{description}", description)
}

pub fn resume_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "personalInfo": {
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "email": {"type": "string"},
                    "phone": {"type": "string"},
                    "address": {"type": "string"}
                }
            },
            "experiences": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string"},
                        "company": {"type": "string"},
                        "startDate": {"type": "string"},
                        "endDate": {"type": "string"},
                        "description": {"type": "string"}
                    }
                }
            },
            "education": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "degree": {"type": "string"},
                        "institution": {"type": "string"},
                        "completionDate": {"type": "string"}
                    }
                }
            },
            "skills": {"type": "array", "items": {"type": "string"}},
            "projects": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string"},
                        "description": {"type": "string"}
                    }
                }
            },
            "certifications": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "issuer": {"type": "string"},
                        "date": {"type": "string"}
                    }
                }
            }
        }
    })
}

pub fn suggestions_schema() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}
