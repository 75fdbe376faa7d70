//! Résumé parsing: conversational text or an uploaded file in, structured
//! [`ResumeData`] out.
//!
//! Carried in `AppState` as `Arc<dyn ResumeParser>`. The live implementation
//! goes through the LLM client; the mock returns the prefilled example so the
//! flow stays usable without an API key.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{Attachment, LlmClient};
use crate::resume::models::{
    Certification, Education, Experience, PersonalInfo, Project, ResumeData, Skill,
};
use crate::resume::prompts;

pub const PARSE_TEXT_FAILED: &str = "Impossible de transformer le texte en CV. Essaie de nouveau.";
pub const PARSE_FILE_FAILED: &str =
    "Impossible d'analyser le fichier du CV. Assure-toi que le fichier est lisible.";

const IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp", "image/gif"];
const PDF_TYPE: &str = "application/pdf";

/// Conversational sample shown to users who want to try the parser.
pub const PREFILLED_RESUME_TEXT: &str = "\
Je m'appelle Alex Tremblay. Mon email est alex.tremblay@email.com et mon téléphone est \
514-123-4567. J'habite au 123 Rue Principale, Montréal, QC.

De 2020 à aujourd'hui, j'ai travaillé comme Barista chez Café Central. Je préparais des cafés \
et servais les clients. J'ai aussi géré la caisse.

Avant ça, de 2018 à 2019, j'étais vendeur dans un magasin de vêtements. Je conseillais les \
clients et je m'occupais de l'inventaire. J'ai aussi été plongeur dans un restaurant pendant l'été.

J'ai un DEC en Techniques de l'informatique du Cégep du Vieux Montréal, terminé en 2018.

Mes compétences manuelles sont : Service à la clientèle, gestion du temps, Microsoft Office, \
et je parle français et anglais.";

/// An uploaded résumé file.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

/// What gets sent to the model for a file.
#[derive(Debug)]
pub enum FileContent {
    Text(String),
    Attachment(Attachment),
}

#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse_text(&self, text: &str) -> Result<ResumeData, AppError>;
    async fn parse_file(&self, file: &ResumeFile) -> Result<ResumeData, AppError>;
}

/// Turns an upload into model input. Text and PDFs are read locally; a PDF
/// without a text layer (a scan) and images are forwarded as attachments.
pub fn prepare_file(file: &ResumeFile) -> Result<FileContent, AppError> {
    if file.bytes.is_empty() {
        return Err(AppError::Validation("Le fichier est vide.".to_string()));
    }

    let media_type = file.media_type.to_ascii_lowercase();
    match media_type.as_str() {
        "text/plain" | "text/markdown" => {
            let text = String::from_utf8_lossy(&file.bytes).into_owned();
            Ok(FileContent::Text(text))
        }
        PDF_TYPE => match pdf_extract::extract_text_from_mem(&file.bytes) {
            Ok(text) if !text.trim().is_empty() => Ok(FileContent::Text(text)),
            Ok(_) => Ok(FileContent::Attachment(attach(&file.bytes, PDF_TYPE))),
            Err(e) => {
                warn!("PDF text extraction failed for {}: {e}", file.file_name);
                Ok(FileContent::Attachment(attach(&file.bytes, PDF_TYPE)))
            }
        },
        t if IMAGE_TYPES.contains(&t) => Ok(FileContent::Attachment(attach(&file.bytes, t))),
        other => Err(AppError::Validation(format!(
            "Type de fichier non supporté: {other}. Utilise un PDF, une image ou un fichier texte."
        ))),
    }
}

fn attach(bytes: &[u8], media_type: &str) -> Attachment {
    Attachment {
        media_type: media_type.to_string(),
        base64_data: STANDARD.encode(bytes),
    }
}

/// Shape the model answers with: skills come back as bare names.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ParsedResume {
    personal_info: Option<PersonalInfo>,
    #[serde(deserialize_with = "crate::lenient::list")]
    experiences: Vec<Experience>,
    #[serde(deserialize_with = "crate::lenient::list")]
    education: Vec<Education>,
    #[serde(deserialize_with = "crate::lenient::list")]
    skills: Vec<String>,
    #[serde(deserialize_with = "crate::lenient::list")]
    projects: Vec<Project>,
    #[serde(deserialize_with = "crate::lenient::list")]
    certifications: Vec<Certification>,
}

impl From<ParsedResume> for ResumeData {
    fn from(parsed: ParsedResume) -> Self {
        let mut resume = ResumeData {
            personal_info: parsed.personal_info.unwrap_or_default(),
            experiences: parsed.experiences,
            education: parsed.education,
            skills: Vec::new(),
            projects: parsed.projects,
            certifications: parsed.certifications,
        };
        resume.merge_skills(parsed.skills.into_iter().map(|name| Skill::new(name, "")));
        resume
    }
}

pub struct LlmResumeParser(pub LlmClient);

#[async_trait]
impl ResumeParser for LlmResumeParser {
    async fn parse_text(&self, text: &str) -> Result<ResumeData, AppError> {
        let prompt = prompts::parse_text_prompt(text);
        let parsed: ParsedResume = self
            .0
            .generate(&prompt, &prompts::resume_schema(), None)
            .await
            .map_err(|e| AppError::collaborator(PARSE_TEXT_FAILED, e))?;
        Ok(parsed.into())
    }

    async fn parse_file(&self, file: &ResumeFile) -> Result<ResumeData, AppError> {
        let content = prepare_file(file)?;
        info!(
            "Parsing résumé file {} ({}, {} bytes)",
            file.file_name,
            file.media_type,
            file.bytes.len()
        );

        let (prompt, attachment) = match &content {
            FileContent::Text(text) => (prompts::parse_file_prompt(Some(text)), None),
            FileContent::Attachment(att) => (prompts::parse_file_prompt(None), Some(att)),
        };
        let parsed: ParsedResume = self
            .0
            .generate(&prompt, &prompts::resume_schema(), attachment)
            .await
            .map_err(|e| AppError::collaborator(PARSE_FILE_FAILED, e))?;
        Ok(parsed.into())
    }
}

pub struct MockResumeParser;

#[async_trait]
impl ResumeParser for MockResumeParser {
    async fn parse_text(&self, _text: &str) -> Result<ResumeData, AppError> {
        let mut example = prefilled_example();
        example.personal_info.name = "Alex Tremblay (Exemple)".to_string();
        Ok(example)
    }

    async fn parse_file(&self, file: &ResumeFile) -> Result<ResumeData, AppError> {
        // Same input checks as the live parser, so unsupported files fail identically.
        prepare_file(file)?;
        Ok(prefilled_example())
    }
}

/// The structured version of [`PREFILLED_RESUME_TEXT`].
pub fn prefilled_example() -> ResumeData {
    let experience = |title: &str, company: &str, start: &str, end: &str, description: &str| {
        Experience {
            title: title.to_string(),
            company: company.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            description: description.to_string(),
        }
    };

    ResumeData {
        personal_info: PersonalInfo {
            name: "Alex Tremblay".to_string(),
            email: "alex.tremblay@email.com".to_string(),
            phone: "514-123-4567".to_string(),
            address: "123 Rue Principale, Montréal, QC".to_string(),
        },
        experiences: vec![
            experience(
                "Barista",
                "Café Central",
                "2020",
                "Présent",
                "Préparation des cafés, service à la clientèle et gestion de la caisse.",
            ),
            experience(
                "Vendeur",
                "Magasin de vêtements",
                "2018",
                "2019",
                "Conseils aux clients et gestion de l'inventaire.",
            ),
            experience(
                "Plongeur",
                "Restaurant",
                "Été",
                "Été",
                "Entretien de la vaisselle et de la cuisine pendant l'été.",
            ),
        ],
        education: vec![Education {
            degree: "DEC en Techniques de l'informatique".to_string(),
            institution: "Cégep du Vieux Montréal".to_string(),
            completion_date: "2018".to_string(),
        }],
        skills: ["Service à la clientèle", "Gestion du temps", "Microsoft Office", "Français", "Anglais"]
            .into_iter()
            .map(|name| Skill::new(name, ""))
            .collect(),
        projects: Vec::new(),
        certifications: Vec::new(),
    }
}
