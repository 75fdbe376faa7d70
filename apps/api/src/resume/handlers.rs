use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::resume::models::{Experience, MoveDirection, PersonalInfo, ResumeData, Skill};
use crate::resume::parser::ResumeFile;
use crate::resume::skills::detect_skills_from_text;
use crate::resume::tips::contextual_tips;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SkillNameRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct AddSkillResponse {
    pub added: bool,
    pub skills: Vec<Skill>,
}

#[derive(Deserialize)]
pub struct ToggleSkillRequest {
    pub skill: Skill,
    pub selected: bool,
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct TipsResponse {
    pub tips: Vec<&'static str>,
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

fn out_of_range(index: usize) -> AppError {
    AppError::Validation(format!("Aucune expérience à la position {index}."))
}

/// PUT /api/v1/resume
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Json(mut resume): Json<ResumeData>,
) -> Json<ResumeData> {
    let skills = std::mem::take(&mut resume.skills);
    resume.merge_skills(skills);
    state.journey.set_resume(resume.clone());
    Json(resume)
}

/// PUT /api/v1/resume/personal-info
pub async fn handle_put_personal_info(
    State(state): State<AppState>,
    Json(info): Json<PersonalInfo>,
) -> Json<PersonalInfo> {
    state
        .journey
        .update(|s| s.resume_data.personal_info = info.clone());
    Json(info)
}

/// POST /api/v1/resume/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillNameRequest>,
) -> Result<Json<AddSkillResponse>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Le nom de la compétence est vide.".to_string(),
        ));
    }
    let added = state.journey.try_update(|s| {
        if s.resume_data.add_skill(&req.name) {
            Ok(())
        } else {
            Err(())
        }
    });
    Ok(Json(AddSkillResponse {
        added: added.is_ok(),
        skills: state.journey.read(|s| s.resume_data.skills.clone()),
    }))
}

/// POST /api/v1/resume/skills/toggle
pub async fn handle_toggle_skill(
    State(state): State<AppState>,
    Json(req): Json<ToggleSkillRequest>,
) -> Json<Vec<Skill>> {
    let skills = state.journey.update(|s| {
        s.resume_data.toggle_skill(req.skill, req.selected);
        s.resume_data.skills.clone()
    });
    Json(skills)
}

/// POST /api/v1/resume/skills/detect
pub async fn handle_detect_skills(Json(req): Json<TextRequest>) -> Json<Vec<Skill>> {
    Json(detect_skills_from_text(&req.text))
}

/// GET /api/v1/resume/tips
pub async fn handle_tips(State(state): State<AppState>) -> Json<TipsResponse> {
    Json(TipsResponse {
        tips: state.journey.read(|s| contextual_tips(&s.resume_data)),
    })
}

/// POST /api/v1/resume/experiences
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Json(experience): Json<Experience>,
) -> Json<Vec<Experience>> {
    let experiences = state.journey.update(|s| {
        s.resume_data.experiences.push(experience);
        s.resume_data.experiences.clone()
    });
    Json(experiences)
}

/// PUT /api/v1/resume/experiences/:index
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(experience): Json<Experience>,
) -> Result<Json<Vec<Experience>>, AppError> {
    let experiences = state.journey.try_update(|s| {
        let slot = s
            .resume_data
            .experiences
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))?;
        *slot = experience;
        Ok::<_, AppError>(s.resume_data.experiences.clone())
    })?;
    Ok(Json(experiences))
}

/// DELETE /api/v1/resume/experiences/:index
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Vec<Experience>>, AppError> {
    let experiences = state.journey.try_update(|s| {
        if index >= s.resume_data.experiences.len() {
            return Err(out_of_range(index));
        }
        s.resume_data.experiences.remove(index);
        Ok(s.resume_data.experiences.clone())
    })?;
    Ok(Json(experiences))
}

/// POST /api/v1/resume/experiences/:index/move
///
/// Moving past either end is a no-op, not an error.
pub async fn handle_move_experience(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<Vec<Experience>>, AppError> {
    let len = state.journey.read(|s| s.resume_data.experiences.len());
    if index >= len {
        return Err(out_of_range(index));
    }
    let moved = state.journey.try_update(|s| {
        if s.resume_data.move_experience(index, req.direction) {
            Ok(())
        } else {
            Err(())
        }
    });
    if moved.is_err() {
        info!("Experience {index} already at the edge, nothing to move");
    }
    Ok(Json(state.journey.read(|s| s.resume_data.experiences.clone())))
}

/// POST /api/v1/resume/experiences/:index/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let description = state
        .journey
        .read(|s| {
            s.resume_data
                .experiences
                .get(index)
                .map(|e| e.description.clone())
        })
        .ok_or_else(|| out_of_range(index))?;
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "Décris d'abord tes tâches pour obtenir des suggestions.".to_string(),
        ));
    }

    let suggestions = state
        .collaborators
        .suggestion_writer
        .suggest(&description)
        .await?;
    Ok(Json(SuggestionsResponse { suggestions }))
}

/// POST /api/v1/resume/experiences/:index/apply-suggestion
pub async fn handle_apply_suggestion(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<TextRequest>,
) -> Result<Json<Vec<Experience>>, AppError> {
    let experiences = state.journey.try_update(|s| {
        let experience = s
            .resume_data
            .experiences
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))?;
        experience.description = req.text;
        Ok::<_, AppError>(s.resume_data.experiences.clone())
    })?;
    Ok(Json(experiences))
}

/// POST /api/v1/resume/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ResumeData>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Écris quelques phrases sur ton parcours avant de lancer l'analyse.".to_string(),
        ));
    }
    let parsed = state.collaborators.resume_parser.parse_text(&req.text).await?;
    // Merged into whatever the state holds now, not what it held before the call.
    let merged = state.journey.update(|s| {
        s.resume_data.merge_parsed(parsed);
        s.resume_data.clone()
    });
    Ok(Json(merged))
}

/// POST /api/v1/resume/parse-file (multipart, field `file`)
pub async fn handle_parse_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeData>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Formulaire invalide: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("cv").to_string();
        let media_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Lecture du fichier impossible: {e}")))?;
        upload = Some(ResumeFile {
            file_name,
            media_type,
            bytes,
        });
    }
    let file = upload.ok_or_else(|| AppError::Validation("Aucun fichier reçu.".to_string()))?;

    let parsed = state.collaborators.resume_parser.parse_file(&file).await?;
    let merged = state.journey.update(|s| {
        s.resume_data.merge_parsed(parsed);
        s.resume_data.clone()
    });
    Ok(Json(merged))
}
