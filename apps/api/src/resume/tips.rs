use std::collections::HashSet;

use crate::resume::models::ResumeData;

const DIGITAL_SKILLS: &[&str] = &["microsoft office", "google suite", "excel", "word", "courriel"];
const SOFT_SKILLS: &[&str] = &[
    "travail d'équipe",
    "communication",
    "résolution de problèmes",
    "adaptabilité",
    "gestion du temps",
];
const LANGUAGE_SKILLS: &[&str] = &["français", "anglais", "bilingue"];
const MIN_SOFT_SKILLS: usize = 2;

pub const DIGITAL_TIP: &str = "Pense à ajouter des compétences numériques comme 'Microsoft Office' \
    ou 'Google Suite'. Elles sont utiles dans presque tous les domaines !";
pub const SOFT_SKILLS_TIP: &str = "Les employeurs adorent les 'soft skills' ! Assure-toi d'inclure \
    des compétences comme 'Communication', 'Travail d'équipe' ou 'Résolution de problèmes'.";
pub const LANGUAGE_TIP: &str = "N'oublie pas de mentionner les langues que tu parles, comme \
    'Français' ou 'Anglais'. C'est une information très importante.";

/// Advice based on which common skill families the résumé is missing.
/// Nothing is suggested until at least one experience exists.
pub fn contextual_tips(resume: &ResumeData) -> Vec<&'static str> {
    if resume.experiences.is_empty() {
        return Vec::new();
    }

    let owned: HashSet<String> = resume
        .skills
        .iter()
        .map(|s| s.name.trim().to_lowercase())
        .collect();

    let mut tips = Vec::new();

    // "Microsoft" alone counts for "microsoft office", and so on.
    let has_digital = DIGITAL_SKILLS.iter().any(|skill| {
        owned.contains(*skill)
            || skill
                .split(' ')
                .next()
                .is_some_and(|first| owned.contains(first))
    });
    if !has_digital {
        tips.push(DIGITAL_TIP);
    }

    let soft_count = SOFT_SKILLS.iter().filter(|s| owned.contains(**s)).count();
    if soft_count < MIN_SOFT_SKILLS {
        tips.push(SOFT_SKILLS_TIP);
    }

    if !LANGUAGE_SKILLS.iter().any(|s| owned.contains(*s)) {
        tips.push(LANGUAGE_TIP);
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::{Experience, Skill};

    fn resume_with(skills: &[&str]) -> ResumeData {
        ResumeData {
            experiences: vec![Experience::default()],
            skills: skills.iter().map(|s| Skill::new(*s, "")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_experience_no_tips() {
        assert!(contextual_tips(&ResumeData::default()).is_empty());
    }

    #[test]
    fn test_empty_skills_get_all_three_tips() {
        let tips = contextual_tips(&resume_with(&[]));
        assert_eq!(tips, vec![DIGITAL_TIP, SOFT_SKILLS_TIP, LANGUAGE_TIP]);
    }

    #[test]
    fn test_complete_profile_gets_no_tips() {
        let tips = contextual_tips(&resume_with(&[
            "Microsoft",
            "Communication",
            "Gestion du temps",
            "Bilingue",
        ]));
        assert!(tips.is_empty());
    }

    #[test]
    fn test_single_soft_skill_is_not_enough() {
        let tips = contextual_tips(&resume_with(&["Excel", "Communication", "Anglais"]));
        assert_eq!(tips, vec![SOFT_SKILLS_TIP]);
    }
}
