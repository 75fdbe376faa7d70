use serde::{Deserialize, Serialize};

/// Note attached to skills the user types in by hand.
pub const MANUAL_SKILL_NOTE: &str = "Compétence ajoutée manuellement";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub completion_date: String,
}

/// A skill with a free-text note. Names are unique case-insensitively
/// within a résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub description: String,
}

impl Skill {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

/// Direction for reordering an experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

impl ResumeData {
    pub fn is_complete(&self) -> bool {
        !self.personal_info.name.trim().is_empty()
    }

    pub fn has_skill(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.skills.iter().any(|s| s.name.to_lowercase() == needle)
    }

    /// Adds a manually typed skill. Returns `false` when the name is blank or
    /// already present (case-insensitive).
    pub fn add_skill(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.has_skill(trimmed) {
            return false;
        }
        self.skills.push(Skill::new(trimmed, MANUAL_SKILL_NOTE));
        true
    }

    /// Selecting adds the skill unless one with the exact same name exists;
    /// deselecting removes every skill with that exact name.
    pub fn toggle_skill(&mut self, skill: Skill, selected: bool) {
        if selected {
            if !self.skills.iter().any(|s| s.name == skill.name) {
                self.skills.push(skill);
            }
        } else {
            self.skills.retain(|s| s.name != skill.name);
        }
    }

    /// Appends skills that are not already present (case-insensitive), keeping order.
    pub fn merge_skills(&mut self, incoming: impl IntoIterator<Item = Skill>) {
        for skill in incoming {
            if !skill.name.trim().is_empty() && !self.has_skill(&skill.name) {
                self.skills.push(skill);
            }
        }
    }

    /// Folds a model-parsed résumé into this one. Personal info typed by the
    /// user wins over the parse; experiences and education come from the parse.
    pub fn merge_parsed(&mut self, parsed: ResumeData) {
        let info = &mut self.personal_info;
        fill_blank(&mut info.name, parsed.personal_info.name);
        fill_blank(&mut info.email, parsed.personal_info.email);
        fill_blank(&mut info.phone, parsed.personal_info.phone);
        fill_blank(&mut info.address, parsed.personal_info.address);

        self.experiences = parsed.experiences;
        self.education = parsed.education;
        self.merge_skills(parsed.skills);
        if !parsed.projects.is_empty() {
            self.projects = parsed.projects;
        }
        if !parsed.certifications.is_empty() {
            self.certifications = parsed.certifications;
        }
    }

    /// Swaps an experience with its neighbour. Returns `false` if out of range
    /// or already at the edge.
    pub fn move_experience(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.experiences.len() => index + 1,
            _ => return false,
        };
        if index >= self.experiences.len() {
            return false;
        }
        self.experiences.swap(index, target);
        true
    }
}

fn fill_blank(current: &mut String, candidate: String) {
    if current.trim().is_empty() {
        *current = candidate;
    }
}
