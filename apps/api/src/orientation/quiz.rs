//! The 18-statement RIASEC interest quiz and its scoring.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

/// Letters in canonical RIASEC order; ties between scores follow it.
pub const RIASEC_LETTERS: [&str; 6] = ["R", "I", "A", "S", "E", "C"];
const MAX_DOMINANT: usize = 3;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub letter: &'static str,
    pub text: &'static str,
}

const fn q(id: &'static str, letter: &'static str, text: &'static str) -> Question {
    Question { id, letter, text }
}

pub const QUESTIONS: [Question; 18] = [
    q("R1", "R", "J'aime utiliser des outils et des machines pour réparer ou construire."),
    q("R2", "R", "Je préfère le travail physique et les activités de plein air."),
    q("R3", "R", "Je suis réaliste, pratique et j'aime voir des résultats concrets."),
    q("I1", "I", "J'aime comprendre comment les choses fonctionnent et résoudre des problèmes complexes."),
    q("I2", "I", "Je suis curieux et j'aime apprendre de nouvelles choses en sciences ou mathématiques."),
    q("I3", "I", "Je préfère analyser une situation avant d'agir."),
    q("A1", "A", "J'ai beaucoup d'imagination et j'aime créer des choses originales."),
    q("A2", "A", "J'aime les activités artistiques (musique, écriture, dessin, théâtre)."),
    q("A3", "A", "Je suis expressif et j'aime sortir des sentiers battus."),
    q("S1", "S", "J'aime aider les autres, enseigner ou soigner."),
    q("S2", "S", "Je préfère travailler en équipe et échanger avec des gens."),
    q("S3", "S", "Je suis à l'écoute et sensible aux besoins de mon entourage."),
    q("E1", "E", "J'aime diriger, influencer ou convaincre les autres."),
    q("E2", "E", "J'ai de l'ambition et j'aime lancer des projets."),
    q("E3", "E", "Je suis énergique et j'aime prendre des décisions."),
    q("C1", "C", "J'aime quand les choses sont bien organisées et structurées."),
    q("C2", "C", "Je suis précis, méthodique et j'aime suivre des règles claires."),
    q("C3", "C", "J'aime travailler avec des chiffres, des données ou de la paperasse."),
];

/// Counts selected statements per letter. Every letter is present in the
/// result; unknown ids are ignored and repeated ids count once.
pub fn score_answers<S: AsRef<str>>(selected: &[S]) -> BTreeMap<String, u32> {
    let mut scores: BTreeMap<String, u32> =
        RIASEC_LETTERS.iter().map(|l| (l.to_string(), 0)).collect();

    let unique: HashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
    for question in QUESTIONS.iter().filter(|q| unique.contains(q.id)) {
        if let Some(count) = scores.get_mut(question.letter) {
            *count += 1;
        }
    }
    scores
}

/// Up to three highest-scoring letters, zero scores excluded.
pub fn dominant_letters(scores: &BTreeMap<String, u32>) -> Vec<String> {
    let mut ranked: Vec<(usize, &str, u32)> = RIASEC_LETTERS
        .iter()
        .enumerate()
        .map(|(order, letter)| (order, *letter, scores.get(*letter).copied().unwrap_or(0)))
        .filter(|(_, _, score)| *score > 0)
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(MAX_DOMINANT)
        .map(|(_, letter, _)| letter.to_string())
        .collect()
}

pub fn is_riasec_letter(letter: &str) -> bool {
    RIASEC_LETTERS.contains(&letter)
}
