//! Job-title → skill suggestions from a static French dictionary.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::resume::models::Skill;

struct DictionaryEntry {
    /// Alternative job titles, French and English.
    keywords: &'static [&'static str],
    skills: &'static [(&'static str, &'static str)],
}

const DICTIONARY: &[DictionaryEntry] = &[
    // Restauration
    DictionaryEntry {
        keywords: &["plongeur", "dishwasher"],
        skills: &[
            ("Gestion du temps", "Gérer plusieurs tâches simultanément dans un environnement rapide."),
            ("Travail d'équipe", "Collaborer avec le personnel de cuisine pour un service fluide."),
            ("Attention aux détails", "Assurer une propreté et une hygiène impeccables."),
            ("Endurance physique", "Capacité à travailler debout pendant de longues périodes."),
            ("Fiabilité", "Être ponctuel et assidu pour assurer le bon fonctionnement de la cuisine."),
        ],
    },
    DictionaryEntry {
        keywords: &["serveur", "serveuse", "waiter", "waitress"],
        skills: &[
            ("Service à la clientèle", "Fournir une expérience client positive et mémorable."),
            ("Communication", "Communiquer clairement avec les clients et le personnel."),
            ("Vente suggestive", "Proposer des plats ou des boissons pour améliorer l'expérience client."),
            ("Gestion du stress", "Rester calme et efficace pendant les périodes de pointe."),
            ("Multitâche", "Gérer plusieurs tables et demandes en même temps."),
        ],
    },
    DictionaryEntry {
        keywords: &["barista"],
        skills: &[
            ("Connaissance du café", "Comprendre les différents types de café et méthodes de préparation."),
            ("Service à la clientèle", "Accueillir les clients et prendre les commandes de manière amicale."),
            ("Rapidité d'exécution", "Préparer les boissons rapidement tout en maintenant la qualité."),
            ("Gestion de caisse", "Traiter les paiements de manière précise."),
            ("Propreté", "Maintenir un espace de travail propre et organisé."),
        ],
    },
    DictionaryEntry {
        keywords: &["cuisinier", "cuisinière", "cook"],
        skills: &[
            ("Préparation des aliments", "Suivre des recettes pour préparer les plats selon les normes."),
            ("Sécurité alimentaire", "Connaître et appliquer les normes d'hygiène (MAPAQ)."),
            ("Gestion de l'inventaire", "Aider à suivre les stocks et à minimiser le gaspillage."),
            ("Travail sous pression", "Gérer les commandes efficacement pendant les heures de pointe."),
            ("Collaboration", "Travailler en étroite collaboration avec les autres membres de la cuisine."),
        ],
    },
    // Commerce de détail
    DictionaryEntry {
        keywords: &["caissier", "caissière", "cashier"],
        skills: &[
            ("Gestion de caisse", "Traiter les transactions (argent, débit, crédit) avec précision."),
            ("Service à la clientèle", "Accueillir les clients et répondre à leurs questions."),
            ("Résolution de problèmes", "Gérer les retours ou les problèmes de prix de manière professionnelle."),
            ("Fiabilité", "Être ponctuel et digne de confiance avec la gestion de l'argent."),
            ("Souci du détail", "S'assurer que les transactions sont correctes et que le tiroir-caisse balance."),
        ],
    },
    DictionaryEntry {
        keywords: &["commis d'étalage", "marchandiseur", "stock clerk"],
        skills: &[
            ("Organisation", "Placer les produits de manière logique et attrayante."),
            ("Gestion des stocks", "Recevoir, déballer et vérifier la marchandise."),
            ("Autonomie", "Travailler de manière indépendante pour maintenir les étagères pleines."),
            ("Rapidité", "Remplir les tablettes rapidement pour assurer la disponibilité des produits."),
            ("Endurance physique", "Soulever et déplacer des boîtes et des produits."),
        ],
    },
    DictionaryEntry {
        keywords: &["vendeur", "vendeuse", "sales associate"],
        skills: &[
            ("Conseil client", "Aider les clients à trouver les produits qui répondent à leurs besoins."),
            ("Communication interpersonnelle", "Établir une relation de confiance avec les clients."),
            ("Connaissance des produits", "Apprendre et présenter les caractéristiques des produits."),
            ("Atteinte des objectifs", "Travailler pour atteindre les objectifs de vente personnels et d'équipe."),
            ("Présentation visuelle", "Maintenir l'apparence du magasin propre et attrayante."),
        ],
    },
    // Gardiennage et animation
    DictionaryEntry {
        keywords: &["gardien", "gardienne", "babysitter"],
        skills: &[
            ("Sens des responsabilités", "Assurer la sécurité et le bien-être des enfants."),
            ("Patience", "Gérer les comportements des enfants avec calme et compréhension."),
            ("Créativité", "Organiser des activités amusantes et adaptées à l'âge des enfants."),
            ("Premiers soins", "Connaissances de base en premiers soins et en RCR (un atout)."),
            ("Communication avec les parents", "Faire un rapport clair aux parents sur le déroulement de la garde."),
        ],
    },
    DictionaryEntry {
        keywords: &["moniteur de camp", "animatrice de camp", "camp counselor"],
        skills: &[
            ("Leadership", "Guider et motiver un groupe d'enfants."),
            ("Animation de groupe", "Planifier et diriger des jeux, des sports et des activités."),
            ("Gestion de conflits", "Aider à résoudre les désaccords entre les enfants de manière constructive."),
            ("Énergie et enthousiasme", "Créer une atmosphère positive et engageante."),
            ("Adaptabilité", "Ajuster les plans en fonction de la météo ou de l'humeur du groupe."),
        ],
    },
    // Autres
    DictionaryEntry {
        keywords: &["commis d'entrepôt", "warehouse worker"],
        skills: &[
            ("Manutention", "Charger, décharger et déplacer des matériaux manuellement ou avec de l'équipement."),
            ("Logistique", "Préparer et emballer les commandes pour l'expédition."),
            ("Souci de la sécurité", "Respecter les normes de sécurité pour prévenir les accidents."),
            ("Précision", "Vérifier l'exactitude des commandes et des inventaires."),
            ("Travail d'équipe", "Coordonner avec les autres membres de l'équipe pour respecter les délais."),
        ],
    },
];

/// Whole-word, case-insensitive pattern per entry, allowing a plural `s`.
fn compiled() -> &'static [(Regex, &'static DictionaryEntry)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static DictionaryEntry)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        DICTIONARY
            .iter()
            .filter_map(|entry| {
                let alternatives: Vec<String> =
                    entry.keywords.iter().map(|k| regex::escape(k)).collect();
                let pattern = format!(r"\b({})s?\b", alternatives.join("|"));
                match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                    Ok(re) => Some((re, entry)),
                    Err(e) => {
                        warn!("Skipping skill dictionary entry {:?}: {e}", entry.keywords);
                        None
                    }
                }
            })
            .collect()
    })
}

/// Skills suggested by the job titles mentioned in `text`, in dictionary
/// order. A skill reached through several titles is listed once, with the
/// description of its first occurrence.
pub fn detect_skills_from_text(text: &str) -> Vec<Skill> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut found: Vec<Skill> = Vec::new();
    for (re, entry) in compiled() {
        if !re.is_match(text) {
            continue;
        }
        for (name, description) in entry.skills {
            if !found.iter().any(|s| s.name == *name) {
                found.push(Skill::new(*name, *description));
            }
        }
    }
    found
}
