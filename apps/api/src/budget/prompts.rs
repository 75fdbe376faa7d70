// Prompt for the budget narrative. Figures are pre-computed in Rust; the
// model only comments on them.

use crate::budget::models::BudgetData;
use crate::budget::summary::BudgetSummary;

pub const ANALYSIS_PROMPT_TEMPLATE: &str = "\
Tu es un conseiller financier bienveillant pour les jeunes adultes qui emménagent dans leur \
premier appartement. Analyse le budget mensuel suivant :

- Revenu Net: {income}$
- Total Dépenses: {total}$
- Balance: {balance}$

Détails des dépenses:
- Logement (Loyer, assurance, énergie): {housing}$
- Alimentation: {food}$
- Transport: {transport}$
- Communications: {communications}$
- Vie quotidienne: {daily_life}$
- Épargne/Imprévus: {emergency}$

Donne 3 conseils ou observations clés (positifs ou constructifs) sous forme de liste à puces \
pour aider ce jeune à réussir son autonomie financière. Sois concis et direct.";

fn money(v: f64) -> String {
    format!("{v:.2}")
}

pub fn analysis_prompt(budget: &BudgetData, summary: &BudgetSummary) -> String {
    let e = &budget.expenses;
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{income}", &money(budget.income))
        .replace("{total}", &money(summary.total_expenses))
        .replace("{balance}", &money(summary.balance))
        .replace("{housing}", &money(e.housing.total()))
        .replace("{food}", &money(e.food.total()))
        .replace("{transport}", &money(e.transport.total()))
        .replace("{communications}", &money(e.communications.total()))
        .replace("{daily_life}", &money(e.daily_life.total()))
        .replace("{emergency}", &money(e.emergency))
}
