use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes an amount, coercing anything that is not a finite
/// non-negative number (strings, null, negatives) to 0.
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(sanitize_amount(raw.as_f64().unwrap_or(0.0)))
}

/// Invalid amounts become 0.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Housing {
    #[serde(deserialize_with = "amount")]
    pub rent: f64,
    #[serde(deserialize_with = "amount")]
    pub insurance: f64,
    #[serde(deserialize_with = "amount")]
    pub electricity: f64,
    #[serde(deserialize_with = "amount")]
    pub heating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Food {
    #[serde(deserialize_with = "amount")]
    pub groceries: f64,
    #[serde(deserialize_with = "amount")]
    pub restaurants: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transport {
    #[serde(deserialize_with = "amount")]
    pub public_transport: f64,
    #[serde(deserialize_with = "amount")]
    pub gas: f64,
    #[serde(deserialize_with = "amount")]
    pub insurance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Communications {
    #[serde(deserialize_with = "amount")]
    pub internet: f64,
    #[serde(deserialize_with = "amount")]
    pub mobile: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyLife {
    #[serde(deserialize_with = "amount")]
    pub clothing: f64,
    #[serde(deserialize_with = "amount")]
    pub personal_care: f64,
    #[serde(deserialize_with = "amount")]
    pub entertainment: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Expenses {
    pub housing: Housing,
    pub food: Food,
    pub transport: Transport,
    pub communications: Communications,
    pub daily_life: DailyLife,
    #[serde(deserialize_with = "amount")]
    pub emergency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupCosts {
    #[serde(deserialize_with = "amount")]
    pub furniture: f64,
    #[serde(deserialize_with = "amount")]
    pub deposit: f64,
    #[serde(deserialize_with = "amount")]
    pub moving: f64,
    #[serde(deserialize_with = "amount")]
    pub utilities: f64,
}

/// Monthly budget. Every amount is non-negative; derived totals live in
/// [`crate::budget::summary`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetData {
    #[serde(deserialize_with = "amount")]
    pub income: f64,
    pub expenses: Expenses,
    pub startup_costs: StartupCosts,
}

impl Housing {
    pub fn total(&self) -> f64 {
        self.rent + self.insurance + self.electricity + self.heating
    }
}

impl Food {
    pub fn total(&self) -> f64 {
        self.groceries + self.restaurants
    }
}

impl Transport {
    pub fn total(&self) -> f64 {
        self.public_transport + self.gas + self.insurance
    }
}

impl Communications {
    pub fn total(&self) -> f64 {
        self.internet + self.mobile
    }
}

impl DailyLife {
    pub fn total(&self) -> f64 {
        self.clothing + self.personal_care + self.entertainment
    }
}

impl StartupCosts {
    pub fn total(&self) -> f64 {
        self.furniture + self.deposit + self.moving + self.utilities
    }
}

impl BudgetData {
    pub fn is_complete(&self) -> bool {
        self.income > 0.0
    }

    /// Re-applies the non-negative invariant to values built in code rather
    /// than deserialized.
    pub fn sanitized(mut self) -> Self {
        let e = &mut self.expenses;
        for v in [
            &mut self.income,
            &mut e.housing.rent,
            &mut e.housing.insurance,
            &mut e.housing.electricity,
            &mut e.housing.heating,
            &mut e.food.groceries,
            &mut e.food.restaurants,
            &mut e.transport.public_transport,
            &mut e.transport.gas,
            &mut e.transport.insurance,
            &mut e.communications.internet,
            &mut e.communications.mobile,
            &mut e.daily_life.clothing,
            &mut e.daily_life.personal_care,
            &mut e.daily_life.entertainment,
            &mut e.emergency,
            &mut self.startup_costs.furniture,
            &mut self.startup_costs.deposit,
            &mut self.startup_costs.moving,
            &mut self.startup_costs.utilities,
        ] {
            *v = sanitize_amount(*v);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_amounts_coerce_to_zero() {
        let budget: BudgetData = serde_json::from_value(json!({
            "income": "beaucoup",
            "expenses": {
                "housing": {"rent": -300, "heating": null, "electricity": 60},
                "emergency": 50
            }
        }))
        .unwrap();
        assert_eq!(budget.income, 0.0);
        assert_eq!(budget.expenses.housing.rent, 0.0);
        assert_eq!(budget.expenses.housing.heating, 0.0);
        assert_eq!(budget.expenses.housing.electricity, 60.0);
        assert_eq!(budget.expenses.emergency, 50.0);
        assert_eq!(budget.startup_costs, StartupCosts::default());
    }

    #[test]
    fn test_sanitized_clamps_negative_and_nan() {
        let mut budget = BudgetData::default();
        budget.income = f64::NAN;
        budget.expenses.food.groceries = -10.0;
        budget.expenses.food.restaurants = 40.0;
        let budget = budget.sanitized();
        assert_eq!(budget.income, 0.0);
        assert_eq!(budget.expenses.food.groceries, 0.0);
        assert_eq!(budget.expenses.food.restaurants, 40.0);
    }

    #[test]
    fn test_camel_case_wire_keys() {
        let json = serde_json::to_value(BudgetData::default()).unwrap();
        assert!(json["expenses"]["dailyLife"]["personalCare"].is_number());
        assert!(json["expenses"]["transport"]["publicTransport"].is_number());
        assert!(json["startupCosts"]["deposit"].is_number());
    }
}
