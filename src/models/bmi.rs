use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BmiEntry {
    pub date: DateTime<Utc>,
    pub bmi: f64,
    pub weight: f64,
    pub height: f64,
}

/// Form input for a BMI calculation, height in cm and weight in kg.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, Copy, Default)]
pub struct BmiInput {
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height: Option<f64>,

    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight: Option<f64>,
}

// PUT /users/bmi
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BmiUpdate {
    pub height: f64,
    pub weight: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    Normal,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BmiReading {
    pub bmi: f64,
    pub category: BmiCategory,
    pub height: f64,
    pub weight: f64,
}
