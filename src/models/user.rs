use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{known_tags, lenient_f64, lenient_tag, lenient_u32};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    #[default]
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    WeightGain,
    MuscleGain,
    MaintainWeight,
    ImproveFitness,
    ImproveHealth,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
    Halal,
    Kosher,
}

/// Profile as the upstream stores it. Blank values and tags outside the
/// known lists read as absent rather than failing the whole profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_tag")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_tag")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(rename = "currentBMI", default, deserialize_with = "lenient_f64")]
    pub current_bmi: Option<f64>,
    #[serde(default, deserialize_with = "known_tags")]
    pub goals: Vec<Goal>,
    #[serde(default, deserialize_with = "known_tags")]
    pub dietary_restrictions: Vec<DietaryRestriction>,
}

// Registration form as entered; `confirm_password` never leaves the process.
// Optional fields left empty in the form arrive as "".
#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    #[serde(default, deserialize_with = "lenient_u32")]
    #[validate(range(min = 1, max = 150, message = "Age must be between 1 and 150"))]
    pub age: Option<u32>,

    #[serde(default, deserialize_with = "lenient_tag")]
    pub gender: Option<Gender>,

    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight: Option<f64>,

    #[serde(default)]
    pub activity_level: ActivityLevel,

    #[serde(default, deserialize_with = "known_tags")]
    pub goals: Vec<Goal>,

    #[serde(default, deserialize_with = "known_tags")]
    pub dietary_restrictions: Vec<DietaryRestriction>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub activity_level: ActivityLevel,
    pub goals: Vec<Goal>,
    pub dietary_restrictions: Vec<DietaryRestriction>,
}

impl From<RegisterForm> for RegisterRequest {
    fn from(form: RegisterForm) -> Self {
        let mut goals = form.goals;
        dedup_in_order(&mut goals);
        let mut dietary_restrictions = form.dietary_restrictions;
        dedup_in_order(&mut dietary_restrictions);

        RegisterRequest {
            name: form.name,
            email: form.email,
            password: form.password,
            age: form.age,
            gender: form.gender,
            height: form.height,
            weight: form.weight,
            activity_level: form.activity_level,
            goals,
            dietary_restrictions,
        }
    }
}

// Tag lists are sets; keep the first occurrence of each tag.
fn dedup_in_order<T: PartialEq + Copy>(tags: &mut Vec<T>) {
    let mut seen: Vec<T> = Vec::with_capacity(tags.len());
    tags.retain(|tag| {
        if seen.contains(tag) {
            false
        } else {
            seen.push(*tag);
            true
        }
    });
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
