use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PlanKind {
    Recommendations,
    MealPlan,
    WorkoutPlan,
}

impl PlanKind {
    /// Key under which the structured form of this plan arrives.
    pub fn structured_key(self) -> &'static str {
        match self {
            PlanKind::Recommendations => "recommendations",
            PlanKind::MealPlan => "mealPlan",
            PlanKind::WorkoutPlan => "workoutPlan",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            PlanKind::Recommendations => "No recommendations available.",
            PlanKind::MealPlan => "No meal plan available.",
            PlanKind::WorkoutPlan => "No workout plan available.",
        }
    }
}

/// A plan is either the kind-specific structure or a single block of text.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "form", content = "content", rename_all = "camelCase")]
pub enum PlanView<T> {
    Structured(Vec<T>),
    RawText(String),
}

impl<T> PlanView<T> {
    pub fn entries(&self) -> &[T] {
        match self {
            PlanView::Structured(entries) => entries,
            PlanView::RawText(_) => &[],
        }
    }

    pub fn raw_text(&self) -> Option<&str> {
        match self {
            PlanView::Structured(_) => None,
            PlanView::RawText(text) => Some(text),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "plan", rename_all = "camelCase")]
pub enum NormalizedPlan {
    Recommendations(PlanView<AdviceSection>),
    MealPlan(PlanView<MealDay>),
    WorkoutPlan(PlanView<WorkoutDay>),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceSection {
    pub key: String,
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealDay {
    pub day: String,
    pub label: String,
    pub meals: Vec<MealSlot>,
    pub total_calories: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    pub meal_type: String,
    pub items: Vec<MealItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MealItem {
    pub name: Option<String>,
    pub calories: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDay {
    pub day: String,
    pub label: String,
    pub workout_type: Option<String>,
    pub duration_minutes: Option<f64>,
    pub exercises: Vec<Exercise>,
    pub estimated_calories: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: Option<String>,
    pub sets: Option<String>,
    pub reps: Option<String>,
    pub rest: Option<String>,
    pub detail: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    General,
    Nutrition,
    Fitness,
}

// POST /ai/recommendations
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub focus: Focus,
    #[serde(default)]
    pub preferences: String,
}

pub const DEFAULT_PLAN_DAYS: u32 = 7;

fn default_plan_days() -> u32 {
    DEFAULT_PLAN_DAYS
}

fn default_equipment() -> Vec<String> {
    vec!["bodyweight".to_string(), "dumbbells".to_string()]
}

// POST /ai/meal-plan
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MealPlanRequest {
    #[serde(default)]
    pub preferences: String,
    #[serde(default = "default_plan_days")]
    pub duration: u32,
}

impl Default for MealPlanRequest {
    fn default() -> Self {
        MealPlanRequest {
            preferences: String::new(),
            duration: DEFAULT_PLAN_DAYS,
        }
    }
}

// POST /ai/workout-plan
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutPlanRequest {
    #[serde(default)]
    pub preferences: String,
    #[serde(default = "default_plan_days")]
    pub duration: u32,
    #[serde(default = "default_equipment")]
    pub equipment: Vec<String>,
}

impl Default for WorkoutPlanRequest {
    fn default() -> Self {
        WorkoutPlanRequest {
            preferences: String::new(),
            duration: DEFAULT_PLAN_DAYS,
            equipment: default_equipment(),
        }
    }
}
