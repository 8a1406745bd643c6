//! Turns AI plan payloads into render-ready view models.
//!
//! A payload arrives either with its kind-specific structured key
//! (`recommendations`, `mealPlan`, `workoutPlan`) or as free text under
//! `rawResponse`. [`detect`] settles which form it is; the per-kind functions
//! then walk the structure, skipping any sub-entry that does not have the
//! expected shape. Nothing here fails and nothing performs I/O.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::models::number_from;
use crate::models::plan::{
    AdviceSection, Exercise, MealDay, MealItem, MealSlot, NormalizedPlan, PlanKind, PlanView,
    WorkoutDay,
};

const RAW_TEXT_KEY: &str = "rawResponse";

/// The two shapes a payload can take, borrowed from the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanForm<'a> {
    Structured(&'a Map<String, Value>),
    RawText(Cow<'a, str>),
}

pub fn detect(kind: PlanKind, payload: &Value) -> PlanForm<'_> {
    if let Some(structured) = payload
        .get(kind.structured_key())
        .and_then(Value::as_object)
        .filter(|map| !map.is_empty())
    {
        return PlanForm::Structured(structured);
    }

    match payload.get(RAW_TEXT_KEY).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => PlanForm::RawText(Cow::Borrowed(text)),
        _ => PlanForm::RawText(Cow::Borrowed(kind.placeholder())),
    }
}

pub fn normalize(kind: PlanKind, payload: &Value) -> NormalizedPlan {
    match kind {
        PlanKind::Recommendations => NormalizedPlan::Recommendations(recommendations(payload)),
        PlanKind::MealPlan => NormalizedPlan::MealPlan(meal_plan(payload)),
        PlanKind::WorkoutPlan => NormalizedPlan::WorkoutPlan(workout_plan(payload)),
    }
}

pub fn recommendations(payload: &Value) -> PlanView<AdviceSection> {
    collect(detect(PlanKind::Recommendations, payload), |map| advice_sections(map))
}

pub fn meal_plan(payload: &Value) -> PlanView<MealDay> {
    collect(detect(PlanKind::MealPlan, payload), |map| meal_days(map))
}

pub fn workout_plan(payload: &Value) -> PlanView<WorkoutDay> {
    collect(detect(PlanKind::WorkoutPlan, payload), |map| workout_days(map))
}

fn collect<'a, T, I, F>(form: PlanForm<'a>, walk: F) -> PlanView<T>
where
    F: FnOnce(&'a Map<String, Value>) -> I,
    I: Iterator<Item = T>,
{
    match form {
        PlanForm::Structured(map) => PlanView::Structured(walk(map).collect()),
        PlanForm::RawText(text) => PlanView::RawText(text.into_owned()),
    }
}

/// Category sections in payload order. Categories whose value is not a list
/// are skipped.
pub fn advice_sections(map: &Map<String, Value>) -> impl Iterator<Item = AdviceSection> + '_ {
    map.iter().filter_map(|(key, value)| {
        let items = value.as_array()?;
        Some(AdviceSection {
            key: key.clone(),
            title: key.replace('_', " "),
            items: items.iter().filter_map(text_of).collect(),
        })
    })
}

pub fn meal_days(map: &Map<String, Value>) -> impl Iterator<Item = MealDay> + '_ {
    map.iter().filter_map(|(day, value)| {
        let entry = value.as_object()?;
        let meals = entry
            .get("meals")
            .and_then(Value::as_object)
            .map(|meals| {
                meals
                    .iter()
                    .filter_map(|(meal_type, meal)| {
                        Some(MealSlot {
                            meal_type: meal_type.clone(),
                            items: one_or_many(meal)?.into_iter().map(meal_item).collect(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(MealDay {
            day: day.clone(),
            label: day_label(day, entry),
            meals,
            total_calories: entry.get("totalCalories").and_then(number_from),
        })
    })
}

pub fn workout_days(map: &Map<String, Value>) -> impl Iterator<Item = WorkoutDay> + '_ {
    map.iter().filter_map(|(day, value)| {
        let entry = value.as_object()?;
        let workout_type = entry.get("type").and_then(text_of);
        let label = match &workout_type {
            Some(kind) => format!("{} - {}", day_label(day, entry), kind),
            None => day_label(day, entry),
        };
        let exercises = entry
            .get("mainWorkout")
            .or_else(|| entry.get("exercises"))
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(exercise).collect())
            .unwrap_or_default();

        Some(WorkoutDay {
            day: day.clone(),
            label,
            workout_type,
            duration_minutes: entry.get("duration").and_then(number_from),
            exercises,
            estimated_calories: entry.get("estimatedCalories").and_then(number_from),
        })
    })
}

// A meal is either a single item or a list of items; both become a list here.
fn one_or_many(meal: &Value) -> Option<Vec<&Map<String, Value>>> {
    match meal {
        Value::Object(item) => Some(vec![item]),
        Value::Array(items) => Some(items.iter().filter_map(Value::as_object).collect()),
        _ => None,
    }
}

fn meal_item(item: &Map<String, Value>) -> MealItem {
    MealItem {
        name: item.get("name").and_then(text_of),
        calories: item.get("calories").and_then(number_from),
    }
}

fn exercise(value: &Value) -> Option<Exercise> {
    let entry = value.as_object()?;
    let sets = entry.get("sets").and_then(text_of);
    let reps = entry.get("reps").and_then(text_of);
    let rest = entry.get("rest").and_then(text_of);
    let detail = exercise_detail(sets.as_deref(), reps.as_deref(), rest.as_deref());

    Some(Exercise {
        name: entry.get("name").and_then(text_of),
        sets,
        reps,
        rest,
        detail,
    })
}

/// `3 sets × 10 reps | Rest: 60s`, with absent parts and their separators left out.
pub fn exercise_detail(sets: Option<&str>, reps: Option<&str>, rest: Option<&str>) -> Option<String> {
    let volume = [
        sets.map(|sets| format!("{} sets", sets)),
        reps.map(|reps| format!("{} reps", reps)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" × ");

    let parts: Vec<String> = [
        Some(volume).filter(|v| !v.is_empty()),
        rest.map(|rest| format!("Rest: {}", rest)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

fn day_label(day: &str, entry: &Map<String, Value>) -> String {
    entry
        .get("date")
        .and_then(text_of)
        .unwrap_or_else(|| day.to_string())
}

// Strings and numbers render as text; empty strings count as absent.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
