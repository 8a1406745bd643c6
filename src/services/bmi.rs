use log::{error, info};

use crate::client::{ApiError, HealthApi};
use crate::models::bmi::{BmiCategory, BmiInput, BmiReading, BmiUpdate};
use crate::services::session::Session;
use crate::utils::validation::validate_payload;

pub const MISSING_MEASUREMENTS: &str = "Please enter both height and weight";

/// weight / (height in metres)², rounded to one decimal place.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round1(weight_kg / (height_m * height_m))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Validates the form and computes the reading; no request is made.
pub fn calculate(input: &BmiInput) -> Result<BmiReading, ApiError> {
    let (height, weight) = match (input.height, input.weight) {
        (Some(h), Some(w)) if h > 0.0 && w > 0.0 => (h, w),
        _ => return Err(ApiError::Validation(MISSING_MEASUREMENTS.to_string())),
    };
    validate_payload(input)?;

    // Category follows the rounded value, so 24.96 reads as 25.0 and Overweight
    let bmi = compute_bmi(height, weight);
    Ok(BmiReading {
        bmi,
        category: classify(bmi),
        height,
        weight,
    })
}

/// Computes the reading and, for an authenticated session, stores the new
/// measurements upstream. Repeated submissions each write.
///
/// The cached `currentBMI` is refreshed only when the session holds a profile
/// (after login, register or a dashboard refresh). A session built from a bare
/// bearer token, as the gateway does per request, has nothing to refresh; its
/// callers read the stored value from the returned reading.
pub async fn submit(
    api: &dyn HealthApi,
    session: &mut Session,
    input: &BmiInput,
) -> Result<BmiReading, ApiError> {
    let reading = calculate(input)?;

    if session.is_authenticated() {
        let update = BmiUpdate {
            height: reading.height,
            weight: reading.weight,
        };
        let result = api.update_bmi(&update).await;
        session.observe(&result);
        result.map_err(|e| {
            error!("Error updating BMI: {}", e);
            e
        })?;

        session.set_current_bmi(reading.bmi);
        info!("Stored BMI {} ({})", reading.bmi, reading.category);
    }

    Ok(reading)
}
