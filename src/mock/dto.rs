use serde::Serialize;

pub const NOT_AN_IMAGE: &str = "Arquivo deve ser uma imagem";

/// Normalized rectangle inside the photo, 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFood {
    pub food_name: String,
    pub bounding_box: BoundingBox,
    pub weight_grams: u32,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub confidence_score: f64,
    pub adjustment_suggestion: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealAnalysis {
    pub meal_name: String,
    pub total_nutrition: NutritionTotals,
    pub detected_foods: Vec<DetectedFood>,
}
