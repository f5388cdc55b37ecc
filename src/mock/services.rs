use rand::{seq::index, Rng};

use super::dto::{BoundingBox, DetectedFood, MealAnalysis, NutritionTotals};
use super::foods::{FoodSample, MOCK_FOODS};

const MIN_FOODS: usize = 2;
const MAX_FOODS: usize = 4;
const MAX_EDGE: f64 = 0.95;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn generate_bounding_box<R: Rng + ?Sized>(rng: &mut R) -> BoundingBox {
    let x1: f64 = rng.gen_range(0.1..=0.5);
    let y1: f64 = rng.gen_range(0.1..=0.5);
    let width: f64 = rng.gen_range(0.2..=0.4);
    let height: f64 = rng.gen_range(0.2..=0.4);

    BoundingBox {
        x1: round_to(x1, 3),
        y1: round_to(y1, 3),
        x2: round_to((x1 + width).min(MAX_EDGE), 3),
        y2: round_to((y1 + height).min(MAX_EDGE), 3),
    }
}

/// "A com B", plus " e mais" when there were more than two.
pub fn meal_name(names: &[&str]) -> String {
    let mut name = names.iter().take(2).copied().collect::<Vec<_>>().join(" com ");
    if names.len() > 2 {
        name.push_str(" e mais");
    }
    name
}

fn detect<R: Rng + ?Sized>(rng: &mut R, food: &FoodSample) -> DetectedFood {
    let bounding_box = generate_bounding_box(rng);
    let confidence: f64 = rng.gen_range(0.85..=0.98);
    DetectedFood {
        food_name: food.name.to_string(),
        bounding_box,
        weight_grams: food.weight_grams,
        calories: food.calories,
        protein: food.protein,
        carbs: food.carbs,
        fat: food.fat,
        confidence_score: round_to(confidence, 2),
        adjustment_suggestion: format!(
            "Porção adequada de {}. Continue assim!",
            food.name.to_lowercase()
        ),
    }
}

/// Fabricates an analysis from 2 to 4 distinct table foods; the image itself is never looked at.
pub fn generate_meal_analysis<R: Rng + ?Sized>(rng: &mut R) -> MealAnalysis {
    let count = rng.gen_range(MIN_FOODS..=MAX_FOODS);
    let selected: Vec<&FoodSample> = index::sample(rng, MOCK_FOODS.len(), count)
        .into_iter()
        .map(|i| &MOCK_FOODS[i])
        .collect();

    let detected_foods: Vec<DetectedFood> = selected.iter().map(|f| detect(rng, f)).collect();

    let sum = selected
        .iter()
        .fold(NutritionTotals::default(), |acc, f| NutritionTotals {
            calories: acc.calories + f.calories,
            protein: acc.protein + f.protein,
            carbs: acc.carbs + f.carbs,
            fat: acc.fat + f.fat,
        });
    let total_nutrition = NutritionTotals {
        calories: round_to(sum.calories, 1),
        protein: round_to(sum.protein, 1),
        carbs: round_to(sum.carbs, 1),
        fat: round_to(sum.fat, 1),
    };

    let names: Vec<&str> = selected.iter().map(|f| f.name).collect();
    MealAnalysis {
        meal_name: meal_name(&names),
        total_nutrition,
        detected_foods,
    }
}
