/// Reference nutrition for one portion of a food the mock service can "detect".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSample {
    pub name: &'static str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub weight_grams: u32,
}

const fn food(
    name: &'static str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    weight_grams: u32,
) -> FoodSample {
    FoodSample {
        name,
        calories,
        protein,
        carbs,
        fat,
        weight_grams,
    }
}

pub const MOCK_FOODS: [FoodSample; 10] = [
    food("Arroz Branco", 130.0, 2.7, 28.0, 0.3, 100),
    food("Feijão Preto", 77.0, 4.5, 14.0, 0.5, 80),
    food("Frango Grelhado", 165.0, 31.0, 0.0, 3.6, 100),
    food("Salada Verde", 15.0, 1.2, 3.0, 0.2, 50),
    food("Batata Frita", 312.0, 3.4, 41.0, 15.0, 100),
    food("Sushi (Niguiri)", 60.0, 3.0, 8.0, 1.0, 30),
    food("Temaki", 200.0, 8.0, 25.0, 7.0, 120),
    food("Camarão", 99.0, 24.0, 0.2, 0.3, 100),
    food("Bife", 250.0, 26.0, 0.0, 17.0, 100),
    food("Macarrão", 158.0, 5.8, 31.0, 0.9, 100),
];
