// The fixed nutrition-analysis instruction sent with every image
// Author: kelexine (https://github.com/kelexine)

/// Instruction sent alongside every uploaded image.
///
/// Byte-for-byte identical to the prompt the tool has always used, including
/// the surrounding newlines and indentation, so answers stay comparable.
pub const NUTRITION_INSTRUCTION: &str = concat!(
    "\n",
    "    You are an expert in nutrition. Given the food items in the image,\n",
    "    calculate the total calories and provide a detailed breakdown of each food item\n",
    "    with its calorie content in the format \n",
    "    1. Item 1 - number of calories\n",
    "    2. Item 2 - number of calories\n",
    "    ----\n",
    "    ----\n",
    "    Finally, indicate whether the food is healthy and provide the percentage split of \n",
    "    carbohydrates, fats, fiber, sugar, and other macronutrients and your best advice ",
    "regarding the diet and also what other items we need to add to make it healthy.\n",
    "    ",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_covers_all_sections() {
        assert!(NUTRITION_INSTRUCTION.contains("1. Item 1 - number of calories"));
        assert!(NUTRITION_INSTRUCTION.contains("whether the food is healthy"));
        assert!(NUTRITION_INSTRUCTION.contains("carbohydrates, fats, fiber, sugar, and other macronutrients"));
        assert!(NUTRITION_INSTRUCTION.contains("what other items we need to add to make it healthy."));
    }

    #[test]
    fn test_instruction_whitespace_is_preserved() {
        assert!(NUTRITION_INSTRUCTION.starts_with("\n    You are an expert in nutrition."));
        assert!(NUTRITION_INSTRUCTION.ends_with("make it healthy.\n    "));
        assert!(NUTRITION_INSTRUCTION.contains("in the format \n"));
        assert_eq!(NUTRITION_INSTRUCTION.lines().count(), 11);
    }
}
