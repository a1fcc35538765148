use crate::errors::TrackerError;
use crate::form::FormState;
use crate::models::{Section, SummaryResponse};
use once_cell::sync::Lazy;
use regex::Regex;

static SIGNS_AND_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+\-\s]").expect("valid sign pattern"));

static SCIENTIFIC_NOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[0-9]+e[0-9]+").expect("valid exponent pattern"));

/// Removes every `+`, `-` and whitespace character, wherever it appears.
pub fn clean_input_string(text: &str) -> String {
    SIGNS_AND_SPACES.replace_all(text, "").into_owned()
}

/// Exponent-shaped values such as `12e5` are rejected outright.
pub fn is_invalid_input(text: &str) -> bool {
    SCIENTIFIC_NOTATION.is_match(text)
}

/// Empty, non-numeric and non-finite text counts as zero.
pub fn coerce_number(text: &str) -> f64 {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Sums field values in order. Stops at the first invalid value and reports it.
pub fn sum_inputs<'a, I>(values: I) -> Result<f64, TrackerError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = 0.0;
    for value in values {
        let cleaned = clean_input_string(value);
        if is_invalid_input(&cleaned) {
            return Err(TrackerError::InvalidInput { raw: cleaned });
        }
        total += coerce_number(&cleaned);
    }
    Ok(total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    Surplus,
    Deficit,
}

impl Balance {
    pub fn as_str(self) -> &'static str {
        match self {
            Balance::Surplus => "Surplus",
            Balance::Deficit => "Deficit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub budget: f64,
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snacks: f64,
    pub exercise: f64,
}

impl Summary {
    pub fn consumed(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner + self.snacks
    }

    pub fn burned(&self) -> f64 {
        self.exercise
    }

    pub fn remaining(&self) -> f64 {
        self.budget - self.consumed() + self.exercise
    }

    pub fn balance(&self) -> Balance {
        if self.remaining() < 0.0 {
            Balance::Surplus
        } else {
            Balance::Deficit
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.remaining().abs()
    }

    /// Bar values in chart order; exercise is drawn below the axis.
    pub fn chart_series(&self) -> [f64; 5] {
        [
            self.breakfast,
            self.lunch,
            self.dinner,
            self.snacks,
            -self.exercise,
        ]
    }

    pub fn to_response(&self) -> SummaryResponse {
        SummaryResponse {
            balance: self.balance().as_str().to_string(),
            magnitude: self.magnitude(),
            budget: self.budget,
            consumed: self.consumed(),
            burned: self.burned(),
            remaining: self.remaining(),
            chart: self.chart_series(),
        }
    }
}

/// Computes the day's totals from the form. Any invalid field aborts the whole calculation.
pub fn calculate(form: &FormState) -> Result<Summary, TrackerError> {
    let budget = sum_inputs([form.budget()])?;
    let section_total = |section: Section| sum_inputs(form.calorie_values(section));

    Ok(Summary {
        budget,
        breakfast: section_total(Section::Breakfast)?,
        lunch: section_total(Section::Lunch)?,
        dinner: section_total(Section::Dinner)?,
        snacks: section_total(Section::Snacks)?,
        exercise: section_total(Section::Exercise)?,
    })
}

pub fn format_calories(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldId, FieldRole};

    fn form_with(budget: &str, entries: &[(Section, &str)]) -> FormState {
        let mut form = FormState::default();
        form.set_budget(budget);
        for (section, calories) in entries {
            let number = form.add_entry(section.as_str()).unwrap();
            let id = FieldId::row(*section, number, FieldRole::Calories).to_string();
            form.apply_fields([(id.as_str(), *calories)]);
        }
        form
    }

    #[test]
    fn clean_strips_signs_and_whitespace() {
        assert_eq!(clean_input_string("+250"), "250");
        assert_eq!(clean_input_string("-250"), "250");
        assert_eq!(clean_input_string(" 1 200 \t"), "1200");
    }

    #[test]
    fn clean_also_strips_internal_hyphens() {
        // Known quirk: hyphens are removed anywhere, not just as a leading sign.
        assert_eq!(clean_input_string("12-34"), "1234");
        assert_eq!(coerce_number(&clean_input_string("12-34")), 1234.0);
    }

    #[test]
    fn cleaned_values_keep_their_magnitude() {
        for (raw, expected) in [("+42", 42.0), ("-42", 42.0), ("4 2", 42.0), ("3.5", 3.5)] {
            assert_eq!(coerce_number(&clean_input_string(raw)), expected);
        }
    }

    #[test]
    fn scientific_notation_is_invalid() {
        assert!(is_invalid_input("12e5"));
        assert!(is_invalid_input("1E3"));
        assert!(!is_invalid_input("125"));
        assert!(!is_invalid_input(""));
        assert!(!is_invalid_input("e5"));
    }

    #[test]
    fn exponent_check_only_counts_ascii_digits() {
        assert!(!is_invalid_input("\u{663}e\u{665}"));
        assert!(is_invalid_input("\u{663}3e5"));
    }

    #[test]
    fn coerce_treats_garbage_as_zero() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
        assert_eq!(coerce_number("12.5"), 12.5);
    }

    #[test]
    fn sum_reports_first_invalid_value() {
        let result = sum_inputs(["100", "- 2e3", "4e4"]);
        assert_eq!(
            result,
            Err(TrackerError::InvalidInput {
                raw: "2e3".to_string()
            })
        );
        assert_eq!(sum_inputs(["100", "", "x", "+50"]), Ok(150.0));
    }

    #[test]
    fn deficit_when_budget_covers_consumption() {
        let form = form_with(
            "2000",
            &[
                (Section::Breakfast, "300"),
                (Section::Breakfast, "200"),
                (Section::Lunch, "700"),
                (Section::Dinner, "600"),
                (Section::Snacks, "100"),
                (Section::Exercise, "300"),
            ],
        );
        let summary = calculate(&form).unwrap();
        assert_eq!(summary.consumed(), 1900.0);
        assert_eq!(summary.remaining(), 400.0);
        assert_eq!(summary.balance(), Balance::Deficit);
        assert_eq!(summary.magnitude(), 400.0);
        assert_eq!(summary.chart_series(), [500.0, 700.0, 600.0, 100.0, -300.0]);
    }

    #[test]
    fn surplus_when_consumption_exceeds_budget() {
        let form = form_with("1500", &[(Section::Dinner, "2000")]);
        let summary = calculate(&form).unwrap();
        assert_eq!(summary.remaining(), -500.0);
        assert_eq!(summary.balance(), Balance::Surplus);
        assert_eq!(summary.magnitude(), 500.0);
    }

    #[test]
    fn zero_remaining_counts_as_deficit() {
        let form = form_with("500", &[(Section::Lunch, "500")]);
        assert_eq!(calculate(&form).unwrap().balance(), Balance::Deficit);
    }

    #[test]
    fn invalid_budget_aborts_calculation() {
        let form = form_with("2e3", &[(Section::Lunch, "500")]);
        assert!(matches!(
            calculate(&form),
            Err(TrackerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn formats_whole_and_fractional_values() {
        assert_eq!(format_calories(400.0), "400");
        assert_eq!(format_calories(-0.0), "0");
        assert_eq!(format_calories(12.5), "12.5");
    }
}
