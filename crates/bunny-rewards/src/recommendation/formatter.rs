//! User-facing recommendation messages.

/// Name of the synthesized milestone reward.
pub const SMART_REWARD_NAME: &str = "Bunny's Smart Reward";

/// Message used when the recommendation hint is unavailable.
pub const MILESTONE_FALLBACK_MESSAGE: &str = "You've reached a reward milestone! Time to relax.";

const NO_SALARY_MESSAGE: &str = "You've earned a reward! Take a break and enjoy a hobby.";
const STAY_STRONG_MESSAGE: &str =
    "Stay strong! Focus on your needs first. Relax with a hobby, you deserve it.";

/// Shown when no salary is recorded.
pub fn no_salary_message() -> String {
    NO_SALARY_MESSAGE.to_string()
}

/// Shown when a treat fits the budget.
pub fn treat_message(remaining_for_fun: f64) -> String {
    format!(
        "Great job! You have ~{} DT left after needs and safety reserve. A small treat is okay!",
        display_amount(remaining_for_fun)
    )
}

/// Shown when no treat fits the budget.
pub fn stay_strong_message() -> String {
    STAY_STRONG_MESSAGE.to_string()
}

/// Round half-up for display. Inputs are never negative here.
fn display_amount(amount: f64) -> i64 {
    amount.max(0.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treat_message_rounds_half_up() {
        assert_eq!(
            treat_message(149.5),
            "Great job! You have ~150 DT left after needs and safety reserve. A small treat is okay!"
        );
        assert!(treat_message(149.49).contains("~149 DT"));
    }

    #[test]
    fn test_static_messages() {
        assert_eq!(
            no_salary_message(),
            "You've earned a reward! Take a break and enjoy a hobby."
        );
        assert!(stay_strong_message().starts_with("Stay strong!"));
    }
}
