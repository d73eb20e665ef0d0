//! Treat and hobby selection for a coin milestone.

use tracing;

use bunny_core::config::RecommendationConfig;
use bunny_core::types::{
    Expense, HobbySummary, ItemType, Profile, ShoppingItem, ShoppingPriority,
};

use super::budget::BudgetSnapshot;
use super::formatter;

/// Data the recommendation is computed from.
#[derive(Debug, Clone, Default)]
pub struct RecommendationInput {
    /// Salary from the profile, if recorded
    pub salary: Option<f64>,
    /// All recorded expenses
    pub expenses: Vec<Expense>,
    /// The shopping list
    pub shopping_items: Vec<ShoppingItem>,
    /// Hobbies to relax with, in suggestion order
    pub hobbies: Vec<HobbySummary>,
}

/// What to offer the user at a milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Message shown in the reward
    pub message: String,
    /// Affordable impulsive items, highest priority first
    pub treat_items: Vec<ShoppingItem>,
    /// Hobbies to relax with
    pub relax_items: Vec<HobbySummary>,
    /// Disposable amount, when a salary is known
    pub remaining_for_fun: Option<f64>,
}

impl Recommendation {
    /// Whether any treat was suggested
    pub fn has_treats(&self) -> bool {
        !self.treat_items.is_empty()
    }
}

/// Applies the budget policy.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Create a new engine
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Policy in effect
    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Whether the profile's coin balance reaches the milestone.
    pub fn is_triggered(&self, profile: &Profile) -> bool {
        self.config.enabled && profile.coins >= self.config.coin_threshold
    }

    /// Compute the recommendation.
    pub fn recommend(&self, input: &RecommendationInput) -> Recommendation {
        let relax_default: Vec<HobbySummary> = input.hobbies.iter().take(1).cloned().collect();

        let Some(salary) = input.salary else {
            tracing::debug!("No salary recorded, recommending a hobby only");
            return Recommendation {
                message: formatter::no_salary_message(),
                treat_items: Vec::new(),
                relax_items: relax_default,
                remaining_for_fun: None,
            };
        };

        let budget = BudgetSnapshot::from_records(
            salary,
            &input.expenses,
            &input.shopping_items,
            self.config.reserve_ratio,
        );
        let remaining = budget.remaining_for_fun();
        let treats = self.affordable_treats(&input.shopping_items, remaining);

        tracing::debug!(
            "Budget: salary={}, spent={}, needed={}, reserve={}, remaining={}, candidates={}",
            budget.salary,
            budget.total_spent,
            budget.needed_unpurchased_total,
            budget.reserve(),
            remaining,
            treats.len()
        );

        if !treats.is_empty() && remaining >= self.config.min_fun_amount {
            Recommendation {
                message: formatter::treat_message(remaining),
                treat_items: treats,
                relax_items: input
                    .hobbies
                    .iter()
                    .take(self.config.max_relax_with_treat)
                    .cloned()
                    .collect(),
                remaining_for_fun: Some(remaining),
            }
        } else {
            Recommendation {
                message: formatter::stay_strong_message(),
                treat_items: Vec::new(),
                relax_items: relax_default,
                remaining_for_fun: Some(remaining),
            }
        }
    }

    /// Unpurchased impulsive items that fit `remaining`, by priority.
    fn affordable_treats(&self, items: &[ShoppingItem], remaining: f64) -> Vec<ShoppingItem> {
        let mut candidates: Vec<&ShoppingItem> = items
            .iter()
            .filter(|item| {
                item.open_cost(ItemType::Impulsive)
                    .is_some_and(|cost| cost <= remaining)
            })
            .collect();

        // Stable, so equal priorities keep list order
        candidates.sort_by(|a, b| {
            ShoppingPriority::rank_of(b.priority).cmp(&ShoppingPriority::rank_of(a.priority))
        });

        candidates
            .into_iter()
            .take(self.config.max_treats)
            .cloned()
            .collect()
    }
}
