//! Disposable budget arithmetic.

use bunny_core::types::{Expense, ItemType, ShoppingItem};

/// Figures the treat decision is based on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSnapshot {
    /// Monthly salary
    pub salary: f64,
    /// Sum of all recorded expenses
    pub total_spent: f64,
    /// Sum of known costs of needed items not yet purchased
    pub needed_unpurchased_total: f64,
    /// Fraction of salary kept as a safety reserve
    pub reserve_ratio: f64,
}

impl BudgetSnapshot {
    /// Aggregate expenses and the shopping list against a salary.
    pub fn from_records(
        salary: f64,
        expenses: &[Expense],
        items: &[ShoppingItem],
        reserve_ratio: f64,
    ) -> Self {
        let total_spent = expenses.iter().map(|e| e.amount).sum();
        let needed_unpurchased_total = items
            .iter()
            .filter_map(|item| item.open_cost(ItemType::Needed))
            .sum();

        Self {
            salary,
            total_spent,
            needed_unpurchased_total,
            reserve_ratio,
        }
    }

    /// Amount withheld from the salary.
    pub fn reserve(&self) -> f64 {
        self.salary * self.reserve_ratio
    }

    /// What is left for fun after spending, needs, and the reserve. Never negative.
    pub fn remaining_for_fun(&self) -> f64 {
        (self.salary - self.total_spent - self.needed_unpurchased_total - self.reserve()).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cost: Option<f64>, purchased: bool, item_type: ItemType) -> ShoppingItem {
        ShoppingItem {
            id: "1".into(),
            name: "Item".into(),
            estimated_cost: cost,
            purchased,
            item_type,
            priority: None,
        }
    }

    #[test]
    fn test_remaining_for_fun() {
        let budget = BudgetSnapshot::from_records(
            1000.0,
            &[Expense { amount: 200.0 }, Expense { amount: 100.0 }],
            &[
                item(Some(100.0), false, ItemType::Needed),
                item(Some(999.0), true, ItemType::Needed),
                item(None, false, ItemType::Needed),
                item(Some(40.0), false, ItemType::Impulsive),
            ],
            0.30,
        );
        assert_eq!(budget.total_spent, 300.0);
        assert_eq!(budget.needed_unpurchased_total, 100.0);
        assert!((budget.reserve() - 300.0).abs() < 1e-9);
        assert!((budget.remaining_for_fun() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_remaining_is_never_negative() {
        let budget = BudgetSnapshot::from_records(
            500.0,
            &[Expense { amount: 450.0 }],
            &[item(Some(100.0), false, ItemType::Needed)],
            0.30,
        );
        assert_eq!(budget.remaining_for_fun(), 0.0);
    }

    #[test]
    fn test_zero_salary() {
        let budget = BudgetSnapshot::from_records(0.0, &[], &[], 0.30);
        assert_eq!(budget.remaining_for_fun(), 0.0);
    }
}
