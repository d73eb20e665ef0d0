//! Shopping items and expenses, read-only snapshots owned by the shopping subsystem.

use serde::{Deserialize, Deserializer, Serialize};

/// Whether an item is a necessity or an impulse buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Something the user needs.
    Needed,
    /// Something the user wants.
    Impulsive,
}

/// Shopping item priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoppingPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
    /// Urgent priority.
    Urgent,
}

impl ShoppingPriority {
    /// Numeric rank used for ordering (`urgent` highest).
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Urgent => 4,
        }
    }

    /// Rank of an optional priority; a missing priority ranks below `low`.
    pub fn rank_of(priority: Option<Self>) -> u8 {
        priority.map_or(0, Self::rank)
    }

    /// Convert to string
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// An entry on the user's shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Item identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Estimated price, if known.
    #[serde(default, deserialize_with = "super::amount::optional")]
    pub estimated_cost: Option<f64>,
    /// Whether the item was already bought.
    #[serde(default)]
    pub purchased: bool,
    /// Needed or impulsive.
    pub item_type: ItemType,
    /// Optional priority.
    #[serde(default)]
    pub priority: Option<ShoppingPriority>,
}

impl ShoppingItem {
    /// Cost of an unpurchased item of the given type, when the cost is known.
    pub fn open_cost(&self, item_type: ItemType) -> Option<f64> {
        if self.purchased || self.item_type != item_type {
            return None;
        }
        self.estimated_cost
    }
}

/// A recorded expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Amount spent.
    #[serde(default, deserialize_with = "super::amount::lenient")]
    pub amount: f64,
}

/// Accept identifiers serialized either as strings or as integers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
