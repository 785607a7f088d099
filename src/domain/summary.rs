use serde::{Deserialize, Serialize};

use super::{Cents, Transaction, TransactionType};

/// Income, expense and balance over a list of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Cents,
    pub expense: Cents,
    pub balance: Cents,
}

/// Sum income and expense over the given list. `balance = income - expense`.
///
/// Sums saturate at the bounds of [`Cents`]. Lists taken from a [`super::Ledger`]
/// never get there, so the balance identity holds exactly for them.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions
        .iter()
        .fold((0 as Cents, 0 as Cents), |(income, expense), t| match t.kind {
            TransactionType::Income => (income.saturating_add(t.amount_cents), expense),
            TransactionType::Expense => (income, expense.saturating_add(t.amount_cents)),
        });

    Totals {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub expense: Cents,
}

/// Expense sums per category, in the order categories were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<Cents> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.expense)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total expense across all categories.
    pub fn total(&self) -> Cents {
        self.categories
            .iter()
            .fold(0, |total: Cents, c| total.saturating_add(c.expense))
    }

    /// Share of total expense for a category, in percent. Zero when nothing was spent.
    pub fn percentage(&self, category: &str) -> f64 {
        let total = self.total();
        match self.get(category) {
            Some(expense) if total > 0 => expense as f64 / total as f64 * 100.0,
            _ => 0.0,
        }
    }
}

/// Sum expenses per category.
///
/// Every category seen in the list gets an entry, so a category with only
/// income shows up with zero.
pub fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut categories: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions {
        let index = match categories
            .iter()
            .position(|c| c.category == transaction.category)
        {
            Some(index) => index,
            None => {
                categories.push(CategoryTotal {
                    category: transaction.category.clone(),
                    expense: 0,
                });
                categories.len() - 1
            }
        };

        if transaction.kind == TransactionType::Expense {
            let entry = &mut categories[index];
            entry.expense = entry.expense.saturating_add(transaction.amount_cents);
        }
    }

    CategoryBreakdown { categories }
}
