//! crates/baeumteo_core/src/finance.rs
//!
//! The household ledger behind the finance dashboard: one month of income and
//! categorized expenses, summarized into totals and a percentage breakdown.

use crate::domain::{Cohort, ParseEnumError};
use crate::validation::ValidationError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Medical,
    Education,
    Etc,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Medical,
        ExpenseCategory::Education,
        ExpenseCategory::Etc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Medical => "medical",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Etc => "etc",
        }
    }

    pub fn korean_label(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "식비",
            ExpenseCategory::Transport => "교통",
            ExpenseCategory::Medical => "의료",
            ExpenseCategory::Education => "교육",
            ExpenseCategory::Etc => "기타",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(key) || c.korean_label() == key)
            .ok_or_else(|| ParseEnumError::new("expense category", s))
    }
}

/// One month of the ledger. Amounts are whole KRW.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceMonth {
    pub year: i32,
    pub month: u32,
    pub income: u64,
    expenses: Vec<(ExpenseCategory, u64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: u64,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceSummary {
    pub year: i32,
    pub month: u32,
    pub total_income: u64,
    pub total_expense: u64,
    /// Negative when the month ran a deficit.
    pub savings: i64,
    /// Categories with spending, in catalog order. Percentages sum to 100.
    pub categories: Vec<CategoryShare>,
}

impl FinanceMonth {
    pub fn new(year: i32, month: u32, income: u64) -> Self {
        Self {
            year,
            month,
            income,
            expenses: Vec::new(),
        }
    }

    pub fn with_expenses(
        mut self,
        expenses: impl IntoIterator<Item = (ExpenseCategory, u64)>,
    ) -> Self {
        self.expenses.extend(expenses);
        self
    }

    pub fn has_expenses(&self) -> bool {
        !self.expenses.is_empty()
    }

    /// Quick entry of one expense. Zero amounts are refused.
    pub fn record_expense(
        &mut self,
        category: ExpenseCategory,
        amount: u64,
    ) -> Result<(), ValidationError> {
        if amount == 0 {
            return Err(ValidationError::Empty("amount"));
        }
        self.expenses.push((category, amount));
        Ok(())
    }

    pub fn total_expense(&self) -> u64 {
        self.expenses.iter().map(|(_, amount)| amount).sum()
    }

    pub fn summary(&self) -> FinanceSummary {
        let total_expense = self.total_expense();
        let amounts: Vec<(ExpenseCategory, u64)> = ExpenseCategory::ALL
            .into_iter()
            .map(|category| {
                let amount = self
                    .expenses
                    .iter()
                    .filter(|(c, _)| *c == category)
                    .map(|(_, a)| a)
                    .sum();
                (category, amount)
            })
            .filter(|(_, amount)| *amount > 0)
            .collect();

        let percents = shares(&amounts, total_expense);
        let categories = amounts
            .into_iter()
            .zip(percents)
            .map(|((category, amount), percent)| CategoryShare {
                category,
                amount,
                percent,
            })
            .collect();

        FinanceSummary {
            year: self.year,
            month: self.month,
            total_income: self.income,
            total_expense,
            savings: to_signed(self.income) - to_signed(total_expense),
            categories,
        }
    }
}

fn to_signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Whole-number percentages by largest remainder, so they always add up to 100.
fn shares(amounts: &[(ExpenseCategory, u64)], total: u64) -> Vec<u8> {
    if total == 0 {
        return vec![0; amounts.len()];
    }
    let total = u128::from(total);
    let mut percents: Vec<u8> = Vec::with_capacity(amounts.len());
    let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(amounts.len());
    for (i, (_, amount)) in amounts.iter().enumerate() {
        let scaled = u128::from(*amount) * 100;
        percents.push(u8::try_from(scaled / total).unwrap_or(100));
        remainders.push((i, scaled % total));
    }

    let assigned: u32 = percents.iter().map(|p| u32::from(*p)).sum();
    let missing = 100u32.saturating_sub(assigned) as usize;
    // Largest remainder first; ties go to the earlier category.
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (i, _) in remainders.into_iter().take(missing) {
        percents[i] += 1;
    }
    percents
}

/// An age-specific money tip shown under the breakdown.
pub fn tip_for(cohort: Cohort) -> Option<&'static str> {
    match cohort {
        Cohort::Forties => Some(
            "교육비와 주거비 관리가 중요해요. AI를 활용해 최적의 저축 플랜을 세워보세요.",
        ),
        _ => None,
    }
}
