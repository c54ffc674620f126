// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown {field} '{value}'")]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ParseFieldError {
                field: "type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Salary,
    Bonus,
    OtherIncome,
    Rent,
    Insurance,
    Subscription,
    Utilities,
    Transport,
    Food,
    Shopping,
    Travel,
    Education,
    Medical,
    OtherExpense,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Salary,
        Category::Bonus,
        Category::OtherIncome,
        Category::Rent,
        Category::Insurance,
        Category::Subscription,
        Category::Utilities,
        Category::Transport,
        Category::Food,
        Category::Shopping,
        Category::Travel,
        Category::Education,
        Category::Medical,
        Category::OtherExpense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Bonus => "bonus",
            Category::OtherIncome => "other_income",
            Category::Rent => "rent",
            Category::Insurance => "insurance",
            Category::Subscription => "subscription",
            Category::Utilities => "utilities",
            Category::Transport => "transport",
            Category::Food => "food",
            Category::Shopping => "shopping",
            Category::Travel => "travel",
            Category::Education => "education",
            Category::Medical => "medical",
            Category::OtherExpense => "other_expense",
        }
    }

    /// Income and expense categories are disjoint; the transaction type is
    /// derived from the category, never stored inconsistently.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Category::Salary | Category::Bonus | Category::OtherIncome => TransactionType::Income,
            _ => TransactionType::Expense,
        }
    }
}

impl FromStr for Category {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| ParseFieldError {
                field: "category",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Once,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Once => "once",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }
}

impl FromStr for Recurrence {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(Recurrence::Once),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" => Ok(Recurrence::Yearly),
            _ => Err(ParseFieldError {
                field: "recurrence",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: Category,
    pub date: NaiveDate,
    pub recurrence: Recurrence,
    pub recurrence_end_date: Option<NaiveDate>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentType {
    EqualPrincipalInterest,
    EqualPrincipal,
    Bullet,
}

impl RepaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentType::EqualPrincipalInterest => "equal_principal_interest",
            RepaymentType::EqualPrincipal => "equal_principal",
            RepaymentType::Bullet => "bullet",
        }
    }
}

impl FromStr for RepaymentType {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal_principal_interest" => Ok(RepaymentType::EqualPrincipalInterest),
            "equal_principal" => Ok(RepaymentType::EqualPrincipal),
            "bullet" => Ok(RepaymentType::Bullet),
            _ => Err(ParseFieldError {
                field: "repayment type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub name: String,
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub repayment_type: RepaymentType,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub payment_day: u32,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Housing,
    Contract,
    Career,
    Family,
    Education,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Housing => "housing",
            EventCategory::Contract => "contract",
            EventCategory::Career => "career",
            EventCategory::Family => "family",
            EventCategory::Education => "education",
            EventCategory::Other => "other",
        }
    }
}

impl FromStr for EventCategory {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "housing" => Ok(EventCategory::Housing),
            "contract" => Ok(EventCategory::Contract),
            "career" => Ok(EventCategory::Career),
            "family" => Ok(EventCategory::Family),
            "education" => Ok(EventCategory::Education),
            "other" => Ok(EventCategory::Other),
            _ => Err(ParseFieldError {
                field: "event category",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
}

impl EventColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventColor::Red => "red",
            EventColor::Orange => "orange",
            EventColor::Yellow => "yellow",
            EventColor::Green => "green",
            EventColor::Blue => "blue",
            EventColor::Purple => "purple",
            EventColor::Pink => "pink",
        }
    }
}

impl FromStr for EventColor {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(EventColor::Red),
            "orange" => Ok(EventColor::Orange),
            "yellow" => Ok(EventColor::Yellow),
            "green" => Ok(EventColor::Green),
            "blue" => Ok(EventColor::Blue),
            "purple" => Ok(EventColor::Purple),
            "pink" => Ok(EventColor::Pink),
            _ => Err(ParseFieldError {
                field: "color",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeEvent {
    pub id: i64,
    pub title: String,
    pub category: EventCategory,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub color: EventColor,
    pub is_important: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    RealEstate,
    Vehicle,
    Savings,
    Investment,
    OtherAsset,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::RealEstate => "real_estate",
            AssetCategory::Vehicle => "vehicle",
            AssetCategory::Savings => "savings",
            AssetCategory::Investment => "investment",
            AssetCategory::OtherAsset => "other_asset",
        }
    }
}

impl FromStr for AssetCategory {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real_estate" => Ok(AssetCategory::RealEstate),
            "vehicle" => Ok(AssetCategory::Vehicle),
            "savings" => Ok(AssetCategory::Savings),
            "investment" => Ok(AssetCategory::Investment),
            "other_asset" => Ok(AssetCategory::OtherAsset),
            _ => Err(ParseFieldError {
                field: "asset category",
                value: s.to_string(),
            }),
        }
    }
}

/// Something owned: valued at `current_value` today, with the purchase
/// price and date kept for showing the change since acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub category: AssetCategory,
    pub current_value: Decimal,
    pub purchase_value: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPayment {
    pub loan_id: i64,
    pub loan_name: String,
    pub date: NaiveDate,
    pub month_number: u32,
    pub principal: Decimal,
    pub interest: Decimal,
    pub total_payment: Decimal,
    pub remaining_principal: Decimal,
}

/// Point-in-time net position: assets at current value against the
/// principal still owed across loans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetWorth {
    pub total_assets: Decimal,
    pub total_loan_balance: Decimal,
    pub net_worth: Decimal,
}
