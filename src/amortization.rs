// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use crate::models::{Loan, LoanPayment, RepaymentType};
use crate::utils::{date_in_month, next_month};

fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / Decimal::ONE_HUNDRED / Decimal::from(12)
}

/// The constant payment of an annuity (equal principal+interest) loan:
/// A = P*i*(1+i)^n / ((1+i)^n - 1), or P/n at a zero rate.
pub fn monthly_payment(principal: Decimal, annual_rate: Decimal, term_months: u32) -> Decimal {
    let i = monthly_rate(annual_rate);
    if i.is_zero() {
        return principal / Decimal::from(term_months);
    }
    let factor = (Decimal::ONE + i).powi(term_months as i64);
    principal * i * factor / (factor - Decimal::ONE)
}

/// Remaining balance after `periods_paid` annuity payments, in closed form:
/// B_k = P*(1+i)^k - A*((1+i)^k - 1)/i. Keeps per-month queries O(1) so a
/// 30-year projection over many loans does not re-simulate every schedule
/// from its first payment.
fn annuity_balance(principal: Decimal, i: Decimal, payment: Decimal, periods_paid: u32) -> Decimal {
    if i.is_zero() {
        return principal - payment * Decimal::from(periods_paid);
    }
    let factor = (Decimal::ONE + i).powi(periods_paid as i64);
    principal * factor - payment * (factor - Decimal::ONE) / i
}

fn round_unit(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Unrounded (principal, interest, remaining-after) for payment
/// `month_number` (1-indexed).
fn breakdown_at(loan: &Loan, month_number: u32) -> (Decimal, Decimal, Decimal) {
    let i = monthly_rate(loan.interest_rate);
    match loan.repayment_type {
        RepaymentType::EqualPrincipalInterest => {
            let payment = monthly_payment(loan.principal, loan.interest_rate, loan.term_months);
            let before = annuity_balance(loan.principal, i, payment, month_number - 1);
            let interest = before * i;
            let principal = payment - interest;
            (principal, interest, before - principal)
        }
        RepaymentType::EqualPrincipal => {
            let monthly_principal = loan.principal / Decimal::from(loan.term_months);
            let before = loan.principal - monthly_principal * Decimal::from(month_number - 1);
            let interest = before * i;
            (monthly_principal, interest, before - monthly_principal)
        }
        RepaymentType::Bullet => {
            let interest = loan.principal * i;
            if month_number == loan.term_months {
                (loan.principal, interest, Decimal::ZERO)
            } else {
                (Decimal::ZERO, interest, loan.principal)
            }
        }
    }
}

fn to_payment(
    loan: &Loan,
    month_number: u32,
    date: NaiveDate,
    principal: Decimal,
    interest: Decimal,
    remaining: Decimal,
) -> LoanPayment {
    // Rounding happens here and nowhere upstream; the total rounds the sum
    // of the unrounded parts so the annuity total stays constant.
    LoanPayment {
        loan_id: loan.id,
        loan_name: loan.name.clone(),
        date,
        month_number,
        principal: round_unit(principal),
        interest: round_unit(interest),
        total_payment: round_unit(principal + interest),
        remaining_principal: round_unit(remaining).max(Decimal::ZERO),
    }
}

/// Payment breakdown for the loan in the target month, or None when no
/// payment is due then (before the start month, or past the term). The
/// start month is payment #1.
pub fn payment_for_month(loan: &Loan, year: i32, month: u32) -> Option<LoanPayment> {
    let start_year = loan.start_date.year();
    let start_month = loan.start_date.month();
    if year < start_year || (year == start_year && month < start_month) {
        return None;
    }

    let months_diff = (year - start_year) * 12 + (month as i32 - start_month as i32) + 1;
    if months_diff < 1 || months_diff as u32 > loan.term_months {
        return None;
    }
    let month_number = months_diff as u32;

    let (principal, interest, remaining) = breakdown_at(loan, month_number);
    let date = date_in_month(year, month, loan.payment_day)?;
    Some(to_payment(loan, month_number, date, principal, interest, remaining))
}

/// Principal still owed as of the end of the target month: the full
/// principal before repayment starts, the post-payment balance during the
/// term, zero once the final payment has cleared.
pub fn remaining_balance(loan: &Loan, year: i32, month: u32) -> Decimal {
    let start_year = loan.start_date.year();
    let start_month = loan.start_date.month();
    if year < start_year || (year == start_year && month < start_month) {
        return loan.principal;
    }

    let months_diff = (year - start_year) * 12 + (month as i32 - start_month as i32) + 1;
    if months_diff as u32 > loan.term_months {
        return Decimal::ZERO;
    }

    let (_, _, remaining) = breakdown_at(loan, months_diff as u32);
    round_unit(remaining).max(Decimal::ZERO)
}

/// The full schedule, payments 1..=term_months, built in one incremental
/// sweep with a running balance.
pub fn payment_schedule(loan: &Loan) -> Vec<LoanPayment> {
    let i = monthly_rate(loan.interest_rate);
    let annuity = match loan.repayment_type {
        RepaymentType::EqualPrincipalInterest => {
            monthly_payment(loan.principal, loan.interest_rate, loan.term_months)
        }
        _ => Decimal::ZERO,
    };
    let monthly_principal = loan.principal / Decimal::from(loan.term_months.max(1));

    let mut schedule = Vec::with_capacity(loan.term_months as usize);
    let mut remaining = loan.principal;
    let (mut year, mut month) = (loan.start_date.year(), loan.start_date.month());

    for n in 1..=loan.term_months {
        let (principal, interest) = match loan.repayment_type {
            RepaymentType::EqualPrincipalInterest => {
                let interest = remaining * i;
                (annuity - interest, interest)
            }
            RepaymentType::EqualPrincipal => (monthly_principal, remaining * i),
            RepaymentType::Bullet => {
                let principal = if n == loan.term_months {
                    loan.principal
                } else {
                    Decimal::ZERO
                };
                (principal, loan.principal * i)
            }
        };
        remaining -= principal;

        let Some(date) = date_in_month(year, month, loan.payment_day) else {
            break;
        };
        schedule.push(to_payment(loan, n, date, principal, interest, remaining));
        (year, month) = next_month(year, month);
    }
    schedule
}
