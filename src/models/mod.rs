//! Core data models for the Net Pay Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod calculator_input;
mod deduction_lines;
mod pay_period;

pub use calculation_result::{AuditStep, AuditTrace, HesSubsidy, NetPayCalculation, NetPayResult};
pub use calculator_input::{CalculatorInput, ContributionSet, GsisLoans, HesAllowances, SalaryBasis};
pub use deduction_lines::DeductionLines;
pub use pay_period::PayPeriod;
