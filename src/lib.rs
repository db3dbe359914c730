//! Net Pay Calculation Engine for Philippine Campus Payroll
//!
//! This crate provides the authoritative net-pay and deduction calculation for
//! a campus payroll system: basic-pay withholding tax, mandated contributions
//! (SSS, PhilHealth, Pag-IBIG), GSIS loan amortizations, the fixed set of
//! other deduction line items, and the Higher Education Subsidy.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
