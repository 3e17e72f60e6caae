//! Use Case Assessment - Rule-driven questionnaire for ranking use cases
//!
//! A catalogue of categories, questions, conditions and use cases is walked
//! question by question. Answers may insert follow-up questions, rule use
//! cases out, and finally yield Potential, Effort and Risk scores for every
//! chosen category and each of its use cases.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
