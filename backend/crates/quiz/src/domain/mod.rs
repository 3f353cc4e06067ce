//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (QuestionEntry, QuizSession)
//! - The question bank and its randomness source
//! - Domain services (prompt composition)
//! - Repository and gateway traits (interfaces)

pub mod clock;
pub mod entities;
pub mod gateway;
pub mod question_bank;
pub mod repository;
pub mod services;
