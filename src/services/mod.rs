//! Services module - Pure quiz logic with no UI dependencies.
//!
//! # Components
//!
//! - [`QuestionRepository`]: Loads the tiered question bank from disk into a [`QuestionBank`]
//! - [`generate_quiz`]: Samples a fixed quota per tier and shuffles the result into a quiz
//! - [`grade_majority`] / [`synthesize_answer`]: Majority grading for multi-part questions
//! - [`CredentialVerifier`]: The login check seam, with [`StaticCredentials`] as the placeholder
//! - [`images`]: Fixed-name image lookup next to each question definition
//!
//! Nothing here touches a display surface; every function is usable from tests
//! without a window system.

pub mod assembler;
pub mod auth;
pub mod grading;
pub mod images;
pub mod repository;

pub use assembler::{generate_quiz, generate_quiz_with_rng};
pub use auth::{CredentialVerifier, StaticCredentials};
pub use grading::{MajorityOutcome, grade_majority, synthesize_answer};
pub use images::{FsImageResolver, IMAGE_EXTENSIONS, ImageResolver, ImageSlot, resolve_image};
pub use repository::{QuestionBank, QuestionRepository, QuestionSource};
