//! Read-only answer sheet export.

pub mod sheet;

pub use sheet::{file_name, render, AnswerSheet, AnswerSheetFormat};
