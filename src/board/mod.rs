//! Board model: categories of questions on a rectangular grid.

pub mod question;
pub mod category;
pub mod grid;

pub use question::Question;
pub use category::Category;
pub use grid::Board;
