pub mod buyer;
pub mod error;
pub mod home;
pub mod matrix;

pub use error::error_page;
pub use home::home_page;
pub use matrix::{matrix_page, MatrixView};
