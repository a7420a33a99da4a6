pub mod buyer;
pub mod matrix;
pub mod template_controls;
