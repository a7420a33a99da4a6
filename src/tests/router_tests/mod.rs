mod buyer_tests;
mod matrix_tests;
mod misc_tests;
mod template_tests;
