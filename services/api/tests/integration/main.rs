mod helpers;

mod register_test;
mod session_test;
