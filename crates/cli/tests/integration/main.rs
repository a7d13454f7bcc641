mod common;
mod release_tests;
