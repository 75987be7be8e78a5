mod create_tests;
mod search_tests;
