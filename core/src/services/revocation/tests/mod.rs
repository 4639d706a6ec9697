mod persistent_tests;
mod sweeper_tests;
