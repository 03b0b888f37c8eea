//! Unit tests for the workflow module.

mod domain_tests;
