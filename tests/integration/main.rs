//! Integration tests for the harvester
//!
//! These tests use wiremock to serve listing and article pages and run the
//! full fetch, parse, merge and sort cycle end-to-end.

mod article_tests;
mod harvest_tests;
