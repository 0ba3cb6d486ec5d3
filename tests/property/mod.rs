//! Property-based tests for search request translation

mod search_params;
