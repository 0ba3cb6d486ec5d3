//! Agent search: option translation and the search workflow.
//!
//! `params` turns friendly options into the search endpoint's query-parameter
//! contract; `service` validates, calls the marketplace and absorbs the
//! malformed-filter quirk.

pub mod params;
pub mod service;

pub use params::{
    build_params, prepare, MatchMode, SearchMode, SearchOptions, SearchParams, SearchRequest,
    SearchSettings,
};
pub use service::{SearchOutcome, SearchService};
