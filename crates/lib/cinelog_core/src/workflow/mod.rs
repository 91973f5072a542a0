//! Client-side workflows: the review form state machine, the admin movie
//! CRUD flow, and the fenced movie-detail fetch.

pub mod admin;
pub mod detail;
pub mod review;
