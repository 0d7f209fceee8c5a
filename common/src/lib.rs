//! Types shared by the cafe directory backend: the stored `Cafe` model, the raw
//! form payload submitted by browsers, the JSON envelope returned by `/all`, and
//! the validation that turns a submission into a record ready for insertion.

pub mod model;
pub mod requests;
pub mod responses;
pub mod validation;
