//! Administration console for a Danube messaging cluster.
//!
//! Talks to the admin gateway over HTTP/JSON. Reads go through cached,
//! de-duplicated [`read_model`]s, mutations through [`actions`] which
//! invalidate the affected reads on success. [`view`] renders the models as
//! terminal text and [`prefs`] keeps the small persisted UI settings.

pub mod actions;
pub mod core;
pub mod models;
pub mod prefs;
pub mod read_model;
pub mod view;
