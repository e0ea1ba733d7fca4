// Domain module
// Donation requests and donation centres as stored in the remote document store

pub mod models;

pub use models::{DonationCenter, DonationRequest, RequestField, ValidationError, PLASMA_TYPES};
