//! Parking spot occupancy API: one Lambda function per operation over a
//! single DynamoDB table keyed by `spotId`.

pub mod common;
pub mod handlers;
pub mod store;
