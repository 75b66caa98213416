//! Delivery channels. The web gateway is the only channel this crate ships.

pub mod web;
