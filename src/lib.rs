//! Hirechat - Conversational Job-Posting Intake Service
//!
//! This crate collects structured job-posting data through free-form chat
//! turns, driven by a keyword-cascade intent classifier and a slot-filling
//! dialogue engine.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
