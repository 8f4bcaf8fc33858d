// system-tests/src/lib.rs
// ============================================================================
// Module: Favorites System Tests Library
// Description: Shared configuration for favorites contract system tests.
// Purpose: Provide common utilities for the contract suites and CLI.
// Dependencies: favorites-contract, url
// ============================================================================

//! ## Overview
//! This crate hosts the environment-backed configuration shared by the
//! contract suites in `system-tests/tests` and the `favorites_contract_check`
//! binary.
//! Security posture: environment inputs and server responses are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
