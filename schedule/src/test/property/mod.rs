//! Property-based tests for the identity rules and the fixpoint driver.
