// handlers/mod.rs - Two-tier handler architecture
//
// Public (no auth) → Protected (bearer identity envelope)

pub mod public; // Tier 1: No authentication required
pub mod protected; // Tier 2: `require_identity` middleware in front
