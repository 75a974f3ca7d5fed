// handlers/mod.rs - Handler tiers
//
// Public (no auth) -> Protected (bearer token required).
// System routes (root info, health) sit beside both tiers.
pub mod protected; // POST/PUT /api/v1/blog
pub mod public; // /api/v1/user/*, GET /api/v1/blog/*
pub mod system; // GET /, GET /health
pub mod utils;
