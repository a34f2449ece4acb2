// Core algorithm exports
pub mod hash;
pub mod keywords;
pub mod pricing;
pub mod scoring;
pub mod share;

pub use hash::{string_hash, hash_fraction};
pub use keywords::{contains_any, MUSIC_HUBS, MUSIC_SCHOOLS, MUSIC_COMPANIES};
pub use pricing::{AmountInput, CheckoutAmount, PricingError};
pub use scoring::{compute_connections, compute_rarity, compute_result, rarity_band, score_breakdown, Factor, RarityBand, ScoreBreakdown};
pub use share::ShareCopy;
