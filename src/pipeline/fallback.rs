//! Fallback Tokens
//!
//! Locally generated placeholder listing served when the leaderboard is
//! unreachable or empty, so the UI never renders a blank page.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{is_bonded, Socials, Token, TokenStatus, ASSUMED_SUPPLY};
use crate::ports::Clock;

/// Maximum number of fallback tokens served
pub const FALLBACK_LIMIT: usize = 20;

const MAX_FALLBACK_AGE_SECS: i64 = 14 * 86_400;

/// (name, symbol, description)
const TEMPLATES: [(&str, &str, &str); 10] = [
    ("Solana Bags", "SBAGS", "The original bag token on Solana"),
    ("Diamond Bags", "DBAGS", "Diamond hands holding bags forever"),
    ("Moon Bags", "MBAGS", "Bags heading straight to the moon"),
    ("Rocket Bags", "RBAGS", "Rocket-powered bag collection"),
    ("Golden Bags", "GBAGS", "Premium golden bag experience"),
    ("Crystal Bags", "CBAGS", "Clear crystal bag technology"),
    ("Phantom Bags", "PBAGS", "Mysterious phantom bag protocol"),
    ("Cosmic Bags", "CMBAGS", "Intergalactic bag transportation"),
    ("Neon Bags", "NBAGS", "Bright neon bag collection"),
    ("Storm Bags", "STBAGS", "Weather-resistant storm bags"),
];

/// Generates the placeholder listing from a seeded RNG
#[derive(Debug, Clone, Copy)]
pub struct FallbackGenerator {
    seed: u64,
}

impl FallbackGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generate the fallback listing, newest first
    pub fn generate(&self, clock: &dyn Clock) -> Vec<Token> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let now = clock.now();

        let mut tokens: Vec<Token> = TEMPLATES
            .iter()
            .map(|(name, symbol, description)| {
                let market_cap = rng.gen_range(20_000u64..2_020_000) as f64;
                let bonded = is_bonded(market_cap);
                let address = random_address(&mut rng);
                let slug = symbol.to_lowercase();

                let socials = if rng.gen_bool(0.6) {
                    Socials::from_links(
                        Some(format!("https://{}.bags.fm", slug)),
                        rng.gen_bool(0.5).then(|| format!("https://twitter.com/{}", slug)),
                        rng.gen_bool(0.3).then(|| format!("https://t.me/{}", slug)),
                    )
                } else {
                    None
                };

                Token {
                    id: address.clone(),
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    description: description.to_string(),
                    market_cap,
                    price: market_cap / ASSUMED_SUPPLY,
                    change_24h: rng.gen_range(-30.0..=30.0),
                    volume_24h: (rng.gen_range(0.0..0.4) * market_cap).floor(),
                    total_supply: ASSUMED_SUPPLY,
                    status: TokenStatus::from_market_cap(market_cap),
                    image_url: Some(format!(
                        "https://api.dicebear.com/7.x/shapes/svg?seed={}",
                        symbol
                    )),
                    created_at: now - Duration::seconds(rng.gen_range(0..=MAX_FALLBACK_AGE_SECS)),
                    mint: address.clone(),
                    contract_address: address,
                    has_reached_75k: bonded,
                    is_bonded: bonded,
                    socials,
                }
            })
            .collect();

        super::sort_tokens(&mut tokens);
        tokens.truncate(FALLBACK_LIMIT);
        tokens
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Base58 encoding of 32 random bytes, shaped like a Solana mint address
fn random_address(rng: &mut StdRng) -> String {
    let bytes: [u8; 32] = rng.gen();
    bs58::encode(bytes).into_string()
}
