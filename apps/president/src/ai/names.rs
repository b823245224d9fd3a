//! Generated display names for AI seats.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const NAMES: [&str; 16] = [
    "Albert", "Berenice", "Camille", "Dorian", "Eliane", "Fernand", "Gisele", "Hector",
    "Ines", "Jules", "Leonie", "Marius", "Noemie", "Oscar", "Paulette", "Raoul",
];

/// Draw a name; seeded draws are reproducible.
pub fn generate_name(seed: Option<u64>) -> String {
    let idx = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed).random_range(0..NAMES.len()),
        None => rand::rng().random_range(0..NAMES.len()),
    };
    format!("{} (AI)", NAMES[idx])
}
