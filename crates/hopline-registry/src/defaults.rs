//! Generated defaults for players that join without a name or color.

use hopline_protocol::PlayerId;
use rand::Rng;

/// The fixed color palette clients pick from. Purely cosmetic — the relay
/// never validates that a client-supplied color is one of these.
pub const PALETTE: [&str; 12] = [
    "#FF6B6B", "#FFA94D", "#FFD43B", "#A9E34B", "#69DB7C", "#38D9A9",
    "#3BC9DB", "#4DABF7", "#748FFC", "#9775FA", "#DA77F2", "#F783AC",
];

const ADJECTIVES: [&str; 12] = [
    "Swift", "Brave", "Sneaky", "Dizzy", "Mighty", "Lucky", "Rapid",
    "Silent", "Bouncy", "Fuzzy", "Wild", "Turbo",
];

const NOUNS: [&str; 12] = [
    "Falcon", "Badger", "Comet", "Llama", "Viper", "Otter", "Rocket",
    "Panda", "Wombat", "Gecko", "Raven", "Mole",
];

/// Builds a display name for a player that joined without one:
/// adjective + noun + the connection id as a suffix.
pub fn generate_name(id: PlayerId) -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{adjective}{noun}-{}", id.0)
}

/// Draws a color uniformly at random from the fixed palette.
pub fn random_color() -> String {
    let mut rng = rand::rng();
    PALETTE[rng.random_range(0..PALETTE.len())].to_string()
}
