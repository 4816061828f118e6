//! Two-tier app categorization: the platform's own classification wins
//! when the device exposes one, otherwise ordered substring heuristics
//! over the package identifier decide. Group order is the tie-break rule
//! and is observable behavior; do not reorder.

pub const CATEGORY_GAMES: &str = "Games";
pub const CATEGORY_ENTERTAINMENT: &str = "Entertainment";
pub const CATEGORY_COMMUNICATION: &str = "Communication";
pub const CATEGORY_LEARNING: &str = "Learning";
pub const CATEGORY_OTHER: &str = "Other";

// ApplicationInfo.category constants the native tier recognizes.
const NATIVE_CATEGORY_GAME: i32 = 0;
const NATIVE_CATEGORY_VIDEO: i32 = 2;
const NATIVE_CATEGORY_SOCIAL: i32 = 4;
const NATIVE_CATEGORY_PRODUCTIVITY: i32 = 7;

// Keyword groups, matched in this order against the raw (case-sensitive)
// package identifier; first hit wins.
pub(crate) const ENTERTAINMENT_KEYWORDS: [&str; 9] = [
    "youtube",
    "netflix",
    "spotify",
    "music",
    "video",
    "hotstar",
    "primevideo",
    "disney",
    "twitch",
];
pub(crate) const GAMES_KEYWORDS: [&str; 7] = [
    "game",
    "pubg",
    "minecraft",
    "roblox",
    "clash",
    "chess",
    "candycrush",
];
pub(crate) const COMMUNICATION_KEYWORDS: [&str; 10] = [
    "whatsapp",
    "telegram",
    "messenger",
    "messaging",
    "dialer",
    "contacts",
    "discord",
    "mail",
    "chat",
    "mms",
];
pub(crate) const LEARNING_KEYWORDS: [&str; 8] = [
    "duolingo",
    "coursera",
    "udemy",
    "khanacademy",
    "classroom",
    "brilliant",
    "learn",
    "edu",
];

/// Category label for one app. Pure; identical inputs always yield the
/// same label.
pub fn categorize(native_category: Option<i32>, package: &str) -> &'static str {
    if let Some(native) = native_category {
        match native {
            NATIVE_CATEGORY_GAME => return CATEGORY_GAMES,
            NATIVE_CATEGORY_VIDEO => return CATEGORY_ENTERTAINMENT,
            NATIVE_CATEGORY_SOCIAL => return CATEGORY_COMMUNICATION,
            NATIVE_CATEGORY_PRODUCTIVITY => return CATEGORY_LEARNING,
            // Unrecognized constants fall through to the keyword tier.
            _ => {}
        }
    }
    categorize_by_keywords(package)
}

fn categorize_by_keywords(package: &str) -> &'static str {
    let groups: [(&[&str], &'static str); 4] = [
        (&ENTERTAINMENT_KEYWORDS, CATEGORY_ENTERTAINMENT),
        (&GAMES_KEYWORDS, CATEGORY_GAMES),
        (&COMMUNICATION_KEYWORDS, CATEGORY_COMMUNICATION),
        (&LEARNING_KEYWORDS, CATEGORY_LEARNING),
    ];
    for (keywords, label) in groups {
        if keywords.iter().any(|kw| package.contains(kw)) {
            return label;
        }
    }
    CATEGORY_OTHER
}
