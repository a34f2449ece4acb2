/// Cities with a dense music-industry scene
pub const MUSIC_HUBS: &[&str] = &[
    "nashville",
    "los angeles",
    "new york",
    "nyc",
    "london",
    "toronto",
    "austin",
];

/// Schools with strong music programs
pub const MUSIC_SCHOOLS: &[&str] = &[
    "berklee",
    "belmont",
    "full sail",
    "juilliard",
    "usc",
    "nyu",
    "vanderbilt",
];

/// Labels, streaming services and other music employers
pub const MUSIC_COMPANIES: &[&str] = &[
    "republic",
    "big machine",
    "universal",
    "sony",
    "warner",
    "spotify",
    "apple music",
    "record label",
];

/// Check whether free text mentions any keyword
///
/// Case-insensitive substring match, so "Greater Nashville Area" hits
/// `nashville`. Keywords must already be lowercase.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    if text.is_empty() {
        return false;
    }

    let lowered = text.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}
