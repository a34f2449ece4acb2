use crate::models::ConnectionResult;

/// Branding used to word shareable results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCopy {
    pub celebrity: String,
    /// Fan-base noun, also the fallback display name
    pub fan_noun: String,
    pub site: String,
    /// Short tag embedded in generated image file names
    pub file_tag: String,
}

impl Default for ShareCopy {
    fn default() -> Self {
        Self {
            celebrity: "Taylor Swift".to_string(),
            fan_noun: "Swiftie".to_string(),
            site: "swifties.getsanely.com".to_string(),
            file_tag: "taylor".to_string(),
        }
    }
}

/// Trimmed first name, or `None` when blank
fn clean_name(first_name: Option<&str>) -> Option<&str> {
    first_name.map(str::trim).filter(|name| !name.is_empty())
}

impl ShareCopy {
    pub fn display_name<'a>(&'a self, first_name: Option<&'a str>) -> &'a str {
        clean_name(first_name).unwrap_or(&self.fan_noun)
    }

    /// Headline used as the share sheet title
    pub fn title(&self, result: &ConnectionResult, first_name: Option<&str>) -> String {
        format!(
            "{} is {} connections from {}!",
            self.display_name(first_name),
            result.connections,
            self.celebrity
        )
    }

    /// Social post text with a link back to the quiz
    pub fn caption(&self, result: &ConnectionResult, first_name: Option<&str>) -> String {
        let subject = match clean_name(first_name) {
            Some(name) => format!("{} is", name),
            None => "I'm".to_string(),
        };

        format!(
            "{} {} connections from {}! In the top {} of {}s! 💜 Find your connection at {}",
            subject, result.connections, self.celebrity, result.rarity, self.fan_noun, self.site
        )
    }

    pub fn rarity_message(&self, result: &ConnectionResult, first_name: Option<&str>) -> String {
        match clean_name(first_name) {
            Some(name) => format!(
                "{}, only {} of {}s are this close! 💜",
                name, result.rarity, self.fan_noun
            ),
            None => format!("Only {} of {}s are this close! 💜", result.rarity, self.fan_noun),
        }
    }

    /// e.g. `mary-jane-taylor-connection-3.png`
    pub fn file_name(&self, first_name: Option<&str>, connections: u8) -> String {
        let slug = self
            .display_name(first_name)
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");

        format!("{}-{}-connection-{}.png", slug, self.file_tag, connections)
    }
}
