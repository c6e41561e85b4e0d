use twilight_model::channel::message::embed::Embed;

use crate::util::constants::DARK_GREEN;

#[derive(Clone)]
pub struct EmbedBuilder(Embed);

impl Default for EmbedBuilder {
    fn default() -> Self {
        Self(Embed {
            author: None,
            color: Some(DARK_GREEN),
            description: None,
            fields: Vec::new(),
            footer: None,
            image: None,
            kind: String::new(),
            provider: None,
            thumbnail: None,
            timestamp: None,
            title: None,
            url: None,
            video: None,
        })
    }
}

impl EmbedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(mut self) -> Embed {
        self.0.kind.push_str("rich");

        self.0
    }

    pub fn color(mut self, color: u32) -> Self {
        self.0.color = Some(color);

        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());

        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());

        self
    }
}
