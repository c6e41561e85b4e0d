use twilight_model::channel::message::{component::Component, embed::Embed};

#[derive(Default)]
pub struct MessageBuilder {
    pub embed: Option<Embed>,
    pub components: Option<Vec<Component>>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);

        self
    }

    pub fn components(mut self, components: Vec<Component>) -> Self {
        self.components = Some(components);

        self
    }
}
