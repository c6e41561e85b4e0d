use eyre::{ContextCompat, Result};
use twilight_model::{
    application::interaction::message_component::MessageComponentInteractionData,
    channel::Message,
    guild::PartialMember,
    id::{
        marker::{ChannelMarker, InteractionMarker, UserMarker},
        Id,
    },
    user::User,
};

/// A button click, stripped down to the parts the game cares about.
pub struct InteractionComponent {
    pub channel_id: Id<ChannelMarker>,
    pub data: MessageComponentInteractionData,
    pub id: Id<InteractionMarker>,
    pub member: Option<PartialMember>,
    pub message: Message,
    pub token: String,
    pub user: Option<User>,
}

impl InteractionComponent {
    pub fn user(&self) -> Result<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
            .context("missing user in interaction")
    }

    pub fn user_id(&self) -> Result<Id<UserMarker>> {
        self.user().map(|user| user.id)
    }

    /// Server nickname if there is one, otherwise the account name.
    pub fn display_name(&self) -> &str {
        self.member
            .as_ref()
            .and_then(|member| member.nick.as_deref())
            .or_else(|| self.user().map(|user| user.name.as_str()).ok())
            .unwrap_or("<unknown user>")
    }
}
