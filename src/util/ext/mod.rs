pub use self::{channel::ChannelExt, component::ComponentExt, message::MessageExt};

mod channel;
mod component;
mod message;
