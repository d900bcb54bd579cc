use super::*;

mod actions;
mod animation;
mod dom;
mod events;
mod html;
mod timers;

pub(crate) use html::{is_void_tag, parse_html};
