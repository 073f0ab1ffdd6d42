//! Emitting messages about instant events to the UI layer

use util::{Noun, Sentence, StrExt};

use crate::prelude::*;

/// Interface for receiving game event messages for displaying.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Msg {
    /// Text message.
    Message(String),

    /// Entity changed position.
    Moved {
        entity: Entity,
        from: Location,
        to: Location,
    },

    /// Attack went through and took off health.
    Hit {
        attacker: Entity,
        target: Entity,
        damage: i32,
    },

    /// An attack missed an entity.
    Miss(Entity),

    /// Entity dies.
    Death { entity: Entity, location: Location },

    ItemPickedUp { mob: Entity, item: Entity },

    ItemDropped { mob: Entity, item: Entity },

    DoorOpened(Location),

    DoorClosed(Location),
}

impl Runtime {
    pub fn send_msg(&mut self, msg: Msg) {
        if let Msg::Message(text) = &msg {
            log::debug!("msg: {text}");
        }
        self.msgs.push_back(msg);
    }

    /// Hand queued messages over to the view layer.
    pub fn drain_msgs(&mut self) -> impl Iterator<Item = Msg> + '_ {
        self.msgs.drain(..)
    }
}

#[doc(hidden)]
pub fn send_text(r: &mut impl AsMut<Runtime>, text: String) {
    r.as_mut().send_msg(Msg::Message(text));
}

pub trait Grammatize {
    fn format(&self, s: &str) -> String;
}

fn expand(
    s: &str,
    f: impl FnMut(&str) -> anyhow::Result<String>,
) -> String {
    match s.templatize(f) {
        Ok(ret) => ret,
        Err(e) => {
            log::warn!("bad message template {s:?}: {e}");
            s.to_string()
        }
    }
}

impl Grammatize for () {
    fn format(&self, s: &str) -> String {
        expand(s, |_| anyhow::bail!("no nouns"))
    }
}

impl Grammatize for (Noun,) {
    fn format(&self, s: &str) -> String {
        expand(s, |e| self.0.convert(e))
    }
}

impl Grammatize for (Noun, Noun) {
    fn format(&self, s: &str) -> String {
        expand(s, |e| Sentence::new(&self.0, &self.1).convert(e))
    }
}

/// Queue a text message in the runtime.
///
/// Nouns after a semicolon fill in the grammar template,
/// `msg!(r, "[One] hit[s] [another]."; a.noun(r), b.noun(r))`.
#[macro_export]
macro_rules! msg {
    // NB. Even the simple cases needs to be wrapped in `format!` in case the
    // fmt string is doing named variable capture.
    ($r:expr, $fmt:expr) => {
        $crate::msg::send_text($r, format!($fmt))
    };

    ($r:expr, $fmt:expr, $($arg:expr),*) => {
        let __txt = format!($fmt, $($arg),*);
        $crate::msg::send_text($r, __txt)
    };

    ($r:expr, $fmt:expr; $($grammar_arg:expr),*) => {
        let __txt = format!($fmt);
        let __txt = $crate::Grammatize::format(&($($grammar_arg,)*), &__txt);
        $crate::msg::send_text($r, __txt)
    };

    ($r:expr, $fmt:expr, $($arg:expr),*; $($grammar_arg:expr),*) => {
        let __txt = format!($fmt, $($arg),*);
        let __txt = $crate::Grammatize::format(&($($grammar_arg,)*), &__txt);
        $crate::msg::send_text($r, __txt)
    };
}
