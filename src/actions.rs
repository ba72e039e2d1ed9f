//! The shared pipeline behind every interactive GIF command.
//!
//! Cooldown, then target validation, then the GIF search, then a randomly
//! chosen flavour message. Each step can end the invocation with a rejection
//! the user gets to see.

use anyhow::Result;
use rand::seq::SliceRandom;

use crate::{
    cooldown::{self, CooldownStatus, GIF_COMMAND_WINDOW},
    database::Database,
    gif::{GifError, GifSource},
    serenity::{self, Mentionable as _, UserId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hug,
    Kiss,
    Slap,
    Punch,
    Kill,
    Fuck,
    Groom,
}

impl Action {
    pub const ALL: [Self; 7] = [Self::Hug, Self::Kiss, Self::Slap, Self::Punch, Self::Kill, Self::Fuck, Self::Groom];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hug => "hug",
            Self::Kiss => "kiss",
            Self::Slap => "slap",
            Self::Punch => "punch",
            Self::Kill => "kill",
            Self::Fuck => "fuck",
            Self::Groom => "groom",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Hug => "🤗",
            Self::Kiss => "😘",
            Self::Slap => "👋",
            Self::Punch => "👊",
            Self::Kill => "⚔️",
            Self::Fuck => "💕",
            Self::Groom => "✨",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Hug => "Give someone a warm hug",
            Self::Kiss => "Give someone a sweet kiss",
            Self::Slap => "Slap someone (playfully)",
            Self::Punch => "Throw a punch (playfully)",
            Self::Kill => "Eliminate someone (playfully)",
            Self::Fuck => "Show intimate affection",
            Self::Groom => "Help someone look their best",
        }
    }

    fn templates(self) -> &'static [&'static str] {
        match self {
            Self::Hug => &[
                "{author} gives {target} a big warm hug! 🤗💕",
                "{author} hugs {target} tightly! 🫂❤️",
                "{author} wraps {target} in a cozy hug! 🤗✨",
                "{target} receives a loving hug from {author}! 💝🤗",
            ],
            Self::Kiss => &[
                "{author} gives {target} a sweet kiss! 😘💋",
                "{author} kisses {target} gently! 💕😚",
                "{target} receives a loving kiss from {author}! 💖😘",
                "{author} plants a kiss on {target}! 💋✨",
            ],
            Self::Slap => &[
                "{author} slaps {target}! 👋😤",
                "{author} gives {target} a firm slap! ✋💢",
                "{target} got slapped by {author}! 👋😵",
                "{author} slaps {target} across the face! 💥👋",
            ],
            Self::Punch => &[
                "{author} punches {target}! 👊💥",
                "{author} throws a punch at {target}! 🥊😠",
                "{target} gets punched by {author}! 👊😵",
                "{author} delivers a powerful punch to {target}! 💥👊",
            ],
            Self::Kill => &[
                "{author} eliminates {target}! ⚔️💀",
                "{author} takes down {target}! 🗡️😵",
                "{target} has been defeated by {author}! ⚰️💀",
                "{author} delivers the final blow to {target}! ⚔️💥",
            ],
            Self::Fuck => &[
                "{author} shows {target} some love! 💕🔥",
                "{author} gets intimate with {target}! 😏💋",
                "{target} receives passionate attention from {author}! 🔥❤️",
                "{author} and {target} share an intimate moment! 💕✨",
            ],
            Self::Groom => &[
                "{author} helps groom {target}! ✨💅",
                "{author} gives {target} a makeover! 💄✨",
                "{target} gets groomed by {author}! 🛁💇",
                "{author} helps {target} look fabulous! ✨👑",
            ],
        }
    }

    /// "hug" -> "Hug", for embed footers.
    #[must_use]
    pub fn title(self) -> String {
        let mut chars = self.name().chars();
        chars.next().map(|first| first.to_uppercase().chain(chars).collect()).unwrap_or_default()
    }

    pub fn render(self, author: &str, target: &str, rng: &mut impl rand::Rng) -> String {
        let template = self.templates().choose(rng).copied().unwrap_or("{author} → {target}");
        template.replace("{author}", author).replace("{target}", target)
    }

    fn search_query(self) -> String {
        format!("anime {}", self.name())
    }
}

/// The parts of a user the pipeline needs.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: UserId,
    pub bot: bool,
    pub mention: String,
}

impl From<&serenity::User> for Participant {
    fn from(user: &serenity::User) -> Self {
        Self {
            id: user.id,
            bot: user.bot,
            mention: user.mention().to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ActionRejection {
    Cooldown { remaining_secs: u64 },
    SelfTarget,
    BotSelfTarget,
    BotTarget,
    Fetch(GifError),
}

impl ActionRejection {
    #[must_use]
    pub fn message(&self, action: Action) -> String {
        let name = action.name();
        match self {
            Self::Cooldown {remaining_secs} => format!("⏰ You're doing that too fast! Wait {remaining_secs} more seconds."),
            Self::SelfTarget => format!("🤔 You can't {name} yourself!"),
            Self::BotSelfTarget => format!("😳 Hey! You can't {name} me!"),
            Self::BotTarget => format!("🤖 Bots don't feel {name}s!"),
            Self::Fetch(err) => format!("😔 Sorry, I couldn't find a {name} GIF right now. {err}"),
        }
    }
}

#[derive(Debug)]
pub struct ActionReply {
    pub message: String,
    pub gif_url: String,
}

#[derive(Debug)]
pub enum ActionOutcome {
    Reply(ActionReply),
    Rejected(ActionRejection),
}

#[must_use]
pub fn validate_target(invoker: &Participant, target: &Participant, bot_id: UserId) -> Option<ActionRejection> {
    if target.id == invoker.id {
        Some(ActionRejection::SelfTarget)
    } else if target.id == bot_id {
        Some(ActionRejection::BotSelfTarget)
    } else if target.bot {
        Some(ActionRejection::BotTarget)
    } else {
        None
    }
}

pub async fn perform(
    db: &Database,
    gifs: &dyn GifSource,
    action: Action,
    invoker: &Participant,
    target: &Participant,
    bot_id: UserId,
) -> Result<ActionOutcome> {
    if let CooldownStatus::Throttled {remaining_secs} = cooldown::check_and_stamp(db, invoker.id, action.name(), GIF_COMMAND_WINDOW).await? {
        return Ok(ActionOutcome::Rejected(ActionRejection::Cooldown {remaining_secs}));
    }

    if let Some(rejection) = validate_target(invoker, target, bot_id) {
        return Ok(ActionOutcome::Rejected(rejection));
    }

    let gif_url = match gifs.search(&action.search_query()).await {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!("Could not fetch {} GIF: {err}", action.name());
            return Ok(ActionOutcome::Rejected(ActionRejection::Fetch(err)));
        }
    };

    let message = action.render(&invoker.mention, &target.mention, &mut rand::thread_rng());
    Ok(ActionOutcome::Reply(ActionReply {message, gif_url}))
}
