#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)] // I honestly cannot be bothered to document rn
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub use poise;
pub use poise::serenity_prelude as serenity;

#[macro_use]
mod macros;

pub mod actions;
pub mod commands;
pub mod cooldown;
pub mod database;
pub mod dispatch;
pub mod errors;
pub mod gif;
pub mod heartbeat;
pub mod help;
pub mod logging;
pub mod resolver;
pub mod router;
pub mod settings;
mod traits;
mod looper;

pub use traits::PoiseContextExt;
pub use looper::Looper;

#[allow(clippy::unreadable_literal)]
pub const RED: u32 = 0xff0000;
#[allow(clippy::unreadable_literal)]
pub const PINK: u32 = 0xff69b4;
#[allow(clippy::unreadable_literal)]
pub const TEAL: u32 = 0x00ffcc;
#[allow(clippy::unreadable_literal)]
pub const BLURPLE: u32 = 0x7289da;

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type Command = poise::Command<Data, Error>;
pub type FrameworkContext<'a> = poise::FrameworkContext<'a, Data, Error>;

pub struct Data {
    pub db: database::Database,
    pub gifs: std::sync::Arc<dyn gif::GifSource>,
}
