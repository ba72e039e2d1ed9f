use crate::Command;

pub mod actions;
pub mod autoreact;
pub mod help;
pub mod prefix;

pub const PERMISSION_DENIED: &str = "❌ You don't have administrator permissions to use this command.";

#[must_use]
pub fn all() -> Vec<Command> {
    vec![
        actions::hug(),
        actions::kiss(),
        actions::slap(),
        actions::punch(),
        actions::kill(),
        actions::fuck(),
        actions::groom(),
        autoreact::autoreact(),
        autoreact::autoreactoff(),
        autoreact::setreactchannels(),
        autoreact::setchannelemojis(),
        autoreact::autoreactconfig(),
        prefix::prefixinfo(),
        prefix::setprefix(),
        help::help(),
        help::help_interactive(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_command() {
        let commands = all();
        for action in crate::actions::Action::ALL {
            assert!(commands.iter().any(|c| c.name == action.name()), "{} missing", action.name());
        }
    }

    #[test]
    fn settings_commands_require_administrator() {
        let admin_only: Vec<_> = all()
            .into_iter()
            .filter(|c| c.required_permissions.contains(crate::serenity::Permissions::ADMINISTRATOR))
            .map(|c| c.name)
            .collect();

        assert_eq!(admin_only, ["autoreact", "autoreactoff", "setreactchannels", "setchannelemojis", "setprefix"]);
        assert!(all().iter().all(|c| c.checks.is_empty()));
    }

    #[test]
    fn every_command_is_guild_only_and_described() {
        for command in all() {
            assert!(command.guild_only, "{}", command.name);
            assert!(command.description.is_some(), "{}", command.name);
            assert!(command.category.is_some(), "{}", command.name);
        }
    }
}
