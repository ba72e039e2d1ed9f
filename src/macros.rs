#[macro_export]
macro_rules! require {
    ($to_check:expr) => {
        $crate::require!($to_check, ())
    };
    ($to_check:expr, $ret:expr) => {
        if let Some(to_check) = $to_check {
            to_check
        } else {
            return $ret;
        }
    };
}

#[macro_export]
macro_rules! require_guild {
    ($ctx:expr) => {
        $crate::require!($ctx.guild_id(), {
            ::tracing::warn!("{} command invoked outside of a guild!", $ctx.command().qualified_name);
            Ok(())
        })
    };
}
