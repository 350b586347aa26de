//! Definition of logger configuration.

use crate::ChannelId;

/// What a channel does when its sink fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Remember the failure on the channel and report success to the caller.
    ///
    /// Failure can be inspected later with [`Channel::has_failed`](crate::Channel::has_failed)
    /// and [`Channel::take_error`](crate::Channel::take_error).
    #[default]
    Retain,

    /// Return the failure to the caller of the channel operation.
    Propagate,
}

/// Configuration of a [`Logger`](crate::Logger) and its channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    enabled: bool,
    error_policy: ErrorPolicy,
    info_prefix: &'static str,
    debug_prefix: &'static str,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            error_policy: ErrorPolicy::default(),
            info_prefix: ChannelId::Info.default_prefix(),
            debug_prefix: ChannelId::Debug.default_prefix(),
        }
    }
}

impl LoggerConfig {
    /// Enable or disable all channels.
    ///
    /// Has no effect when built with the `disable-logging` feature, every
    /// channel is disabled then.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set how channels react to sink failures.
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Override the prefix of a channel.
    ///
    /// # Arguments
    ///
    /// * `id` - Channel to configure.
    /// * `prefix` - Bytes emitted once per flush cycle of the channel.
    pub fn with_prefix(mut self, id: ChannelId, prefix: &'static str) -> Self {
        match id {
            ChannelId::Info => self.info_prefix = prefix,
            ChannelId::Debug => self.debug_prefix = prefix,
        }

        self
    }

    /// true if channels built from this config write to their sinks.
    pub fn enabled(&self) -> bool {
        self.enabled && cfg!(not(feature = "disable-logging"))
    }

    /// How channels react to sink failures.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Prefix configured for a channel.
    pub fn prefix(&self, id: ChannelId) -> &'static str {
        match id {
            ChannelId::Info => self.info_prefix,
            ChannelId::Debug => self.debug_prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.error_policy(), ErrorPolicy::Retain);
        assert_eq!(config.prefix(ChannelId::Info), "[info]: ");
        assert_eq!(config.prefix(ChannelId::Debug), "[debug]: ");
        assert_eq!(config.enabled(), cfg!(not(feature = "disable-logging")));
    }

    #[test]
    fn overrides() {
        let config = LoggerConfig::default()
            .with_enabled(false)
            .with_error_policy(ErrorPolicy::Propagate)
            .with_prefix(ChannelId::Debug, "D ");

        assert!(!config.enabled());
        assert_eq!(config.error_policy(), ErrorPolicy::Propagate);
        assert_eq!(config.prefix(ChannelId::Debug), "D ");
        assert_eq!(config.prefix(ChannelId::Info), "[info]: ");
    }
}
