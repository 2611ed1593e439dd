use std::time::Duration;

pub const DEFAULT_DENIAL_DELAY: Duration = Duration::from_millis(1_500);

#[derive(Debug, Clone)]
pub struct Config {
    /// Suppresses decorative output.
    ///
    /// `1` hides headers, `2` only prints the final outcome.
    pub quiet: u8,
    pub no_banner: bool,
    /// How long a denial notice stays on screen before the redirect fires.
    pub denial_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: 0,
            no_banner: false,
            denial_delay: DEFAULT_DENIAL_DELAY,
        }
    }
}
