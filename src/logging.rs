use log::LevelFilter;

/// Logging switch of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logging {
    pub debug: bool,
}

impl Logging {
    /// Level handed to the board logger, e.g. `esp_println::logger::init_logger`.
    pub const fn level_filter(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Off
        }
    }

    pub fn apply(&self) {
        log::set_max_level(self.level_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn debug_enables_logging() {
        assert_eq!(Logging { debug: true }.level_filter(), LevelFilter::Debug);
        assert_eq!(Logging { debug: false }.level_filter(), LevelFilter::Off);
    }

    #[test]
    fn apply_sets_max_level() {
        Logging { debug: false }.apply();
        assert_eq!(log::max_level(), LevelFilter::Off);
        Logging { debug: true }.apply();
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }

    #[test]
    fn follows_config() {
        let logging = crate::config::CONFIG.logging();
        assert_eq!(logging.debug, crate::config::CONFIG.debug);
    }
}
