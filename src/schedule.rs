use embassy_time::Duration;

/// Publications due on a sensor poll.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Due {
    pub mqtt: bool,
    pub firebase: bool,
}

/// Counts sensor polls and tells the main loop when to publish.
///
/// Both publications are due on the first poll after boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSchedule {
    poll_interval: Duration,
    mqtt_every: u32,
    firebase_every: u32,
    mqtt_counter: u32,
    firebase_counter: u32,
}

// Polls per publication, rounded up so publishing is never faster than asked
fn polls_per(interval: Duration, poll: Duration) -> u32 {
    let poll = poll.as_millis().max(1);
    let polls = interval.as_millis().div_ceil(poll).max(1);
    u32::try_from(polls).unwrap_or(u32::MAX)
}

impl PublishSchedule {
    pub fn new(poll_interval: Duration, mqtt_interval: Duration, firebase_interval: Duration) -> Self {
        Self {
            poll_interval,
            mqtt_every: polls_per(mqtt_interval, poll_interval),
            firebase_every: polls_per(firebase_interval, poll_interval),
            mqtt_counter: 0,
            firebase_counter: 0,
        }
    }

    /// Time to wait between polls.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn tick(&mut self) -> Due {
        let due = Due {
            mqtt: self.mqtt_counter == 0,
            firebase: self.firebase_counter == 0,
        };
        self.mqtt_counter = (self.mqtt_counter + 1) % self.mqtt_every;
        self.firebase_counter = (self.firebase_counter + 1) % self.firebase_every;

        if due.mqtt || due.firebase {
            log::debug!("Publish due: {:?}", due);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn default_cadence() {
        // poll 30 s, mqtt 1 min, firebase 30 min
        let mut schedule = PublishSchedule::new(ms(30_000), ms(60_000), ms(1_800_000));
        let dues: Vec<Due> = (0..121).map(|_| schedule.tick()).collect();

        let mqtt: Vec<usize> = (0..121).filter(|&i| dues[i].mqtt).collect();
        let firebase: Vec<usize> = (0..121).filter(|&i| dues[i].firebase).collect();

        assert_eq!(mqtt.len(), 61);
        assert_eq!(&mqtt[..3], &[0, 2, 4]);
        assert_eq!(firebase, vec![0, 60, 120]);
    }

    #[test]
    fn first_poll_publishes_everything() {
        let mut schedule = PublishSchedule::new(ms(1_000), ms(5_000), ms(10_000));
        assert_eq!(
            schedule.tick(),
            Due {
                mqtt: true,
                firebase: true
            }
        );
        assert_eq!(schedule.tick(), Due::default());
    }

    #[test]
    fn rounds_up_uneven_intervals() {
        assert_eq!(polls_per(ms(45_000), ms(30_000)), 2);
        assert_eq!(polls_per(ms(60_000), ms(30_000)), 2);
    }

    #[test]
    fn interval_shorter_than_poll_publishes_every_poll() {
        let mut schedule = PublishSchedule::new(ms(30_000), ms(1_000), ms(30_000));
        for _ in 0..5 {
            assert_eq!(
                schedule.tick(),
                Due {
                    mqtt: true,
                    firebase: true
                }
            );
        }
    }

    #[test]
    fn built_from_config() {
        let config = &crate::config::CONFIG;
        let schedule = config.publish_schedule();
        assert_eq!(schedule.poll_interval(), config.sensor_poll_interval);
    }
}
