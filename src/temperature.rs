use crate::constants::LM35_MV_PER_CELSIUS;

/// LM35 sensor behind an ADC input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lm35 {
    /// Input voltage at full scale
    pub reference_mv: u32,
    /// Raw reading at full scale
    pub max_raw: u16,
}

impl Lm35 {
    /// A0 on a Wemos D1 Mini: 10-bit, 3.3 V through the on-board divider.
    pub const WEMOS_A0: Lm35 = Lm35 {
        reference_mv: 3300,
        max_raw: 1023,
    };

    pub fn millivolts(&self, raw: u16) -> f32 {
        if self.max_raw == 0 {
            return 0.0;
        }
        let raw = raw.min(self.max_raw);
        raw as f32 * self.reference_mv as f32 / self.max_raw as f32
    }

    pub fn celsius(&self, raw: u16) -> f32 {
        self.millivolts(raw) / LM35_MV_PER_CELSIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn converts_raw_reading() {
        let sensor = Lm35::WEMOS_A0;
        assert!(close(sensor.celsius(0), 0.0));
        assert!(close(sensor.millivolts(31), 100.0));
        assert!(close(sensor.celsius(31), 10.0));
        assert!(close(sensor.celsius(1023), 330.0));
    }

    #[test]
    fn saturates_at_full_scale() {
        let sensor = Lm35::WEMOS_A0;
        assert!(close(sensor.celsius(4095), sensor.celsius(1023)));
    }

    #[test]
    fn zero_scale_reads_zero() {
        let sensor = Lm35 {
            reference_mv: 1000,
            max_raw: 0,
        };
        assert!(close(sensor.celsius(10), 0.0));
    }
}
