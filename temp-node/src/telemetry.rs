//! The two-byte telemetry payload.

/// A temperature in hundredths of a degree Celsius, big-endian two's complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryPayload([u8; 2]);

impl TelemetryPayload {
    /// Encodes a temperature, truncating toward zero to 0.01 °C.
    ///
    /// Values outside ±327.67 °C saturate at the `i16` bounds.
    pub fn from_celsius(celsius: f32) -> Self {
        let centi = (celsius * 100.0) as i16;
        Self(centi.to_be_bytes())
    }

    /// Wraps two received payload bytes.
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    /// The encoded bytes, high byte first.
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// The temperature in hundredths of a degree.
    pub fn centi_celsius(&self) -> i16 {
        i16::from_be_bytes(self.0)
    }

    /// The temperature in degrees Celsius.
    pub fn celsius(&self) -> f32 {
        self.centi_celsius() as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_high_byte_first() {
        assert_eq!(TelemetryPayload::from_celsius(41.0).as_bytes(), &[0x10, 0x04]);
        assert_eq!(TelemetryPayload::from_celsius(25.0).as_bytes(), &[0x09, 0xC4]);
        assert_eq!(TelemetryPayload::from_celsius(-10.25).as_bytes(), &[0xFB, 0xFF]);
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(TelemetryPayload::from_celsius(25.0078125).centi_celsius(), 2500);
        assert_eq!(TelemetryPayload::from_celsius(-0.0078125).centi_celsius(), 0);
    }

    #[test]
    fn saturates_out_of_range() {
        assert_eq!(TelemetryPayload::from_celsius(400.0).centi_celsius(), i16::MAX);
        assert_eq!(TelemetryPayload::from_celsius(-400.0).centi_celsius(), i16::MIN);
    }

    #[test]
    fn decoding_recovers_temperature_within_a_hundredth() {
        // Sweep the representable range at the sensor's own resolution.
        let mut raw: i32 = -327 * 128;
        while raw <= 327 * 128 {
            let celsius = raw as f32 * 0.0078125;
            let decoded = TelemetryPayload::from_celsius(celsius).celsius();
            assert!(
                (decoded - celsius).abs() <= 0.0101,
                "{celsius} decoded as {decoded}"
            );
            raw += 37;
        }
    }

    #[test]
    fn decodes_received_bytes() {
        let payload = TelemetryPayload::from_bytes([0x10, 0x04]);
        assert_eq!(payload.centi_celsius(), 4100);
        assert_eq!(payload.celsius(), 41.0);
    }
}
