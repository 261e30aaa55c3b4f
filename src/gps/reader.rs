//! GPS fix acquisition over a line-oriented serial feed.
//!
//! `GpsReader` scans the feed for a valid RMC sentence and converts every
//! failure mode (timeout, malformed line, dead port) into "no fix".
//! Nothing from this module raises into the voice loop.

use crate::error::{Result, SahayakError};
use crate::gps::nmea::{self, GpsFix};
use crate::gps::places::{Place, PlaceResolver};
use crate::intent::planner::Locator;
use std::collections::VecDeque;

#[cfg(feature = "serial")]
use std::io::BufRead;
#[cfg(feature = "serial")]
use std::time::Duration;

/// Trait for line-oriented text feeds.
///
/// This trait allows swapping implementations (real serial port vs mock).
pub trait LineSource: Send {
    /// Read the next line from the feed.
    ///
    /// # Returns
    /// `Ok(Some(line))` for a line (possibly garbage), `Ok(None)` when
    /// nothing arrived within the source's timeout, `Err` for hard
    /// connection errors.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Real serial feed via the `serialport` crate.
///
/// Opened once and reused across `get_fix` calls; the read timeout keeps a
/// silent receiver from blocking the response forever.
#[cfg(feature = "serial")]
pub struct SerialLineSource {
    reader: std::io::BufReader<Box<dyn serialport::SerialPort>>,
}

#[cfg(feature = "serial")]
impl SerialLineSource {
    /// Open the serial device.
    ///
    /// # Arguments
    /// * `port` - Device path (e.g. "/dev/serial0")
    /// * `baud` - Baud rate (GPS receivers default to 9600)
    ///
    /// # Errors
    /// Returns `SahayakError::Gps` if the port cannot be opened.
    pub fn open(port: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(port, baud)
            .timeout(Duration::from_secs(1))
            .open()
            .map_err(|e| SahayakError::Gps {
                message: format!("Failed to open serial port: {}", e),
            })?;

        Ok(Self {
            reader: std::io::BufReader::new(port),
        })
    }
}

#[cfg(feature = "serial")]
impl LineSource for SerialLineSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            // Receivers emit pure ASCII; lossy decode drops any line noise.
            Ok(n) if n > 0 => Ok(Some(String::from_utf8_lossy(&buf).into_owned())),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(SahayakError::Gps {
                message: format!("Serial read failed: {}", e),
            }),
        }
    }
}

/// Mock line source for testing.
#[derive(Debug, Default)]
pub struct MockLineSource {
    lines: VecDeque<String>,
    should_fail: bool,
}

impl MockLineSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue lines to be returned in order (then `Ok(None)` forever)
    pub fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    /// Configure the mock to fail on read
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl LineSource for MockLineSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        if self.should_fail {
            return Err(SahayakError::Gps {
                message: "mock serial failure".to_string(),
            });
        }
        Ok(self.lines.pop_front())
    }
}

/// Reads the NMEA feed until a valid fix appears or the read budget runs out.
pub struct GpsReader<L: LineSource> {
    source: L,
}

impl<L: LineSource> GpsReader<L> {
    pub fn new(source: L) -> Self {
        Self { source }
    }

    /// Scan for a fix-bearing sentence.
    ///
    /// Reads at most `timeout_reads` lines; the first valid RMC sentence
    /// with both coordinates wins. Timeouts, garbage lines and connection
    /// errors all yield "no fix"; this boundary never errors.
    pub fn get_fix(&mut self, timeout_reads: usize) -> GpsFix {
        for _ in 0..timeout_reads {
            let line = match self.source.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(_) => return GpsFix::none(),
            };

            if let Some(fix) = nmea::parse_rmc(&line)
                && fix.has_position()
            {
                return fix;
            }
        }

        GpsFix::none()
    }
}

/// Production locator: GPS fix → bounding-box place lookup.
pub struct GpsLocator<L: LineSource> {
    reader: GpsReader<L>,
    resolver: PlaceResolver,
    timeout_reads: usize,
}

impl<L: LineSource> GpsLocator<L> {
    pub fn new(source: L, resolver: PlaceResolver, timeout_reads: usize) -> Self {
        Self {
            reader: GpsReader::new(source),
            resolver,
            timeout_reads,
        }
    }
}

impl<L: LineSource> Locator for GpsLocator<L> {
    fn locate(&mut self) -> Option<Place> {
        let fix = self.reader.get_fix(self.timeout_reads);
        self.resolver.resolve(&fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHENNAI_RMC: &str =
        "$GPRMC,110319.00,A,1303.0000,N,08015.0000,E,0.13,309.62,120598,,*10";

    #[test]
    fn test_get_fix_finds_valid_sentence() {
        let source = MockLineSource::new().with_lines(&[
            "$GPGGA,110319.00,1303.0000,N,08015.0000,E,1,8,0.9,545.4,M,46.9,M,,*47",
            CHENNAI_RMC,
        ]);
        let mut reader = GpsReader::new(source);

        let fix = reader.get_fix(60);
        assert!(fix.has_position());
        assert!((fix.latitude.unwrap() - 13.05).abs() < 1e-9);
        assert!((fix.longitude.unwrap() - 80.25).abs() < 1e-9);
    }

    #[test]
    fn test_get_fix_skips_void_sentences() {
        let source = MockLineSource::new().with_lines(&[
            "$GPRMC,110319.00,V,,,,,,,120598,,*10",
            CHENNAI_RMC,
        ]);
        let mut reader = GpsReader::new(source);

        assert!(reader.get_fix(60).has_position());
    }

    #[test]
    fn test_get_fix_times_out() {
        let source = MockLineSource::new().with_lines(&["$GPGGA,garbage", "noise"]);
        let mut reader = GpsReader::new(source);

        let fix = reader.get_fix(10);
        assert_eq!(fix, GpsFix::none());
    }

    #[test]
    fn test_get_fix_respects_read_budget() {
        // Valid sentence sits beyond the budget and must not be reached.
        let lines: Vec<String> = (0..5)
            .map(|_| "noise".to_string())
            .chain(std::iter::once(CHENNAI_RMC.to_string()))
            .collect();
        let line_refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        let source = MockLineSource::new().with_lines(&line_refs);
        let mut reader = GpsReader::new(source);

        assert_eq!(reader.get_fix(5), GpsFix::none());
    }

    #[test]
    fn test_get_fix_converts_error_to_no_fix() {
        let source = MockLineSource::new().with_failure();
        let mut reader = GpsReader::new(source);

        assert_eq!(reader.get_fix(60), GpsFix::none());
    }

    #[test]
    fn test_get_fix_zero_budget() {
        let source = MockLineSource::new().with_lines(&[CHENNAI_RMC]);
        let mut reader = GpsReader::new(source);

        assert_eq!(reader.get_fix(0), GpsFix::none());
    }

    #[test]
    fn test_locator_resolves_place() {
        let source = MockLineSource::new().with_lines(&[CHENNAI_RMC]);
        let mut locator = GpsLocator::new(source, PlaceResolver::new(), 60);

        let place = locator.locate().unwrap();
        assert_eq!(place.city, "चेन्नई");
        assert_eq!(place.state, "तमिलनाडु");
    }

    #[test]
    fn test_locator_no_fix_yields_none() {
        let source = MockLineSource::new();
        let mut locator = GpsLocator::new(source, PlaceResolver::new(), 10);

        assert_eq!(locator.locate(), None);
    }

    #[test]
    fn test_locator_fix_outside_regions_yields_none() {
        let equator = "$GPRMC,110319.00,A,0000.0000,N,00000.0000,E,0.13,309.62,120598,,*10";
        let source = MockLineSource::new().with_lines(&[equator]);
        let mut locator = GpsLocator::new(source, PlaceResolver::new(), 60);

        assert_eq!(locator.locate(), None);
    }
}
