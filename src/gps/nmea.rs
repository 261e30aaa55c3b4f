//! NMEA sentence parsing.
//!
//! Only the RMC (recommended minimum) sentence is decoded; everything else
//! in the feed is ignored. Coordinates arrive as degrees-and-minutes
//! concatenated (`DDMM.MMMM` latitude, `DDDMM.MMMM` longitude) with a
//! separate hemisphere field.

/// A GPS position reading.
///
/// Only fixes with `valid = true` (receiver status "A") are usable;
/// invalid or absent fixes propagate as "no fix", never as stale data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpsFix {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub valid: bool,
}

impl GpsFix {
    /// The "no fix" value.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when the fix is valid and carries both coordinates.
    pub fn has_position(&self) -> bool {
        self.valid && self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Convert an NMEA coordinate field to signed decimal degrees.
///
/// The integer-degree prefix is everything before the decimal point except
/// the last two digits (minutes); the remainder is fractional minutes:
/// `degrees + minutes / 60`, negated for southern/western hemispheres.
///
/// Returns None for empty or malformed fields.
///
/// ```
/// use sahayak::gps::nmea::decimal_degrees;
/// let lat = decimal_degrees("1234.5678", "N").unwrap();
/// assert!((lat - (12.0 + 34.5678 / 60.0)).abs() < 1e-12);
/// assert_eq!(decimal_degrees("07600.0000", "W"), Some(-76.0));
/// ```
pub fn decimal_degrees(raw: &str, hemisphere: &str) -> Option<f64> {
    let dot_index = raw.find('.')?;
    let deg_len = dot_index.checked_sub(2)?;

    let degrees: f64 = raw.get(..deg_len)?.parse().ok()?;
    let minutes: f64 = raw.get(deg_len..)?.parse().ok()?;

    let dec = degrees + minutes / 60.0;

    match hemisphere {
        "S" | "W" => Some(-dec),
        _ => Some(dec),
    }
}

/// Parse one RMC sentence into a fix.
///
/// Accepts `$GPRMC` and `$GNRMC` talkers. Returns None for other sentence
/// types or structurally broken lines; returns an invalid fix (valid =
/// false) when the receiver reports status "V".
pub fn parse_rmc(line: &str) -> Option<GpsFix> {
    let start = line.find("$GPRMC").or_else(|| line.find("$GNRMC"))?;
    let fields: Vec<&str> = line[start..].trim_end().split(',').collect();

    // $xxRMC,time,status,lat,N/S,lon,E/W,...
    if fields.len() < 7 {
        return None;
    }

    let valid = fields[2] == "A";
    if !valid {
        return Some(GpsFix {
            latitude: None,
            longitude: None,
            valid: false,
        });
    }

    Some(GpsFix {
        latitude: decimal_degrees(fields[3], fields[4]),
        longitude: decimal_degrees(fields[5], fields[6]),
        valid,
    })
}
