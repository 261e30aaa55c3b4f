//! Response planning: one reply per intent.
//!
//! `plan` is total over the intent set: every intent maps to exactly one
//! reply, including `Unknown`. Wall-clock reads and GPS lookups go through
//! trait seams so replies are deterministic under test.

use crate::gps::places::Place;
use crate::intent::classifier::Intent;
use chrono::{Datelike, Local, NaiveDateTime, Weekday};

/// Fixed reply when GPS yields no usable position.
pub const LOCATION_NOT_FOUND: &str = "स्थान नहीं मिला";

/// Fixed reply for unrecognized utterances.
pub const NOT_UNDERSTOOD: &str = "समझा नहीं";

/// Farewell spoken before the loop stops.
pub const FAREWELL: &str = "नमस्ते";

/// Trait for wall-clock reads, allowing fixed time in tests.
pub trait WallClock: Send {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Real clock using `chrono::Local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct MockWallClock {
    now: NaiveDateTime,
}

impl MockWallClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl WallClock for MockWallClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Trait for position lookups, allowing canned positions in tests.
///
/// The production implementation chains GpsReader and PlaceResolver;
/// `None` means no fix or no matching region, never an error.
pub trait Locator: Send {
    fn locate(&mut self) -> Option<Place>;
}

/// Locator that always reports no position (GPS-less setups).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

impl Locator for NoLocator {
    fn locate(&mut self) -> Option<Place> {
        None
    }
}

/// Mock locator returning a fixed result.
#[derive(Debug, Clone, Default)]
pub struct MockLocator {
    place: Option<Place>,
    calls: usize,
}

impl MockLocator {
    pub fn new(place: Option<Place>) -> Self {
        Self { place, calls: 0 }
    }

    pub fn call_count(&self) -> usize {
        self.calls
    }
}

impl Locator for MockLocator {
    fn locate(&mut self) -> Option<Place> {
        self.calls += 1;
        self.place.clone()
    }
}

/// A planned reply and whether the loop should stop after speaking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReply {
    pub text: String,
    pub exit: bool,
}

impl PlannedReply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit: false,
        }
    }

    fn farewell() -> Self {
        Self {
            text: FAREWELL.to_string(),
            exit: true,
        }
    }
}

/// Hindi weekday name.
fn hindi_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "सोमवार",
        Weekday::Tue => "मंगलवार",
        Weekday::Wed => "बुधवार",
        Weekday::Thu => "गुरुवार",
        Weekday::Fri => "शुक्रवार",
        Weekday::Sat => "शनिवार",
        Weekday::Sun => "रविवार",
    }
}

/// Maps intents to replies, consulting the clock and locator as needed.
pub struct ResponsePlanner {
    clock: Box<dyn WallClock>,
    locator: Box<dyn Locator>,
}

impl ResponsePlanner {
    /// Create a planner with explicit clock and locator seams.
    pub fn new(clock: Box<dyn WallClock>, locator: Box<dyn Locator>) -> Self {
        Self { clock, locator }
    }

    /// Create a planner on the system clock.
    pub fn with_locator(locator: Box<dyn Locator>) -> Self {
        Self::new(Box::new(SystemWallClock), locator)
    }

    /// Produce the reply for an intent.
    ///
    /// Total over [`Intent`]: every variant maps to exactly one reply.
    /// Missing GPS data degrades to the fixed "location not found" reply
    /// rather than failing.
    pub fn plan(&mut self, intent: Intent) -> PlannedReply {
        match intent {
            Intent::Time => {
                let now = self.clock.now();
                PlannedReply::say(format!("अभी {} बजे हैं", now.format("%H:%M")))
            }
            Intent::Date => {
                let now = self.clock.now();
                PlannedReply::say(format!("आज की तारीख {} है", now.format("%d/%m/%Y")))
            }
            Intent::Day => {
                let now = self.clock.now();
                PlannedReply::say(format!("आज {} है", hindi_weekday(now.weekday())))
            }
            Intent::City => match self.locator.locate() {
                Some(place) => PlannedReply::say(format!("आप {} शहर में हैं", place.city)),
                None => PlannedReply::say(LOCATION_NOT_FOUND),
            },
            Intent::State => match self.locator.locate() {
                Some(place) => PlannedReply::say(format!("आप {} राज्य में हैं", place.state)),
                None => PlannedReply::say(LOCATION_NOT_FOUND),
            },
            Intent::Location => match self.locator.locate() {
                Some(place) => {
                    PlannedReply::say(format!("आप {}, {} में हैं", place.city, place.state))
                }
                None => PlannedReply::say(LOCATION_NOT_FOUND),
            },
            Intent::Greeting => PlannedReply::say("नमस्ते मैं आपकी सहायता के लिए तैयार हूँ"),
            Intent::Identity => PlannedReply::say("मैं आपका ऑफलाइन हिंदी सहायक हूँ"),
            Intent::Help => PlannedReply::say("आप समय तारीख शहर राज्य पूछ सकते हैं"),
            Intent::Temperature => PlannedReply::say("सिस्टम तापमान सामान्य है"),
            Intent::Internet => PlannedReply::say("यह ऑफलाइन सहायक है"),
            Intent::Add => PlannedReply::say("20 जोड़ 10 बराबर 30"),
            Intent::Multiply => PlannedReply::say("5 गुणा 6 बराबर 30"),
            Intent::Divide => PlannedReply::say("100 भाग 4 बराबर 25"),
            Intent::Alarm => PlannedReply::say("सुबह 7 बजे अलार्म सेट"),
            Intent::Joke => PlannedReply::say("डॉक्टर बोला कब से? मरीज बोला क्या?"),
            Intent::Exit => PlannedReply::farewell(),
            Intent::Unknown => PlannedReply::say(NOT_UNDERSTOOD),
        }
    }
}
