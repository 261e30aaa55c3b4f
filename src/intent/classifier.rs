//! Keyword-based intent classification.
//!
//! Matching is an ordered substring scan: the first table entry with any
//! phrase occurring in the utterance wins. Table order is the priority
//! rule: a date utterance may also contain time-like words, so the date
//! entry is evaluated before the time entry.

use std::fmt;

/// The closed set of intents the assistant understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Time,
    Date,
    Day,
    City,
    State,
    Location,
    Greeting,
    Identity,
    Help,
    Temperature,
    Internet,
    Add,
    Multiply,
    Divide,
    Alarm,
    Joke,
    Exit,
    Unknown,
}

impl Intent {
    /// Stable tag for logging and console output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Time => "time",
            Intent::Date => "date",
            Intent::Day => "day",
            Intent::City => "city",
            Intent::State => "state",
            Intent::Location => "location",
            Intent::Greeting => "greeting",
            Intent::Identity => "identity",
            Intent::Help => "help",
            Intent::Temperature => "temperature",
            Intent::Internet => "internet",
            Intent::Add => "add",
            Intent::Multiply => "multiply",
            Intent::Divide => "divide",
            Intent::Alarm => "alarm",
            Intent::Joke => "joke",
            Intent::Exit => "exit",
            Intent::Unknown => "unknown",
        }
    }

    /// Every classifiable intent, in table order (excludes Unknown).
    pub fn all() -> &'static [Intent] {
        &[
            Intent::Date,
            Intent::Time,
            Intent::Day,
            Intent::City,
            Intent::State,
            Intent::Location,
            Intent::Greeting,
            Intent::Identity,
            Intent::Help,
            Intent::Temperature,
            Intent::Internet,
            Intent::Add,
            Intent::Multiply,
            Intent::Divide,
            Intent::Alarm,
            Intent::Joke,
            Intent::Exit,
        ]
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One table entry: an intent and the phrases that trigger it.
#[derive(Debug, Clone)]
pub struct IntentEntry {
    pub intent: Intent,
    pub phrases: Vec<String>,
}

impl IntentEntry {
    fn new(intent: Intent, phrases: &[&str]) -> Self {
        Self {
            intent,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Classifies recognized text into an [`Intent`].
///
/// Pure and deterministic: the same text always maps to the same intent.
/// Loaded once at startup; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    table: Vec<IntentEntry>,
}

impl IntentClassifier {
    /// Create a classifier with the default Hindi keyword table.
    ///
    /// Date precedes time in the table: an utterance asking for today's
    /// date ("आज की तारीख") can also contain time-cue words, and must
    /// resolve to date.
    pub fn new() -> Self {
        Self {
            table: vec![
                IntentEntry::new(Intent::Date, &["तारीख", "आज की तारीख"]),
                IntentEntry::new(Intent::Time, &["समय", "कितने बजे"]),
                IntentEntry::new(Intent::Day, &["आज कौन सा दिन", "दिन"]),
                IntentEntry::new(Intent::City, &["शहर"]),
                IntentEntry::new(Intent::State, &["राज्य"]),
                IntentEntry::new(Intent::Location, &["लोकेशन", "स्थान"]),
                IntentEntry::new(Intent::Greeting, &["नमस्ते", "हैलो"]),
                IntentEntry::new(Intent::Identity, &["तुम कौन हो"]),
                IntentEntry::new(Intent::Help, &["मदद"]),
                IntentEntry::new(Intent::Temperature, &["तापमान"]),
                IntentEntry::new(Intent::Internet, &["इंटरनेट"]),
                IntentEntry::new(Intent::Add, &["जोड़", "प्लस"]),
                IntentEntry::new(Intent::Multiply, &["गुणा"]),
                IntentEntry::new(Intent::Divide, &["भाग"]),
                IntentEntry::new(Intent::Alarm, &["अलार्म"]),
                IntentEntry::new(Intent::Joke, &["जोक"]),
                IntentEntry::new(Intent::Exit, &["बंद", "अलविदा"]),
            ],
        }
    }

    /// Create a classifier with a custom ordered table.
    pub fn with_table(table: Vec<IntentEntry>) -> Self {
        Self { table }
    }

    /// Map recognized text to an intent.
    ///
    /// First table entry (in priority order) with any phrase occurring as
    /// a substring of `text` wins. No scoring, no tokenization. Returns
    /// [`Intent::Unknown`] when nothing matches.
    pub fn classify(&self, text: &str) -> Intent {
        for entry in &self.table {
            if entry.phrases.iter().any(|p| text.contains(p.as_str())) {
                return entry.intent;
            }
        }
        Intent::Unknown
    }

    /// The ordered table (read-only).
    pub fn table(&self) -> &[IntentEntry] {
        &self.table
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_time() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("अभी समय क्या है"), Intent::Time);
        assert_eq!(classifier.classify("कितने बजे हैं"), Intent::Time);
    }

    #[test]
    fn test_classify_date() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("आज की तारीख बताओ"), Intent::Date);
    }

    #[test]
    fn test_date_has_priority_over_time() {
        let classifier = IntentClassifier::new();
        // Contains both a date phrase and a time phrase; date must win.
        assert_eq!(classifier.classify("आज की तारीख और समय"), Intent::Date);
        assert_eq!(classifier.classify("समय और तारीख"), Intent::Date);
    }

    #[test]
    fn test_classify_location_family() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("मैं किस शहर में हूँ"), Intent::City);
        assert_eq!(classifier.classify("यह कौन सा राज्य है"), Intent::State);
        assert_eq!(classifier.classify("मेरी लोकेशन बताओ"), Intent::Location);
        assert_eq!(classifier.classify("मेरा स्थान क्या है"), Intent::Location);
    }

    #[test]
    fn test_classify_exit() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("बंद करो"), Intent::Exit);
        assert_eq!(classifier.classify("अलविदा"), Intent::Exit);
    }

    #[test]
    fn test_classify_arithmetic() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("बीस जोड़ दस"), Intent::Add);
        assert_eq!(classifier.classify("पाँच गुणा छह"), Intent::Multiply);
        assert_eq!(classifier.classify("सौ भाग चार"), Intent::Divide);
    }

    #[test]
    fn test_classify_small_talk() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("हैलो"), Intent::Greeting);
        assert_eq!(classifier.classify("तुम कौन हो"), Intent::Identity);
        assert_eq!(classifier.classify("मदद चाहिए"), Intent::Help);
        assert_eq!(classifier.classify("तापमान कितना है"), Intent::Temperature);
        assert_eq!(classifier.classify("इंटरनेट चालू है"), Intent::Internet);
        assert_eq!(classifier.classify("एक जोक सुनाओ"), Intent::Joke);
        assert_eq!(classifier.classify("अलार्म लगाओ"), Intent::Alarm);
    }

    #[test]
    fn test_classify_unknown() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("कुछ भी"), Intent::Unknown);
        assert_eq!(classifier.classify(""), Intent::Unknown);
        assert_eq!(classifier.classify("hello world"), Intent::Unknown);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = IntentClassifier::new();
        for text in ["अभी समय क्या है", "आज की तारीख और समय", "कुछ भी", ""] {
            assert_eq!(classifier.classify(text), classifier.classify(text));
        }
    }

    #[test]
    fn test_every_intent_has_a_trigger_phrase() {
        let classifier = IntentClassifier::new();
        for intent in Intent::all() {
            let entry = classifier
                .table()
                .iter()
                .find(|e| e.intent == *intent)
                .unwrap_or_else(|| panic!("no table entry for {}", intent));
            assert!(!entry.phrases.is_empty());

            // Each intent's first phrase must classify back to that intent
            // (i.e. no earlier entry shadows it completely).
            assert_eq!(classifier.classify(&entry.phrases[0]), *intent);
        }
    }

    #[test]
    fn test_custom_table_order_is_respected() {
        let classifier = IntentClassifier::with_table(vec![
            IntentEntry::new(Intent::Time, &["समय"]),
            IntentEntry::new(Intent::Date, &["समय"]),
        ]);
        assert_eq!(classifier.classify("समय"), Intent::Time);
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::Date.to_string(), "date");
        assert_eq!(Intent::Unknown.to_string(), "unknown");
    }
}
