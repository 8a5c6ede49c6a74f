//! The words on the card.

const CAPTIONS: &[&str] = &[
    "Another year of incredible memories together",
    "You light up every room you enter",
    "Here's to endless adventures with you!",
    "You're the most precious gift in my life",
    "Every moment with you is magical",
    "Your smile makes my world complete",
    "Growing more beautiful with each passing year",
    "You're my favorite person in the universe",
    "Here's to celebrating YOU today!",
    "My heart belongs to you forever",
    "You make ordinary days extraordinary",
];

const QUOTES: &[&str] = &[
    "In your eyes, I found my home",
    "You are my today and all of my tomorrows",
    "Every love story is beautiful, but ours is my favorite",
    "With you, I am home",
    "You are my sunshine on cloudy days",
];

pub const BADGES: &[&str] = &[
    "Endless Love",
    "Pure Joy",
    "Magic Moments",
    "My Queen",
    "Precious Memories",
];

const TRIBUTE: &str = "Today we celebrate not just another year, but another year of your \
amazing spirit, your beautiful heart, and all the joy you bring to everyone around you. \
You make every ordinary moment feel extraordinary, and I'm so grateful to share this \
incredible journey with you.";

const LETTER: &[&str] = &[
    "Every day with you is a gift. Your laugh is my favorite sound,",
    "your happiness is my favorite sight, and your love is the best",
    "thing that has ever happened to me.",
    "",
    "May this year bring you everything your heart wishes for.",
    "I'll be right beside you for all of it.",
];

/// Personalized text for one recipient.
#[derive(Debug, Clone)]
pub struct Greeting {
    recipient: String,
    age: u32,
}

impl Greeting {
    pub fn new(recipient: impl Into<String>, age: u32) -> Self {
        Self { recipient: recipient.into(), age }
    }

    pub fn title(&self) -> String {
        format!("Happy {} Birthday, {}!", ordinal(self.age), self.recipient)
    }

    pub fn headline(&self) -> String {
        format!("{} Years of You Being Absolutely Incredible!", self.age)
    }

    pub fn loading(&self) -> String {
        format!("Preparing something special for {}...", self.recipient)
    }

    pub fn tribute(&self) -> &'static str {
        TRIBUTE
    }

    pub fn letter(&self) -> &'static [&'static str] {
        LETTER
    }

    pub fn caption(&self, slide: usize) -> &'static str {
        CAPTIONS[slide % CAPTIONS.len()]
    }

    pub fn quote(&self, slide: usize) -> &'static str {
        QUOTES[slide % QUOTES.len()]
    }
}

/// 1 -> "1st", 12 -> "12th", 22 -> "22nd"
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
