//! Display-time formatting for event listings
//!
//! Instants are stored timezone-independent (`DateTime<Utc>`) and only
//! converted into the display timezone when they are rendered. Nothing in this
//! module fails: malformed or missing input degrades to fallback text.

use std::fmt;

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Timezone every event date and countdown is displayed in.
pub const DISPLAY_TIMEZONE: Tz = chrono_tz::Asia::Kuala_Lumpur;

// =============================================================================
// Date Style
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateStyle {
    /// "Saturday, March 1, 2025" (listing cards)
    Long,
    /// "Mar 1, 2025" (featured carousel)
    Short,
}

impl DateStyle {
    fn pattern(&self) -> &'static str {
        match self {
            DateStyle::Long => "%A, %B %-d, %Y",
            DateStyle::Short => "%b %-d, %Y",
        }
    }

    /// Text shown in place of a date the event does not have yet.
    pub fn placeholder(&self) -> &'static str {
        match self {
            DateStyle::Long => "Date not set",
            DateStyle::Short => "TBA",
        }
    }
}

// =============================================================================
// Countdown
// =============================================================================

/// Relative-time label for an upcoming event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Countdown {
    /// The event has no date yet
    DateTba,
    /// Less than one whole hour remains, or the event has started
    HappeningNow,
    /// Same day: whole hours remaining (at least 1)
    InHours(i64),
    /// Exactly one whole day remains
    Tomorrow,
    /// Two or more whole days remain
    InDays(i64),
}

impl Countdown {
    /// Classifies an event against `now`.
    ///
    /// Both differences truncate toward zero, so 23h59m is still "In 23 Hours"
    /// and 47h is still "Tomorrow".
    pub fn between(event: Option<DateTime<Tz>>, now: DateTime<Tz>) -> Self {
        let Some(event) = event else {
            return Countdown::DateTba;
        };

        let remaining = event.signed_duration_since(now);
        let hours = remaining.num_hours();
        let days = remaining.num_days();

        if hours <= 0 {
            Countdown::HappeningNow
        } else if days == 0 {
            Countdown::InHours(hours)
        } else if days == 1 {
            Countdown::Tomorrow
        } else {
            Countdown::InDays(days)
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::DateTba => f.write_str("Date TBA"),
            Countdown::HappeningNow => f.write_str("Happening Now"),
            Countdown::InHours(hours) => write!(f, "In {hours} Hours"),
            Countdown::Tomorrow => f.write_str("Tomorrow"),
            Countdown::InDays(days) => write!(f, "In {days} Days"),
        }
    }
}

// =============================================================================
// Time Formatter
// =============================================================================

/// Formats event instants and wall-clock strings for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormatter {
    tz: Tz,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self::new(DISPLAY_TIMEZONE)
    }
}

impl TimeFormatter {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn to_display_timezone(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// Renders a 24-hour `"HH:MM"` string as `"h:mm AM"`/`"h:mm PM"`.
    ///
    /// The string is a wall-clock time already in the display timezone, so
    /// only its hour and minute are used. Empty or malformed input gives `""`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventdeck_domain::TimeFormatter;
    ///
    /// let formatter = TimeFormatter::default();
    /// assert_eq!(formatter.format_clock_time("13:05"), "1:05 PM");
    /// assert_eq!(formatter.format_clock_time("bad"), "");
    /// ```
    pub fn format_clock_time(&self, hhmm: &str) -> String {
        let trimmed = hhmm.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        match NaiveTime::parse_from_str(trimmed, "%H:%M") {
            Ok(time) => time.format("%-I:%M %p").to_string(),
            Err(_) => String::new(),
        }
    }

    /// `"{start} - {end}"` as shown on listing cards.
    pub fn format_time_range(&self, start: &str, end: &str) -> String {
        format!(
            "{} - {}",
            self.format_clock_time(start),
            self.format_clock_time(end)
        )
    }

    pub fn format_date(&self, instant: DateTime<Utc>, style: DateStyle) -> String {
        self.to_display_timezone(instant)
            .format(style.pattern())
            .to_string()
    }

    pub fn format_optional_date(&self, instant: Option<DateTime<Utc>>, style: DateStyle) -> String {
        match instant {
            Some(instant) => self.format_date(instant, style),
            None => style.placeholder().to_string(),
        }
    }

    pub fn countdown(&self, event: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Countdown {
        Countdown::between(
            event.map(|e| self.to_display_timezone(e)),
            self.to_display_timezone(now),
        )
    }

    pub fn countdown_label(&self, event: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
        self.countdown(event, now).to_string()
    }
}
