use std::{fmt, time::Duration};

use time::{format_description::FormatItem, macros::format_description};

pub const NAIVE_DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Spell out a duration, e.g. `1 minute, 12.345 seconds`.
pub fn humanize_duration(duration: Duration) -> HumanDurationFormatter {
    HumanDurationFormatter { duration }
}

pub struct HumanDurationFormatter {
    duration: Duration,
}

impl fmt::Display for HumanDurationFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_millis = self.duration.as_millis();

        let hours = total_millis / 3_600_000;
        let minutes = total_millis / 60_000 % 60;
        let seconds = total_millis / 1_000 % 60;
        let millis = total_millis % 1_000;

        if total_millis == 0 {
            return f.write_str("0 seconds");
        }

        fn unit(
            f: &mut fmt::Formatter<'_>,
            separate: &mut bool,
            amount: u128,
            name: &str,
        ) -> fmt::Result {
            if amount == 0 {
                return Ok(());
            }

            if *separate {
                f.write_str(", ")?;
            }

            *separate = true;

            write!(
                f,
                "{amount} {name}{plural}",
                plural = if amount == 1 { "" } else { "s" }
            )
        }

        let mut separate = false;

        unit(f, &mut separate, hours, "hour")?;
        unit(f, &mut separate, minutes, "minute")?;

        if millis > 0 {
            if separate {
                f.write_str(", ")?;
            }

            write!(f, "{seconds}.{millis:03} seconds")
        } else {
            unit(f, &mut separate, seconds, "second")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_duration() {
        let fmt = |millis| humanize_duration(Duration::from_millis(millis)).to_string();

        assert_eq!(fmt(0), "0 seconds");
        assert_eq!(fmt(1_000), "1 second");
        assert_eq!(fmt(12_345), "12.345 seconds");
        assert_eq!(fmt(60_000), "1 minute");
        assert_eq!(fmt(72_345), "1 minute, 12.345 seconds");
        assert_eq!(fmt(3_600_000), "1 hour");
        assert_eq!(fmt(7_323_000), "2 hours, 2 minutes, 3 seconds");
    }
}
