use chrono::Datelike;

const QUOTES: &[&str] = &[
    "Do not save what is left after spending; spend what is left after saving.",
    "A small daily saving grows into a big future.",
    "Save money, and money will save you.",
    "Every penny saved is a step towards financial freedom.",
    "Budgeting isn't about limiting yourself, it's about making the things that excite you possible.",
    "Financial freedom is available to those who learn about it and work for it.",
];

/// Quote for the given day; stable within a day.
pub(crate) fn quote_for(date: chrono::NaiveDate) -> &'static str {
    QUOTES[date.ordinal0() as usize % QUOTES.len()]
}

pub(crate) fn quote_of_the_day() -> &'static str {
    quote_for(chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_quote_stable_per_day_and_cycles() {
        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(quote_for(day), QUOTES[0]);
        assert_eq!(quote_for(day), quote_for(day));
        let next = day.succ_opt().unwrap();
        assert_eq!(quote_for(next), QUOTES[1]);
        let wrap = chrono::NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(quote_for(wrap), QUOTES[0]);
    }
}
