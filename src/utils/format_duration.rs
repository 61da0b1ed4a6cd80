use std::time::Duration;

pub trait FormatDuration {
    /// Seconds with one decimal place, like `3.4s`.
    fn format_seconds(&self) -> String;

    fn format_largest(&self) -> String;
}

impl FormatDuration for Duration {
    fn format_seconds(&self) -> String {
        format!("{:.1}s", self.as_secs_f64())
    }

    #[rustfmt::skip]
    fn format_largest(&self) -> String {
        let s = self.as_secs();
        let (h, m) = (s / 3600, s / 60);

        match (h, m, s) {
            (1  , _  , _  ) => "1 hour".to_string(),
            (2.., _  , _  ) => format!("{h} hours"),
            (_  , 1  , _  ) => "1 minute".to_string(),
            (_  , 2.., _  ) => format!("{m} minutes"),
            (_  , _  , 1  ) => "1 second".to_string(),
            (_  , _  , 2..) => format!("{s} seconds"),
            (_  , _  , _  ) => "less than a second".to_string(),
        }
    }
}
