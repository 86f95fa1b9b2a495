//! Human-readable distance and duration strings for the navigation panel.

pub fn format_distance(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{} m", rounded as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Minutes are truncated, never rounded up, so `3599 s` stays under the hour.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    if total < 3600 {
        format!("{} min", total / 60)
    } else {
        format!("{}h {}min", total / 3600, (total % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(format_distance(1500.0), "1.5 km");
        assert_eq!(format_distance(800.0), "800 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1000.0), "1.0 km");
        // rounds to a full kilometre, so it is shown in km
        assert_eq!(format_distance(999.6), "1.0 km");
        assert_eq!(format_distance(999.5), "1.0 km");
        assert_eq!(format_distance(0.0), "0 m");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(125.0), "2 min");
        assert_eq!(format_duration(5400.0), "1h 30min");
        assert_eq!(format_duration(3600.0), "1h 0min");
        assert_eq!(format_duration(3599.0), "59 min");
        assert_eq!(format_duration(30.0), "0 min");
    }
}
