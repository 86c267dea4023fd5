use chrono::{DateTime, Utc};
use serde::Serialize;

/// Display format for show start times, e.g. "06/15/2024, 20:00:00".
pub const START_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// A show joined with the display fields of its counterpart: the artist when
/// looking at a venue page, the venue when looking at an artist page.
#[derive(Clone, Debug)]
pub struct BookedShow {
    pub start_time: DateTime<Utc>,
    pub counterpart_id: i32,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ShowView {
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct ClassifiedShows {
    pub past: Vec<ShowView>,
    pub upcoming: Vec<ShowView>,
    pub past_count: usize,
    pub upcoming_count: usize,
}

fn view(show: &BookedShow) -> ShowView {
    ShowView {
        id: show.counterpart_id,
        name: show.counterpart_name.clone(),
        image_link: show.counterpart_image_link.clone(),
        start_time: show.start_time.format(START_TIME_FORMAT).to_string(),
    }
}

/// Partition a venue's or artist's shows into past and upcoming relative to
/// `now`. A show starting exactly at `now` counts as upcoming, so every input
/// show lands in exactly one bucket. Both buckets are ordered ascending by
/// start time, and the counts are the lengths of the returned lists.
pub fn classify_shows(shows: &[BookedShow], now: DateTime<Utc>) -> ClassifiedShows {
    let mut ordered: Vec<&BookedShow> = shows.iter().collect();
    ordered.sort_by_key(|show| show.start_time);

    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for show in ordered {
        if show.start_time < now {
            past.push(view(show));
        } else {
            upcoming.push(view(show));
        }
    }
    ClassifiedShows {
        past_count: past.len(),
        upcoming_count: upcoming.len(),
        past,
        upcoming,
    }
}

/// Upcoming-show count for list and search views, where the full
/// classification is not needed. Agrees with [`classify_shows`]:
/// a start time equal to `now` is upcoming.
pub fn count_upcoming(start_times: &[DateTime<Utc>], now: DateTime<Utc>) -> usize {
    start_times.iter().filter(|time| **time >= now).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, hour, 0, 0).unwrap()
    }

    fn show_at(time: DateTime<Utc>, artist_id: i32) -> BookedShow {
        BookedShow {
            start_time: time,
            counterpart_id: artist_id,
            counterpart_name: format!("Artist {}", artist_id),
            counterpart_image_link: None,
        }
    }

    #[test]
    fn one_past_one_upcoming() {
        let now = at(12);
        let shows = vec![show_at(now - Duration::hours(1), 1), show_at(now + Duration::hours(1), 2)];
        let classified = classify_shows(&shows, now);
        assert_eq!(classified.past_count, 1);
        assert_eq!(classified.upcoming_count, 1);
        assert_eq!(classified.past[0].id, 1);
        assert_eq!(classified.upcoming[0].id, 2);
    }

    #[test]
    fn buckets_are_disjoint_and_cover_the_input() {
        let now = at(12);
        let shows: Vec<BookedShow> = (0..10)
            .map(|i| show_at(at(6) + Duration::hours(i), i as i32))
            .collect();
        let classified = classify_shows(&shows, now);
        assert_eq!(classified.past.len() + classified.upcoming.len(), shows.len());
        assert_eq!(classified.past_count, classified.past.len());
        assert_eq!(classified.upcoming_count, classified.upcoming.len());
        for past in &classified.past {
            assert!(!classified.upcoming.contains(past));
        }
    }

    #[test]
    fn show_starting_exactly_now_is_upcoming() {
        let now = at(12);
        let classified = classify_shows(&[show_at(now, 1)], now);
        assert_eq!(classified.past_count, 0);
        assert_eq!(classified.upcoming_count, 1);
    }

    #[test]
    fn buckets_are_sorted_ascending() {
        let now = at(12);
        let shows = vec![
            show_at(at(18), 3),
            show_at(at(8), 1),
            show_at(at(14), 2),
            show_at(at(10), 4),
        ];
        let classified = classify_shows(&shows, now);
        assert_eq!(classified.past[0].id, 1);
        assert_eq!(classified.past[1].id, 4);
        assert_eq!(classified.upcoming[0].id, 2);
        assert_eq!(classified.upcoming[1].id, 3);
    }

    #[test]
    fn count_upcoming_matches_classification() {
        let now = at(12);
        let shows: Vec<BookedShow> = (0..7)
            .map(|i| show_at(at(9) + Duration::hours(i), i as i32))
            .collect();
        let times: Vec<DateTime<Utc>> = shows.iter().map(|show| show.start_time).collect();
        assert_eq!(count_upcoming(&times, now), classify_shows(&shows, now).upcoming_count);
    }

    #[test]
    fn empty_input_yields_zero_counts() {
        let now = at(12);
        let classified = classify_shows(&[], now);
        assert!(classified.past.is_empty());
        assert!(classified.upcoming.is_empty());
        assert_eq!(classified.past_count, 0);
        assert_eq!(classified.upcoming_count, 0);
        assert_eq!(count_upcoming(&[], now), 0);
    }

    #[test]
    fn start_time_uses_display_format() {
        let now = at(12);
        let classified = classify_shows(&[show_at(at(20), 1)], now);
        assert_eq!(classified.upcoming[0].start_time, "06/15/2024, 20:00:00");
    }
}
