use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use entities::venue;

use crate::classify::count_upcoming;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Group venues into (city, state) buckets for the directory page. Each pair
/// appears once; groups are ordered by state then city, ascending and
/// case-sensitive (plain codepoint order); within a group venues keep the
/// order they arrived in.
pub fn group_venues_by_location(
    venues: &[(venue::Model, Vec<DateTime<Utc>>)],
    now: DateTime<Utc>,
) -> Vec<LocationGroup> {
    let mut groups: BTreeMap<(String, String), LocationGroup> = BTreeMap::new();
    for (venue, show_times) in venues {
        let entry = groups
            .entry((venue.state.clone(), venue.city.clone()))
            .or_insert_with(|| LocationGroup {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
        entry.venues.push(VenueSummary {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: count_upcoming(show_times, now),
        });
    }
    groups.into_values().collect()
}

/// A venue or artist as the search sees it: the matched fields plus the
/// already-computed upcoming count.
#[derive(Clone, Debug)]
pub struct SearchRecord {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

/// Case-insensitive substring search over name, city and state; a record is
/// included when any field matches. An empty term matches everything.
pub fn search(records: &[SearchRecord], term: &str) -> SearchResults {
    let needle = term.to_lowercase();
    let data: Vec<SearchHit> = records
        .iter()
        .filter(|record| {
            record.name.to_lowercase().contains(&needle)
                || record.city.to_lowercase().contains(&needle)
                || record.state.to_lowercase().contains(&needle)
        })
        .map(|record| SearchHit {
            id: record.id,
            name: record.name.clone(),
            num_upcoming_shows: record.num_upcoming_shows,
        })
        .collect();
    SearchResults {
        count: data.len(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn venue(id: i32, name: &str, city: &str, state: &str) -> venue::Model {
        venue::Model {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1 Main St".to_string(),
            phone: None,
            image_link: None,
            website_link: None,
            facebook_link: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    #[test]
    fn groups_are_ordered_by_state_then_city() {
        let venues = vec![
            (venue(1, "Hall A", "NY", "NY"), vec![]),
            (venue(2, "Hall B", "SF", "CA"), vec![]),
        ];
        let groups = group_venues_by_location(&venues, now());
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].state.as_str(), groups[0].city.as_str()), ("CA", "SF"));
        assert_eq!((groups[1].state.as_str(), groups[1].city.as_str()), ("NY", "NY"));
    }

    #[test]
    fn every_venue_lands_in_exactly_one_group() {
        let venues = vec![
            (venue(1, "A", "Boston", "MA"), vec![]),
            (venue(2, "B", "Boston", "MA"), vec![]),
            (venue(3, "C", "Salem", "MA"), vec![]),
            (venue(4, "D", "Austin", "TX"), vec![]),
        ];
        let groups = group_venues_by_location(&venues, now());
        let total: usize = groups.iter().map(|group| group.venues.len()).sum();
        assert_eq!(total, venues.len());
        let mut keys: Vec<(String, String)> = groups
            .iter()
            .map(|group| (group.state.clone(), group.city.clone()))
            .collect();
        keys.dedup();
        assert_eq!(keys.len(), groups.len());
    }

    #[test]
    fn venues_keep_input_order_within_a_group() {
        let venues = vec![
            (venue(3, "Zelda's", "Boston", "MA"), vec![]),
            (venue(1, "Annie's", "Boston", "MA"), vec![]),
        ];
        let groups = group_venues_by_location(&venues, now());
        assert_eq!(groups[0].venues[0].id, 3);
        assert_eq!(groups[0].venues[1].id, 1);
    }

    #[test]
    fn group_entries_carry_upcoming_counts() {
        let later = now() + chrono::Duration::hours(2);
        let earlier = now() - chrono::Duration::hours(2);
        let venues = vec![(venue(1, "A", "Boston", "MA"), vec![earlier, later])];
        let groups = group_venues_by_location(&venues, now());
        assert_eq!(groups[0].venues[0].num_upcoming_shows, 1);
    }

    fn records() -> Vec<SearchRecord> {
        vec![
            SearchRecord {
                id: 1,
                name: "The Hop".to_string(),
                city: "Boston".to_string(),
                state: "MA".to_string(),
                num_upcoming_shows: 2,
            },
            SearchRecord {
                id: 2,
                name: "Park Square".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                num_upcoming_shows: 0,
            },
        ]
    }

    #[test]
    fn empty_term_matches_everything() {
        let results = search(&records(), "");
        assert_eq!(results.count, 2);
        assert_eq!(results.count, results.data.len());
    }

    #[test]
    fn unmatched_term_matches_nothing() {
        let results = search(&records(), "nonexistent-xyz");
        assert_eq!(results.count, 0);
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let results = search(&records(), "hop");
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].id, 1);
        assert_eq!(results.data[0].num_upcoming_shows, 2);
    }

    #[test]
    fn city_and_state_fields_also_match() {
        assert_eq!(search(&records(), "francisco").count, 1);
        assert_eq!(search(&records(), "ma").count, 1);
    }
}
