use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use entities::artist_local_model::ArtistModel;
use entities::show_local_model::ShowModel;
use entities::venue_local_model::VenueModel;

use crate::error::Error;

// Field limits follow the column definitions in the migration.
const LINK_MAX: usize = 120;
const IMAGE_LINK_MAX: usize = 500;
const DESCRIPTION_MAX: usize = 200;

#[derive(Deserialize, Clone)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub website_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Deserialize, Clone)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub website_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Deserialize, Clone)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: String,
}

fn required(field: &str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn bounded(field: &str, value: String, max: usize) -> Result<String, Error> {
    if value.chars().count() > max {
        return Err(Error::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(value)
}

fn optional_bounded(field: &str, value: Option<String>, max: usize) -> Result<Option<String>, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => {
            Ok(Some(bounded(field, value.trim().to_string(), max)?))
        }
        _ => Ok(None),
    }
}

/// Strip common separators and keep the digits. Anything else, or a digit
/// count outside 10..=15, is rejected.
fn normalize_phone(value: Option<String>) -> Result<Option<String>, Error> {
    let Some(raw) = value else { return Ok(None) };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')' | '+'))
        .collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation(format!("phone contains non-digits: {}", raw)));
    }
    if !(10..=15).contains(&digits.len()) {
        return Err(Error::Validation(format!(
            "phone must have 10 to 15 digits, got {}",
            digits.len()
        )));
    }
    Ok(Some(digits))
}

/// Accepts RFC 3339 ("2024-06-15T20:00:00Z") or a plain
/// "2024-06-15 20:00:00"; anything else is a malformed timestamp.
pub fn parse_start_time(value: &str) -> Result<DateTime<Utc>, Error> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
    }
    Err(Error::MalformedTimestamp(value.to_string()))
}

impl VenueForm {
    /// Run every check once, yielding a record ready for the store along
    /// with its genre labels.
    pub fn validate(self) -> Result<(VenueModel, Vec<String>), Error> {
        let venue = VenueModel {
            name: required("name", &self.name)?,
            city: bounded("city", required("city", &self.city)?, LINK_MAX)?,
            state: bounded("state", required("state", &self.state)?, LINK_MAX)?,
            address: bounded("address", required("address", &self.address)?, LINK_MAX)?,
            phone: normalize_phone(self.phone)?,
            image_link: optional_bounded("image_link", self.image_link, IMAGE_LINK_MAX)?,
            website_link: optional_bounded("website_link", self.website_link, LINK_MAX)?,
            facebook_link: optional_bounded("facebook_link", self.facebook_link, LINK_MAX)?,
            seeking_talent: self.seeking_talent,
            seeking_description: optional_bounded(
                "seeking_description",
                self.seeking_description,
                DESCRIPTION_MAX,
            )?,
        };
        Ok((venue, self.genres))
    }
}

impl ArtistForm {
    pub fn validate(self) -> Result<(ArtistModel, Vec<String>), Error> {
        let artist = ArtistModel {
            name: required("name", &self.name)?,
            city: bounded("city", required("city", &self.city)?, LINK_MAX)?,
            state: bounded("state", required("state", &self.state)?, LINK_MAX)?,
            phone: normalize_phone(self.phone)?,
            image_link: optional_bounded("image_link", self.image_link, IMAGE_LINK_MAX)?,
            website_link: optional_bounded("website_link", self.website_link, LINK_MAX)?,
            facebook_link: optional_bounded("facebook_link", self.facebook_link, LINK_MAX)?,
            seeking_venue: self.seeking_venue,
            seeking_description: optional_bounded(
                "seeking_description",
                self.seeking_description,
                DESCRIPTION_MAX,
            )?,
        };
        Ok((artist, self.genres))
    }
}

impl ShowForm {
    pub fn validate(self) -> Result<ShowModel, Error> {
        Ok(ShowModel {
            start_time: parse_start_time(&self.start_time)?,
            artist_id: self.artist_id,
            venue_id: self.venue_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venue_form() -> VenueForm {
        VenueForm {
            name: "The Hop".to_string(),
            city: "Boston".to_string(),
            state: "MA".to_string(),
            address: "1 Main St".to_string(),
            phone: Some("(555) 123-4567".to_string()),
            image_link: None,
            website_link: None,
            facebook_link: None,
            seeking_talent: true,
            seeking_description: Some("Looking for jazz acts".to_string()),
            genres: vec!["Jazz".to_string()],
        }
    }

    #[test]
    fn phone_is_normalized_to_digits() {
        let (venue, genres) = venue_form().validate().unwrap();
        assert_eq!(venue.phone.as_deref(), Some("5551234567"));
        assert_eq!(genres, vec!["Jazz".to_string()]);
    }

    #[test]
    fn phone_with_letters_is_rejected() {
        let mut form = venue_form();
        form.phone = Some("555-CALL-NOW".to_string());
        assert!(matches!(form.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn phone_with_too_few_digits_is_rejected() {
        let mut form = venue_form();
        form.phone = Some("12345".to_string());
        assert!(matches!(form.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut form = venue_form();
        form.name = "   ".to_string();
        assert!(matches!(form.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn overlong_description_is_rejected() {
        let mut form = venue_form();
        form.seeking_description = Some("x".repeat(201));
        assert!(matches!(form.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn empty_optional_fields_become_none() {
        let mut form = venue_form();
        form.phone = Some(String::new());
        form.seeking_description = Some("  ".to_string());
        let (venue, _) = form.validate().unwrap();
        assert_eq!(venue.phone, None);
        assert_eq!(venue.seeking_description, None);
    }

    #[test]
    fn start_time_accepts_both_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap();
        assert_eq!(parse_start_time("2024-06-15T20:00:00Z").unwrap(), expected);
        assert_eq!(parse_start_time("2024-06-15 20:00:00").unwrap(), expected);
    }

    #[test]
    fn bad_start_time_is_a_malformed_timestamp() {
        let form = ShowForm {
            artist_id: 1,
            venue_id: 2,
            start_time: "next tuesday".to_string(),
        };
        assert!(matches!(form.validate(), Err(Error::MalformedTimestamp(_))));
    }
}
