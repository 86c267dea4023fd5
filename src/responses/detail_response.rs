use serde::Serialize;

use entities::{artist, genre, show, venue};

use crate::classify::{ClassifiedShows, ShowView, START_TIME_FORMAT};

#[derive(Serialize, Clone)]
pub struct VenueDetailResponse {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) genres: Vec<String>,
    pub(crate) address: String,
    pub(crate) city: String,
    pub(crate) state: String,
    pub(crate) phone: Option<String>,
    pub(crate) website_link: Option<String>,
    pub(crate) facebook_link: Option<String>,
    pub(crate) seeking_talent: bool,
    pub(crate) seeking_description: Option<String>,
    pub(crate) image_link: Option<String>,
    pub(crate) past_shows: Vec<ShowView>,
    pub(crate) upcoming_shows: Vec<ShowView>,
    pub(crate) past_shows_count: usize,
    pub(crate) upcoming_shows_count: usize,
}

impl VenueDetailResponse {
    pub fn from_parts(
        venue: venue::Model,
        genres: Vec<genre::Model>,
        classified: ClassifiedShows,
    ) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            genres: genres.into_iter().map(|genre| genre.name).collect(),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website_link: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows: classified.past,
            upcoming_shows: classified.upcoming,
            past_shows_count: classified.past_count,
            upcoming_shows_count: classified.upcoming_count,
        }
    }
}

#[derive(Serialize, Clone)]
pub struct ArtistDetailResponse {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) genres: Vec<String>,
    pub(crate) city: String,
    pub(crate) state: String,
    pub(crate) phone: Option<String>,
    pub(crate) website_link: Option<String>,
    pub(crate) facebook_link: Option<String>,
    pub(crate) seeking_venue: bool,
    pub(crate) seeking_description: Option<String>,
    pub(crate) image_link: Option<String>,
    pub(crate) past_shows: Vec<ShowView>,
    pub(crate) upcoming_shows: Vec<ShowView>,
    pub(crate) past_shows_count: usize,
    pub(crate) upcoming_shows_count: usize,
}

impl ArtistDetailResponse {
    pub fn from_parts(
        artist: artist::Model,
        genres: Vec<genre::Model>,
        classified: ClassifiedShows,
    ) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: genres.into_iter().map(|genre| genre.name).collect(),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website_link: artist.website_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows: classified.past,
            upcoming_shows: classified.upcoming,
            past_shows_count: classified.past_count,
            upcoming_shows_count: classified.upcoming_count,
        }
    }
}

#[derive(Serialize, Clone)]
pub struct ShowListItem {
    pub(crate) venue_id: i32,
    pub(crate) venue_name: String,
    pub(crate) artist_id: i32,
    pub(crate) artist_name: String,
    pub(crate) artist_image_link: Option<String>,
    pub(crate) start_time: String,
}

impl ShowListItem {
    pub fn from_parts(show: show::Model, artist: artist::Model, venue: venue::Model) -> Self {
        Self {
            venue_id: venue.id,
            venue_name: venue.name,
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: show.start_time.format(START_TIME_FORMAT).to_string(),
        }
    }
}
