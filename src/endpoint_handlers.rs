use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use entities::{artist, show, venue};

use crate::classify::{classify_shows, count_upcoming, BookedShow};
use crate::error::Result;
use crate::forms::{ArtistForm, ShowForm, VenueForm};
use crate::listings::{
    group_venues_by_location, search, LocationGroup, SearchRecord, SearchResults,
};
use crate::responses::detail_response::{ArtistDetailResponse, ShowListItem, VenueDetailResponse};
use crate::responses::responses::{ArtistListItem, MessageBody};
use crate::DatabaseState;

#[derive(Deserialize, Clone)]
pub struct SearchBody {
    search_term: String,
}

fn show_times_by<F>(shows: &[show::Model], key: F) -> HashMap<i32, Vec<DateTime<Utc>>>
where
    F: Fn(&show::Model) -> i32,
{
    let mut map: HashMap<i32, Vec<DateTime<Utc>>> = HashMap::new();
    for show in shows {
        map.entry(key(show)).or_default().push(show.start_time);
    }
    map
}

fn upcoming_for(times: &HashMap<i32, Vec<DateTime<Utc>>>, id: i32, now: DateTime<Utc>) -> usize {
    times
        .get(&id)
        .map(|times| count_upcoming(times, now))
        .unwrap_or(0)
}

//  Venues
//  ----------------------------------------------------------------

pub async fn get_venues(State(state): State<DatabaseState>) -> Result<Json<Vec<LocationGroup>>> {
    let venues = queries::list_venues(&state.connection).await?;
    let shows = queries::list_all_shows(&state.connection).await?;
    let mut times = show_times_by(&shows, |show| show.venue_id);
    let venues_with_times: Vec<(venue::Model, Vec<DateTime<Utc>>)> = venues
        .into_iter()
        .map(|venue| {
            let show_times = times.remove(&venue.id).unwrap_or_default();
            (venue, show_times)
        })
        .collect();
    Ok(Json(group_venues_by_location(&venues_with_times, Utc::now())))
}

pub async fn search_venues(
    State(state): State<DatabaseState>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResults>> {
    let venues = queries::list_venues(&state.connection).await?;
    let shows = queries::list_all_shows(&state.connection).await?;
    let times = show_times_by(&shows, |show| show.venue_id);
    let now = Utc::now();
    let records: Vec<SearchRecord> = venues
        .into_iter()
        .map(|venue| SearchRecord {
            id: venue.id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
            num_upcoming_shows: upcoming_for(&times, venue.id, now),
        })
        .collect();
    Ok(Json(search(&records, &body.search_term)))
}

pub async fn get_venue(
    State(state): State<DatabaseState>,
    Path(venue_id): Path<i32>,
) -> Result<Json<VenueDetailResponse>> {
    let venue = queries::get_venue_by_id(&state.connection, venue_id).await?;
    let genres = queries::genres_for_venue(&state.connection, &venue).await?;
    let booked: Vec<BookedShow> = queries::shows_for_venue(&state.connection, venue_id)
        .await?
        .into_iter()
        .map(|(show, artist)| BookedShow {
            start_time: show.start_time,
            counterpart_id: artist.id,
            counterpart_name: artist.name,
            counterpart_image_link: artist.image_link,
        })
        .collect();
    let classified = classify_shows(&booked, Utc::now());
    Ok(Json(VenueDetailResponse::from_parts(venue, genres, classified)))
}

pub async fn create_venue(
    State(state): State<DatabaseState>,
    Json(form): Json<VenueForm>,
) -> Result<(StatusCode, Json<venue::Model>)> {
    let (venue, genres) = form.validate()?;
    let model = queries::create_venue(&state.connection, venue, &genres).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn update_venue(
    State(state): State<DatabaseState>,
    Path(venue_id): Path<i32>,
    Json(form): Json<VenueForm>,
) -> Result<Json<venue::Model>> {
    let (venue, genres) = form.validate()?;
    let model = queries::update_venue(&state.connection, venue_id, venue, &genres).await?;
    Ok(Json(model))
}

pub async fn delete_venue(
    State(state): State<DatabaseState>,
    Path(venue_id): Path<i32>,
) -> Result<Json<MessageBody>> {
    queries::delete_venue(&state.connection, venue_id).await?;
    Ok(Json(MessageBody::new("Venue deleted")))
}

//  Artists
//  ----------------------------------------------------------------

pub async fn get_artists(State(state): State<DatabaseState>) -> Result<Json<Vec<ArtistListItem>>> {
    let artists = queries::list_artists(&state.connection).await?;
    let items = artists
        .into_iter()
        .map(|artist| ArtistListItem {
            id: artist.id,
            name: artist.name,
        })
        .collect();
    Ok(Json(items))
}

pub async fn search_artists(
    State(state): State<DatabaseState>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResults>> {
    let artists = queries::list_artists(&state.connection).await?;
    let shows = queries::list_all_shows(&state.connection).await?;
    let times = show_times_by(&shows, |show| show.artist_id);
    let now = Utc::now();
    let records: Vec<SearchRecord> = artists
        .into_iter()
        .map(|artist| SearchRecord {
            id: artist.id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            num_upcoming_shows: upcoming_for(&times, artist.id, now),
        })
        .collect();
    Ok(Json(search(&records, &body.search_term)))
}

pub async fn get_artist(
    State(state): State<DatabaseState>,
    Path(artist_id): Path<i32>,
) -> Result<Json<ArtistDetailResponse>> {
    let artist = queries::get_artist_by_id(&state.connection, artist_id).await?;
    let genres = queries::genres_for_artist(&state.connection, &artist).await?;
    let booked: Vec<BookedShow> = queries::shows_for_artist(&state.connection, artist_id)
        .await?
        .into_iter()
        .map(|(show, venue)| BookedShow {
            start_time: show.start_time,
            counterpart_id: venue.id,
            counterpart_name: venue.name,
            counterpart_image_link: venue.image_link,
        })
        .collect();
    let classified = classify_shows(&booked, Utc::now());
    Ok(Json(ArtistDetailResponse::from_parts(artist, genres, classified)))
}

pub async fn create_artist(
    State(state): State<DatabaseState>,
    Json(form): Json<ArtistForm>,
) -> Result<(StatusCode, Json<artist::Model>)> {
    let (artist, genres) = form.validate()?;
    let model = queries::create_artist(&state.connection, artist, &genres).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn update_artist(
    State(state): State<DatabaseState>,
    Path(artist_id): Path<i32>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<artist::Model>> {
    let (artist, genres) = form.validate()?;
    let model = queries::update_artist(&state.connection, artist_id, artist, &genres).await?;
    Ok(Json(model))
}

pub async fn delete_artist(
    State(state): State<DatabaseState>,
    Path(artist_id): Path<i32>,
) -> Result<Json<MessageBody>> {
    queries::delete_artist(&state.connection, artist_id).await?;
    Ok(Json(MessageBody::new("Artist deleted")))
}

//  Shows
//  ----------------------------------------------------------------

pub async fn get_shows(State(state): State<DatabaseState>) -> Result<Json<Vec<ShowListItem>>> {
    let shows = queries::list_shows(&state.connection).await?;
    let items = shows
        .into_iter()
        .map(|(show, artist, venue)| ShowListItem::from_parts(show, artist, venue))
        .collect();
    Ok(Json(items))
}

pub async fn create_show(
    State(state): State<DatabaseState>,
    Json(form): Json<ShowForm>,
) -> Result<(StatusCode, Json<show::Model>)> {
    let show = form.validate()?;
    let model = queries::create_show(&state.connection, show).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn delete_show(
    State(state): State<DatabaseState>,
    Path(show_id): Path<i32>,
) -> Result<Json<MessageBody>> {
    queries::delete_show(&state.connection, show_id).await?;
    Ok(Json(MessageBody::new("Show deleted")))
}
