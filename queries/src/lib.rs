use std::collections::HashMap;

use log::info;
use sea_orm::ActiveValue::Unchanged;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;

use entities::artist_local_model::ArtistModel;
use entities::show_local_model::ShowModel;
use entities::venue_local_model::VenueModel;
use entities::{artist, artist_genre, genre, show, venue, venue_genre};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures surfaced by the record store. Referential integrity is enforced
/// by the schema; `InvalidReference` covers the booking path, where the ids
/// come straight from user input.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("no venue with id {0}")]
    VenueNotFound(i32),
    #[error("no artist with id {0}")]
    ArtistNotFound(i32),
    #[error("show references a missing {entity} with id {id}")]
    InvalidReference { entity: &'static str, id: i32 },
}

pub async fn list_venues(conn: &DatabaseConnection) -> Result<Vec<venue::Model>> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .all(conn)
        .await?;
    Ok(venues)
}

pub async fn get_venue_by_id(conn: &DatabaseConnection, venue_id: i32) -> Result<venue::Model> {
    venue::Entity::find_by_id(venue_id)
        .one(conn)
        .await?
        .ok_or(StoreError::VenueNotFound(venue_id))
}

pub async fn list_artists(conn: &DatabaseConnection) -> Result<Vec<artist::Model>> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .all(conn)
        .await?;
    Ok(artists)
}

pub async fn get_artist_by_id(conn: &DatabaseConnection, artist_id: i32) -> Result<artist::Model> {
    artist::Entity::find_by_id(artist_id)
        .one(conn)
        .await?
        .ok_or(StoreError::ArtistNotFound(artist_id))
}

/// All shows booked at a venue, each with the performing artist,
/// ordered by start time.
pub async fn shows_for_venue(
    conn: &DatabaseConnection,
    venue_id: i32,
) -> Result<Vec<(show::Model, artist::Model)>> {
    let rows = show::Entity::find()
        .filter(show::Column::VenueId.eq(venue_id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(artist::Entity)
        .all(conn)
        .await?;
    rows.into_iter()
        .map(|(show, artist)| match artist {
            Some(artist) => Ok((show, artist)),
            None => Err(StoreError::InvalidReference {
                entity: "artist",
                id: show.artist_id,
            }),
        })
        .collect()
}

/// All shows an artist performs, each with the hosting venue,
/// ordered by start time.
pub async fn shows_for_artist(
    conn: &DatabaseConnection,
    artist_id: i32,
) -> Result<Vec<(show::Model, venue::Model)>> {
    let rows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(artist_id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(conn)
        .await?;
    rows.into_iter()
        .map(|(show, venue)| match venue {
            Some(venue) => Ok((show, venue)),
            None => Err(StoreError::InvalidReference {
                entity: "venue",
                id: show.venue_id,
            }),
        })
        .collect()
}

/// Bare show rows, for the views that only need start times per parent.
pub async fn list_all_shows(conn: &DatabaseConnection) -> Result<Vec<show::Model>> {
    let shows = show::Entity::find().all(conn).await?;
    Ok(shows)
}

pub async fn list_shows(
    conn: &DatabaseConnection,
) -> Result<Vec<(show::Model, artist::Model, venue::Model)>> {
    let rows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .find_also_related(artist::Entity)
        .all(conn)
        .await?;
    let venue_ids: Vec<i32> = rows.iter().map(|(show, _)| show.venue_id).collect();
    let venues: HashMap<i32, venue::Model> = venue::Entity::find()
        .filter(venue::Column::Id.is_in(venue_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|venue| (venue.id, venue))
        .collect();
    rows.into_iter()
        .map(|(show, artist)| {
            let artist = artist.ok_or(StoreError::InvalidReference {
                entity: "artist",
                id: show.artist_id,
            })?;
            let venue = venues
                .get(&show.venue_id)
                .cloned()
                .ok_or(StoreError::InvalidReference {
                    entity: "venue",
                    id: show.venue_id,
                })?;
            Ok((show, artist, venue))
        })
        .collect()
}

pub async fn genres_for_venue(
    conn: &DatabaseConnection,
    venue: &venue::Model,
) -> Result<Vec<genre::Model>> {
    let genres = venue.find_related(genre::Entity).all(conn).await?;
    Ok(genres)
}

pub async fn genres_for_artist(
    conn: &DatabaseConnection,
    artist: &artist::Model,
) -> Result<Vec<genre::Model>> {
    let genres = artist.find_related(genre::Entity).all(conn).await?;
    Ok(genres)
}

async fn find_or_create_genre<C: ConnectionTrait>(conn: &C, name: &str) -> Result<genre::Model> {
    let existing = genre::Entity::find()
        .filter(genre::Column::Name.eq(name))
        .one(conn)
        .await?;
    match existing {
        Some(genre) => Ok(genre),
        None => {
            let genre = genre::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            Ok(genre)
        }
    }
}

async fn link_venue_genres<C: ConnectionTrait>(
    conn: &C,
    venue_id: i32,
    genres: &[String],
) -> Result<()> {
    for name in genres {
        let genre = find_or_create_genre(conn, name).await?;
        venue_genre::Entity::insert(venue_genre::ActiveModel {
            venue_id: Set(venue_id),
            genre_id: Set(genre.id),
        })
        .exec(conn)
        .await?;
    }
    Ok(())
}

async fn link_artist_genres<C: ConnectionTrait>(
    conn: &C,
    artist_id: i32,
    genres: &[String],
) -> Result<()> {
    for name in genres {
        let genre = find_or_create_genre(conn, name).await?;
        artist_genre::Entity::insert(artist_genre::ActiveModel {
            artist_id: Set(artist_id),
            genre_id: Set(genre.id),
        })
        .exec(conn)
        .await?;
    }
    Ok(())
}

/// Insert a venue with its genre links in one transaction. Rolls back as a
/// whole if any part fails.
pub async fn create_venue(
    conn: &DatabaseConnection,
    venue: VenueModel,
    genres: &[String],
) -> Result<venue::Model> {
    let txn = conn.begin().await?;
    let model = venue.into_active_model().insert(&txn).await?;
    link_venue_genres(&txn, model.id, genres).await?;
    txn.commit().await?;
    info!("Created venue {} with id {}", model.name, model.id);
    Ok(model)
}

/// Overwrite a venue's fields and replace its genre links in one transaction.
pub async fn update_venue(
    conn: &DatabaseConnection,
    venue_id: i32,
    venue: VenueModel,
    genres: &[String],
) -> Result<venue::Model> {
    get_venue_by_id(conn, venue_id).await?;
    let txn = conn.begin().await?;
    let mut active = venue.into_active_model();
    active.id = Unchanged(venue_id);
    let model = active.update(&txn).await?;
    venue_genre::Entity::delete_many()
        .filter(venue_genre::Column::VenueId.eq(venue_id))
        .exec(&txn)
        .await?;
    link_venue_genres(&txn, venue_id, genres).await?;
    txn.commit().await?;
    Ok(model)
}

/// Delete a venue. Its shows and genre links go with it via the cascading
/// foreign keys.
pub async fn delete_venue(conn: &DatabaseConnection, venue_id: i32) -> Result<()> {
    let result = venue::Entity::delete_by_id(venue_id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::VenueNotFound(venue_id));
    }
    info!("Deleted venue {}", venue_id);
    Ok(())
}

pub async fn create_artist(
    conn: &DatabaseConnection,
    artist: ArtistModel,
    genres: &[String],
) -> Result<artist::Model> {
    let txn = conn.begin().await?;
    let model = artist.into_active_model().insert(&txn).await?;
    link_artist_genres(&txn, model.id, genres).await?;
    txn.commit().await?;
    info!("Created artist {} with id {}", model.name, model.id);
    Ok(model)
}

pub async fn update_artist(
    conn: &DatabaseConnection,
    artist_id: i32,
    artist: ArtistModel,
    genres: &[String],
) -> Result<artist::Model> {
    get_artist_by_id(conn, artist_id).await?;
    let txn = conn.begin().await?;
    let mut active = artist.into_active_model();
    active.id = Unchanged(artist_id);
    let model = active.update(&txn).await?;
    artist_genre::Entity::delete_many()
        .filter(artist_genre::Column::ArtistId.eq(artist_id))
        .exec(&txn)
        .await?;
    link_artist_genres(&txn, artist_id, genres).await?;
    txn.commit().await?;
    Ok(model)
}

pub async fn delete_artist(conn: &DatabaseConnection, artist_id: i32) -> Result<()> {
    let result = artist::Entity::delete_by_id(artist_id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::ArtistNotFound(artist_id));
    }
    info!("Deleted artist {}", artist_id);
    Ok(())
}

/// Book a show. Both parties must already exist; the checks here turn a
/// foreign key violation into a typed error before the insert is attempted.
pub async fn create_show(conn: &DatabaseConnection, show: ShowModel) -> Result<show::Model> {
    let artist = artist::Entity::find_by_id(show.artist_id).one(conn).await?;
    if artist.is_none() {
        return Err(StoreError::InvalidReference {
            entity: "artist",
            id: show.artist_id,
        });
    }
    let venue = venue::Entity::find_by_id(show.venue_id).one(conn).await?;
    if venue.is_none() {
        return Err(StoreError::InvalidReference {
            entity: "venue",
            id: show.venue_id,
        });
    }
    let model = show.into_active_model().insert(conn).await?;
    info!(
        "Booked show {} (artist {} at venue {})",
        model.id, model.artist_id, model.venue_id
    );
    Ok(model)
}

pub async fn delete_show(conn: &DatabaseConnection, show_id: i32) -> Result<()> {
    show::Entity::delete_by_id(show_id).exec(conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn venue_model(id: i32) -> venue::Model {
        venue::Model {
            id,
            name: "The Hop".to_string(),
            city: "Boston".to_string(),
            state: "MA".to_string(),
            address: "1 Main St".to_string(),
            phone: None,
            image_link: None,
            website_link: None,
            facebook_link: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    #[tokio::test]
    async fn list_venues_returns_all_rows() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![venue_model(1), venue_model(2)]])
            .into_connection();
        let venues = list_venues(&conn).await.unwrap();
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].id, 1);
    }

    #[tokio::test]
    async fn missing_venue_is_a_typed_error() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<venue::Model>::new()])
            .into_connection();
        let err = get_venue_by_id(&conn, 42).await.unwrap_err();
        assert!(matches!(err, StoreError::VenueNotFound(42)));
    }

    #[tokio::test]
    async fn booking_against_a_missing_artist_is_rejected() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<artist::Model>::new()])
            .into_connection();
        let show = ShowModel {
            start_time: Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap(),
            artist_id: 7,
            venue_id: 1,
        };
        let err = create_show(&conn, show).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidReference {
                entity: "artist",
                id: 7
            }
        ));
    }

    #[tokio::test]
    async fn deleting_an_absent_venue_reports_not_found() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let err = delete_venue(&conn, 9).await.unwrap_err();
        assert!(matches!(err, StoreError::VenueNotFound(9)));
    }
}
