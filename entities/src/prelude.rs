pub use super::artist::Entity as Artist;
pub use super::artist_genre::Entity as ArtistGenre;
pub use super::genre::Entity as Genre;
pub use super::show::Entity as Show;
pub use super::venue::Entity as Venue;
pub use super::venue_genre::Entity as VenueGenre;
