pub mod artist;
pub mod artist_genre;
pub mod artist_local_model;
pub mod genre;
pub mod prelude;
pub mod show;
pub mod show_local_model;
pub mod venue;
pub mod venue_genre;
pub mod venue_local_model;
