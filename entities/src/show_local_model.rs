use crate::show::ActiveModel;
use chrono::{DateTime, Utc};
use sea_orm::DeriveIntoActiveModel;

#[derive(DeriveIntoActiveModel, PartialEq, Eq, Clone, Debug)]
pub struct ShowModel {
    pub start_time: DateTime<Utc>,
    pub artist_id: i32,
    pub venue_id: i32,
}
