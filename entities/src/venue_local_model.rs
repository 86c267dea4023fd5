use crate::venue::ActiveModel;
use sea_orm::DeriveIntoActiveModel;

// Validated venue fields as they arrive from a form, before the row exists.
// Genres travel separately: they live in the join table, not on the venue row.
#[derive(DeriveIntoActiveModel, PartialEq, Eq, Clone, Debug)]
pub struct VenueModel {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}
