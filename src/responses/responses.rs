use serde::Serialize;

#[derive(Serialize, Clone)]
pub struct ErrorBody {
    pub(crate) error: ErrorBodyContainer,
}

#[derive(Serialize, Clone)]
pub struct ErrorBodyContainer {
    pub(crate) code: u16,
    pub(crate) message: String,
}

impl ErrorBody {
    pub fn new(code: u16, message: String) -> Self {
        Self {
            error: ErrorBodyContainer { code, message },
        }
    }
}

#[derive(Serialize, Clone)]
pub struct MessageBody {
    pub(crate) message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The artists index only carries ids and names; counts and details live on
/// the detail and search views.
#[derive(Serialize, Clone)]
pub struct ArtistListItem {
    pub(crate) id: i32,
    pub(crate) name: String,
}
