use tracing::{debug, warn};

use super::{LookupQuery, LookupResponse, MetadataLookup};
use crate::error::LookupError;
use crate::parser::leading_year;
use crate::types::{ImdbId, MediaRecord};

/// Rating source whose value becomes the record's rating.
pub const RATING_SOURCE: &str = "Internet Movie Database";

impl MediaRecord {
    /// Looks the record up and copies the canonical metadata into it.
    ///
    /// Returns the service's own status flag. An incomplete response is not
    /// an error: the identifier is reset and whatever was already copied stays.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from the lookup backend.
    pub fn search_imdb_id(&mut self, lookup: &dyn MetadataLookup) -> Result<bool, LookupError> {
        let query = LookupQuery::from_record(self);
        debug!(title = %query.title, year = ?query.year, "looking up metadata");

        let response = lookup.lookup(&query)?;
        self.apply_lookup(&response);

        Ok(response.is_success())
    }

    /// Copies `id`, `title`, `year` and `rating` from a response, in that
    /// order, stopping at the first missing field.
    pub fn apply_lookup(&mut self, response: &LookupResponse) {
        if let Err(field) = self.assign_lookup_fields(response) {
            warn!(
                title = %self.title,
                field,
                error = response.error.as_deref().unwrap_or(""),
                "lookup response incomplete, identifier reset"
            );
            self.id = None;
        }
    }

    fn assign_lookup_fields(&mut self, response: &LookupResponse) -> Result<(), &'static str> {
        let id = response
            .imdb_id
            .as_deref()
            .and_then(ImdbId::parse)
            .ok_or("imdbID")?;
        self.id = Some(id);

        self.title = response.title.clone().ok_or("Title")?;

        let year = response.year.as_deref().ok_or("Year")?;
        self.year = leading_year(year);

        let rating = response.rating_from(RATING_SOURCE).ok_or("Ratings")?;
        self.rating = Some(rating.to_string());

        Ok(())
    }
}
