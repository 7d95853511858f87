//! Hotel selection by name

use tracing::debug;

use crate::models::HotelRecord;
use crate::{Result, StayScopeError};

/// Resolve a hotel name to the first hotel carrying it.
///
/// Names are not guaranteed unique; later hotels with the same name are
/// unreachable through selection.
pub fn select_hotel<'a>(hotels: &'a [HotelRecord], name: &str) -> Result<&'a HotelRecord> {
    let mut matches = hotels.iter().filter(|hotel| hotel.name == name);

    let selected = matches.next().ok_or_else(|| StayScopeError::HotelNotFound {
        name: name.to_string(),
    })?;

    let duplicates = matches.count();
    if duplicates > 0 {
        debug!(
            "Hotel name '{}' appears {} more time(s); using the first match",
            name, duplicates
        );
    }

    Ok(selected)
}
