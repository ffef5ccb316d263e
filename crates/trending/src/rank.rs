//! Ranked place listings derived from the aggregated scores.

use oddiya_geo::BoundingBox;
use oddiya_places::{Page, Place, PlaceCategory, PlaceStore};
use tracing::debug;

use crate::{Result, TrendingError};

/// Minimum rating for a place to qualify as trending.
const TRENDING_MIN_RATING: f64 = 4.0;

/// Minimum review count for a place to qualify as trending.
const TRENDING_MIN_REVIEWS: u64 = 10;

/// Trending rank mixes the aggregated popularity with raw view volume.
fn trending_rank(place: &Place) -> f64 {
    place.popularity_score * 0.7 + place.view_count as f64 * 0.3
}

/// Lists trending places: well-rated, well-reviewed, ordered by the
/// popularity/view mix descending. Ties break on ascending ID.
pub fn trending_places(
    store: &dyn PlaceStore,
    page: usize,
    page_size: usize,
) -> Result<Page<Place>> {
    if page_size == 0 {
        return Err(TrendingError::InvalidPageSize(0));
    }

    let mut places: Vec<Place> = store
        .find_all_searchable()?
        .into_iter()
        .filter(|p| {
            p.rating.is_some_and(|r| r >= TRENDING_MIN_RATING)
                && p.review_count >= TRENDING_MIN_REVIEWS
        })
        .collect();

    places.sort_by(|a, b| {
        trending_rank(b)
            .total_cmp(&trending_rank(a))
            .then_with(|| a.id.cmp(&b.id))
    });

    debug!(candidates = places.len(), page, "trending listing ranked");
    Ok(Page::from_sorted(places, page, page_size))
}

/// Lists the most popular places of one category inside the Korea service
/// region, ordered by popularity then rating descending. Ties break on
/// ascending ID.
pub fn popular_places_by_category(
    store: &dyn PlaceStore,
    category: PlaceCategory,
    page: usize,
    page_size: usize,
) -> Result<Page<Place>> {
    if page_size == 0 {
        return Err(TrendingError::InvalidPageSize(0));
    }

    let mut places: Vec<Place> = store
        .find_all_searchable()?
        .into_iter()
        .filter(|p| p.category == category && BoundingBox::KOREA.contains(&p.coordinate))
        .collect();

    places.sort_by(|a, b| {
        b.popularity_score
            .total_cmp(&a.popularity_score)
            .then_with(|| {
                b.rating
                    .unwrap_or(0.0)
                    .total_cmp(&a.rating.unwrap_or(0.0))
            })
            .then_with(|| a.id.cmp(&b.id))
    });

    debug!(
        category = %category,
        candidates = places.len(),
        page,
        "category listing ranked"
    );
    Ok(Page::from_sorted(places, page, page_size))
}
