//! Place search
//!
//! Combines the `states`, `cities` and `amenities` criteria of
//! `POST /places_search` into a list of places:
//!
//! 1. No criteria at all: every place in storage.
//! 2. Otherwise, for each known state, the places of each of its cities.
//!    A city reached this way is dropped (first occurrence only) from the
//!    `cities` criterion.
//! 3. Then the places of each remaining known city.
//! 4. A non-empty `amenities` criterion keeps only places whose linked
//!    amenities are exactly that many and all listed. Places with extra
//!    amenities are dropped too.
//!
//! Results keep accumulation order and are not deduplicated beyond step 2.

use hbnb_core::{City, HbnbError, Place, State};
use hbnb_types::runtime::PlacesSearchRequest;
use tracing::debug;

use crate::storage::Storage;

/// Run a place search against storage
pub async fn places_search(
    storage: &dyn Storage,
    request: PlacesSearchRequest,
) -> Result<Vec<Place>, HbnbError> {
    if request.is_empty() {
        return storage.fetch_all::<Place>().await;
    }

    let PlacesSearchRequest {
        states,
        mut cities,
        amenities,
    } = request;
    let mut places = Vec::new();

    for state_id in &states {
        if storage.fetch::<State>(state_id).await?.is_none() {
            debug!("places_search: unknown state {}", state_id);
            continue;
        }
        for city in storage.cities_of_state(state_id).await? {
            places.extend(storage.places_of_city(&city.id).await?);
            cities = without_first(cities, &city.id);
        }
    }

    for city_id in &cities {
        if storage.fetch::<City>(city_id).await?.is_none() {
            debug!("places_search: unknown city {}", city_id);
            continue;
        }
        places.extend(storage.places_of_city(city_id).await?);
    }

    if amenities.is_empty() {
        return Ok(places);
    }

    let mut matching = Vec::with_capacity(places.len());
    for place in places {
        if has_exact_amenities(storage, &place, &amenities).await? {
            matching.push(place);
        }
    }
    Ok(matching)
}

/// Rebuild `ids` without the first occurrence of `id`
fn without_first(ids: Vec<String>, id: &str) -> Vec<String> {
    match ids.iter().position(|candidate| candidate == id) {
        Some(index) => ids
            .into_iter()
            .enumerate()
            .filter_map(|(i, candidate)| (i != index).then_some(candidate))
            .collect(),
        None => ids,
    }
}

/// Same count as the filter and every linked amenity listed in it
async fn has_exact_amenities(
    storage: &dyn Storage,
    place: &Place,
    wanted: &[String],
) -> Result<bool, HbnbError> {
    let linked = storage.amenities_of_place(place).await?;
    Ok(linked.len() == wanted.len()
        && linked
            .iter()
            .all(|amenity| wanted.iter().any(|id| *id == amenity.id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    fn request(states: &[&str], cities: &[&str], amenities: &[&str]) -> PlacesSearchRequest {
        let owned = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect();
        PlacesSearchRequest {
            states: owned(states),
            cities: owned(cities),
            amenities: owned(amenities),
        }
    }

    fn names(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_no_criteria_returns_everything() {
        let fx = Fixture::seeded().await;
        let places = places_search(fx.storage.as_ref(), PlacesSearchRequest::default())
            .await
            .unwrap();
        assert_eq!(places.len(), fx.place_count());
    }

    #[tokio::test]
    async fn test_state_and_its_city_not_duplicated() {
        let fx = Fixture::seeded().await;
        let places = places_search(
            fx.storage.as_ref(),
            request(&[fx.california.id.as_str()], &[fx.san_francisco.id.as_str()], &[]),
        )
        .await
        .unwrap();
        assert_eq!(names(&places), vec!["Loft", "Studio", "Cabin"]);
    }

    #[tokio::test]
    async fn test_state_places_come_before_city_places() {
        let fx = Fixture::seeded().await;
        let places = places_search(
            fx.storage.as_ref(),
            request(&[fx.nevada.id.as_str()], &[fx.san_francisco.id.as_str()], &[]),
        )
        .await
        .unwrap();
        assert_eq!(names(&places), vec!["Casino Suite", "Loft", "Studio"]);
    }

    #[tokio::test]
    async fn test_same_city_twice_is_not_deduplicated() {
        let fx = Fixture::seeded().await;
        let places = places_search(
            fx.storage.as_ref(),
            request(&[], &[fx.reno.id.as_str(), fx.reno.id.as_str()], &[]),
        )
        .await
        .unwrap();
        assert_eq!(names(&places), vec!["Casino Suite", "Casino Suite"]);
        assert!(places.iter().all(|p| *p == fx.casino_suite));
    }

    #[tokio::test]
    async fn test_place_without_amenities_never_matches_filter() {
        let fx = Fixture::seeded().await;
        let places = places_search(
            fx.storage.as_ref(),
            request(&[fx.nevada.id.as_str()], &[], &[fx.wifi.id.as_str()]),
        )
        .await
        .unwrap();
        assert!(fx.casino_suite.amenity_ids.is_empty());
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_are_skipped() {
        let fx = Fixture::seeded().await;
        let places = places_search(fx.storage.as_ref(), request(&["nope"], &["nada"], &[]))
            .await
            .unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_amenities_require_exact_set() {
        let fx = Fixture::seeded().await;
        let places = places_search(
            fx.storage.as_ref(),
            request(&[fx.california.id.as_str()], &[], &[fx.wifi.id.as_str(), fx.pool.id.as_str()]),
        )
        .await
        .unwrap();
        // Studio has wifi+pool+kitchen, Cabin has only wifi.
        assert_eq!(names(&places), vec!["Loft"]);
    }

    #[tokio::test]
    async fn test_amenities_only_filters_nothing_accumulated() {
        let fx = Fixture::seeded().await;
        let places = places_search(fx.storage.as_ref(), request(&[], &[], &[fx.wifi.id.as_str()]))
            .await
            .unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_without_first() {
        let ids = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(without_first(ids.clone(), "a"), vec!["b", "a"]);
        assert_eq!(without_first(ids, "z"), vec!["a", "b", "a"]);
    }
}
