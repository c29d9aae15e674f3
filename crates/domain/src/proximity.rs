//! Proximity filtering over a set of addresses.
//!
//! A plain linear scan: every candidate's distance to the center is computed
//! and compared against the radius. Results are ordered by ascending distance,
//! ties broken by id.

use std::cmp::Ordering;

use crate::aggregates::Address;
use crate::value_objects::{Coordinates, SearchRadius};

/// An address that fell within a search radius, with its distance.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyAddress {
    pub address: Address,
    pub distance_km: f64,
}

/// Select the addresses within `radius` of `center` (boundary inclusive).
pub fn find_within(
    addresses: impl IntoIterator<Item = Address>,
    center: Coordinates,
    radius: SearchRadius,
) -> Vec<NearbyAddress> {
    let mut nearby: Vec<NearbyAddress> = addresses
        .into_iter()
        .filter_map(|address| {
            let distance_km = center.distance_km(&address.coordinates());
            radius.contains(distance_km).then_some(NearbyAddress {
                address,
                distance_km,
            })
        })
        .collect();

    nearby.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.address.id().cmp(&b.address.id()))
    });
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::AddressDraft;
    use crate::distance::haversine_km;

    fn at(name: &str, lat: f64, lon: f64) -> Address {
        Address::new(AddressDraft::new(name, "street", "city", "state", "country", lat, lon).expect("valid"))
    }

    fn radius(km: f64) -> SearchRadius {
        SearchRadius::new(km).expect("valid radius")
    }

    #[test]
    fn empty_input_yields_nothing() {
        let center = Coordinates::new(0.0, 0.0).expect("valid");
        assert!(find_within(Vec::new(), center, radius(100.0)).is_empty());
    }

    #[test]
    fn boundary_is_inclusive() {
        let center = Coordinates::new(0.0, 0.0).expect("valid");
        let edge = at("edge", 0.0, 1.0);
        let exact = haversine_km(0.0, 0.0, 0.0, 1.0);

        let hits = find_within(vec![edge.clone()], center, radius(exact));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].distance_km, exact);

        let just_short = exact - 1e-9;
        assert!(find_within(vec![edge], center, radius(just_short)).is_empty());
    }

    #[test]
    fn record_beyond_radius_is_excluded() {
        let center = Coordinates::new(0.0, 0.0).expect("valid");
        let r = haversine_km(0.0, 0.0, 0.0, 1.0);
        let beyond = at("beyond", 0.0, 1.0001);
        assert!(find_within(vec![beyond], center, radius(r)).is_empty());
    }

    #[test]
    fn zero_radius_matches_only_the_center() {
        let center = Coordinates::new(10.0, 20.0).expect("valid");
        let same = at("same", 10.0, 20.0);
        let other = at("other", 10.0, 20.01);
        let hits = find_within(vec![same.clone(), other], center, radius(0.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].address, same);
    }

    #[test]
    fn results_are_sorted_by_distance_then_id() {
        let center = Coordinates::new(0.0, 0.0).expect("valid");
        let far = at("far", 0.0, 2.0);
        let near = at("near", 0.0, 1.0);
        let twin_a = at("twin-a", 0.0, -1.0);

        let hits = find_within(
            vec![far.clone(), near.clone(), twin_a.clone()],
            center,
            radius(500.0),
        );

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[2].address, far);

        // `near` and `twin_a` are equidistant; the smaller id comes first
        let (first, second) = if near.id() < twin_a.id() {
            (near, twin_a)
        } else {
            (twin_a, near)
        };
        assert_eq!(hits[0].address, first);
        assert_eq!(hits[1].address, second);
    }

    #[test]
    fn infinite_radius_matches_everything() {
        let center = Coordinates::new(0.0, 0.0).expect("valid");
        let antipode = at("antipode", 0.0, 180.0);
        let hits = find_within(vec![antipode], center, radius(f64::INFINITY));
        assert_eq!(hits.len(), 1);
    }
}
