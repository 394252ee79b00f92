//! Fight resolution.
//!
//! When two or more aliens share a city, the city is destroyed: every
//! resident dies, the city's roads are severed together with their
//! reciprocal halves on the neighboring cities, and the city is flagged
//! destroyed. Resolution is transactional: the whole fight is validated
//! against the graph before any state is touched, so an error never leaves
//! a half-destroyed city behind.

use tracing::debug;

use crate::error::SimulationError;
use crate::map::{AlienId, Direction, Map};
use crate::report::DestructionRecord;

/// Resolves a fight in `city_name`, triggered by the arrival of `trigger`.
///
/// Emits one destruction record per victim (pairing the trigger with each
/// other resident) tagged with `round`, kills every alien in the city,
/// severs the reciprocal road pairs, and marks the city destroyed.
///
/// Road pairs severed by an earlier fight on a neighboring city are left
/// alone; only still-available pairs are cut. Returns the number of aliens
/// that died, which is the city's population at the moment of resolution.
pub fn resolve_fight(
    map: &mut Map,
    city_name: &str,
    trigger: AlienId,
    round: u32,
    records: &mut Vec<DestructionRecord>,
) -> Result<usize, SimulationError> {
    // Validation pass: nothing below may fail once mutation starts.
    let (victims, severable) = validate_fight(map, city_name, trigger)?;
    let casualties = victims.len() + 1;

    debug!(
        city = city_name,
        trigger,
        casualties,
        round,
        "resolving fight"
    );

    for &victim in &victims {
        records.push(DestructionRecord {
            round,
            city: city_name.to_string(),
            attacker: trigger,
            victim,
        });
        map.kill_alien(victim)?;
    }
    map.kill_alien(trigger)?;

    for (neighbor, reciprocal) in severable {
        map.city_mut(&neighbor)?.destroy_road(reciprocal)?;
    }

    let city = map.city_mut(city_name)?;
    city.destroy_all_roads();
    city.mark_destroyed();
    Ok(casualties)
}

/// Checks that the fight can run to completion: the trigger is present, and
/// every still-available road has a resolvable neighbor with an available
/// reciprocal road. Returns the victim ids and the (neighbor, direction)
/// pairs to sever.
fn validate_fight(
    map: &Map,
    city_name: &str,
    trigger: AlienId,
) -> Result<(Vec<AlienId>, Vec<(String, Direction)>), SimulationError> {
    let city = map.city(city_name)?;
    if !city.has_alien(trigger) {
        return Err(SimulationError::AlienNotFound(trigger));
    }

    let victims: Vec<AlienId> = city.aliens().filter(|&id| id != trigger).collect();

    let mut severable = Vec::new();
    for direction in crate::map::ALL_DIRECTIONS {
        let Some(road) = city.road(direction) else {
            continue;
        };
        if !road.is_available() {
            // The pair was already cut when the neighbor was destroyed.
            continue;
        }
        let neighbor = map
            .city(road.destination())
            .map_err(|_| SimulationError::DestinationMissing(road.destination().to_string()))?;
        let reciprocal_dir = road.opposite_direction();
        match neighbor.road(reciprocal_dir) {
            None => {
                return Err(SimulationError::MissingReciprocalRoad {
                    city: neighbor.name().to_string(),
                    direction: reciprocal_dir.name(),
                })
            }
            Some(reciprocal) if !reciprocal.is_available() => {
                // Our half is available but theirs is cut: the pairing
                // invariant is broken and the run must abort.
                return Err(SimulationError::AlreadyDestroyed {
                    origin: neighbor.name().to_string(),
                    destination: city_name.to_string(),
                });
            }
            Some(_) => severable.push((neighbor.name().to_string(), reciprocal_dir)),
        }
    }

    Ok((victims, severable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Alien, City, Road};

    /// Foo <-east/west-> Bar, plus Foo <-north/south-> Qux.
    fn cross_map() -> Map {
        let mut map = Map::new();
        let mut foo = City::new("Foo");
        let mut bar = City::new("Bar");
        let mut qux = City::new("Qux");
        foo.add_road(Road::new("Foo", Direction::East, "Bar"));
        bar.add_road(Road::new("Bar", Direction::West, "Foo"));
        foo.add_road(Road::new("Foo", Direction::North, "Qux"));
        qux.add_road(Road::new("Qux", Direction::South, "Foo"));
        map.insert_city(foo);
        map.insert_city(bar);
        map.insert_city(qux);
        map
    }

    #[test]
    fn fight_kills_everyone_and_razes_the_city() {
        let mut map = cross_map();
        map.place_alien(Alien::new(1), "Foo").unwrap();
        map.place_alien(Alien::new(2), "Foo").unwrap();
        map.place_alien(Alien::new(3), "Foo").unwrap();

        let mut records = Vec::new();
        let casualties = resolve_fight(&mut map, "Foo", 1, 0, &mut records).unwrap();

        assert_eq!(casualties, 3);
        assert_eq!(map.alien_count(), 0);

        let foo = map.city("Foo").unwrap();
        assert!(foo.is_destroyed());
        assert_eq!(foo.alien_count(), 0);
        assert_eq!(foo.available_roads(), 0);

        // Reciprocal halves on the neighbors are gone too.
        let bar = map.city("Bar").unwrap();
        assert!(!bar.road(Direction::West).unwrap().is_available());
        let qux = map.city("Qux").unwrap();
        assert!(!qux.road(Direction::South).unwrap().is_available());

        // One record per victim, all naming the trigger.
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.attacker == 1 && r.city == "Foo"));
        let victims: Vec<_> = records.iter().map(|r| r.victim).collect();
        assert_eq!(victims, vec![2, 3]);
    }

    #[test]
    fn fight_with_absent_trigger_errors_without_mutation() {
        let mut map = cross_map();
        map.place_alien(Alien::new(1), "Foo").unwrap();
        map.place_alien(Alien::new(2), "Foo").unwrap();

        let mut records = Vec::new();
        let err = resolve_fight(&mut map, "Foo", 9, 0, &mut records).unwrap_err();
        assert_eq!(err, SimulationError::AlienNotFound(9));

        // Transaction aborted before any mutation.
        assert!(records.is_empty());
        assert_eq!(map.alien_count(), 2);
        assert!(!map.city("Foo").unwrap().is_destroyed());
        assert!(map.city("Bar").unwrap().road(Direction::West).unwrap().is_available());
    }

    #[test]
    fn dangling_destination_aborts_before_mutation() {
        let mut map = cross_map();
        // A road into a city that was never loaded.
        map.city_mut("Foo")
            .unwrap()
            .add_road(Road::new("Foo", Direction::West, "Ghost"));
        map.place_alien(Alien::new(1), "Foo").unwrap();
        map.place_alien(Alien::new(2), "Foo").unwrap();

        let mut records = Vec::new();
        let err = resolve_fight(&mut map, "Foo", 1, 0, &mut records).unwrap_err();
        assert_eq!(err, SimulationError::DestinationMissing("Ghost".to_string()));
        assert_eq!(map.alien_count(), 2);
        assert!(!map.city("Foo").unwrap().is_destroyed());
    }

    #[test]
    fn missing_reciprocal_slot_aborts() {
        let mut map = cross_map();
        // Bar's half of the pair never existed.
        let mut bar = City::new("Bar");
        bar.add_road(Road::new("Bar", Direction::North, "Qux"));
        map.insert_city(bar);
        map.place_alien(Alien::new(1), "Foo").unwrap();
        map.place_alien(Alien::new(2), "Foo").unwrap();

        let mut records = Vec::new();
        let err = resolve_fight(&mut map, "Foo", 1, 0, &mut records).unwrap_err();
        assert!(matches!(err, SimulationError::MissingReciprocalRoad { .. }));
    }

    #[test]
    fn fight_next_to_an_earlier_ruin_still_resolves() {
        let mut map = cross_map();
        map.place_alien(Alien::new(1), "Bar").unwrap();
        map.place_alien(Alien::new(2), "Bar").unwrap();

        // First Bar falls, severing Foo's eastern pair.
        let mut records = Vec::new();
        resolve_fight(&mut map, "Bar", 1, 0, &mut records).unwrap();
        assert!(!map.city("Foo").unwrap().road(Direction::East).unwrap().is_available());

        // A later fight in Foo skips the dead pair instead of aborting.
        map.place_alien(Alien::new(3), "Foo").unwrap();
        map.place_alien(Alien::new(4), "Foo").unwrap();
        let casualties = resolve_fight(&mut map, "Foo", 3, 5, &mut records).unwrap();
        assert_eq!(casualties, 2);
        assert!(map.city("Foo").unwrap().is_destroyed());
        assert_eq!(records.last().unwrap().round, 5);
    }
}
