//! The simulation engine.
//!
//! Owns the RNG and the round cap, places aliens on a loaded map, and runs
//! rounds until every alien is dead or the cap is reached. Within a round
//! aliens move in ascending id order and every effect of one alien's move
//! (including a fight it triggers) is applied before the next alien is
//! considered. Every internal error aborts the whole run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::error::SimulationError;
use crate::map::{Alien, AlienId, City, Direction, Map, DIRECTION_COUNT};
use crate::report::SimulationReport;
use crate::resolve::resolve_fight;

/// The fixed round cap: each alien moves at most this many times.
pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;

/// Rounds between progress log events.
const PROGRESS_INTERVAL: u32 = 1_000;

/// Drives a battle of aliens over a city graph.
pub struct Simulation {
    rng: SmallRng,
    max_rounds: u32,
}

impl Simulation {
    /// Creates a simulation with an entropy-seeded RNG and the default
    /// round cap.
    pub fn new() -> Self {
        Simulation {
            rng: SmallRng::from_entropy(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Creates a simulation with a fixed seed for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Simulation {
            rng: SmallRng::seed_from_u64(seed),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Overrides the round cap.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Places `count` aliens with ids `0..count`, each in a uniformly
    /// random city drawn from the map's placement index. Several aliens
    /// may land in the same city; fights only trigger on later arrivals.
    pub fn place_aliens(&mut self, map: &mut Map, count: u32) -> Result<(), SimulationError> {
        if map.city_count() == 0 {
            return Err(SimulationError::CityNotFound(String::new()));
        }
        for id in 0..count {
            let index = self.rng.gen_range(0..map.city_count());
            let name = map
                .city_name_at(index)
                .ok_or_else(|| SimulationError::CityNotFound(index.to_string()))?
                .to_string();
            map.place_alien(Alien::new(id), &name)?;
        }
        Ok(())
    }

    /// Runs rounds until `aliens_left` hits zero or the round cap is
    /// reached. The cap is a normal outcome, reported via the
    /// `round_cap_reached` flag; any internal error aborts the run.
    pub fn run(
        &mut self,
        map: &mut Map,
        aliens_left: usize,
    ) -> Result<SimulationReport, SimulationError> {
        let mut aliens_left = aliens_left;
        let mut round = 0;
        let mut records = Vec::new();

        while aliens_left > 0 && round < self.max_rounds {
            if round % PROGRESS_INTERVAL == 0 {
                info!(round, aliens_left, "simulating round");
            }
            // Snapshot of ids: fights during the round remove aliens from
            // the collection, and those must simply be skipped.
            for id in map.alien_ids() {
                let Ok(alien) = map.alien(id) else {
                    continue;
                };
                if !alien.is_alive() {
                    continue;
                }
                let origin = alien
                    .position()
                    .ok_or(SimulationError::UnplacedAlien(id))?
                    .to_string();

                let direction = self.pick_direction(map.city(&origin)?)?;
                let destination = move_alien(map, id, direction)?;

                if map.city(&destination)?.has_fight() {
                    let casualties = resolve_fight(map, &destination, id, round, &mut records)?;
                    aliens_left = aliens_left.saturating_sub(casualties);
                }
            }
            round += 1;
        }

        Ok(SimulationReport {
            rounds: round,
            aliens_left,
            round_cap_reached: aliens_left > 0 && round == self.max_rounds,
            records,
        })
    }

    /// Picks the direction of a random available road out of `city` by
    /// rejection sampling over the four slots. A city with no available
    /// road is a `NoAvailableRoad` error rather than an endless resample
    /// loop.
    fn pick_direction(&mut self, city: &City) -> Result<Direction, SimulationError> {
        if city.available_roads() == 0 {
            return Err(SimulationError::NoAvailableRoad(city.name().to_string()));
        }
        loop {
            let index = self.rng.gen_range(0..DIRECTION_COUNT);
            if let Some(road) = city.road_at(index)? {
                if road.is_available() {
                    return Ok(road.direction());
                }
            }
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new()
    }
}

/// Moves an alien one step along the road out of its current city in
/// `direction`, returning the destination city's name.
///
/// The origin's resident set, the destination's resident set, and the
/// alien's recorded position are updated together. An empty slot reads as
/// a destroyed topology (`CityDestroyed`), a severed road as
/// `RoadUnavailable`, and a road pointing back at the origin as
/// `AlreadyThere`; all are fatal.
pub fn move_alien(
    map: &mut Map,
    id: AlienId,
    direction: Direction,
) -> Result<String, SimulationError> {
    let alien = map.alien(id)?;
    if !alien.is_alive() {
        return Err(SimulationError::AlienNotAlive(id));
    }
    let origin = alien
        .position()
        .ok_or(SimulationError::UnplacedAlien(id))?
        .to_string();

    let destination = {
        let city = map.city(&origin)?;
        let road = city
            .road(direction)
            .ok_or_else(|| SimulationError::CityDestroyed(origin.clone()))?;
        if !road.is_available() {
            return Err(SimulationError::RoadUnavailable {
                origin: origin.clone(),
                destination: road.destination().to_string(),
            });
        }
        road.destination().to_string()
    };
    if destination == origin {
        return Err(SimulationError::AlreadyThere {
            alien: id,
            city: origin,
        });
    }

    map.city_mut(&origin)?.remove_alien(id)?;
    map.alien_mut(id)?.set_position(&destination)?;
    let alien = map.alien(id)?.clone();
    map.city_mut(&destination)?.add_alien(&alien)?;
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Road;

    /// Foo <-> Bar, east/west reciprocal pair.
    fn pair_map() -> Map {
        let mut map = Map::new();
        let mut foo = City::new("Foo");
        let mut bar = City::new("Bar");
        foo.add_road(Road::new("Foo", Direction::East, "Bar"));
        bar.add_road(Road::new("Bar", Direction::West, "Foo"));
        map.insert_city(foo);
        map.insert_city(bar);
        map
    }

    #[test]
    fn move_alien_updates_both_cities_and_the_alien() {
        let mut map = pair_map();
        map.place_alien(Alien::new(0), "Foo").unwrap();

        let dest = move_alien(&mut map, 0, Direction::East).unwrap();
        assert_eq!(dest, "Bar");
        assert!(!map.city("Foo").unwrap().has_alien(0));
        assert!(map.city("Bar").unwrap().has_alien(0));
        assert_eq!(map.alien(0).unwrap().position(), Some("Bar"));
    }

    #[test]
    fn move_through_empty_slot_is_fatal() {
        let mut map = pair_map();
        map.place_alien(Alien::new(0), "Foo").unwrap();
        let err = move_alien(&mut map, 0, Direction::North).unwrap_err();
        assert_eq!(err, SimulationError::CityDestroyed("Foo".to_string()));
    }

    #[test]
    fn move_through_severed_road_is_fatal() {
        let mut map = pair_map();
        map.place_alien(Alien::new(0), "Foo").unwrap();
        map.city_mut("Foo")
            .unwrap()
            .destroy_road(Direction::East)
            .unwrap();
        let err = move_alien(&mut map, 0, Direction::East).unwrap_err();
        assert_eq!(
            err,
            SimulationError::RoadUnavailable {
                origin: "Foo".to_string(),
                destination: "Bar".to_string(),
            }
        );
        // The failed move changed nothing.
        assert!(map.city("Foo").unwrap().has_alien(0));
        assert_eq!(map.alien(0).unwrap().position(), Some("Foo"));
    }

    #[test]
    fn self_loop_road_is_rejected() {
        let mut map = pair_map();
        map.city_mut("Foo")
            .unwrap()
            .add_road(Road::new("Foo", Direction::South, "Foo"));
        map.place_alien(Alien::new(0), "Foo").unwrap();
        let err = move_alien(&mut map, 0, Direction::South).unwrap_err();
        assert_eq!(
            err,
            SimulationError::AlreadyThere {
                alien: 0,
                city: "Foo".to_string(),
            }
        );
    }

    #[test]
    fn placement_is_deterministic_under_a_seed() {
        let mut first = pair_map();
        Simulation::with_seed(11)
            .place_aliens(&mut first, 6)
            .unwrap();
        let mut second = pair_map();
        Simulation::with_seed(11)
            .place_aliens(&mut second, 6)
            .unwrap();

        for id in 0..6 {
            assert_eq!(
                first.alien(id).unwrap().position(),
                second.alien(id).unwrap().position()
            );
        }
    }

    #[test]
    fn placement_on_an_empty_map_errors() {
        let mut map = Map::new();
        let err = Simulation::with_seed(0)
            .place_aliens(&mut map, 1)
            .unwrap_err();
        assert!(matches!(err, SimulationError::CityNotFound(_)));
    }

    #[test]
    fn lone_alien_survives_to_the_round_cap() {
        let mut map = pair_map();
        map.place_alien(Alien::new(0), "Foo").unwrap();

        let mut sim = Simulation::with_seed(42).with_max_rounds(25);
        let report = sim.run(&mut map, 1).unwrap();

        assert_eq!(report.rounds, 25);
        assert_eq!(report.aliens_left, 1);
        assert!(report.round_cap_reached);
        assert!(report.records.is_empty());
        assert!(map.alien(0).unwrap().is_alive());
    }

    #[test]
    fn roadless_city_raises_instead_of_spinning() {
        let mut map = Map::new();
        map.insert_city(City::new("Foo"));
        map.place_alien(Alien::new(0), "Foo").unwrap();

        let mut sim = Simulation::with_seed(1);
        let err = sim.run(&mut map, 1).unwrap_err();
        assert_eq!(err, SimulationError::NoAvailableRoad("Foo".to_string()));
    }

    #[test]
    fn unplaced_alien_is_fatal() {
        let mut map = pair_map();
        map.register_alien(Alien::new(0));

        let mut sim = Simulation::with_seed(1);
        let err = sim.run(&mut map, 1).unwrap_err();
        assert_eq!(err, SimulationError::UnplacedAlien(0));
    }

    #[test]
    fn zero_aliens_terminates_immediately() {
        let mut map = pair_map();
        let mut sim = Simulation::with_seed(1);
        let report = sim.run(&mut map, 0).unwrap();
        assert_eq!(report.rounds, 0);
        assert_eq!(report.aliens_left, 0);
        assert!(!report.round_cap_reached);
    }
}
