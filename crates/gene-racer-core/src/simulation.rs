use crate::config::{SimConfig, SimConfigError};
use crate::genome::Genome;
use crate::metrics::{GenerationStats, VehicleSnapshot};
use crate::track::Track;
use crate::vehicle::{self, Vehicle};
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::f64::consts::{FRAC_PI_2, PI};

/// Outcome of a single `tick` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// At least one vehicle is still driving.
    Running,
    /// The last active vehicle crashed during this tick; the generation
    /// transition fired and a freshly respawned population is in place.
    GenerationComplete,
}

/// The evolution engine: exclusive owner of the track and the population.
///
/// Single-threaded by contract. `tick` is synchronous and completes the
/// whole per-vehicle pass before returning; read accessors are snapshots
/// valid until the next `tick` or mutator call. External mutation (obstacle
/// placement, fitness boosts) is routed through explicit methods so there
/// is exactly one writer.
pub struct Simulation {
    track: Track,
    population: Vec<Vehicle>,
    population_size: usize,
    generation: u64,
    mutation_rate: f64,
    rng: ChaCha12Rng,
    ticks: u64,
    history: Vec<GenerationStats>,
    /// Best (fitness, genome) seen across all completed generations.
    champion: Option<(f64, Genome)>,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Result<Self, SimConfigError> {
        config.validate()?;
        let mut sim = Self {
            track: Track::new(config.canvas_width, config.canvas_height),
            population: Vec::new(),
            population_size: config.population_size,
            generation: 0,
            mutation_rate: config.mutation_rate,
            rng: crate::rng::create_rng(config.seed),
            ticks: 0,
            history: Vec::new(),
            champion: None,
        };
        sim.initialize_population();
        Ok(sim)
    }

    /// Replace the population with fresh random-genome vehicles at random
    /// ring poses. The generation counter and the obstacle set are left
    /// untouched; callers wanting a pristine track also call
    /// `clear_obstacles`.
    pub fn initialize_population(&mut self) {
        self.population.clear();
        for _ in 0..self.population_size {
            let angle = self.rng.random::<f64>() * 2.0 * PI;
            let (x, y) = self.track.spawn_pose(angle);
            let mut vehicle = Vehicle::new(None, x, y, &mut self.rng);
            vehicle.heading = angle + FRAC_PI_2;
            self.population.push(vehicle);
        }
    }

    /// Advance exactly one simulated time step for every active vehicle,
    /// firing the generation transition if the last one crashes within
    /// this tick.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        let track = &self.track;
        let rng = &mut self.rng;
        for vehicle in &mut self.population {
            vehicle.step(track, rng);
        }

        if self.population.iter().any(|v| !v.crashed) {
            return TickOutcome::Running;
        }
        self.evaluate_fitness();
        self.next_generation();
        TickOutcome::GenerationComplete
    }

    /// Scoring stage of the generation transition. Fitness is already
    /// accumulated during `Vehicle::step`, so the default pass has nothing
    /// to do; this exists as the substitution point for alternative
    /// fitness functions.
    pub fn evaluate_fitness(&mut self) {}

    /// Breeding pool: the top half of the population by fitness. Stable
    /// descending sort, so ties keep their original population order. A
    /// population of one breeds with itself rather than leaving the pool
    /// empty.
    fn select_parents(&mut self) -> Vec<Genome> {
        self.population
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        let pool = (self.population_size / 2).max(1);
        self.population[..pool].iter().map(|v| v.genome).collect()
    }

    fn next_generation(&mut self) {
        let stats = self.stats();
        if let Some((fitness, genome)) = self.best().map(|v| (v.fitness, v.genome)) {
            if self.champion.is_none_or(|(record, _)| fitness > record) {
                self.champion = Some((fitness, genome));
            }
        }
        self.history.push(stats);

        let parents = self.select_parents();
        let mut next = Vec::with_capacity(self.population_size);
        while next.len() < self.population_size {
            let p1 = parents[self.rng.random_range(0..parents.len())];
            let p2 = parents[self.rng.random_range(0..parents.len())];
            let mut genome = Genome::crossover(&mut self.rng, &p1, &p2);
            genome.mutate(&mut self.rng, self.mutation_rate);
            next.push(Vehicle::new(Some(genome), 0.0, 0.0, &mut self.rng));
        }

        // Respawn stage: every child gets a fresh random ring pose.
        let track = &self.track;
        let rng = &mut self.rng;
        for vehicle in &mut next {
            let angle = rng.random::<f64>() * 2.0 * PI;
            vehicle.respawn_at(angle, track, rng);
        }

        self.population = next;
        self.generation += 1;
    }

    /// Takes effect at the next breeding cycle, not retroactively.
    pub fn set_mutation_rate(&mut self, rate: f64) -> Result<(), SimConfigError> {
        if !(rate.is_finite() && (0.0..=1.0).contains(&rate)) {
            return Err(SimConfigError::MutationRateOutOfRange { actual: rate });
        }
        self.mutation_rate = rate;
        Ok(())
    }

    pub fn add_obstacle(&mut self, x: f64, y: f64) {
        self.track.add_obstacle(x, y);
    }

    pub fn clear_obstacles(&mut self) {
        self.track.clear_obstacles();
    }

    pub fn is_on_track(&self, x: f64, y: f64) -> bool {
        self.track.is_on_track(x, y)
    }

    /// Manual bonus from the driving UI (click on a vehicle). Applies only
    /// to an existing, non-crashed vehicle; the vehicle is also recolored.
    pub fn boost_fitness(&mut self, index: usize, amount: f64) -> bool {
        let Some(target) = self.population.get_mut(index) else {
            return false;
        };
        if target.crashed {
            return false;
        }
        target.fitness += amount;
        target.color = vehicle::random_color(&mut self.rng);
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn population(&self) -> &[Vehicle] {
        &self.population
    }

    pub fn active_count(&self) -> usize {
        self.population.iter().filter(|v| !v.crashed).count()
    }

    /// Vehicle with the maximum fitness; ties resolve to the first
    /// encountered in population order.
    pub fn best(&self) -> Option<&Vehicle> {
        self.population.iter().fold(None, |best, v| match best {
            Some(b) if v.fitness > b.fitness => Some(v),
            None => Some(v),
            _ => best,
        })
    }

    pub fn champion(&self) -> Option<(f64, Genome)> {
        self.champion
    }

    pub fn stats(&self) -> GenerationStats {
        let n = self.population.len();
        let total: f64 = self.population.iter().map(|v| v.fitness).sum();
        GenerationStats {
            generation: self.generation,
            population_size: n,
            active_count: self.active_count(),
            best_fitness: self.best().map(|v| v.fitness).unwrap_or(0.0),
            mean_fitness: if n > 0 { total / n as f64 } else { 0.0 },
        }
    }

    pub fn snapshots(&self) -> Vec<VehicleSnapshot> {
        self.population.iter().map(VehicleSnapshot::from).collect()
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }
}
