use crate::constants::{INITIAL_SPEED, MAX_SPEED, SENSOR_DISTANCE, VEHICLE_RADIUS};
use crate::genome::Genome;
use crate::track::Track;
use rand::Rng;
use std::f64::consts::FRAC_PI_2;

/// One agent: pose, speed, policy weights, and accumulated reward.
///
/// The color tag is cosmetic only; the algorithm never reads it.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub x: f64,
    pub y: f64,
    /// Heading in radians; 0 points along +x, angles grow clockwise in
    /// canvas coordinates (y grows downward).
    pub heading: f64,
    pub speed: f64,
    pub genome: Genome,
    pub fitness: f64,
    /// Terminal for the tick loop: once set, `step` is a no-op until the
    /// next generation respawns this vehicle.
    pub crashed: bool,
    pub distance_travelled: f64,
    pub color: [u8; 3],
}

impl Vehicle {
    /// `genome = None` samples a fresh random genome.
    pub fn new<R: Rng + ?Sized>(genome: Option<Genome>, x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            heading: -FRAC_PI_2,
            speed: INITIAL_SPEED,
            genome: genome.unwrap_or_else(|| Genome::sample(rng)),
            fitness: 0.0,
            crashed: false,
            distance_travelled: 0.0,
            color: random_color(rng),
        }
    }

    /// Advance one tick of simulated time against the given track.
    pub fn step<R: Rng + ?Sized>(&mut self, track: &Track, rng: &mut R) {
        if self.crashed {
            return;
        }

        // 1. Sensor point a fixed distance ahead along the current heading.
        let sensor_x = self.x + self.heading.cos() * SENSOR_DISTANCE;
        let sensor_y = self.y + self.heading.sin() * SENSOR_DISTANCE;

        // 2. Anything within combined radius of the sensor point?
        let obstacle_ahead = track.obstacles().iter().any(|obstacle| {
            let dx = sensor_x - obstacle.x;
            let dy = sensor_y - obstacle.y;
            (dx * dx + dy * dy).sqrt() <= obstacle.radius + VEHICLE_RADIUS
        });

        // 3. Steering. Evasion applies a single randomly chosen turn weight;
        // otherwise both weights apply unconditionally every tick.
        if obstacle_ahead {
            if rng.random_bool(0.5) {
                self.heading += self.genome.left_turn;
            } else {
                self.heading += self.genome.right_turn;
            }
        } else {
            self.heading += self.genome.left_turn + self.genome.right_turn;
        }

        // 4. Speed update, clamped at both ends.
        self.speed = (self.speed + self.genome.accelerate).clamp(0.0, MAX_SPEED);

        // 5. Euler position update, one time unit per tick.
        self.x += self.heading.cos() * self.speed;
        self.y += self.heading.sin() * self.speed;

        // 6. The crashing move stays applied positionally, but no reward
        // accrues on the crash tick.
        if !track.is_on_track(self.x, self.y) {
            self.crashed = true;
            return;
        }

        // 7. Fitness is cumulative displacement magnitude.
        self.distance_travelled += self.speed;
        self.fitness += self.speed;
    }

    /// Reset all transient state to a fresh spawn on the mid-band circle,
    /// heading tangentially forward around the ring. The genome survives.
    pub fn respawn_at<R: Rng + ?Sized>(&mut self, angle: f64, track: &Track, rng: &mut R) {
        let (x, y) = track.spawn_pose(angle);
        self.x = x;
        self.y = y;
        self.heading = angle + FRAC_PI_2;
        self.speed = INITIAL_SPEED;
        self.fitness = 0.0;
        self.crashed = false;
        self.distance_travelled = 0.0;
        self.color = random_color(rng);
    }

    pub fn color_hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            self.color[0], self.color[1], self.color[2]
        )
    }
}

pub(crate) fn random_color<R: Rng + ?Sized>(rng: &mut R) -> [u8; 3] {
    [rng.random(), rng.random(), rng.random()]
}
