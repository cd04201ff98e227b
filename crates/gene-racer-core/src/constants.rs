/// Collision radius of every vehicle (world units). Shared by the track's
/// point-in-bounds check and the vehicle's forward sensor.
pub const VEHICLE_RADIUS: f64 = 10.0;

/// Radius given to obstacles placed through the default `add_obstacle` call.
pub const OBSTACLE_RADIUS: f64 = 10.0;

/// Distance ahead of a vehicle at which its single sensor samples.
pub const SENSOR_DISTANCE: f64 = 30.0;

/// Width of the drivable band between the inner and outer radius.
pub const TRACK_BAND_WIDTH: f64 = 100.0;

/// Margin kept between the outer radius and the nearest canvas edge.
pub const TRACK_MARGIN: f64 = 50.0;

/// Hard cap on vehicle speed (world units per tick).
pub const MAX_SPEED: f64 = 5.0;

/// Speed assigned at spawn and respawn.
pub const INITIAL_SPEED: f64 = 2.0;

/// Magnitude scale of a single mutation perturbation: delta ~ (U(0,1)-0.5) * this.
pub const MUTATION_PERTURBATION: f64 = 0.02;

/// Symmetric clamp bound for the two turn genes.
pub const TURN_LIMIT: f64 = 0.05;

/// Symmetric clamp bound for the accelerate gene.
pub const ACCELERATE_LIMIT: f64 = 0.2;

/// Scale for freshly sampled accelerate genes: U(0,1) * this.
pub const ACCELERATE_INIT_SCALE: f64 = 0.1;

/// Scale for freshly sampled turn genes: (U(0,1)-0.5) * this.
pub const TURN_INIT_SCALE: f64 = 0.05;

/// Fitness bonus applied by a manual boost from the driving UI.
pub const FITNESS_BOOST: f64 = 50.0;
