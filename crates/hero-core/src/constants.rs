// Tuning constants for the kinetic hero.
//
// Lengths are CSS pixels, times are seconds, velocities are px/s. The physics
// world uses document coordinates with y pointing down.

// Lens geometry
pub const LENS_DIAMETER_VMIN_DESKTOP: f32 = 50.0;
pub const LENS_DIAMETER_VMIN_MOBILE: f32 = 65.0;
pub const LENS_BORDER_PX_DESKTOP: f32 = 20.0;
pub const LENS_BORDER_PX_MOBILE: f32 = 12.0;
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0; // viewport width below this is mobile

// Default anchor offsets from the hero centre (room for the headline on desktop)
pub const DEFAULT_OFFSET_DESKTOP: [f32; 2] = [-300.0, 0.0];
pub const DEFAULT_OFFSET_MOBILE: [f32; 2] = [0.0, -60.0];

// Exponential smoothing factor applied per frame and per axis
pub const FOLLOW_LERP: f32 = 0.2;

// Pulse: scale = 1 + exp(-DECAY t) sin(FREQ t) * AMPLITUDE while t < WINDOW
pub const PULSE_WINDOW_SEC: f64 = 1.0;
pub const PULSE_AMPLITUDE: f32 = 0.5;
pub const PULSE_DECAY: f32 = 5.0;
pub const PULSE_FREQ: f32 = 3.0 * std::f32::consts::PI;

// Glow sources orbiting the lens perimeter
pub const GLOW_BASE_AMPLITUDE_PX: f32 = 15.0;
pub const GLOW_BURST_AMPLITUDE_PX: f32 = 80.0;
pub const GLOW_BASE_BLUR_PX: f32 = 35.0;
pub const GLOW_BURST_BLUR_PX: f32 = 100.0;
pub const GLOW_BURST_DECAY: f32 = 2.0;
pub const GLOW_SPEED: f32 = 0.7;

// Phase windows measured from the last trigger
pub const BURST_DURATION_SEC: f64 = 1.2;
pub const AFTER_DURATION_SEC: f64 = 4.0;

// Emission
pub const MIN_TRIGGER_GAP_SEC: f64 = 1.0;
pub const SPAWN_COUNT_MIN: usize = 2;
pub const SPAWN_COUNT_MAX: usize = 4;
pub const PARTICLE_TTL_SEC: f64 = 15.0;
pub const CLEANUP_MARGIN_PX: f32 = 300.0;

// Initial kick given to a freshly spawned word
pub const LAUNCH_UP_SPEED: f32 = 220.0;
pub const LAUNCH_SIDE_SPEED: f32 = 330.0; // full range, centred on zero
pub const LAUNCH_SPIN: f32 = 6.0; // rad/s, full range, centred on zero

// Compound body made of one rounded box per character
pub const CHAR_SIZE_PX: f32 = 40.0;
pub const CHAR_WIDTH_RATIO: f32 = 0.9;
pub const CHAR_ADVANCE_RATIO: f32 = 0.45;
pub const CHAR_CHAMFER_PX: f32 = 3.0;
pub const BODY_RESTITUTION: f32 = 0.6;
pub const BODY_FRICTION: f32 = 0.05;
pub const BODY_DENSITY: f32 = 0.01;
pub const BODY_LINEAR_DAMPING: f32 = 0.6; // air friction
pub const GRAVITY_PX_PER_SEC2: f32 = 1200.0;
pub const MAX_STEP_SEC: f32 = 1.0 / 30.0;

// Invisible ground plane below the hero section
pub const GROUND_HALF_HEIGHT_PX: f32 = 50.0;

// Autonomous re-trigger
pub const AUTO_BLAST_MIN_SEC: f64 = 1.4;
pub const AUTO_BLAST_MAX_SEC: f64 = 4.8;

// Gusts
pub const GUST_MIN_SEC: f64 = 8.0;
pub const GUST_MAX_SEC: f64 = 16.0;
pub const GUST_DURATION_SEC: f64 = 1.5;
pub const GUST_STRENGTH: f32 = 1800.0; // lateral px/s
pub const GUST_LIFT: f32 = 160.0; // upward px/s
pub const GUST_LOW_LIFT_MULTIPLIER: f32 = 1.6;
pub const GUST_LIFT_JITTER: f32 = 25.0; // full range, centred on zero
pub const GUST_TARGET_Y_RATIO: f32 = 0.75; // of viewport height, from the top
pub const GUST_SPEED_THRESHOLD: f32 = 72.0;
pub const GUST_DAMPING_FLOOR: f32 = 1.2;
pub const GUST_SPIN_MIN: f32 = 1.2; // rad/s
pub const GUST_SPIN_SPAN: f32 = 1.8; // rad/s
