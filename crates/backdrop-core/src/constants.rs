//! Tuning constants for the particle backdrop
//!
//! Values are in world units (the unit sphere has radius 1.0) unless noted.
//! Most of them feed the `Default` impls in [`crate::config`].

/// Vertical field of view of the camera, in degrees
pub const CAMERA_FOV_DEGREES: f32 = 60.0;

/// Near clipping plane
pub const CAMERA_NEAR: f32 = 0.1;

/// Far clipping plane
pub const CAMERA_FAR: f32 = 100.0;

/// Distance of the camera from the origin along +Z
pub const CAMERA_DISTANCE: f32 = 4.0;

/// Fraction of the sphere diameter that stays visible on screen
pub const VISIBLE_WIDTH_FRACTION: f32 = 0.65;

/// How far (in radii) the sphere's left edge is pushed past the screen edge
pub const LEFT_EDGE_OVERHANG: f32 = 0.1;

// Population sizes
pub const SPHERE_POINT_COUNT: usize = 18_000;
pub const TRAIL_POINT_COUNT: usize = 6_000;
pub const AMBIENT_POINT_COUNT: usize = 3_000;

/// Total radial jitter band of sphere points (±7.5%)
pub const SPHERE_RADIUS_JITTER: f32 = 0.15;

/// Fixed time step added to the elapsed-time uniform on every tick
pub const TIME_STEP: f32 = 0.003;

// Per-tick rotation deltas (radians). Front spins the other way for parallax.
pub const BACK_ROTATION_STEP: [f32; 2] = [0.0005, 0.0008];
pub const FRONT_ROTATION_STEP: [f32; 2] = [-0.0004, -0.0006];

// Scale ratios relative to the back sphere radius
pub const BACK_SCALE_RATIO: f32 = 1.0;
pub const FRONT_SCALE_RATIO: f32 = 0.92;
pub const TRAIL_SCALE_RATIO: f32 = 1.0;
pub const AMBIENT_SCALE_RATIO: f32 = 0.8;

// Depth of each layer behind the page content
pub const BACK_DEPTH: f32 = -1.0;
pub const FRONT_DEPTH: f32 = -2.0;
pub const TRAIL_DEPTH: f32 = -1.5;
pub const AMBIENT_DEPTH: f32 = -3.0;

// Scroll fade band, as fractions of the viewport height
pub const FADE_START_FRACTION: f32 = 0.3;
pub const FADE_END_FRACTION: f32 = 0.8;

/// Opacity floor once the fade band has been scrolled past
pub const MIN_SCROLL_OPACITY: f32 = 0.65;

// Opacity multipliers applied on top of the scroll opacity
pub const BACK_OPACITY_MULTIPLIER: f32 = 1.0;
pub const FRONT_OPACITY_MULTIPLIER: f32 = 0.5;
pub const TRAIL_OPACITY_MULTIPLIER: f32 = 0.7;
pub const AMBIENT_OPACITY_MULTIPLIER: f32 = 0.3;

/// Scroll distance (logical pixels) over which the zoom ramps up
pub const MAX_ZOOM_SCROLL: f32 = 1000.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 1.4;

/// Pixels scrolled per mouse-wheel line
pub const PIXELS_PER_SCROLL_LINE: f32 = 40.0;

/// Height of the virtual page, in viewports
pub const PAGE_HEIGHT_VIEWPORTS: f32 = 5.0;

// Shader cycle lengths (must match shaders/points.wgsl)
pub const TRAIL_CYCLE: f32 = 500.0;
pub const TRAIL_TIME_SCALE: f32 = 50.0;
pub const AMBIENT_CYCLE: f32 = 1200.0;
pub const AMBIENT_TIME_SCALE: f32 = 30.0;
