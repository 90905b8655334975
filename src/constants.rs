/// DOM layout constants for the web front-end.
///
/// Stacking order inside the hero root, bottom to top: scope background,
/// lens ring, page title (authored markup), flying words.
pub const Z_SCOPE_BG: i32 = 10;
pub const Z_RING: i32 = 20;
pub const Z_TEXT: i32 = 30;
pub const Z_WORDS: i32 = 40;

// Background revealed through the lens, faded in once the cutout is placed
pub const SCOPE_BG_URL: &str = "mats/hero_bg.webp";
pub const SCOPE_OPACITY: f32 = 0.3;
pub const SCOPE_FADE_SEC: f32 = 0.5;

// Mount point and options attributes
pub const ATTR_MOUNT: &str = "data-kinetic-hero";
pub const ATTR_OPTIONS: &str = "data-hero-options";
pub const ATTR_MOUNTED: &str = "data-kinetic-hero-mounted";
pub const ATTR_PHASE: &str = "data-hero-phase";

// Class names on generated layers, for page stylesheets
pub const CLASS_SCOPE: &str = "kh-scope";
pub const CLASS_LENS: &str = "kh-lens";
pub const CLASS_RING: &str = "kh-ring";
pub const CLASS_WORDS: &str = "kh-words";
pub const CLASS_WORD: &str = "kh-word";

// Parked position for a word before its first sync
pub const OFFSCREEN_PARK_PX: f32 = -9999.0;
