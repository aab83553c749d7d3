// All values are per-tick at 60 Hz unless noted. The y axis points up.

// Clock
pub const TICK_RATE: u32 = 60;
pub const COUNTDOWN_TICKS: u32 = 180;
pub const ROUND_SECONDS: u32 = 60;

// Physics
pub const GRAVITY: f64 = 0.6;
pub const RUN_SPEED: f64 = 15.0;
pub const JUMP_VELOCITY: f64 = 14.0;
pub const SLOW_MOTION_FACTOR: f64 = 0.5;
/// Tolerance band for one-way platform landings.
pub const PLATFORM_SNAP: f64 = 5.0;
/// Extra gap kept between a fighter and the level edge.
pub const EDGE_MARGIN: f64 = 10.0;

// Fighter body
pub const FIGHTER_WIDTH: f64 = 60.0;
pub const FIGHTER_HEIGHT: f64 = 120.0;
pub const MAX_HEALTH: i32 = 100;

// Attacks
pub const ATTACK_TICKS: u32 = 10;
pub const MISS_CHECK_TICK: u32 = 8;
pub const HIT_CHECK_TICK: u32 = 5;
pub const BASE_DAMAGE: i32 = 7;
pub const HITBOX_WIDTH: f64 = 60.0;
pub const HITBOX_HEIGHT: f64 = 60.0;
/// Distance from the attacker's center to the hitbox center.
pub const HITBOX_REACH: f64 = 50.0;
pub const LUNGE_STEP: f64 = 10.0;
pub const PUNCH_KNOCKBACK: (f64, f64) = (16.0, 6.0);
pub const KICK_KNOCKBACK: (f64, f64) = (12.0, 10.0);

// Combos
pub const COMBO_WINDOW_TICKS: u32 = 60;
pub const COMBO_STEP: f64 = 0.15;

// Block
pub const BLOCK_TICKS: u32 = 30;
pub const PARRY_TICKS: u32 = 12;
pub const BLOCK_COOLDOWN_TICKS: u32 = 20;
pub const BLOCK_STUN_TICKS: u32 = 5;
pub const BLOCK_DAMAGE_FACTOR: f64 = 0.5;

// Dash
pub const DASH_TICKS: u32 = 15;
pub const DASH_COOLDOWN_TICKS: u32 = 300;
pub const DASH_SPEED: f64 = 25.0;

// Slide
pub const SLIDE_TICKS: u32 = 8;

// Reactions
pub const HIT_TICKS: u32 = 12;
pub const HIT_FRICTION: f64 = 0.85;
pub const STUN_TICKS: u32 = 120;

// Impact emphasis
pub const HIT_STOP_LANDED: u32 = 3;
pub const HIT_STOP_PARRY: u32 = 6;
pub const HIT_STOP_FATAL: u32 = 12;
pub const SLOW_MOTION_TICKS: u32 = 90;

// Fatality
pub const FATAL_LAUNCH_TICKS: u32 = 12;
pub const FATAL_LAUNCH_GRAVITY: f64 = 0.7;
pub const FATAL_LAUNCH_CARRY: f64 = 0.8;
pub const FATAL_FALL_GRAVITY: f64 = 1.3;
pub const FATAL_FALL_CARRY: f64 = 0.6;
pub const FATAL_DAMPING: f64 = 0.4;
pub const FATAL_REBOUND_VY: f64 = 8.0;
pub const FATAL_GROUND_PAUSE: u32 = 8;
pub const FATAL_BOUNCE_DECAY: f64 = 0.4;
pub const BOUNCE_HEIGHTS: [f64; 5] = [12.0, 7.0, 4.0, 2.0, 1.0];
