//! Default value functions for serde deserialization.

pub fn grid_size() -> f64 {
    0.3
}

pub fn min_floor_height() -> f64 {
    1.5
}

pub fn slab_tolerance() -> f64 {
    0.3
}

pub fn ceiling_clearance() -> f64 {
    0.5
}

pub fn stair_headroom() -> f64 {
    0.3
}

pub fn padding() -> usize {
    1
}

pub fn enabled() -> bool {
    true
}

pub fn door_cost() -> f64 {
    5.0
}

pub fn stair_cost() -> f64 {
    1.25
}

pub fn wall_buffer_cost() -> f64 {
    10.0
}

pub fn floor_change_cost() -> f64 {
    3.0
}
