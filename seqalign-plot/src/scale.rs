//! Plot geometry: world-to-pixel mapping, tick placement and bp labels.

use crate::Viewport;

/// Inner plot rectangle in pixels; world y grows upwards
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlotArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub viewport: Viewport,
}

impl PlotArea {
    pub fn new(width: u32, height: u32, margins: [f32; 4], viewport: Viewport) -> Self {
        let [left, right, top, bottom] = margins;
        let (w, h) = (width as f32, height as f32);
        Self {
            left: left.min(w / 2.0),
            right: (w - right).max(w / 2.0),
            top: top.min(h / 2.0),
            bottom: (h - bottom).max(h / 2.0),
            viewport,
        }
    }

    pub fn x(&self, world_x: f64) -> f32 {
        let norm = ((world_x - self.viewport.x_min) / self.viewport.width()) as f32;
        self.left + norm * (self.right - self.left)
    }

    pub fn y(&self, world_y: f64) -> f32 {
        let norm = ((world_y - self.viewport.y_min) / self.viewport.height()) as f32;
        self.bottom - norm * (self.bottom - self.top)
    }
}

/// Portion of `y = slope * x + offset` that lies inside the viewport
pub(crate) fn clip_line(slope: f64, offset: f64, vp: &Viewport) -> Option<((f64, f64), (f64, f64))> {
    let (lo, hi) = if slope == 0.0 {
        if offset < vp.y_min || offset > vp.y_max {
            return None;
        }
        (vp.x_min, vp.x_max)
    } else {
        let xa = (vp.y_min - offset) / slope;
        let xb = (vp.y_max - offset) / slope;
        (vp.x_min.max(xa.min(xb)), vp.x_max.min(xa.max(xb)))
    };

    if !(lo <= hi) {
        return None;
    }
    Some(((lo, slope * lo + offset), (hi, slope * hi + offset)))
}

/// Format a basepair length in human-friendly units
pub fn format_bp(bp: f64) -> String {
    if bp >= 1e9 {
        format!("{:.2} Gb", bp / 1e9)
    } else if bp >= 1e6 {
        format!("{:.2} Mb", bp / 1e6)
    } else if bp >= 1e3 {
        format!("{:.2} kb", bp / 1e3)
    } else {
        format!("{:.0} bp", bp)
    }
}

/// Round up to 2, 5 or 10 times a power of ten
pub fn nice_round_length(x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let mant = x / base;
    let nice = if mant < 2.0 {
        2.0
    } else if mant < 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Tick positions in world units, roughly `desired` of them
pub fn nice_ticks_world(min_world: f64, max_world: f64, desired: usize) -> Vec<f64> {
    let span = (max_world - min_world).max(1.0);
    let step = nice_round_length(span / desired.max(1) as f64);
    let mut ticks = Vec::new();
    let mut v = (min_world / step).ceil() * step;
    while v <= max_world {
        ticks.push(v);
        v += step;
    }
    ticks
}

/// `#RRGGBB` to bytes
pub(crate) fn parse_hex_rgb(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    Some([
        u8::from_str_radix(&hex[0..2], 16).ok()?,
        u8::from_str_radix(&hex[2..4], 16).ok()?,
        u8::from_str_radix(&hex[4..6], 16).ok()?,
    ])
}
