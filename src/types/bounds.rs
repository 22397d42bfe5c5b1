/// Axis-aligned lat/long box around the points of a GPX track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRectangle {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingRectangle {
    /// Empty rectangle; the first `extend` call snaps it to that point
    pub fn new() -> Self {
        Self {
            min_lat: f64::INFINITY,
            min_lon: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            max_lon: f64::NEG_INFINITY,
        }
    }

    pub fn extend(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lat = self.max_lat.max(lat);
        self.max_lon = self.max_lon.max(lon);
    }

    /// True until at least one point has been added
    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.min_lat <= lat && lat <= self.max_lat && self.min_lon <= lon && lon <= self.max_lon
    }

    /// Extrema to write into a document.
    ///
    /// An empty rectangle has infinite sentinels, which GPX readers reject,
    /// so it is written as all zeros instead.
    pub fn finalized(&self) -> Self {
        if self.is_empty() {
            Self {
                min_lat: 0.0,
                min_lon: 0.0,
                max_lat: 0.0,
                max_lon: 0.0,
            }
        } else {
            *self
        }
    }
}

impl Default for BoundingRectangle {
    fn default() -> Self {
        Self::new()
    }
}
