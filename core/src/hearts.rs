use crate::config::{HeartRainConfig, Range};

/// Source of uniform samples in [0, 1).
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<F: FnMut() -> f64> UnitSource for F {
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartStyle {
    pub left_percent: f64,
    pub size_px: f64,
    pub fall_secs: f64,
}

impl HeartStyle {
    pub fn sample(config: &HeartRainConfig, source: &mut impl UnitSource) -> Self {
        Self {
            left_percent: sample_range(&config.left_percent, source),
            size_px: sample_range(&config.size_px, source),
            fall_secs: sample_range(&config.fall_secs, source),
        }
    }

    pub fn left_css(&self) -> String {
        format!("{}%", self.left_percent)
    }

    pub fn size_css(&self) -> String {
        format!("{}px", self.size_px)
    }

    pub fn duration_css(&self) -> String {
        format!("{}s", self.fall_secs)
    }
}

fn sample_range(range: &Range, source: &mut impl UnitSource) -> f64 {
    range.lerp(source.next_unit())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeartRainPlan {
    pub interval_ms: u32,
    pub duration_ms: u32,
}

impl HeartRainPlan {
    pub fn from_config(config: &HeartRainConfig) -> Self {
        Self {
            interval_ms: config.interval_ms.max(1),
            duration_ms: config.duration_ms,
        }
    }

    /// Interval ticks that fire before the stop timeout.
    pub fn spawn_budget(&self) -> u32 {
        self.duration_ms / self.interval_ms.max(1)
    }
}

/// One activation of the rain. Hands out a style per interval tick until the
/// budget runs out.
#[derive(Clone, Debug)]
pub struct HeartRain {
    config: HeartRainConfig,
    plan: HeartRainPlan,
    spawned: u32,
}

impl HeartRain {
    pub fn new(config: HeartRainConfig) -> Self {
        let plan = HeartRainPlan::from_config(&config);
        Self {
            config,
            plan,
            spawned: 0,
        }
    }

    pub fn plan(&self) -> HeartRainPlan {
        self.plan
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn is_exhausted(&self) -> bool {
        self.spawned >= self.plan.spawn_budget()
    }

    pub fn next_heart(&mut self, source: &mut impl UnitSource) -> Option<HeartStyle> {
        if self.is_exhausted() {
            return None;
        }
        self.spawned += 1;
        Some(HeartStyle::sample(&self.config, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_spawns_26() {
        let plan = HeartRainPlan::from_config(&HeartRainConfig::default());
        assert_eq!(plan.spawn_budget(), 26);
    }

    #[test]
    fn rain_stops_after_budget() {
        let mut rain = HeartRain::new(HeartRainConfig::default());
        let mut source = || 0.5;
        let mut count = 0;
        for _ in 0..100 {
            if rain.next_heart(&mut source).is_some() {
                count += 1;
            }
        }
        assert_eq!(count, 26);
        assert!(rain.is_exhausted());
    }

    #[test]
    fn style_spans_configured_ranges() {
        let config = HeartRainConfig::default();
        let mut low = || 0.0;
        let style = HeartStyle::sample(&config, &mut low);
        assert_eq!(style.left_percent, 0.0);
        assert_eq!(style.size_px, 16.0);
        assert_eq!(style.fall_secs, 3.0);

        let mut high = || 1.0;
        let style = HeartStyle::sample(&config, &mut high);
        assert_eq!(style.left_percent, 100.0);
        assert_eq!(style.size_px, 34.0);
        assert_eq!(style.fall_secs, 5.0);
        assert_eq!(style.size_css(), "34px");
        assert_eq!(style.duration_css(), "5s");
    }
}
