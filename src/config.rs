use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use anyhow::{Context, Result};
use log::warn;
use super::layout::Layout;
use super::noise_field::{NoiseField, ScaleFactors};
use super::offsets::{FieldId, OffsetRegistry};
use super::session::{ClickTimer, FieldPlan, PointSource, Session};

pub struct ISketch {
    pub panel: f64,
    pub label_height: f64,
    pub gap: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub perlin_seed: u32,
    pub rng_seed: Option<u64>,
    pub double_click_ms: u64,
    pub snapshot_path: PathBuf,
}

impl Default for ISketch {
    fn default() -> Self {
        Self {
            panel: 200.0,
            label_height: 20.0,
            gap: 10.0,
            scale_x: 0.015,
            scale_y: 0.02,
            perlin_seed: 1232,
            rng_seed: None,
            double_click_ms: 300,
            snapshot_path: PathBuf::from("noise_sketch.png"),
        }
    }
}

impl ISketch {
    pub fn new() -> Self {
        Default::default()
    }

    /// Positional arguments after the program name: `[panel] [gap] [perlin_seed] [rng_seed]`.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::new();
        let args: Vec<S> = args.into_iter().collect();
        if let Some(a) = args.first() {
            cfg.panel = parse_arg(a.as_ref(), "panel size")?;
        }
        if let Some(a) = args.get(1) {
            cfg.gap = parse_arg(a.as_ref(), "gap")?;
        }
        if let Some(a) = args.get(2) {
            cfg.perlin_seed = parse_arg(a.as_ref(), "perlin seed")?;
        }
        if let Some(a) = args.get(3) {
            cfg.rng_seed = Some(parse_arg(a.as_ref(), "rng seed")?);
        }
        if args.len() > 4 {
            warn!("ignoring {} extra argument(s)", args.len() - 4);
        }
        Ok(cfg)
    }

    pub fn scale(&self) -> Result<ScaleFactors> {
        Ok(ScaleFactors::new(self.scale_x, self.scale_y)?)
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.panel, self.label_height)
    }

    pub fn click_timer(&self) -> ClickTimer {
        ClickTimer::new(Duration::from_millis(self.double_click_ms))
    }

    /// Builds the two-field session: the reflected field samples the capture
    /// panel and displaces the stroke, the independent one samples its own
    /// panel and displaces its grid centers.
    pub fn session(&self, layout: &Layout) -> Result<Session> {
        let plans = vec![
            FieldPlan {
                field: FieldId::REFLECTED,
                grid: layout.grid_for(&layout.capture, self.gap)?,
                source: PointSource::Stroke,
            },
            FieldPlan {
                field: FieldId::INDEPENDENT,
                grid: layout.grid_for(&layout.noise_independent, self.gap)?,
                source: PointSource::GridCenters,
            },
        ];
        let offsets = match self.rng_seed {
            Some(seed) => OffsetRegistry::seeded(seed),
            None => OffsetRegistry::new(),
        };
        Ok(Session::new(
            NoiseField::new(self.perlin_seed),
            self.scale()?,
            layout.capture.rect,
            plans,
            offsets,
        ))
    }
}

fn parse_arg<T>(arg: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    arg.parse().with_context(|| format!("bad {what} {arg:?}"))
}
