//! Chart render surfaces
//!
//! A session never looks up render targets by itself. The caller hands it a
//! [`ChartSurface`]; the session mounts each chart spec on an explicit
//! [`ChartTarget`] and keeps the returned [`ChartHandle`] until it releases it.

use std::collections::HashMap;

use serde::Serialize;
use shared::ChartSpec;
use thiserror::Error;

/// Where a chart is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartTarget {
    TemperatureGdd,
    Humidity,
}

impl ChartTarget {
    pub const ALL: [ChartTarget; 2] = [ChartTarget::TemperatureGdd, ChartTarget::Humidity];

    /// Element id a browser host renders this target into
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartTarget::TemperatureGdd => "temperature-gdd-chart",
            ChartTarget::Humidity => "humidity-chart",
        }
    }
}

/// A live chart on a surface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartHandle {
    pub target: ChartTarget,
    pub id: u64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Render target {} already holds a live chart", .0.element_id())]
    TargetOccupied(ChartTarget),

    #[error("Unknown chart handle {0}")]
    UnknownHandle(u64),

    #[error("Render surface unavailable: {0}")]
    Unavailable(String),
}

/// Owner of the render resources charts are drawn with
pub trait ChartSurface {
    /// Draw `spec` on `target`. A target holds at most one live chart.
    fn mount(&mut self, target: ChartTarget, spec: &ChartSpec) -> Result<ChartHandle, RenderError>;

    /// Dispose of a chart previously returned by [`ChartSurface::mount`]
    fn release(&mut self, handle: ChartHandle) -> Result<(), RenderError>;
}

/// In-memory surface that keeps the mounted specs instead of drawing them
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    live: HashMap<ChartTarget, (u64, ChartSpec)>,
    next_id: u64,
    mounted: usize,
    released: usize,
    unavailable: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose every mount fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Charts currently alive
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Spec of the live chart on `target`
    pub fn mounted(&self, target: ChartTarget) -> Option<&ChartSpec> {
        self.live.get(&target).map(|(_, spec)| spec)
    }

    /// Total successful mounts over the surface's lifetime
    pub fn mount_count(&self) -> usize {
        self.mounted
    }

    /// Total releases over the surface's lifetime
    pub fn released_count(&self) -> usize {
        self.released
    }
}

impl ChartSurface for HeadlessSurface {
    fn mount(&mut self, target: ChartTarget, spec: &ChartSpec) -> Result<ChartHandle, RenderError> {
        if self.unavailable {
            return Err(RenderError::Unavailable("headless surface disabled".into()));
        }
        if self.live.contains_key(&target) {
            return Err(RenderError::TargetOccupied(target));
        }

        self.next_id += 1;
        self.mounted += 1;
        self.live.insert(target, (self.next_id, spec.clone()));

        Ok(ChartHandle {
            target,
            id: self.next_id,
        })
    }

    fn release(&mut self, handle: ChartHandle) -> Result<(), RenderError> {
        match self.live.get(&handle.target) {
            Some((id, _)) if *id == handle.id => {
                self.live.remove(&handle.target);
                self.released += 1;
                Ok(())
            }
            _ => Err(RenderError::UnknownHandle(handle.id)),
        }
    }
}
