//! SurfaceRenderer - paints the vol grid and owns its runtime registrations
//!
//! Lifecycle:
//! 1. `mount`: register a resize listener, request a frame, paint once
//! 2. `handle`: route resize and frame wakeups addressed to this renderer
//! 3. `unmount`: drop both registrations; later wakeups are ignored

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    AnomalyMarker, AnomalyPredicate, Canvas, ColorRamp, DislocationPredicate, Point, Rgba, Stroke,
    SurfaceGrid, SurfaceParams, TextStyle, ViewportGeometry,
};
use crate::runtime::{Handle, Runtime, Size, Wakeup};

/// Most guide line divisions accepted by config validation
pub const MAX_GRID_DIVISIONS: usize = 100;

/// Visual constants of the surface chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceStyle {
    /// Inset on every side, pixels
    pub margin: f64,
    /// Guide line divisions per direction
    pub grid_divisions: usize,
    /// Vol mapped to the top of the plot
    pub vol_ceiling: f64,
    pub grid_stroke: Stroke,
    pub axis_stroke: Stroke,
    pub label_color: Rgba,
    pub label_size: f64,
    /// Marker radius at the shortest maturity
    pub marker_base_radius: f64,
    /// Extra radius per maturity index
    pub marker_radius_step: f64,
    pub highlight_radius: f64,
    pub highlight_stroke: Stroke,
    pub annotation_color: Rgba,
    /// Annotation sits this far right of and above the ring centre
    pub annotation_offset: f64,
    pub ramp: ColorRamp,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        let accent = Rgba::rgb(239, 68, 68);
        Self {
            margin: 40.0,
            grid_divisions: 5,
            vol_ceiling: 0.30,
            grid_stroke: Stroke::new(0.5, Rgba::from_hex(0x374151)),
            axis_stroke: Stroke::new(2.0, Rgba::from_hex(0xd1d5db)),
            label_color: Rgba::from_hex(0xd1d5db),
            label_size: 12.0,
            marker_base_radius: 3.0,
            marker_radius_step: 0.2,
            highlight_radius: 10.0,
            highlight_stroke: Stroke::new(2.0, accent.with_opacity(0.8)),
            annotation_color: accent.with_opacity(0.9),
            annotation_offset: 15.0,
            ramp: ColorRamp::default(),
        }
    }
}

impl SurfaceStyle {
    pub fn marker_radius(&self, maturity_idx: usize) -> f64 {
        self.marker_base_radius + self.marker_radius_step * maturity_idx as f64
    }
}

/// Result of a paint attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    Painted { markers: usize, highlights: usize },
    /// No drawing surface was available
    NoCanvas,
    /// Container missing or not measurable
    NoContainer,
}

impl PaintOutcome {
    pub fn is_painted(&self) -> bool {
        matches!(self, PaintOutcome::Painted { .. })
    }
}

/// Paints the synthetic surface onto a [`Canvas`]
pub struct SurfaceRenderer {
    params: SurfaceParams,
    style: SurfaceStyle,
    markers: Vec<AnomalyMarker>,
    predicate: Box<dyn AnomalyPredicate>,
    geometry: Option<ViewportGeometry>,
    resize_listener: Option<Handle>,
    frame: Option<Handle>,
    idle_passes: u64,
}

impl Default for SurfaceRenderer {
    fn default() -> Self {
        Self::new(SurfaceParams::default(), SurfaceStyle::default())
    }
}

impl SurfaceRenderer {
    /// Renderer with the default marker and the dislocation detector
    pub fn new(params: SurfaceParams, style: SurfaceStyle) -> Self {
        Self {
            params,
            style,
            markers: vec![AnomalyMarker::default()],
            predicate: Box::new(DislocationPredicate::default()),
            geometry: None,
            resize_listener: None,
            frame: None,
            idle_passes: 0,
        }
    }

    pub fn with_markers(mut self, markers: Vec<AnomalyMarker>) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_predicate(mut self, predicate: impl AnomalyPredicate + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn set_predicate(&mut self, predicate: Box<dyn AnomalyPredicate>) {
        self.predicate = predicate;
    }

    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SurfaceParams) {
        self.params = params;
    }

    pub fn style(&self) -> &SurfaceStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: SurfaceStyle) {
        self.style = style;
    }

    pub fn markers(&self) -> &[AnomalyMarker] {
        &self.markers
    }

    /// Last measured geometry
    pub fn geometry(&self) -> Option<ViewportGeometry> {
        self.geometry
    }

    pub fn is_mounted(&self) -> bool {
        self.resize_listener.is_some()
    }

    /// Frame callbacks received without drawing
    pub fn idle_passes(&self) -> u64 {
        self.idle_passes
    }

    /// Markers the current predicate would highlight
    pub fn flagged_markers(&self) -> Vec<&AnomalyMarker> {
        let grid = SurfaceGrid::generate(&self.params);
        self.markers
            .iter()
            .filter(|m| self.predicate.is_anomalous(&grid, m))
            .collect()
    }

    /// Register with the runtime and paint once
    pub fn mount(
        &mut self,
        rt: &mut Runtime,
        container: Option<Size>,
        canvas: Option<&mut dyn Canvas>,
    ) -> PaintOutcome {
        if self.is_mounted() {
            self.unmount(rt);
        }
        self.resize_listener = Some(rt.add_resize_listener());
        self.frame = Some(rt.request_frame());
        info!("Surface renderer mounted");

        self.geometry = ViewportGeometry::measure(container, self.style.margin);
        self.repaint(canvas)
    }

    /// Route a runtime wakeup; `None` when it is not addressed to this renderer
    pub fn handle(
        &mut self,
        rt: &mut Runtime,
        wakeup: &Wakeup,
        canvas: Option<&mut dyn Canvas>,
    ) -> Option<PaintOutcome> {
        match wakeup {
            Wakeup::Resize { handle, size } if Some(*handle) == self.resize_listener => {
                Some(self.on_resize(*size, canvas))
            }
            Wakeup::Frame { handle, .. } if Some(*handle) == self.frame => {
                self.on_frame(rt);
                None
            }
            _ => None,
        }
    }

    /// Re-measure the container and repaint
    pub fn on_resize(&mut self, size: Size, canvas: Option<&mut dyn Canvas>) -> PaintOutcome {
        if !self.is_mounted() {
            return PaintOutcome::NoContainer;
        }
        self.geometry = ViewportGeometry::measure(Some(size), self.style.margin);
        self.repaint(canvas)
    }

    /// Idle pass; keeps the frame hook alive
    fn on_frame(&mut self, rt: &mut Runtime) {
        self.idle_passes += 1;
        self.frame = Some(rt.request_frame());
    }

    /// Drop every runtime registration
    pub fn unmount(&mut self, rt: &mut Runtime) {
        if let Some(handle) = self.resize_listener.take() {
            rt.remove_resize_listener(handle);
        }
        if let Some(handle) = self.frame.take() {
            rt.cancel_frame(handle);
        }
        info!(idle_passes = self.idle_passes, "Surface renderer unmounted");
    }

    /// Paint with the last measured geometry
    pub fn repaint(&self, canvas: Option<&mut dyn Canvas>) -> PaintOutcome {
        let Some(geometry) = self.geometry else {
            debug!("Surface paint skipped: container not measurable");
            return PaintOutcome::NoContainer;
        };
        let Some(canvas) = canvas else {
            debug!("Surface paint skipped: no canvas");
            return PaintOutcome::NoCanvas;
        };
        self.paint(&geometry, canvas)
    }

    /// Full paint: clear, grid, axes, labels, markers, highlights
    pub fn paint(&self, geometry: &ViewportGeometry, canvas: &mut dyn Canvas) -> PaintOutcome {
        let grid = SurfaceGrid::generate(&self.params);
        let style = &self.style;

        canvas.clear(geometry.width, geometry.height);

        for (from, to) in geometry.grid_lines(style.grid_divisions) {
            canvas.line(from, to, style.grid_stroke);
        }

        self.draw_axes(geometry, canvas);

        let points = grid.points();
        for point in &points {
            let center = geometry.project(point.strike_fraction, point.implied_vol, style.vol_ceiling);
            canvas.fill_circle(
                center,
                style.marker_radius(point.maturity_idx),
                style.ramp.color(point.implied_vol),
            );
        }

        let mut highlights = 0;
        for marker in &self.markers {
            if !self.predicate.is_anomalous(&grid, marker) {
                continue;
            }
            let Some(vol) = grid.vol(marker.strike_idx, marker.maturity_idx) else {
                continue;
            };
            let fraction = marker.strike_idx as f64 / grid.steps() as f64;
            let center = geometry.project(fraction, vol, style.vol_ceiling);

            canvas.stroke_circle(center, style.highlight_radius, style.highlight_stroke);
            canvas.text(
                center.offset(style.annotation_offset, -style.annotation_offset),
                &marker.label,
                &TextStyle::new(style.annotation_color, style.label_size).bold(),
            );
            highlights += 1;
        }

        debug!(
            width = geometry.width,
            height = geometry.height,
            markers = points.len(),
            highlights,
            "Surface painted"
        );

        PaintOutcome::Painted {
            markers: points.len(),
            highlights,
        }
    }

    fn draw_axes(&self, geometry: &ViewportGeometry, canvas: &mut dyn Canvas) {
        let style = &self.style;
        let stroke = style.axis_stroke;

        canvas.line(geometry.bottom_left(), geometry.bottom_right(), stroke);
        canvas.line(geometry.bottom_left(), geometry.top_left(), stroke);
        canvas.line(geometry.top_left(), geometry.bottom_right(), stroke);

        let label = TextStyle::new(style.label_color, style.label_size);
        let center = geometry.center();
        canvas.text(
            Point::new(center.x, geometry.height - 10.0),
            "Strike",
            &label,
        );
        canvas.text(
            Point::new(15.0, center.y),
            "Implied Volatility",
            &label.clone().rotated(-FRAC_PI_2),
        );
        canvas.text(
            center.offset(40.0, -40.0),
            "Maturity",
            &label.rotated(FRAC_PI_4),
        );
    }
}
